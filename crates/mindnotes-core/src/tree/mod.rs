// Dweve Mindnotes - Incremental Outline Parser
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The node tree and its line index.
//!
//! [`NodeTree`] owns every [`Node`] by id and keeps one slot per text line
//! (`nodes_at_line`). A slot holds the node whose head or body covers the
//! line; a line is a *head line* when its slot differs from the slot above.
//!
//! Structural changes are driven purely by indentation:
//!
//! ```text
//! root            placement relative to the node on the line above:
//!   child           deeper  -> child of that node
//!   sibling         equal   -> next sibling of that node
//! other             shallower -> walk up parents to an equal level
//! ```
//!
//! Every relinking operation plans first and mutates second, so a returned
//! [`TreeError`] always leaves the tree untouched.

mod node;

pub use node::{Node, NodeId};

use crate::error::{Fault, TreeError};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Where a new or moved head attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Root,
    Sibling(NodeId),
    Child(NodeId),
}

/// Result of [`NodeTree::insert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub id: NodeId,
    /// Existing nodes that now have the inserted node (or one of its new
    /// descendants) as parent, in document order.
    pub transferred: Vec<NodeId>,
}

/// Result of [`NodeTree::reparent`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reparenting {
    pub parent_changed: bool,
    /// Other nodes whose parent changed as a consequence, in document order.
    pub transferred: Vec<NodeId>,
}

/// Result of [`NodeTree::remove`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    /// Number of line slots that no longer reference the removed node.
    pub unbound_lines: usize,
    /// Children of the removed node that were handed to a new parent.
    pub rehomed: Vec<NodeId>,
}

/// Id-keyed node table plus the line -> node index.
#[derive(Debug, Clone)]
pub struct NodeTree {
    nodes: BTreeMap<NodeId, Node>,
    nodes_at_line: Vec<Option<NodeId>>,
    next_id: u64,
    max_nodes: usize,
}

impl Default for NodeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeTree {
    /// Create an empty tree with no lines.
    pub fn new() -> Self {
        Self::with_max_nodes(usize::MAX)
    }

    /// Create an empty tree that refuses to hold more than `max_nodes` nodes.
    pub fn with_max_nodes(max_nodes: usize) -> Self {
        Self {
            nodes: BTreeMap::new(),
            nodes_at_line: Vec::new(),
            next_id: 1,
            max_nodes,
        }
    }

    // ==================== queries ====================

    /// Number of line slots.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.nodes_at_line.len()
    }

    /// Number of live nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// All live nodes ordered by id.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// Node whose head or body covers `line`.
    pub fn node_at_line(&self, line: usize) -> Option<NodeId> {
        self.nodes_at_line.get(line).copied().flatten()
    }

    /// The line index itself.
    pub fn line_slots(&self) -> &[Option<NodeId>] {
        &self.nodes_at_line
    }

    /// Node bound to the line above `line`.
    pub fn previous_node(&self, line: usize) -> Option<NodeId> {
        line.checked_sub(1).and_then(|above| self.node_at_line(above))
    }

    /// Node whose head sits on `line`, if any.
    pub fn head_at(&self, line: usize) -> Option<NodeId> {
        let id = self.node_at_line(line)?;
        (self.previous_node(line) != Some(id)).then_some(id)
    }

    /// Head line of `id`.
    pub fn head_line(&self, id: NodeId) -> Option<usize> {
        self.nodes_at_line.iter().position(|slot| *slot == Some(id))
    }

    /// Head lines in document order.
    pub fn heads(&self) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        (0..self.nodes_at_line.len()).filter_map(move |line| self.head_at(line).map(|id| (line, id)))
    }

    /// Indentation of the node bound to the line above `line` (0 if none).
    pub fn indentation_before(&self, line: usize) -> usize {
        self.previous_node(line)
            .and_then(|id| self.nodes.get(&id))
            .map_or(0, |node| node.indentation)
    }

    /// Children of `id` in document order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.children_of(Some(id))
            .into_iter()
            .map(|(_, child)| child)
            .collect()
    }

    /// Root nodes in document order.
    pub fn roots(&self) -> Vec<NodeId> {
        self.children_of(None)
            .into_iter()
            .map(|(_, root)| root)
            .collect()
    }

    fn children_of(&self, parent: Option<NodeId>) -> Vec<(usize, NodeId)> {
        self.heads()
            .filter(|(_, id)| self.nodes.get(id).map_or(false, |node| node.parent == parent))
            .collect()
    }

    fn get(&self, id: NodeId) -> Result<&Node, Fault> {
        self.nodes.get(&id).ok_or(Fault::UnknownNode(id))
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, Fault> {
        self.nodes.get_mut(&id).ok_or(Fault::UnknownNode(id))
    }

    fn check_line(&self, line: usize) -> Result<(), Fault> {
        if line < self.nodes_at_line.len() {
            Ok(())
        } else {
            Err(Fault::LineOutOfRange {
                line,
                line_count: self.nodes_at_line.len(),
            })
        }
    }

    // ==================== line slots ====================

    /// Insert a line slot at `index`.
    ///
    /// The new slot inherits the node of the line above it until the line
    /// itself is interpreted.
    pub fn insert_line(&mut self, index: usize) -> Result<(), Fault> {
        if index > self.nodes_at_line.len() {
            return Err(Fault::LineOutOfRange {
                line: index,
                line_count: self.nodes_at_line.len(),
            });
        }
        let inherited = self.previous_node(index);
        self.nodes_at_line.insert(index, inherited);
        Ok(())
    }

    /// Append a line slot at the end of the document.
    pub(crate) fn push_line(&mut self) {
        let inherited = self.nodes_at_line.last().copied().flatten();
        self.nodes_at_line.push(inherited);
    }

    /// Remove the line slot at `index`. The slot must no longer be a head.
    pub fn remove_line(&mut self, index: usize) -> Result<(), Fault> {
        self.check_line(index)?;
        if let Some(head) = self.head_at(index) {
            return Err(Fault::LineAlreadyBound {
                line: index,
                node: head,
            });
        }
        self.nodes_at_line.remove(index);
        Ok(())
    }

    /// Fill an unbound slot from the line above it.
    pub(crate) fn settle_line(&mut self, line: usize) -> Result<(), Fault> {
        self.check_line(line)?;
        if self.nodes_at_line[line].is_none() {
            self.nodes_at_line[line] = self.previous_node(line);
        }
        Ok(())
    }

    // ==================== mutation ====================

    /// Rewrite the head text of `id`.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<(), Fault> {
        self.get_mut(id)?.head_text = text.into();
        Ok(())
    }

    /// Record an attribute on `id`.
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), Fault> {
        self.get_mut(id)?.attributes.insert(name.into(), value.into());
        Ok(())
    }

    /// Replace every attribute of `id`.
    pub fn set_attributes(
        &mut self,
        id: NodeId,
        attributes: BTreeMap<String, String>,
    ) -> Result<(), Fault> {
        self.get_mut(id)?.attributes = attributes;
        Ok(())
    }

    /// Create a node whose head is `line`.
    ///
    /// `line` must not already carry a head. The node attaches relative to the
    /// node on the line above; following heads that are indented deeper than
    /// the new node but belonged to an outer node are transferred to it.
    pub fn insert(
        &mut self,
        line: usize,
        indentation: usize,
        text: &str,
    ) -> Result<Insertion, TreeError> {
        self.check_line(line)?;
        let previous = self.previous_node(line);
        if let Some(bound) = self.nodes_at_line[line] {
            if Some(bound) != previous {
                return Err(Fault::LineAlreadyBound { line, node: bound }.into());
            }
        }

        let placement = self.plan(line, indentation)?;
        if self.nodes.len() >= self.max_nodes {
            return Err(TreeError::NodeLimit {
                max: self.max_nodes,
            });
        }
        let id = NodeId(self.next_id);
        if self.nodes.contains_key(&id) {
            return Err(Fault::DuplicateNodeId(id).into());
        }
        self.next_id += 1;

        let parent = self.placement_parent(placement)?;
        let mut node = Node::new(id, indentation, text);
        node.parent = parent;
        self.nodes.insert(id, node);

        // the new head takes over the rest of the body it was typed into
        self.nodes_at_line[line] = Some(id);
        for slot in self.nodes_at_line[line + 1..].iter_mut() {
            if *slot != previous {
                break;
            }
            *slot = Some(id);
        }

        let mut touched = BTreeSet::new();
        let (transferred, boundary) = self.adopt_following(id, line, &mut touched)?;
        let predecessor = match placement {
            Placement::Sibling(sibling) => Some(sibling),
            Placement::Root | Placement::Child(_) => None,
        };
        let successor = match boundary {
            Some(next) => {
                let next_node = self.get(next)?;
                (next_node.indentation == indentation && next_node.parent == parent)
                    .then_some(next)
            }
            None => None,
        };
        self.splice(id, predecessor, successor)?;
        if !transferred.is_empty() {
            touched.insert(Some(id));
        }
        self.relink(&touched)?;

        debug!(
            %id,
            line,
            indentation,
            parent = ?parent.map(|p| p.0),
            transferred = transferred.len(),
            "inserted node"
        );
        Ok(Insertion { id, transferred })
    }

    /// Move the head of `id` to a new indentation level.
    pub fn reparent(&mut self, id: NodeId, indentation: usize) -> Result<Reparenting, TreeError> {
        let line = self.head_line(id).ok_or(Fault::UnknownNode(id))?;
        let node = self.get(id)?;
        let (old_indentation, old_parent) = (node.indentation, node.parent);
        if indentation == old_indentation {
            return Ok(Reparenting::default());
        }

        let placement = self.plan(line, indentation)?;
        let new_parent = self.placement_parent(placement)?;
        let node = self.get_mut(id)?;
        node.indentation = indentation;
        node.parent = new_parent;

        let mut touched = BTreeSet::from([old_parent, new_parent, Some(id)]);
        let mut transferred = Vec::new();
        if indentation > old_indentation {
            // children that no longer sit deeper than the node move out
            for (child_line, child) in self.children_of(Some(id)) {
                let child_indentation = self.get(child)?.indentation;
                let target = self.enclosing_before(child_line, child_indentation)?;
                if target != Some(id) {
                    self.get_mut(child)?.parent = target;
                    touched.insert(target);
                    transferred.push(child);
                }
            }
        }
        let (adopted, _) = self.adopt_following(id, line, &mut touched)?;
        transferred.extend(adopted);
        self.relink(&touched)?;

        debug!(
            %id,
            line,
            from = old_indentation,
            to = indentation,
            parent = ?new_parent.map(|p| p.0),
            transferred = transferred.len(),
            "reparented node"
        );
        Ok(Reparenting {
            parent_changed: old_parent != new_parent,
            transferred,
        })
    }

    /// Remove the node whose head is `line`.
    ///
    /// Every contiguous slot from `line` that references the node is handed to
    /// the node above. Children move to the nearest preceding head with a
    /// smaller indentation.
    pub fn remove(&mut self, id: NodeId, line: usize) -> Result<Removal, Fault> {
        self.check_line(line)?;
        if self.head_at(line) != Some(id) || !self.nodes.contains_key(&id) {
            return Err(Fault::UnknownNode(id));
        }

        let previous = self.previous_node(line);
        let mut unbound_lines = 0;
        for slot in self.nodes_at_line[line..].iter_mut() {
            if *slot != Some(id) {
                break;
            }
            *slot = previous;
            unbound_lines += 1;
        }

        let children = self.children_of(Some(id));
        let removed = self.nodes.remove(&id).ok_or(Fault::UnknownNode(id))?;
        let mut touched = BTreeSet::from([removed.parent]);
        let mut rehomed = Vec::with_capacity(children.len());
        for (child_line, child) in children {
            let child_indentation = self.get(child)?.indentation;
            let target = self.enclosing_before(child_line, child_indentation)?;
            self.get_mut(child)?.parent = target;
            touched.insert(target);
            rehomed.push(child);
        }
        self.relink(&touched)?;

        debug!(%id, line, unbound_lines, rehomed = rehomed.len(), "removed node");
        Ok(Removal {
            unbound_lines,
            rehomed,
        })
    }

    // ==================== relinking ====================

    /// Decide where a head with `indentation` on `line` attaches.
    fn plan(&self, line: usize, indentation: usize) -> Result<Placement, TreeError> {
        let Some(previous) = self.previous_node(line) else {
            return Ok(Placement::Root);
        };
        let mut current = self.get(previous)?;
        if indentation > current.indentation {
            return Ok(Placement::Child(previous));
        }
        while current.indentation > indentation {
            match current.parent {
                Some(parent) => current = self.get(parent)?,
                None => return Err(TreeError::NoMatchingAncestor { indentation }),
            }
        }
        if current.indentation == indentation {
            Ok(Placement::Sibling(current.id))
        } else {
            Err(TreeError::IndentationMismatch {
                expected: current.indentation,
                found: indentation,
            })
        }
    }

    fn placement_parent(&self, placement: Placement) -> Result<Option<NodeId>, Fault> {
        Ok(match placement {
            Placement::Root => None,
            Placement::Sibling(sibling) => self.get(sibling)?.parent,
            Placement::Child(parent) => Some(parent),
        })
    }

    /// Nearest node enclosing a head with `indentation` placed on `line`,
    /// found by walking up from the node on the line above.
    fn enclosing_before(&self, line: usize, indentation: usize) -> Result<Option<NodeId>, Fault> {
        let mut current = self.previous_node(line);
        while let Some(id) = current {
            let node = self.get(id)?;
            if node.indentation < indentation {
                return Ok(Some(id));
            }
            current = node.parent;
        }
        Ok(None)
    }

    /// Transfer deeper heads following `line` that belong to an outer node.
    ///
    /// Returns the transferred nodes and the first following head that is not
    /// deeper than `id` (the boundary).
    fn adopt_following(
        &mut self,
        id: NodeId,
        line: usize,
        touched: &mut BTreeSet<Option<NodeId>>,
    ) -> Result<(Vec<NodeId>, Option<NodeId>), Fault> {
        let indentation = self.get(id)?.indentation;
        // scanned heads that may still enclose later ones, indentation strictly increasing
        let mut enclosing: Vec<(NodeId, usize)> = Vec::new();
        let mut region = BTreeSet::new();
        let mut transferred = Vec::new();

        for next_line in line + 1..self.nodes_at_line.len() {
            let Some(head) = self.head_at(next_line) else {
                continue;
            };
            if head == id {
                continue;
            }
            let node = self.get(head)?;
            let (head_indentation, parent) = (node.indentation, node.parent);
            if head_indentation <= indentation {
                return Ok((transferred, Some(head)));
            }
            while enclosing
                .last()
                .map_or(false, |&(_, level)| level >= head_indentation)
            {
                enclosing.pop();
            }
            let inside = parent.map_or(false, |p| p == id || region.contains(&p));
            if !inside {
                let target = enclosing.last().map_or(id, |&(r, _)| r);
                touched.insert(parent);
                touched.insert(Some(target));
                self.get_mut(head)?.parent = Some(target);
                transferred.push(head);
            }
            enclosing.push((head, head_indentation));
            region.insert(head);
        }
        Ok((transferred, None))
    }

    /// Link `id` between `predecessor` and `successor`, detaching whatever
    /// those two were linked to before.
    fn splice(
        &mut self,
        id: NodeId,
        predecessor: Option<NodeId>,
        successor: Option<NodeId>,
    ) -> Result<(), Fault> {
        if let Some(before) = predecessor {
            if let Some(old) = self.get(before)?.successor.filter(|&old| Some(old) != successor) {
                self.get_mut(old)?.predecessor = None;
            }
            self.get_mut(before)?.successor = Some(id);
        }
        if let Some(after) = successor {
            if let Some(old) = self.get(after)?.predecessor.filter(|&old| Some(old) != predecessor) {
                self.get_mut(old)?.successor = None;
            }
            self.get_mut(after)?.predecessor = Some(id);
        }
        let node = self.get_mut(id)?;
        node.predecessor = predecessor;
        node.successor = successor;
        Ok(())
    }

    fn relink(&mut self, parents: &BTreeSet<Option<NodeId>>) -> Result<(), Fault> {
        for &parent in parents {
            if parent.map_or(true, |p| self.nodes.contains_key(&p)) {
                self.relink_children(parent)?;
            }
        }
        Ok(())
    }

    /// Rebuild the sibling chains below `parent` from document order.
    ///
    /// Consecutive children with equal indentation are siblings; a change of
    /// indentation breaks the chain.
    fn relink_children(&mut self, parent: Option<NodeId>) -> Result<(), Fault> {
        let mut before: Option<(NodeId, usize)> = None;
        for (_, child) in self.children_of(parent) {
            let indentation = self.get(child)?.indentation;
            let predecessor = before
                .filter(|&(_, level)| level == indentation)
                .map(|(sibling, _)| sibling);
            if let Some(sibling) = predecessor {
                self.get_mut(sibling)?.successor = Some(child);
            }
            let node = self.get_mut(child)?;
            node.predecessor = predecessor;
            node.successor = None;
            before = Some((child, indentation));
        }
        Ok(())
    }
}
