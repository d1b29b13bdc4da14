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

//! Node identity and node records.

use std::collections::BTreeMap;
use std::fmt;

/// Stable node identity.
///
/// Ids are handed out from a monotonically increasing counter starting at 1
/// and are never reused, not even after the node is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A structural unit of the outline.
///
/// Links are ids into the owning [`NodeTree`](super::NodeTree). A node keeps
/// no child list; children are found by scanning for nodes whose `parent` is
/// this node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    /// Leading-whitespace width of the head line, in characters.
    pub indentation: usize,
    pub head_text: String,
    pub parent: Option<NodeId>,
    pub predecessor: Option<NodeId>,
    pub successor: Option<NodeId>,
    /// Values collected from attribute-list lines in the node body.
    pub attributes: BTreeMap<String, String>,
}

impl Node {
    pub(crate) fn new(id: NodeId, indentation: usize, head_text: impl Into<String>) -> Self {
        Self {
            id,
            indentation,
            head_text: head_text.into(),
            parent: None,
            predecessor: None,
            successor: None,
            attributes: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId(42).to_string(), "42");
        assert_eq!(NodeId::from(7), NodeId(7));
    }

    #[test]
    fn test_new_node_is_unlinked_root() {
        let node = Node::new(NodeId(1), 2, "text");
        assert!(node.is_root());
        assert_eq!(node.predecessor, None);
        assert_eq!(node.successor, None);
        assert!(node.attributes.is_empty());
        assert_eq!(node.head_text, "text");
    }
}
