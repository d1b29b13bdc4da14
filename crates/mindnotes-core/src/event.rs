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

//! Structural change events.

use crate::tree::NodeId;

/// A structural change produced by a parse or edit cycle.
///
/// Events are append-only within one call and must be applied by consumers
/// strictly in emission order: a parent is always announced (or edited)
/// before any later event refers to it as `parent_id`.
///
/// With the `serde` feature, events serialize as objects tagged by `"name"`:
///
/// ```text
/// {"name":"node.add","id":2,"parentId":1,"text":"child"}
/// {"name":"node.delete","id":2}
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "name"))]
pub enum ParseEvent {
    /// A node was created from a new head line.
    #[cfg_attr(feature = "serde", serde(rename = "node.add", rename_all = "camelCase"))]
    AddNode {
        id: NodeId,
        #[cfg_attr(
            feature = "serde",
            serde(default, skip_serializing_if = "Option::is_none")
        )]
        parent_id: Option<NodeId>,
        text: String,
    },

    /// A node changed its text, its parent, or both.
    #[cfg_attr(feature = "serde", serde(rename = "node.edit", rename_all = "camelCase"))]
    EditNode {
        id: NodeId,
        #[cfg_attr(
            feature = "serde",
            serde(default, skip_serializing_if = "Option::is_none")
        )]
        parent_id: Option<NodeId>,
        text: String,
    },

    /// A node was removed.
    #[cfg_attr(feature = "serde", serde(rename = "node.delete"))]
    DeleteNode { id: NodeId },
}

impl ParseEvent {
    /// Discriminator of [`ParseEvent::AddNode`].
    pub const ADD: &'static str = "node.add";
    /// Discriminator of [`ParseEvent::EditNode`].
    pub const EDIT: &'static str = "node.edit";
    /// Discriminator of [`ParseEvent::DeleteNode`].
    pub const DELETE: &'static str = "node.delete";

    pub fn add(id: NodeId, parent_id: Option<NodeId>, text: impl Into<String>) -> Self {
        Self::AddNode {
            id,
            parent_id,
            text: text.into(),
        }
    }

    pub fn edit(id: NodeId, parent_id: Option<NodeId>, text: impl Into<String>) -> Self {
        Self::EditNode {
            id,
            parent_id,
            text: text.into(),
        }
    }

    pub fn delete(id: NodeId) -> Self {
        Self::DeleteNode { id }
    }

    /// Stable discriminator used by transports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddNode { .. } => Self::ADD,
            Self::EditNode { .. } => Self::EDIT,
            Self::DeleteNode { .. } => Self::DELETE,
        }
    }

    /// Id of the node the event refers to.
    pub fn id(&self) -> NodeId {
        match self {
            Self::AddNode { id, .. } | Self::EditNode { id, .. } | Self::DeleteNode { id } => *id,
        }
    }

    /// Parent carried by the event; `None` for roots and deletions.
    pub fn parent_id(&self) -> Option<NodeId> {
        match self {
            Self::AddNode { parent_id, .. } | Self::EditNode { parent_id, .. } => *parent_id,
            Self::DeleteNode { .. } => None,
        }
    }

    /// Head text carried by the event; `None` for deletions.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::AddNode { text, .. } | Self::EditNode { text, .. } => Some(text),
            Self::DeleteNode { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let add = ParseEvent::add(NodeId(2), Some(NodeId(1)), "child");
        assert_eq!(add.name(), "node.add");
        assert_eq!(add.id(), NodeId(2));
        assert_eq!(add.parent_id(), Some(NodeId(1)));
        assert_eq!(add.text(), Some("child"));

        let edit = ParseEvent::edit(NodeId(1), None, "root");
        assert_eq!(edit.name(), ParseEvent::EDIT);
        assert_eq!(edit.parent_id(), None);

        let delete = ParseEvent::delete(NodeId(3));
        assert_eq!(delete.name(), ParseEvent::DELETE);
        assert_eq!(delete.id(), NodeId(3));
        assert_eq!(delete.text(), None);
        assert_eq!(delete.parent_id(), None);
    }
}
