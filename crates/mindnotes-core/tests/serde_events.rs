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


//! Wire format of events at the transport boundary.

#![cfg(feature = "serde")]

use mindnotes_core::{parse, NodeId, ParseEvent};
use serde_json::json;

#[test]
fn test_add_with_parent() {
    let event = ParseEvent::add(NodeId(2), Some(NodeId(1)), "child");
    assert_eq!(
        serde_json::to_value(&event).unwrap(),
        json!({"name": "node.add", "id": 2, "parentId": 1, "text": "child"})
    );
}

#[test]
fn test_root_omits_parent() {
    let event = ParseEvent::edit(NodeId(1), None, "root");
    assert_eq!(
        serde_json::to_string(&event).unwrap(),
        r#"{"name":"node.edit","id":1,"text":"root"}"#
    );
}

#[test]
fn test_delete_carries_only_id() {
    assert_eq!(
        serde_json::to_value(ParseEvent::delete(NodeId(7))).unwrap(),
        json!({"name": "node.delete", "id": 7})
    );
}

#[test]
fn test_decode_by_discriminator() {
    let event: ParseEvent =
        serde_json::from_str(r#"{"name":"node.add","id":3,"text":"x"}"#).unwrap();
    assert_eq!(event, ParseEvent::add(NodeId(3), None, "x"));

    let event: ParseEvent =
        serde_json::from_str(r#"{"id":3,"parentId":2,"text":"x","name":"node.edit"}"#).unwrap();
    assert_eq!(event, ParseEvent::edit(NodeId(3), Some(NodeId(2)), "x"));

    assert!(serde_json::from_str::<ParseEvent>(r#"{"name":"node.move","id":3}"#).is_err());
}

#[test]
fn test_parse_output_serializes_in_order() {
    let outcome = parse("root\n  child").unwrap();
    let encoded = serde_json::to_value(&outcome.events).unwrap();
    assert_eq!(
        encoded,
        json!([
            {"name": "node.add", "id": 1, "text": "root"},
            {"name": "node.add", "id": 2, "parentId": 1, "text": "child"}
        ])
    );
}
