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

//! Incremental parser for indentation-based outlines.
//!
//! Plain text where leading whitespace denotes nesting is turned into a tree
//! of nodes, and the tree is kept in sync with arbitrary range edits. Every
//! call reports an ordered log of structural changes ([`ParseEvent`]) so that
//! a consumer, e.g. a mind-map renderer, can update itself without rebuilding
//! from scratch.
//!
//! ```text
//! rootNode            AddNode { id: 1, parent_id: None }
//!   child             AddNode { id: 2, parent_id: Some(1) }
//!   (color=red)       attribute of node 2
//! sibling             AddNode { id: 3, parent_id: None }
//! ```
//!
//! # Layers
//!
//! - [`lex`]: tokenizes a single line
//! - [`tree`]: owns nodes by id plus the line -> node index, relinks on change
//! - [`line`]: decides per line whether to add, edit, move or delete a head
//! - [`OutlineParser`]: splits full parses and range edits into line cycles
//!
//! # Examples
//!
//! ```
//! use mindnotes_core::{NodeId, OutlineParser, ParseEvent};
//!
//! let mut parser = OutlineParser::new();
//! parser.parse_all("rootNode\nsibling").unwrap();
//!
//! // indent the second line by one space
//! let outcome = parser.edit_range(1, 0, 1, 0, " ").unwrap();
//! assert_eq!(
//!     outcome.events,
//!     vec![ParseEvent::edit(NodeId(2), Some(NodeId(1)), "sibling")]
//! );
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for events and ids, and
//!   [`EventDispatcher::dispatch_json`].

mod dispatch;
mod error;
mod event;
pub mod lex;
mod limits;
pub mod line;
mod parser;
pub mod tree;

pub use dispatch::{EventDispatcher, EventHandler};
pub use error::{Fault, ParseError, ParseErrorKind, TreeError};
pub use event::ParseEvent;
pub use limits::Limits;
pub use line::{LineInterpreter, LineResult, LineState};
pub use parser::{OutlineParser, ParseOutcome, ParserOptions, ParserOptionsBuilder};
pub use tree::{Node, NodeId, NodeTree};

/// Parse `text` with default options.
pub fn parse(text: &str) -> Result<ParseOutcome, Fault> {
    OutlineParser::new().parse_all(text)
}
