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

//! Per-line interpretation.
//!
//! A [`LineInterpreter`] resolves the tokens of one physical line against the
//! current tree and decides whether the line adds, edits, moves or deletes a
//! node. Each line goes through an explicit cycle:
//!
//! ```text
//! NotStarted --begin()--> Started --commit()--> Committed --begin()--> Started ...
//! ```
//!
//! Events and errors accumulate in a [`LineResult`] that `commit` hands back.

use crate::error::{Fault, ParseError, ParseErrorKind};
use crate::event::ParseEvent;
use crate::lex::{tokenize_line, LexemeKind, LineTokens};
use crate::limits::Limits;
use crate::tree::{NodeId, NodeTree, Reparenting};
use tracing::{debug, trace, warn};

/// Lifecycle of the interpreter for the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineState {
    NotStarted,
    Started,
    Committed,
}

/// Everything one line contributed to a parse or edit cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineResult {
    pub line: usize,
    pub indentation: usize,
    pub content: String,
    pub events: Vec<ParseEvent>,
    pub errors: Vec<ParseError>,
    /// Nodes handed to a new parent as a side effect of this line, in the
    /// order they moved. No event has been emitted for them yet.
    pub rehomed: Vec<NodeId>,
}

/// How the current line relates to the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineRole {
    /// Nothing above and nothing bound: the document has not started yet.
    Entry,
    /// The line is the head of an existing node.
    Head(NodeId),
    /// The line lies in the body of the node above.
    Body(NodeId),
}

/// What the tokens of the line amount to, indentation aside.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LineBody<'a> {
    /// Whitespace or a comment.
    Blank,
    Text(&'a str),
    /// A `+` continuation marker, optionally followed by text.
    Continuation(Option<&'a str>),
    Attributes(Vec<(&'a str, &'a str)>),
    /// Nothing usable survived tokenization.
    Malformed,
}

impl<'a> LineBody<'a> {
    fn classify(tokens: &'a LineTokens) -> Self {
        if tokens.comment || tokens.is_empty_line() {
            return Self::Blank;
        }
        let body = tokens.body();
        match body.first().map(|lexeme| lexeme.kind) {
            Some(LexemeKind::NodeText) => Self::Text(&body[0].text),
            Some(LexemeKind::MultilineIndicator) => Self::Continuation(
                body.get(1)
                    .filter(|lexeme| lexeme.is(LexemeKind::NodeText))
                    .map(|lexeme| lexeme.text.as_str()),
            ),
            Some(LexemeKind::AttributeListStart) => Self::Attributes(tokens.attributes()),
            _ => Self::Malformed,
        }
    }
}

/// Line-scoped façade over a [`NodeTree`].
#[derive(Debug)]
pub struct LineInterpreter<'t> {
    tree: &'t mut NodeTree,
    limits: Limits,
    state: LineState,
    result: LineResult,
}

impl<'t> LineInterpreter<'t> {
    pub fn new(tree: &'t mut NodeTree, limits: Limits) -> Self {
        Self {
            tree,
            limits,
            state: LineState::NotStarted,
            result: LineResult::default(),
        }
    }

    pub fn state(&self) -> LineState {
        self.state
    }

    /// Start a cycle for `line` holding `content`.
    pub fn begin(&mut self, line: usize, content: &str) {
        self.result = LineResult {
            line,
            content: content.to_string(),
            ..LineResult::default()
        };
        self.state = LineState::Started;
    }

    /// Finish the cycle and persist the line into the tree's line index.
    pub fn commit(&mut self) -> Result<LineResult, Fault> {
        self.ensure_started()?;
        self.tree.settle_line(self.result.line)?;
        self.state = LineState::Committed;
        trace!(
            line = self.result.line,
            events = self.result.events.len(),
            errors = self.result.errors.len(),
            "committed line"
        );
        Ok(std::mem::take(&mut self.result))
    }

    fn ensure_started(&self) -> Result<(), Fault> {
        match self.state {
            LineState::Started => Ok(()),
            LineState::NotStarted | LineState::Committed => Err(Fault::NotStarted),
        }
    }

    /// Node whose head is the current line.
    pub fn existing_node(&self) -> Option<NodeId> {
        self.tree.head_at(self.result.line)
    }

    /// Node bound to the line above.
    pub fn previous_node(&self) -> Option<NodeId> {
        self.tree.previous_node(self.result.line)
    }

    fn role(&self) -> LineRole {
        match (self.existing_node(), self.previous_node()) {
            (Some(head), _) => LineRole::Head(head),
            (None, Some(owner)) => LineRole::Body(owner),
            (None, None) => LineRole::Entry,
        }
    }

    pub fn push_event(&mut self, event: ParseEvent) {
        trace!(line = self.result.line, ?event, "event");
        self.result.events.push(event);
    }

    pub fn push_error(&mut self, kind: ParseErrorKind, message: impl Into<String>) {
        let error = ParseError::new(kind, self.result.line, self.result.content.clone(), message);
        self.record_error(error);
    }

    fn record_error(&mut self, error: ParseError) {
        warn!(line = error.line, kind = %error.kind, "{}", error.message);
        self.result.errors.push(error);
    }

    // ==================== interpretation ====================

    /// Tokenize the current line and apply what it implies to the tree.
    pub fn interpret(&mut self) -> Result<(), Fault> {
        self.ensure_started()?;
        let content = self.result.content.clone();
        let length = content.chars().count();
        if length > self.limits.max_line_length {
            let error = ParseError::line_too_long(
                self.result.line,
                content.as_str(),
                length,
                self.limits.max_line_length,
            );
            self.record_error(error);
            return Ok(());
        }

        let tokens = tokenize_line(&content);
        if tokens.lexemes.is_empty() && !tokens.comment && tokens.errors.is_empty() {
            self.push_error(
                ParseErrorKind::UnprocessableLine,
                "no tokens identified for line",
            );
            return Ok(());
        }
        self.result.indentation = tokens.indentation();

        let body = LineBody::classify(&tokens);
        let role = self.role();
        trace!(line = self.result.line, ?role, ?body, "interpreting line");

        match role {
            LineRole::Entry => match body {
                LineBody::Blank => {}
                LineBody::Text(text) if self.result.indentation == 0 => {
                    self.add_or_edit_head(text)?;
                }
                _ => {
                    let error = ParseError::root_line(self.result.line, content.as_str());
                    self.record_error(error);
                }
            },
            LineRole::Head(id) => match body {
                LineBody::Blank => self.delete_head(id)?,
                LineBody::Text(_) if self.previous_node().is_none() && self.result.indentation > 0 => {
                    let error = ParseError::root_line(self.result.line, content.as_str());
                    self.record_error(error);
                }
                LineBody::Text(text) => self.update_head(id, text)?,
                LineBody::Continuation(_) | LineBody::Attributes(_) | LineBody::Malformed => {
                    let error = ParseError::malformed_head(self.result.line, content.as_str());
                    self.record_error(error);
                }
            },
            LineRole::Body(owner) => match body {
                LineBody::Blank | LineBody::Malformed => {}
                LineBody::Text(text) => self.add_or_edit_head(text)?,
                LineBody::Continuation(text) => {
                    debug!(line = self.result.line, %owner, ?text, "continuation line");
                }
                LineBody::Attributes(pairs) => {
                    for (name, value) in pairs {
                        self.tree.set_attribute(owner, name, value)?;
                    }
                }
            },
        }
        Ok(())
    }

    /// Edit the head of the current line, or insert one if the line has none.
    pub fn add_or_edit_head(&mut self, text: &str) -> Result<(), Fault> {
        if let Some(id) = self.existing_node() {
            let node = self.tree.node(id).ok_or(Fault::UnknownNode(id))?;
            if node.head_text != text {
                self.edit_head(id, text)?;
            }
            return Ok(());
        }

        let (line, indentation) = (self.result.line, self.result.indentation);
        match self.tree.insert(line, indentation, text) {
            Ok(insertion) => {
                let parent = self.tree.node(insertion.id).and_then(|node| node.parent);
                self.push_event(ParseEvent::add(insertion.id, parent, text));
                self.result.rehomed.extend(insertion.transferred);
            }
            Err(err) => {
                let error = ParseError::from_tree(err, line, self.result.content.as_str())?;
                self.record_error(error);
            }
        }
        Ok(())
    }

    /// Rewrite the head text of `id` unconditionally.
    pub fn edit_head(&mut self, id: NodeId, text: &str) -> Result<(), Fault> {
        self.tree.set_text(id, text)?;
        let event = self.edit_event(id)?;
        self.push_event(event);
        Ok(())
    }

    /// Remove `id`, whose head is the current line.
    pub fn delete_head(&mut self, id: NodeId) -> Result<(), Fault> {
        let removal = self.tree.remove(id, self.result.line)?;
        self.push_event(ParseEvent::delete(id));
        self.result.rehomed.extend(removal.rehomed);
        Ok(())
    }

    /// Delete the head of the current line, if it has one.
    pub fn delete_line(&mut self) -> Result<(), Fault> {
        self.ensure_started()?;
        match self.existing_node() {
            Some(id) => self.delete_head(id),
            None => Ok(()),
        }
    }

    /// Move `id` to `indentation`.
    ///
    /// Returns `false` (with an error recorded) when no valid position exists;
    /// the tree is then unchanged.
    pub fn reparent(&mut self, id: NodeId, indentation: usize) -> Result<bool, Fault> {
        let Some(moved) = self.move_head(id, indentation)? else {
            return Ok(false);
        };
        if moved.parent_changed {
            let event = self.edit_event(id)?;
            self.push_event(event);
        }
        self.result.rehomed.extend(moved.transferred);
        Ok(true)
    }

    /// Apply a text line to the existing head `id`: move it if the
    /// indentation changed, then rewrite the text, with one event for both.
    fn update_head(&mut self, id: NodeId, text: &str) -> Result<(), Fault> {
        let node = self.tree.node(id).ok_or(Fault::UnknownNode(id))?;
        let text_changed = node.head_text != text;
        let moved = if node.indentation != self.result.indentation {
            match self.move_head(id, self.result.indentation)? {
                Some(moved) => moved,
                None => return Ok(()),
            }
        } else {
            Reparenting::default()
        };

        if text_changed {
            self.tree.set_text(id, text)?;
        }
        if text_changed || moved.parent_changed {
            let event = self.edit_event(id)?;
            self.push_event(event);
        }
        self.result.rehomed.extend(moved.transferred);
        Ok(())
    }

    fn move_head(&mut self, id: NodeId, indentation: usize) -> Result<Option<Reparenting>, Fault> {
        match self.tree.reparent(id, indentation) {
            Ok(moved) => Ok(Some(moved)),
            Err(err) => {
                let error = ParseError::from_tree(err, self.result.line, self.result.content.as_str())?;
                self.record_error(error);
                Ok(None)
            }
        }
    }

    fn edit_event(&self, id: NodeId) -> Result<ParseEvent, Fault> {
        let node = self.tree.node(id).ok_or(Fault::UnknownNode(id))?;
        Ok(ParseEvent::edit(id, node.parent, node.head_text.as_str()))
    }
}
