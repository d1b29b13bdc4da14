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

//! Document-level parsing and edit translation.
//!
//! [`OutlineParser`] owns the text buffer and the node tree. A full parse
//! replays every line through a [`LineInterpreter`]; a range edit splices the
//! replacement into the buffer and reinterprets only the lines it touches.

use crate::error::{Fault, ParseError};
use crate::event::ParseEvent;
use crate::limits::Limits;
use crate::lex::{tokenize_line, LexemeKind};
use crate::line::{LineInterpreter, LineResult};
use crate::tree::{NodeId, NodeTree};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Parser configuration.
///
/// # Examples
///
/// ```
/// use mindnotes_core::ParserOptions;
///
/// let options = ParserOptions::builder()
///     .max_line_length(4096)
///     .max_nodes(100_000)
///     .build();
/// assert_eq!(options.limits.max_nodes, 100_000);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Resource limits.
    pub limits: Limits,
}

impl ParserOptions {
    /// Create a new builder for ParserOptions.
    pub fn builder() -> ParserOptionsBuilder {
        ParserOptionsBuilder::new()
    }
}

/// Builder for [`ParserOptions`].
#[derive(Debug, Clone, Default)]
pub struct ParserOptionsBuilder {
    limits: Limits,
}

impl ParserOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum line length in characters (default: 1M).
    pub fn max_line_length(mut self, length: usize) -> Self {
        self.limits.max_line_length = length;
        self
    }

    /// Set the maximum number of live nodes (default: 10M).
    pub fn max_nodes(mut self, nodes: usize) -> Self {
        self.limits.max_nodes = nodes;
        self
    }

    /// Replace all limits at once.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn build(self) -> ParserOptions {
        ParserOptions {
            limits: self.limits,
        }
    }
}

/// Events and errors of one [`OutlineParser::parse_all`] or
/// [`OutlineParser::edit_range`] call, in line-processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    pub events: Vec<ParseEvent>,
    pub errors: Vec<ParseError>,
}

impl ParseOutcome {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Incremental outline parser.
///
/// # Examples
///
/// ```
/// use mindnotes_core::{NodeId, OutlineParser, ParseEvent};
///
/// let mut parser = OutlineParser::new();
/// let outcome = parser.parse_all("rootNode\n  child").unwrap();
/// assert_eq!(
///     outcome.events,
///     vec![
///         ParseEvent::add(NodeId(1), None, "rootNode"),
///         ParseEvent::add(NodeId(2), Some(NodeId(1)), "child"),
///     ]
/// );
///
/// // rename the child
/// let outcome = parser.edit_range(1, 2, 1, 7, "kid").unwrap();
/// assert_eq!(
///     outcome.events,
///     vec![ParseEvent::edit(NodeId(2), Some(NodeId(1)), "kid")]
/// );
/// assert_eq!(parser.text(), "rootNode\n  kid");
/// ```
#[derive(Debug, Clone)]
pub struct OutlineParser {
    lines: Vec<String>,
    tree: NodeTree,
    options: ParserOptions,
}

impl Default for OutlineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineParser {
    /// Create a parser holding the empty document (one empty line).
    pub fn new() -> Self {
        Self::with_options(ParserOptions::default())
    }

    pub fn with_options(options: ParserOptions) -> Self {
        let mut tree = NodeTree::with_max_nodes(options.limits.max_nodes);
        tree.push_line();
        Self {
            lines: vec![String::new()],
            tree,
            options,
        }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    /// Current text buffer, one entry per line.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Current document joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Discard the current document and parse `text` from scratch.
    ///
    /// The node tree is rebuilt, so ids start again at 1.
    pub fn parse_all(&mut self, text: &str) -> Result<ParseOutcome, Fault> {
        self.lines = split_lines(text);
        self.tree = NodeTree::with_max_nodes(self.options.limits.max_nodes);
        debug!(lines = self.lines.len(), "parsing document");

        let limits = self.options.limits;
        let mut outcome = ParseOutcome::default();
        let mut rehomed = Vec::new();
        for (line, content) in self.lines.iter().enumerate() {
            self.tree.push_line();
            let result = interpret_line(&mut self.tree, limits, line, content)?;
            absorb(&mut outcome, &mut rehomed, result);
        }
        self.report_rehomed(&mut outcome, &rehomed);
        Ok(outcome)
    }

    /// Replace the text between `(start_line, start_column)` and
    /// `(end_line, end_column)` with `new_text`.
    ///
    /// Columns count characters and are clamped to the line length. Lines
    /// covered by both the old range and the replacement are reinterpreted in
    /// place; surplus old lines are removed, surplus new lines inserted.
    pub fn edit_range(
        &mut self,
        start_line: usize,
        start_column: usize,
        end_line: usize,
        end_column: usize,
        new_text: &str,
    ) -> Result<ParseOutcome, Fault> {
        if (end_line, end_column) < (start_line, start_column) {
            return Err(Fault::InvalidRange {
                start_line,
                start_column,
                end_line,
                end_column,
            });
        }
        if end_line >= self.lines.len() {
            return Err(Fault::LineOutOfRange {
                line: end_line,
                line_count: self.lines.len(),
            });
        }

        let prefix: String = self.lines[start_line].chars().take(start_column).collect();
        let suffix: String = self.lines[end_line].chars().skip(end_column).collect();
        let mut replacement = split_lines(new_text);
        replacement[0].insert_str(0, &prefix);
        if let Some(last) = replacement.last_mut() {
            last.push_str(&suffix);
        }

        let affected = end_line - start_line + 1;
        let incoming = replacement.len();
        let paired = affected.min(incoming);
        let mut owners = self.owners_between(start_line.saturating_sub(1), end_line + 1);
        debug!(
            start_line,
            start_column,
            end_line,
            end_column,
            affected,
            incoming,
            "editing range"
        );

        let limits = self.options.limits;
        let mut outcome = ParseOutcome::default();
        let mut rehomed: Vec<(NodeId, usize)> = Vec::new();

        let surplus = replacement.split_off(paired);
        for (line, content) in (start_line..).zip(replacement) {
            self.lines[line] = content;
            let result = interpret_line(&mut self.tree, limits, line, &self.lines[line])?;
            absorb(&mut outcome, &mut rehomed, result);
        }

        if paired < affected {
            let at = start_line + paired;
            debug!(count = affected - paired, at, "removing squashed lines");
            for _ in paired..affected {
                let mut interpreter = LineInterpreter::new(&mut self.tree, limits);
                interpreter.begin(at, "");
                interpreter.delete_line()?;
                let result = interpreter.commit()?;
                self.tree.remove_line(at)?;
                self.lines.remove(at);
                absorb(&mut outcome, &mut rehomed, result);
            }
        }

        for (line, content) in (start_line + paired..).zip(surplus) {
            self.lines.insert(line, content);
            self.tree.insert_line(line)?;
            let result = interpret_line(&mut self.tree, limits, line, &self.lines[line])?;
            absorb(&mut outcome, &mut rehomed, result);
        }

        self.report_rehomed(&mut outcome, &rehomed);
        owners.extend(self.owners_between(
            start_line.saturating_sub(1),
            start_line + incoming + 1,
        ));
        self.refresh_attributes(&owners)?;
        Ok(outcome)
    }

    /// Nodes bound to any line slot in `start..end`.
    fn owners_between(&self, start: usize, end: usize) -> BTreeSet<NodeId> {
        let slots = self.tree.line_slots();
        let end = end.min(slots.len());
        slots[start.min(end)..end].iter().flatten().copied().collect()
    }

    /// Collect the attributes of each node in `owners` again from the
    /// attribute lines of its body.
    fn refresh_attributes(&mut self, owners: &BTreeSet<NodeId>) -> Result<(), Fault> {
        let max_line_length = self.options.limits.max_line_length;
        for &id in owners {
            let Some(head) = self.tree.head_line(id) else {
                continue;
            };
            let mut attributes = BTreeMap::new();
            let body = (head + 1..self.lines.len())
                .take_while(|&line| self.tree.node_at_line(line) == Some(id));
            for line in body {
                let content = &self.lines[line];
                if content.chars().count() > max_line_length {
                    continue;
                }
                let tokens = tokenize_line(content);
                let is_attribute_list = tokens
                    .body()
                    .first()
                    .map_or(false, |lexeme| lexeme.is(LexemeKind::AttributeListStart));
                if !is_attribute_list {
                    continue;
                }
                for (name, value) in tokens.attributes() {
                    attributes.insert(name.to_string(), value.to_string());
                }
            }
            self.tree.set_attributes(id, attributes)?;
        }
        Ok(())
    }

    /// Announce parents that changed as a side effect of other lines.
    ///
    /// One event per node, after every line has been processed. Nodes that
    /// were deleted afterwards, or whose current parent was already reported
    /// by a later event, are skipped.
    fn report_rehomed(&self, outcome: &mut ParseOutcome, rehomed: &[(NodeId, usize)]) {
        let mut seen = BTreeSet::new();
        let latest: Vec<(NodeId, usize)> = rehomed
            .iter()
            .rev()
            .filter(|(id, _)| seen.insert(*id))
            .copied()
            .collect();

        for &(id, mark) in latest.iter().rev() {
            let Some(node) = self.tree.node(id) else {
                continue;
            };
            let reported = outcome.events[mark..]
                .iter()
                .rev()
                .find(|event| event.id() == id)
                .map(ParseEvent::parent_id);
            if reported != Some(node.parent) {
                debug!(%id, "reporting re-homed node");
                outcome
                    .events
                    .push(ParseEvent::edit(id, node.parent, node.head_text.as_str()));
            }
        }
    }
}

fn interpret_line(
    tree: &mut NodeTree,
    limits: Limits,
    line: usize,
    content: &str,
) -> Result<LineResult, Fault> {
    let mut interpreter = LineInterpreter::new(tree, limits);
    interpreter.begin(line, content);
    interpreter.interpret()?;
    interpreter.commit()
}

fn absorb(outcome: &mut ParseOutcome, rehomed: &mut Vec<(NodeId, usize)>, result: LineResult) {
    outcome.events.extend(result.events);
    outcome.errors.extend(result.errors);
    let mark = outcome.events.len();
    rehomed.extend(result.rehomed.into_iter().map(|id| (id, mark)));
}

/// Split on `\n`, dropping a `\r` that precedes it.
fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines() {
        assert_eq!(split_lines(""), vec![""]);
        assert_eq!(split_lines("a\r\nb\n"), vec!["a", "b", ""]);
        assert_eq!(split_lines("\n"), vec!["", ""]);
    }

    #[test]
    fn test_new_parser_is_one_empty_line() {
        let parser = OutlineParser::new();
        assert_eq!(parser.lines(), &[String::new()]);
        assert_eq!(parser.tree().line_count(), 1);
        assert!(parser.tree().is_empty());
    }

    #[test]
    fn test_builder() {
        let options = ParserOptions::builder()
            .max_line_length(10)
            .max_nodes(2)
            .build();
        assert_eq!(options.limits.max_line_length, 10);
        assert_eq!(options.limits.max_nodes, 2);
        assert_eq!(ParserOptions::builder().build(), ParserOptions::default());
        let unlimited = ParserOptions::builder().limits(Limits::unlimited()).build();
        assert_eq!(unlimited.limits, Limits::unlimited());
    }

    #[test]
    fn test_text_splicing() {
        let mut parser = OutlineParser::new();
        parser.parse_all("rootNode\ntest\nrootSibling").unwrap();

        parser
            .edit_range(0, 8, 0, 8, "\ninsertA\nsecond\nthird")
            .unwrap();
        assert_eq!(
            parser.lines(),
            &["rootNode", "insertA", "second", "third", "test", "rootSibling"]
        );

        parser.edit_range(1, 3, 2, 3, "Node\nasd").unwrap();
        assert_eq!(
            parser.lines(),
            &["rootNode", "insNode", "asdond", "third", "test", "rootSibling"]
        );

        parser.edit_range(0, 0, 5, 11, "override").unwrap();
        assert_eq!(parser.lines(), &["override"]);

        parser.edit_range(0, 0, 0, 0, "  ").unwrap();
        assert_eq!(parser.text(), "  override");
        assert_eq!(parser.tree().line_count(), 1);
    }

    #[test]
    fn test_columns_are_clamped_and_character_based() {
        let mut parser = OutlineParser::new();
        parser.parse_all("日本").unwrap();
        let outcome = parser.edit_range(0, 1, 0, 99, "x").unwrap();
        assert_eq!(parser.text(), "日x");
        assert_eq!(
            outcome.events,
            vec![ParseEvent::edit(NodeId(1), None, "日x")]
        );
    }

    #[test]
    fn test_invalid_ranges_are_faults() {
        let mut parser = OutlineParser::new();
        parser.parse_all("a\nb").unwrap();
        assert_eq!(
            parser.edit_range(1, 0, 0, 0, "").unwrap_err(),
            Fault::InvalidRange {
                start_line: 1,
                start_column: 0,
                end_line: 0,
                end_column: 0
            }
        );
        assert_eq!(
            parser.edit_range(0, 0, 2, 0, "").unwrap_err(),
            Fault::LineOutOfRange {
                line: 2,
                line_count: 2
            }
        );
    }

    #[test]
    fn test_node_limit_reported_per_line() {
        let options = ParserOptions::builder().max_nodes(1).build();
        let mut parser = OutlineParser::with_options(options);
        let outcome = parser.parse_all("a\nb").unwrap();
        assert_eq!(outcome.events.len(), 1);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(
            outcome.errors[0].kind,
            crate::error::ParseErrorKind::NodeLimit
        );
        assert!(outcome.has_errors());
    }
}
