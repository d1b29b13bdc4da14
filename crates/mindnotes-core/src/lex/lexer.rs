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

//! Single-line tokenizer.
//!
//! The lexer looks at one raw line at a time and knows nothing about the
//! tree. A line is one of:
//!
//! ```text
//! <blank>                          EmptyLine
//! [indent] # comment               Indent? (no further lexemes)
//! [indent] (name=value, ...)       Indent? AttributeListStart (Name Assign Value)* AttributeListEnd
//! [indent] [+ ] text               Indent? MultilineIndicator? NodeText?
//! ```

use super::error::LexError;
use super::lexeme::{Lexeme, LexemeKind};
use tracing::warn;

/// Result of tokenizing one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineTokens {
    /// Lexemes in line order.
    pub lexemes: Vec<Lexeme>,
    /// Non-fatal diagnostics; a line with errors is degraded, never rejected.
    pub errors: Vec<LexError>,
    /// Whether the body of the line is a `#` comment.
    pub comment: bool,
}

impl LineTokens {
    /// Indentation width in characters (0 for unindented and blank lines).
    pub fn indentation(&self) -> usize {
        match self.lexemes.first() {
            Some(lexeme) if lexeme.is(LexemeKind::Indent) => lexeme.len(),
            _ => 0,
        }
    }

    /// Lexemes following the indentation.
    pub fn body(&self) -> &[Lexeme] {
        match self.lexemes.first() {
            Some(lexeme) if lexeme.is(LexemeKind::Indent) => &self.lexemes[1..],
            _ => &self.lexemes,
        }
    }

    /// Whether the line holds only whitespace.
    pub fn is_empty_line(&self) -> bool {
        matches!(self.lexemes.as_slice(), [only] if only.is(LexemeKind::EmptyLine))
    }

    /// Collect `(name, value)` pairs of an attribute-list line.
    pub fn attributes(&self) -> Vec<(&str, &str)> {
        let mut pairs = Vec::new();
        let mut name: Option<&str> = None;
        for lexeme in self.body() {
            match lexeme.kind {
                LexemeKind::AttributeName => name = Some(&lexeme.text),
                LexemeKind::AttributeValue => {
                    if let Some(name) = name.take() {
                        pairs.push((name, lexeme.text.as_str()));
                    }
                }
                _ => {}
            }
        }
        pairs
    }
}

/// Tokenize a single line (without its line terminator).
///
/// # Examples
///
/// ```
/// use mindnotes_core::lex::{tokenize_line, LexemeKind};
///
/// let tokens = tokenize_line("  + child");
/// let kinds: Vec<_> = tokens.lexemes.iter().map(|l| l.kind).collect();
/// assert_eq!(
///     kinds,
///     [LexemeKind::Indent, LexemeKind::MultilineIndicator, LexemeKind::NodeText]
/// );
/// assert_eq!(tokens.lexemes[2].start, 4);
/// ```
pub fn tokenize_line(line: &str) -> LineTokens {
    let mut tokens = LineTokens::default();

    if line.chars().all(char::is_whitespace) {
        tokens
            .lexemes
            .push(Lexeme::new(LexemeKind::EmptyLine, line, 0));
        return tokens;
    }

    let body = line.trim_start();
    let indent = &line[..line.len() - body.len()];
    let mut column = 0;
    if !indent.is_empty() {
        let lexeme = Lexeme::new(LexemeKind::Indent, indent, 0);
        column = lexeme.end;
        tokens.lexemes.push(lexeme);
    }

    match body.chars().next() {
        Some('(') => tokenize_attribute_list(body, column, &mut tokens),
        Some('#') => tokens.comment = true,
        _ => tokenize_node_body(body, column, &mut tokens),
    }

    tokens
}

/// Width in characters of the leading whitespace of `line`.
#[inline]
pub fn indentation_of(line: &str) -> usize {
    char_len(&line[..line.len() - line.trim_start().len()])
}

#[inline]
fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn tokenize_node_body(body: &str, mut column: usize, tokens: &mut LineTokens) {
    let mut text = body;
    if let Some(after_marker) = text.strip_prefix('+') {
        tokens
            .lexemes
            .push(Lexeme::new(LexemeKind::MultilineIndicator, "+", column));
        column += 1;
        text = after_marker.trim_start();
        column += char_len(&after_marker[..after_marker.len() - text.len()]);
    }
    if !text.is_empty() {
        tokens
            .lexemes
            .push(Lexeme::new(LexemeKind::NodeText, text, column));
    }
}

fn tokenize_attribute_list(body: &str, column: usize, tokens: &mut LineTokens) {
    let trimmed = body.trim_end();
    let Some(inner) = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    else {
        warn!(column, "attribute list without closing parenthesis, ignoring it");
        tokens
            .errors
            .push(LexError::UnclosedAttributeList { column });
        return;
    };

    tokens
        .lexemes
        .push(Lexeme::new(LexemeKind::AttributeListStart, "(", column));

    let mut entry_column = column + 1;
    for entry in inner.split(',') {
        if !entry.trim().is_empty() {
            tokenize_attribute(entry, entry_column, tokens);
        }
        // entry plus its trailing comma
        entry_column += char_len(entry) + 1;
    }

    let end_column = column + char_len(trimmed) - 1;
    tokens
        .lexemes
        .push(Lexeme::new(LexemeKind::AttributeListEnd, ")", end_column));
}

fn tokenize_attribute(entry: &str, column: usize, tokens: &mut LineTokens) {
    let Some(eq) = entry.find('=') else {
        let entry_column = column + indentation_of(entry);
        warn!(column = entry_column, entry, "attribute entry without '='");
        tokens.errors.push(LexError::MalformedAttribute {
            entry: entry.trim().to_string(),
            column: entry_column,
        });
        return;
    };

    let (raw_name, raw_value) = (&entry[..eq], &entry[eq + 1..]);

    let name = raw_name.trim();
    if !name.is_empty() {
        tokens.lexemes.push(Lexeme::new(
            LexemeKind::AttributeName,
            name,
            column + indentation_of(raw_name),
        ));
    }

    let assign_column = column + char_len(raw_name);
    tokens
        .lexemes
        .push(Lexeme::new(LexemeKind::AttributeAssign, "=", assign_column));

    let value = raw_value.trim();
    if !value.is_empty() {
        tokens.lexemes.push(Lexeme::new(
            LexemeKind::AttributeValue,
            value,
            assign_column + 1 + indentation_of(raw_value),
        ));
    }
}
