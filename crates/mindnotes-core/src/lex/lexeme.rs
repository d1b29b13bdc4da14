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

//! Lexeme vocabulary shared by the lexer and the line interpreter.

use std::fmt;

/// Kind of a single lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexemeKind {
    /// Leading whitespace run of a non-blank line.
    Indent,
    /// Text of a node head or body line.
    NodeText,
    /// A line consisting only of whitespace (or nothing at all).
    EmptyLine,
    /// The `+` marker that flags a continuation line.
    MultilineIndicator,
    /// Opening `(` of an attribute list.
    AttributeListStart,
    /// Closing `)` of an attribute list.
    AttributeListEnd,
    /// Name part of a `name=value` attribute entry.
    AttributeName,
    /// The `=` of an attribute entry.
    AttributeAssign,
    /// Value part of a `name=value` attribute entry.
    AttributeValue,
}

impl fmt::Display for LexemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Indent => "indent",
            Self::NodeText => "text",
            Self::EmptyLine => "empty",
            Self::MultilineIndicator => "multilineIndicator",
            Self::AttributeListStart => "attributeListStart",
            Self::AttributeListEnd => "attributeListEnd",
            Self::AttributeName => "attributeName",
            Self::AttributeAssign => "attributeAssign",
            Self::AttributeValue => "attributeValue",
        };
        f.write_str(name)
    }
}

/// A single token of one line.
///
/// `start` and `end` are character offsets (not byte offsets) into the line
/// the lexeme was produced from, `end` exclusive. Editors map cursor
/// positions back to lexemes through them, so they must be exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub kind: LexemeKind,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl Lexeme {
    /// Create a lexeme starting at character offset `start`.
    ///
    /// The end offset is derived from the character length of `text`.
    pub fn new(kind: LexemeKind, text: impl Into<String>, start: usize) -> Self {
        let text = text.into();
        let end = start + text.chars().count();
        Self {
            kind,
            text,
            start,
            end,
        }
    }

    /// Number of characters covered by this lexeme.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn is(&self, kind: LexemeKind) -> bool {
        self.kind == kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexeme_end_counts_chars_not_bytes() {
        let lexeme = Lexeme::new(LexemeKind::NodeText, "日本語", 2);
        assert_eq!(lexeme.start, 2);
        assert_eq!(lexeme.end, 5);
        assert_eq!(lexeme.len(), 3);
    }

    #[test]
    fn test_empty_lexeme() {
        let lexeme = Lexeme::new(LexemeKind::EmptyLine, "", 0);
        assert!(lexeme.is_empty());
        assert!(lexeme.is(LexemeKind::EmptyLine));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(LexemeKind::NodeText.to_string(), "text");
        assert_eq!(LexemeKind::AttributeListStart.to_string(), "attributeListStart");
    }
}
