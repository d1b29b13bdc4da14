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

//! Error types for outline parsing.
//!
//! Two families of errors exist:
//!
//! - [`ParseError`]: recoverable, attached to the offending line. Processing
//!   continues with the next line and the call still returns its events.
//! - [`Fault`]: an internal invariant was violated (caller and tree are out of
//!   sync). A fault propagates to the caller, who must discard the parser.

use crate::tree::NodeId;
use std::fmt;
use thiserror::Error;

/// The kind of a recoverable, per-line parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// The lexer produced no tokens for the line.
    UnprocessableLine,
    /// The first content line of the document is not plain, unindented text.
    RootLine,
    /// A dedent stopped at a level that does not match the line.
    IndentationMismatch,
    /// A dedent went past every enclosing node.
    NoMatchingAncestor,
    /// A head line lost its text token (e.g. turned into an attribute list).
    MalformedHead,
    /// Line exceeds the configured maximum length.
    LineTooLong,
    /// Creating a node would exceed the configured node limit.
    NodeLimit,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnprocessableLine => write!(f, "UnprocessableLineError"),
            Self::RootLine => write!(f, "RootLineError"),
            Self::IndentationMismatch => write!(f, "IndentationMismatchError"),
            Self::NoMatchingAncestor => write!(f, "NoMatchingAncestorError"),
            Self::MalformedHead => write!(f, "MalformedHeadError"),
            Self::LineTooLong => write!(f, "LineTooLongError"),
            Self::NodeLimit => write!(f, "NodeLimitError"),
        }
    }
}

/// A recoverable error reported for a single line.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind} at line {line}: {message}")]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Line index (0-based).
    pub line: usize,
    /// Raw content of the line when the error was raised.
    pub content: String,
    /// Human-readable error message.
    pub message: String,
}

impl ParseError {
    /// Create a new error.
    pub fn new(
        kind: ParseErrorKind,
        line: usize,
        content: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            line,
            content: content.into(),
            message: message.into(),
        }
    }

    pub fn root_line(line: usize, content: impl Into<String>) -> Self {
        Self::new(
            ParseErrorKind::RootLine,
            line,
            content,
            "root node has to start with unindented text",
        )
    }

    pub fn malformed_head(line: usize, content: impl Into<String>) -> Self {
        Self::new(
            ParseErrorKind::MalformedHead,
            line,
            content,
            "head line of an existing node must carry text",
        )
    }

    pub fn line_too_long(line: usize, content: impl Into<String>, length: usize, max: usize) -> Self {
        Self::new(
            ParseErrorKind::LineTooLong,
            line,
            content,
            format!("line has {} characters, maximum is {}", length, max),
        )
    }

    /// Convert a relinking failure into a line error.
    ///
    /// Faults are not recoverable and are handed back unchanged.
    pub fn from_tree(
        err: TreeError,
        line: usize,
        content: impl Into<String>,
    ) -> Result<Self, Fault> {
        let kind = match &err {
            TreeError::IndentationMismatch { .. } => ParseErrorKind::IndentationMismatch,
            TreeError::NoMatchingAncestor { .. } => ParseErrorKind::NoMatchingAncestor,
            TreeError::NodeLimit { .. } => ParseErrorKind::NodeLimit,
            TreeError::Fault(fault) => return Err(fault.clone()),
        };
        Ok(Self::new(kind, line, content, err.to_string()))
    }
}

/// Recoverable failure of a relinking operation on the node tree.
///
/// The tree is left unchanged when one of these is returned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("indentation {found} does not line up with the enclosing level at {expected}")]
    IndentationMismatch { expected: usize, found: usize },

    #[error("no enclosing node for indentation {indentation}")]
    NoMatchingAncestor { indentation: usize },

    #[error("node limit of {max} reached")]
    NodeLimit { max: usize },

    #[error(transparent)]
    Fault(#[from] Fault),
}

/// Internal invariant violation.
///
/// These never stem from malformed input; they indicate that the caller and
/// the tree disagree about the document. The parser must be discarded and the
/// document reparsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Fault {
    #[error("line {line} already has head node {node}")]
    LineAlreadyBound { line: usize, node: NodeId },

    #[error("node id {0} allocated twice")]
    DuplicateNodeId(NodeId),

    #[error("node {0} is not part of the tree")]
    UnknownNode(NodeId),

    #[error("line committed before it was started")]
    NotStarted,

    #[error("line {line} is outside the document ({line_count} lines)")]
    LineOutOfRange { line: usize, line_count: usize },

    #[error(
        "range {start_line}:{start_column}-{end_line}:{end_column} ends before it starts"
    )]
    InvalidRange {
        start_line: usize,
        start_column: usize,
        end_line: usize,
        end_column: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(ParseErrorKind::RootLine.to_string(), "RootLineError");
        assert_eq!(
            ParseErrorKind::IndentationMismatch.to_string(),
            "IndentationMismatchError"
        );
        assert_eq!(ParseErrorKind::NodeLimit.to_string(), "NodeLimitError");
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::root_line(0, "  child");
        assert_eq!(
            err.to_string(),
            "RootLineError at line 0: root node has to start with unindented text"
        );
        assert_eq!(err.content, "  child");
    }

    #[test]
    fn test_line_too_long_message() {
        let err = ParseError::line_too_long(3, "xxxx", 4, 2);
        assert_eq!(err.kind, ParseErrorKind::LineTooLong);
        assert!(err.message.contains("4 characters"));
        assert!(err.message.contains("maximum is 2"));
    }

    #[test]
    fn test_from_tree_maps_kinds() {
        let err = ParseError::from_tree(
            TreeError::IndentationMismatch {
                expected: 4,
                found: 2,
            },
            7,
            "  x",
        )
        .unwrap();
        assert_eq!(err.kind, ParseErrorKind::IndentationMismatch);
        assert_eq!(err.line, 7);

        let err = ParseError::from_tree(TreeError::NoMatchingAncestor { indentation: 1 }, 2, " y")
            .unwrap();
        assert_eq!(err.kind, ParseErrorKind::NoMatchingAncestor);
    }

    #[test]
    fn test_from_tree_passes_faults_through() {
        let fault = Fault::UnknownNode(NodeId(9));
        let result = ParseError::from_tree(TreeError::from(fault.clone()), 0, "");
        assert_eq!(result, Err(fault));
    }

    #[test]
    fn test_fault_display() {
        assert_eq!(
            Fault::LineAlreadyBound {
                line: 2,
                node: NodeId(5)
            }
            .to_string(),
            "line 2 already has head node 5"
        );
        assert_eq!(
            Fault::InvalidRange {
                start_line: 3,
                start_column: 0,
                end_line: 1,
                end_column: 2
            }
            .to_string(),
            "range 3:0-1:2 ends before it starts"
        );
        assert_eq!(
            TreeError::from(Fault::NotStarted).to_string(),
            "line committed before it was started"
        );
    }
}
