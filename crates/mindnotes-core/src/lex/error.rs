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

//! Diagnostics produced while tokenizing a line.
//!
//! Lexer errors are warnings: tokenization always completes and the line is
//! degraded rather than rejected.

use thiserror::Error;

/// A problem found while tokenizing a single line.
///
/// Columns are 0-based character offsets into the line.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LexError {
    /// An attribute list opened with `(` but never closed.
    #[error("column {column}: attribute list is missing its closing ')'")]
    UnclosedAttributeList { column: usize },

    /// An attribute entry without an `=` separator.
    #[error("column {column}: attribute entry '{entry}' has no '=' separator")]
    MalformedAttribute { entry: String, column: usize },
}

impl LexError {
    /// Column (0-based, in characters) the error refers to.
    pub fn column(&self) -> usize {
        match self {
            Self::UnclosedAttributeList { column } | Self::MalformedAttribute { column, .. } => {
                *column
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unclosed_display() {
        let err = LexError::UnclosedAttributeList { column: 4 };
        assert_eq!(
            err.to_string(),
            "column 4: attribute list is missing its closing ')'"
        );
        assert_eq!(err.column(), 4);
    }

    #[test]
    fn test_malformed_attribute_display() {
        let err = LexError::MalformedAttribute {
            entry: "color".to_string(),
            column: 1,
        };
        assert!(err.to_string().contains("'color'"));
        assert_eq!(err.column(), 1);
    }
}
