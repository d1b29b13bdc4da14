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

//! Lexical analysis for outline documents.
//!
//! Tokenization is strictly line based: every call to [`tokenize_line`]
//! produces a fresh [`LineTokens`] for exactly one line, independent of any
//! tree state. Offsets in [`Lexeme`] are character positions in that line.
//!
//! # Module Structure
//!
//! - [`lexeme`] - Lexeme kinds and the lexeme record
//! - [`lexer`] - The line tokenizer
//! - [`error`] - Lexer diagnostics
//!
//! # Examples
//!
//! ```
//! use mindnotes_core::lex::{tokenize_line, LexemeKind};
//!
//! let tokens = tokenize_line("(color=red, shape=box)");
//! assert_eq!(tokens.attributes(), vec![("color", "red"), ("shape", "box")]);
//! assert!(tokens.errors.is_empty());
//!
//! let blank = tokenize_line("   ");
//! assert_eq!(blank.lexemes[0].kind, LexemeKind::EmptyLine);
//! ```

pub mod error;
pub mod lexeme;
pub mod lexer;

pub use error::LexError;
pub use lexeme::{Lexeme, LexemeKind};
pub use lexer::{indentation_of, tokenize_line, LineTokens};
