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


//! Edit command - apply one range edit and report its events

use super::{print_outcome, OutputFormat, ParseSettings};
use crate::error::CliError;
use std::str::FromStr;

/// A `LINE:COL-LINE:COL` range, 0-based, columns in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl FromStr for TextRange {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_range(s)
    }
}

/// Parse a range argument such as `3:0-4:12`.
///
/// A single position (`3:4`) denotes an empty range, i.e. an insertion.
pub fn parse_range(range: &str) -> Result<TextRange, CliError> {
    let invalid = || CliError::invalid_range(range);

    let position = |s: &str| -> Result<(usize, usize), CliError> {
        let (line, column) = s.trim().split_once(':').ok_or_else(invalid)?;
        let line = line.parse().map_err(|_| invalid())?;
        let column = column.parse().map_err(|_| invalid())?;
        Ok((line, column))
    };

    let (start, end) = match range.split_once('-') {
        Some((start, end)) => (position(start)?, position(end)?),
        None => {
            let at = position(range)?;
            (at, at)
        }
    };
    Ok(TextRange {
        start_line: start.0,
        start_column: start.1,
        end_line: end.0,
        end_column: end.1,
    })
}

/// Expand `\n`, `\t` and `\\` escapes in a `--text` argument.
///
/// Unknown escapes are kept verbatim.
pub fn unescape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Parse `file`, replace `range` with `text` and print only the events and
/// errors produced by that edit.
///
/// Returns `Ok(true)` when the edit reported no parse error.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read, or if the range lies outside
/// the document or ends before it starts.
pub fn edit(
    file: &str,
    range: TextRange,
    text: &str,
    format: OutputFormat,
    settings: &ParseSettings,
) -> Result<bool, CliError> {
    let (mut parser, _) = settings.load(file)?;
    let text = unescape_text(text);
    tracing::debug!(?range, text = %text, "applying edit");

    let outcome = parser.edit_range(
        range.start_line,
        range.start_column,
        range.end_line,
        range.end_column,
        &text,
    )?;
    print_outcome(&outcome, format)?;
    Ok(!outcome.has_errors())
}
