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


//! Parse command - full parse with event output

use super::{print_outcome, OutputFormat, ParseSettings};
use crate::error::CliError;
use colored::Colorize;

/// Parse `file` from scratch and print every event and error.
///
/// Returns `Ok(true)` when no parse error was reported. Text output ends with
/// a ✓/✗ summary line; JSON output is a single object and nothing else.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read or the parser faults.
pub fn parse(file: &str, format: OutputFormat, settings: &ParseSettings) -> Result<bool, CliError> {
    let (parser, outcome) = settings.load(file)?;
    print_outcome(&outcome, format)?;

    let clean = !outcome.has_errors();
    if format == OutputFormat::Text {
        let mark = if clean {
            "✓".green().bold()
        } else {
            "✗".red().bold()
        };
        println!(
            "{} {} ({} nodes, {} events, {} errors)",
            mark,
            file,
            parser.tree().len(),
            outcome.events.len(),
            outcome.errors.len()
        );
    }
    Ok(clean)
}
