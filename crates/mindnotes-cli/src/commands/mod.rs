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


//! CLI command implementations

mod edit;
mod parse;
mod tree;

pub use edit::{edit, parse_range, unescape_text, TextRange};
pub use parse::parse;
pub use tree::tree;

use crate::error::CliError;
use colored::Colorize;
use mindnotes_core::{OutlineParser, ParseError, ParseEvent, ParseOutcome, ParserOptions};
use serde_json::json;
use std::fs;

/// Default maximum file size (1 GiB).
/// Can be overridden via the `MINDNOTES_MAX_FILE_SIZE` environment variable.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

fn get_max_file_size() -> u64 {
    std::env::var("MINDNOTES_MAX_FILE_SIZE")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Read a file from disk with size validation.
///
/// The size is checked through `fs::metadata()` before anything is read, so
/// oversized files are rejected without allocating.
///
/// # Errors
///
/// - [`CliError::Io`] if metadata cannot be read, the file cannot be read, or
///   it is not valid UTF-8
/// - [`CliError::FileTooLarge`] if the file exceeds `MINDNOTES_MAX_FILE_SIZE`
pub fn read_file(path: &str) -> Result<String, CliError> {
    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;

    let max_file_size = get_max_file_size();
    if metadata.len() > max_file_size {
        return Err(CliError::file_too_large(path, metadata.len(), max_file_size));
    }

    fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
}

/// How events and errors are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line per event, errors marked with ✗
    #[default]
    Text,
    /// A single JSON object `{"events": [...], "errors": [...]}`
    Json,
}

/// Parser limits taken from the command line. Unset values keep the
/// library defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseSettings {
    pub max_line_length: Option<usize>,
    pub max_nodes: Option<usize>,
}

impl ParseSettings {
    pub fn options(&self) -> ParserOptions {
        let mut builder = ParserOptions::builder();
        if let Some(length) = self.max_line_length {
            builder = builder.max_line_length(length);
        }
        if let Some(nodes) = self.max_nodes {
            builder = builder.max_nodes(nodes);
        }
        builder.build()
    }

    /// Read `file` and run a full parse over it.
    pub(crate) fn load(&self, file: &str) -> Result<(OutlineParser, ParseOutcome), CliError> {
        let content = read_file(file)?;
        let mut parser = OutlineParser::with_options(self.options());
        let outcome = parser.parse_all(&content)?;
        tracing::debug!(
            file,
            events = outcome.events.len(),
            errors = outcome.errors.len(),
            "parsed file"
        );
        Ok((parser, outcome))
    }
}

fn format_event(event: &ParseEvent) -> String {
    match event {
        ParseEvent::AddNode {
            id,
            parent_id,
            text,
        }
        | ParseEvent::EditNode {
            id,
            parent_id,
            text,
        } => {
            let parent = parent_id.map_or_else(|| "-".to_string(), |p| p.to_string());
            format!("{:<11} id={} parent={} {:?}", event.name(), id, parent, text)
        }
        ParseEvent::DeleteNode { id } => format!("{:<11} id={}", event.name(), id),
    }
}

fn error_json(error: &ParseError) -> serde_json::Value {
    json!({
        "kind": error.kind.to_string(),
        "line": error.line,
        "content": error.content,
        "message": error.message,
    })
}

/// Print an outcome in the requested format.
pub(crate) fn print_outcome(
    outcome: &ParseOutcome,
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Text => {
            for event in &outcome.events {
                println!("{}", format_event(event));
            }
            for error in &outcome.errors {
                println!("{} {}", "✗".red().bold(), error);
            }
        }
        OutputFormat::Json => {
            let errors: Vec<_> = outcome.errors.iter().map(error_json).collect();
            let document = json!({
                "events": outcome.events,
                "errors": errors,
            });
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }
    Ok(())
}
