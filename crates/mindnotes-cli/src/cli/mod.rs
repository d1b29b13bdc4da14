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


//! CLI command definitions and argument parsing.

use crate::commands::{self, OutputFormat, ParseSettings, TextRange};
use crate::error::CliError;
use clap::{Args, Subcommand};

/// Parser limits shared by every command.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct LimitArgs {
    /// Maximum line length in characters; longer lines are reported and skipped
    #[arg(long, value_name = "CHARS")]
    pub max_line_length: Option<usize>,

    /// Maximum number of live nodes
    #[arg(long, value_name = "COUNT")]
    pub max_nodes: Option<usize>,
}

impl From<LimitArgs> for ParseSettings {
    fn from(args: LimitArgs) -> Self {
        Self {
            max_line_length: args.max_line_length,
            max_nodes: args.max_nodes,
        }
    }
}

/// Top-level CLI commands.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use mindnotes_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse an outline file and print its change events
    ///
    /// Runs a full parse and prints one event per created node, followed by
    /// any parse errors. Exits with status 1 if errors were reported.
    Parse {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Print the outline of a file with node ids
    ///
    /// One node per line, indented two spaces per depth level. Attributes
    /// collected from body lines are shown in parentheses.
    Tree {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,

        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Apply one range edit to a file and print the events it produces
    ///
    /// The file is parsed first; only the events of the edit are printed.
    /// The file on disk is not modified.
    Edit {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,

        /// Range to replace, 0-based: LINE:COL-LINE:COL (or LINE:COL to insert)
        #[arg(short, long, value_name = "RANGE")]
        range: TextRange,

        /// Replacement text; `\n` starts a new line
        #[arg(short, long, value_name = "TEXT", allow_hyphen_values = true)]
        text: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        #[command(flatten)]
        limits: LimitArgs,
    },
}

impl Commands {
    /// Execute the command.
    ///
    /// Returns `Ok(false)` when the command ran but the parser reported
    /// errors.
    pub fn execute(self) -> Result<bool, CliError> {
        match self {
            Commands::Parse {
                file,
                format,
                limits,
            } => commands::parse(&file, format, &limits.into()),
            Commands::Tree { file, limits } => commands::tree(&file, &limits.into()),
            Commands::Edit {
                file,
                range,
                text,
                format,
                limits,
            } => commands::edit(&file, range, &text, format, &limits.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    #[test]
    fn test_parse_defaults() {
        let cli = TestCli::try_parse_from(["mindnotes", "parse", "notes.mn"]).unwrap();
        match cli.command {
            Commands::Parse {
                file,
                format,
                limits,
            } => {
                assert_eq!(file, "notes.mn");
                assert_eq!(format, OutputFormat::Text);
                assert_eq!(limits.max_line_length, None);
                assert_eq!(limits.max_nodes, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_edit_arguments() {
        let cli = TestCli::try_parse_from([
            "mindnotes",
            "edit",
            "notes.mn",
            "--range",
            "0:0-1:3",
            "--text",
            "-dash",
            "--format",
            "json",
            "--max-nodes",
            "10",
        ])
        .unwrap();
        match cli.command {
            Commands::Edit {
                range,
                text,
                format,
                limits,
                ..
            } => {
                assert_eq!((range.start_line, range.end_column), (0, 3));
                assert_eq!(text, "-dash");
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(limits.max_nodes, Some(10));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_edit_rejects_bad_range() {
        let result = TestCli::try_parse_from([
            "mindnotes", "edit", "notes.mn", "--range", "nope", "--text", "x",
        ]);
        assert!(result.is_err());
    }
}
