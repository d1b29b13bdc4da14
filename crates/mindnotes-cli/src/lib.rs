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


//! Command-line interface for the Mindnotes outline parser.
//!
//! # Commands
//!
//! - **parse**: parse a file from scratch and print the change events
//! - **tree**: parse a file and print the resulting outline with node ids
//! - **edit**: parse a file, apply one range edit and print only the events
//!   that edit produced
//!
//! # Examples
//!
//! ```no_run
//! use mindnotes_cli::commands::{parse, OutputFormat, ParseSettings};
//!
//! # fn main() -> Result<(), mindnotes_cli::error::CliError> {
//! let clean = parse("notes.mn", OutputFormat::Text, &ParseSettings::default())?;
//! assert!(clean);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
