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


//! Error types for the Mindnotes CLI.

use mindnotes_core::Fault;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a CLI command.
///
/// Parse errors reported by the outline parser are not failures here; they
/// are printed alongside the events and only affect the exit code.
#[derive(Debug, Error)]
pub enum CliError {
    /// File read or metadata access failed.
    #[error("I/O error for '{path}': {message}")]
    Io { path: PathBuf, message: String },

    /// File size exceeds the configured maximum.
    #[error(
        "File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes. \
         Set MINDNOTES_MAX_FILE_SIZE (in bytes) to raise the limit."
    )]
    FileTooLarge { path: PathBuf, actual: u64, max: u64 },

    /// The `--range` argument could not be understood.
    #[error("Invalid range '{range}': expected LINE:COL-LINE:COL")]
    InvalidRange { range: String },

    /// The parser rejected an operation because of an internal inconsistency
    /// or an out-of-range edit.
    #[error("Parser fault: {0}")]
    Fault(#[from] Fault),

    #[error("JSON format error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    pub fn file_too_large(path: impl Into<PathBuf>, actual: u64, max: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            actual,
            max,
        }
    }

    pub fn invalid_range(range: impl Into<String>) -> Self {
        Self::InvalidRange {
            range: range.into(),
        }
    }
}
