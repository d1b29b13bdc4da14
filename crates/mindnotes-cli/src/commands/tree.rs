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


//! Tree command - outline view with node ids

use super::ParseSettings;
use crate::error::CliError;
use colored::Colorize;
use mindnotes_core::{Node, NodeTree};

/// Parse `file` and print the resulting outline.
///
/// One node per line in document order, indented two spaces per depth
/// level:
///
/// ```text
/// #1 rootNode
///   #2 child (color=red)
/// #3 sibling
/// ```
///
/// Parse errors are printed after the outline. Returns `Ok(true)` when there
/// were none.
pub fn tree(file: &str, settings: &ParseSettings) -> Result<bool, CliError> {
    let (parser, outcome) = settings.load(file)?;

    for line in render(parser.tree()) {
        println!("{}", line);
    }
    for error in &outcome.errors {
        println!("{} {}", "✗".red().bold(), error);
    }
    Ok(!outcome.has_errors())
}

/// Render the outline, depth first, children in sibling order.
fn render(tree: &NodeTree) -> Vec<String> {
    let mut lines = Vec::with_capacity(tree.len());
    let mut stack: Vec<(usize, _)> = tree.roots().into_iter().rev().map(|id| (0, id)).collect();

    while let Some((depth, id)) = stack.pop() {
        let Some(node) = tree.node(id) else {
            continue;
        };
        lines.push(format!("{}{}", "  ".repeat(depth), describe(node)));
        stack.extend(
            tree.children(id)
                .into_iter()
                .rev()
                .map(|child| (depth + 1, child)),
        );
    }
    lines
}

fn describe(node: &Node) -> String {
    let mut out = format!("{} {}", format!("#{}", node.id).dimmed(), node.head_text);
    if !node.attributes.is_empty() {
        let attributes: Vec<String> = node
            .attributes
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        out.push_str(&format!(" ({})", attributes.join(", ")));
    }
    out
}
