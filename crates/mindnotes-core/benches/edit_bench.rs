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


//! Full parse and single-line edit benchmarks.
//!
//! - Full parse time by document size
//! - Cost of retyping one head line in a large document
//! - Cost of inserting a new child line in a large document

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mindnotes_core::OutlineParser;

const STANDARD_SIZES: [usize; 3] = [100, 1_000, 10_000];

/// Roughly balanced outline: every fourth line is a root, the rest nest.
fn generate_outline(lines: usize) -> String {
    (0..lines)
        .map(|i| {
            let depth = i % 4;
            format!("{}node {}", "  ".repeat(depth), i)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_parse_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_all");
    for &size in &STANDARD_SIZES {
        let text = generate_outline(size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| {
                let mut parser = OutlineParser::new();
                black_box(parser.parse_all(black_box(text)).unwrap())
            })
        });
    }
    group.finish();
}

fn bench_retype_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("edit_retype_line");
    for &size in &STANDARD_SIZES {
        let mut parser = OutlineParser::new();
        parser.parse_all(&generate_outline(size)).unwrap();
        let line = size / 2;
        let indentation = (line % 4) * 2;
        let mut toggle = false;
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter(|| {
                toggle = !toggle;
                let text = if toggle { "renamed" } else { "original" };
                let end = parser.lines()[line].chars().count();
                black_box(parser.edit_range(line, indentation, line, end, text).unwrap())
            })
        });
    }
    group.finish();
}

fn bench_insert_child(c: &mut Criterion) {
    let mut group = c.benchmark_group("edit_insert_child");
    for &size in &STANDARD_SIZES {
        let text = generate_outline(size);
        let line = size / 2;
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter_batched(
                || {
                    let mut parser = OutlineParser::new();
                    parser.parse_all(text).unwrap();
                    parser
                },
                |mut parser| {
                    let end = parser.lines()[line].chars().count();
                    black_box(
                        parser
                            .edit_range(line, end, line, end, "\n        inserted")
                            .unwrap(),
                    )
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse_all, bench_retype_line, bench_insert_child);
criterion_main!(benches);
