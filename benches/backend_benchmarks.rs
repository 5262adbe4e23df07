// Quartz - A semantic analyzer and quadruple IR backend for a small imperative language
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Performance benchmarks for the Quartz backend.
//!
//! Run with: cargo bench
//!
//! Results are saved to target/criterion/ with HTML reports.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quartz::analyzer::SymbolTable;
use quartz::codegen::{CodeGenerator, ControlFlowEmitter, ExpressionEmitter};
use quartz::{BinaryOp, Operand, ValueType};

// ============================================================================
// Symbol Table Benchmarks
// ============================================================================

fn bench_symbol_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("symbol_table");

    for size in [100usize, 1_000, 5_000] {
        group.bench_with_input(BenchmarkId::new("declare", size), &size, |b, &size| {
            b.iter(|| {
                let mut table = SymbolTable::new();
                table.enter_scope();
                for i in 0..size {
                    table
                        .declare_variable(&format!("v{}", i), ValueType::Int, true, i as u32)
                        .unwrap();
                }
                table.exit_scope();
                black_box(table.history().len())
            })
        });

        group.bench_with_input(BenchmarkId::new("resolve", size), &size, |b, &size| {
            let mut table = SymbolTable::new();
            table.enter_scope();
            for i in 0..size {
                table
                    .declare_variable(&format!("v{}", i), ValueType::Int, true, i as u32)
                    .unwrap();
            }
            b.iter(|| {
                for i in 0..size {
                    black_box(table.resolve(&format!("v{}", i), 1).unwrap());
                }
            })
        });
    }

    group.finish();
}

// ============================================================================
// Code Generation Benchmarks
// ============================================================================

fn bench_codegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("codegen");

    for size in [100usize, 1_000, 10_000] {
        group.bench_with_input(
            BenchmarkId::new("emit_binary", size),
            &size,
            |b, &size| {
                let x = Operand::reference("x", ValueType::Int);
                b.iter(|| {
                    let mut gen = CodeGenerator::new();
                    for _ in 0..size {
                        gen.emit_binary(BinaryOp::Add, &x, &Operand::int(1), ValueType::Int);
                    }
                    black_box(gen.quads().len())
                })
            },
        );
    }

    group.bench_function("nested_loops_64", |b| {
        let cond = Operand::reference("c", ValueType::Bool);
        b.iter(|| {
            let mut gen = CodeGenerator::new();
            for _ in 0..64 {
                gen.loop_init();
                gen.loop_begin(&cond);
            }
            for _ in 0..64 {
                gen.loop_exit().unwrap();
            }
            black_box(gen.finish().unwrap().len())
        })
    });

    group.bench_function("render_1000", |b| {
        let mut gen = CodeGenerator::new();
        let x = Operand::reference("x", ValueType::Int);
        for _ in 0..1_000 {
            gen.emit_binary(BinaryOp::Mul, &x, &Operand::int(2), ValueType::Int);
        }
        b.iter(|| black_box(gen.render().len()))
    });

    group.finish();
}

criterion_group!(benches, bench_symbol_table, bench_codegen);
criterion_main!(benches);
