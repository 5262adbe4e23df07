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

//! End-to-end tests for the Quartz backend.
//!
//! Each test drives the public API the way the parser front end would:
//! semantic checks first, then emission, in a single left-to-right pass.

use pretty_assertions::assert_eq;
use quartz::analyzer::{type_check, SymbolTable};
use quartz::codegen::{CodeGenerator, ControlFlowEmitter, ExpressionEmitter, FunctionEmitter};
use quartz::{BinaryOp, Operand, StepOp, ValueType};

// ============================================================================
// Straight-line code and if statements
// ============================================================================

/// int x = 5; if (x == 5) { print x; }
#[test]
fn test_if_statement_stream() {
    let mut table = SymbolTable::new();
    let mut gen = CodeGenerator::new();

    table.declare_variable("x", ValueType::Int, true, 1).unwrap();
    gen.emit_assign("x", &Operand::int(5));

    table.mark_used("x", 2).unwrap();
    table.check_initialized("x", 2).unwrap();
    let x = Operand::reference("x", table.data_type_of("x", 2).unwrap());
    let cond_type = type_check::comparison_result(x.value_type(), ValueType::Int, 2).unwrap();
    assert_eq!(cond_type, ValueType::Bool);
    let cond = gen.emit_binary(BinaryOp::Eq, &x, &Operand::int(5), cond_type);

    gen.if_begin(&cond);
    table.enter_scope();
    gen.emit_print(&x);
    table.exit_scope();
    gen.if_end().unwrap();

    assert_eq!(
        gen.render(),
        "assign\t5\t_\tx\n\
         eq\tx\t5\tt0\n\
         jf\tt0\t_\tL0\n\
         print\tx\t_\t_\n\
         label\t_\t_\tL0\n"
    );
    assert!(gen.finish().is_ok());
}

/// y = x++; leaves the pre-increment value in y.
#[test]
fn test_postfix_increment_ordering() {
    let mut table = SymbolTable::new();
    let mut gen = CodeGenerator::new();

    table.declare_variable("x", ValueType::Int, true, 1).unwrap();
    table.declare_variable("y", ValueType::Int, true, 2).unwrap();

    table.validate_not_const("x", 3).unwrap();
    let x = Operand::reference("x", table.data_type_of("x", 3).unwrap());
    let snapshot = gen.emit_step(&x, StepOp::Inc, false).unwrap();

    type_check::assignment_compatible(
        table.data_type_of("y", 3).unwrap(),
        snapshot.value_type(),
        3,
    )
    .unwrap();
    gen.emit_assign("y", &snapshot);

    // Snapshot of x into a temporary, increment of x, assignment of the
    // temporary into y, in that order.
    assert_eq!(
        gen.render(),
        "assign\tx\t_\tt0\n\
         add\tx\t1\tx\n\
         assign\tt0\t_\ty\n"
    );
}

/// ++x mutates in place and the expression sees the updated variable.
#[test]
fn test_prefix_increment_ordering() {
    let mut gen = CodeGenerator::new();
    let x = Operand::reference("x", ValueType::Int);

    let result = gen.emit_step(&x, StepOp::Inc, true).unwrap();
    assert_eq!(result, x);
    assert_eq!(gen.render(), "add\tx\t1\tx\n");
}

// ============================================================================
// Loops
// ============================================================================

/// int i = 0; while (i < 3) { print i; i++; }
#[test]
fn test_while_loop_stream() {
    let mut table = SymbolTable::new();
    let mut gen = CodeGenerator::new();

    table.declare_variable("i", ValueType::Int, true, 1).unwrap();
    gen.emit_assign("i", &Operand::int(0));

    gen.loop_init();
    table.mark_used("i", 2).unwrap();
    let i = Operand::reference("i", table.data_type_of("i", 2).unwrap());
    let cond_type = type_check::comparison_result(i.value_type(), ValueType::Int, 2).unwrap();
    let cond = gen.emit_binary(BinaryOp::Lt, &i, &Operand::int(3), cond_type);
    gen.loop_begin(&cond);

    table.enter_scope();
    gen.emit_print(&i);
    gen.emit_step(&i, StepOp::Inc, true).unwrap();
    table.exit_scope();
    gen.loop_exit().unwrap();

    assert_eq!(
        gen.render(),
        "assign\t0\t_\ti\n\
         label\t_\t_\tL0\n\
         lt\ti\t3\tt0\n\
         jf\tt0\t_\tL1\n\
         print\ti\t_\t_\n\
         add\ti\t1\ti\n\
         jmp\t_\t_\tL0\n\
         label\t_\t_\tL1\n"
    );
    assert!(gen.finish().is_ok());
}

// ============================================================================
// Switch statements
// ============================================================================

/// switch (v) { case 1: print 1; case 2: print 2; break; }
///
/// Case 1 has no break, so the instructions after its body must flow into
/// case 2's equality guard, not jump into case 2's body.
#[test]
fn test_switch_fall_through_re_evaluates_guard() {
    let mut table = SymbolTable::new();
    let mut gen = CodeGenerator::new();

    table.declare_variable("v", ValueType::Int, true, 1).unwrap();
    table.mark_used("v", 2).unwrap();
    let v = Operand::reference("v", table.data_type_of("v", 2).unwrap());

    gen.switch_begin(&v, 2).unwrap();

    gen.switch_case(&Operand::int(1)).unwrap();
    gen.emit_print(&Operand::int(1));
    gen.switch_case_end().unwrap();

    gen.switch_case(&Operand::int(2)).unwrap();
    gen.emit_print(&Operand::int(2));
    gen.break_statement().unwrap();
    gen.switch_case_end().unwrap();

    gen.switch_end().unwrap();

    let listing = gen.render();
    assert_eq!(
        listing,
        "label\t_\t_\tL1\n\
         eq\tv\t1\tt0\n\
         jf\tt0\t_\tL2\n\
         print\t1\t_\t_\n\
         jmp\t_\t_\tL3\n\
         label\t_\t_\tL2\n\
         label\t_\t_\tL3\n\
         eq\tv\t2\tt1\n\
         jf\tt1\t_\tL4\n\
         print\t2\t_\t_\n\
         jmp\t_\t_\tL0\n\
         jmp\t_\t_\tL5\n\
         label\t_\t_\tL4\n\
         label\t_\t_\tL5\n\
         label\t_\t_\tL0\n"
    );

    // The fall-through jump from case 1's body lands at L3, which flows
    // straight into case 2's guard rather than its body.
    let body1 = listing.find("print\t1").unwrap();
    let guard2 = listing.find("eq\tv\t2").unwrap();
    let landing = listing.find("label\t_\t_\tL3").unwrap();
    assert!(body1 < landing && landing < guard2);

    assert!(gen.finish().is_ok());
}

/// Nested switches restore the enclosing switch's labels on exit.
#[test]
fn test_nested_switches() {
    let mut gen = CodeGenerator::new();
    let a = Operand::reference("a", ValueType::Int);
    let b = Operand::reference("b", ValueType::Char);

    gen.switch_begin(&a, 1).unwrap();
    gen.switch_case(&Operand::int(1)).unwrap();

    gen.switch_begin(&b, 2).unwrap();
    gen.switch_case(&Operand::character('x')).unwrap();
    gen.emit_print(&Operand::character('x'));
    gen.switch_case_end().unwrap();
    gen.switch_end().unwrap();

    gen.switch_case_end().unwrap();
    gen.switch_end().unwrap();

    assert!(gen.finish().is_ok());
}

// ============================================================================
// Functions
// ============================================================================

/// int add(int a, int b = 10) { return a + b; } called as add(7).
#[test]
fn test_function_with_default_argument() {
    let mut table = SymbolTable::new();
    let mut gen = CodeGenerator::new();

    // Definition.
    table.declare_function("add", ValueType::Int, 1).unwrap();
    table.declare_parameter("a", ValueType::Int, None, 1).unwrap();
    table
        .declare_parameter("b", ValueType::Int, Some(Operand::int(10)), 1)
        .unwrap();
    gen.function_label("add");
    gen.function_params_prolog("add", &table).unwrap();

    table.enter_scope();
    let a = Operand::reference("a", table.data_type_of("a", 2).unwrap());
    let b = Operand::reference("b", table.data_type_of("b", 2).unwrap());
    let sum_type = type_check::arithmetic_result(a.value_type(), b.value_type(), 2).unwrap();
    let sum = gen.emit_binary(BinaryOp::Add, &a, &b, sum_type);
    table.validate_return_type(sum.value_type(), 2).unwrap();
    table.mark_function_returned(2).unwrap();
    let ret = gen.return_statement(Some(&sum));
    assert_eq!(ret.name(), Some("@ret"));
    table.exit_scope();
    table.check_function_has_return(3).unwrap();

    // Call site: add(7) relies on b's default.
    table.validate_call("add", &[ValueType::Int], 5).unwrap();
    gen.emit_push(&Operand::int(7));
    let result = gen.function_call("add", 1, &table).unwrap();
    assert_eq!(result.value_type(), ValueType::Int);
    assert_eq!(result.to_string(), "@ret");

    assert_eq!(
        gen.render(),
        "label\t_\t_\tfunc_add\n\
         pop\t_\t_\t@call\n\
         pop\t_\t_\tb\n\
         pop\t_\t_\ta\n\
         add\ta\tb\tt0\n\
         ret\tt0\t_\t_\n\
         push\t7\t_\t_\n\
         push\t10\t_\t_\n\
         call\t_\t_\tfunc_add\n"
    );
}

/// Omitted trailing defaults are pushed in reverse parameter order.
#[test]
fn test_omitted_defaults_push_in_reverse_order() {
    let mut table = SymbolTable::new();
    let mut gen = CodeGenerator::new();

    table.declare_function("conf", ValueType::Void, 1).unwrap();
    table
        .declare_parameter("a", ValueType::Int, Some(Operand::int(1)), 1)
        .unwrap();
    table
        .declare_parameter("b", ValueType::Int, Some(Operand::int(2)), 1)
        .unwrap();
    table
        .declare_parameter("c", ValueType::Int, Some(Operand::int(3)), 1)
        .unwrap();

    table.validate_call("conf", &[], 2).unwrap();
    gen.function_call("conf", 0, &table).unwrap();

    assert_eq!(
        gen.render(),
        "push\t3\t_\t_\n\
         push\t2\t_\t_\n\
         push\t1\t_\t_\n\
         call\t_\t_\tfunc_conf\n"
    );
}

/// A function whose only return sits inside a conditional still fails the
/// straight-line return check.
#[test]
fn test_return_inside_conditional_does_not_count() {
    let mut table = SymbolTable::new();

    table.declare_function("pick", ValueType::Int, 1).unwrap();
    table.enter_scope(); // body

    table.enter_scope(); // if block
    table.validate_return_type(ValueType::Int, 3).unwrap();
    table.mark_function_returned(3).unwrap();
    table.exit_scope();

    table.exit_scope();
    let err = table.check_function_has_return(5).unwrap_err();
    assert_eq!(err.code, quartz::ErrorCode::MissingReturn);
}

// ============================================================================
// Scopes and retained history
// ============================================================================

/// Parameters stay resolvable inside the function after inner blocks
/// exit; plain locals do not survive their scope.
#[test]
fn test_scope_retention_rules() {
    let mut table = SymbolTable::new();

    table.declare_function("f", ValueType::Void, 1).unwrap();
    table.declare_parameter("p", ValueType::Int, None, 1).unwrap();
    table.enter_scope(); // body

    table.enter_scope(); // inner block
    table
        .declare_variable("local", ValueType::Int, true, 3)
        .unwrap();
    assert!(table.resolve("p", 3).is_ok());
    table.exit_scope();

    assert!(table.resolve("p", 4).is_ok());
    assert!(table.resolve("local", 4).is_err());

    table.exit_scope();
}

/// The retained history keeps exited symbols for the final report.
#[test]
fn test_history_report_written_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("symbol_table.txt");

    let mut table = SymbolTable::new();
    table.declare_variable("g", ValueType::Int, true, 1).unwrap();
    table.declare_function("main", ValueType::Void, 2).unwrap();
    table.enter_scope();
    table
        .declare_variable("local", ValueType::Float, true, 3)
        .unwrap();
    table.mark_used("local", 4).unwrap();
    table.exit_scope();
    table.check_main(9).unwrap();

    table.history().write_report(&path).unwrap();
    let report = std::fs::read_to_string(&path).unwrap();

    let mut lines = report.lines();
    assert_eq!(
        lines.next().unwrap(),
        "ID\tName\tKind\tType\tScope\tInitialized\tLine\tUsed\tParam"
    );
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], "0\tg\tvar\tint\t0\t1\t1\t0\t0");
    assert_eq!(rows[1], "1\tmain\tfunc\tvoid\t0\t0\t2\t0\t0");
    // First write wins: the row keeps declaration-time flags even though
    // 'local' was marked used afterwards.
    assert_eq!(rows[2], "2\tlocal\tvar\tfloat\t1\t1\t3\t0\t0");
}

/// A complete small program: globals, a function, a loop, a call.
#[test]
fn test_full_program_balances() {
    let mut table = SymbolTable::new();
    let mut gen = CodeGenerator::new();

    // int total = 0;
    table
        .declare_variable("total", ValueType::Int, true, 1)
        .unwrap();
    gen.emit_assign("total", &Operand::int(0));

    // void main() { int i = 0; while (i < 2) { total = total + i; i++; } }
    table.declare_function("main", ValueType::Void, 2).unwrap();
    gen.function_label("main");
    gen.function_params_prolog("main", &table).unwrap();
    table.enter_scope();

    table.declare_variable("i", ValueType::Int, true, 3).unwrap();
    gen.emit_assign("i", &Operand::int(0));

    gen.loop_init();
    table.mark_used("i", 4).unwrap();
    let i = Operand::reference("i", ValueType::Int);
    let cond = gen.emit_binary(
        BinaryOp::Lt,
        &i,
        &Operand::int(2),
        type_check::comparison_result(ValueType::Int, ValueType::Int, 4).unwrap(),
    );
    gen.loop_begin(&cond);

    table.enter_scope();
    table.mark_used("total", 5).unwrap();
    table.validate_not_const("total", 5).unwrap();
    let total = Operand::reference("total", ValueType::Int);
    let sum = gen.emit_binary(
        BinaryOp::Add,
        &total,
        &i,
        type_check::arithmetic_result(ValueType::Int, ValueType::Int, 5).unwrap(),
    );
    gen.emit_assign("total", &sum);
    gen.emit_step(&i, StepOp::Inc, true).unwrap();
    table.exit_scope();

    gen.loop_exit().unwrap();
    gen.return_statement(None);
    table.exit_scope();
    table.check_function_has_return(8).unwrap();
    table.check_main(9).unwrap();

    assert!(table.warnings().is_empty());
    let quads = gen.finish().unwrap();
    assert!(!quads.is_empty());
}
