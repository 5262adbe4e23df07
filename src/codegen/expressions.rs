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

//! Expression code generation.
//!
//! Straight-line emission: binary and unary operations into fresh
//! temporaries, assignments, increment/decrement, argument pushes and
//! printing.

use super::quad::{Quad, QuadOp};
use super::CodeGenerator;
use crate::error::{CompileError, ErrorCode, Result};
use crate::operand::Operand;
use crate::types::{BinaryOp, StepOp, UnaryOp, ValueType};

/// Extension trait for expression code generation.
pub trait ExpressionEmitter {
    /// Emit a binary operation into a fresh temporary.
    ///
    /// `result_type` is the type the checker derived for the operation;
    /// it flows into the returned reference descriptor.
    fn emit_binary(
        &mut self,
        op: BinaryOp,
        lhs: &Operand,
        rhs: &Operand,
        result_type: ValueType,
    ) -> Operand;

    /// Emit a unary operation into a fresh temporary.
    fn emit_unary(&mut self, op: UnaryOp, operand: &Operand, result_type: ValueType) -> Operand;

    /// Emit an assignment of a value into named storage.
    fn emit_assign(&mut self, target: &str, source: &Operand);

    /// Emit an increment or decrement of a variable.
    ///
    /// The prefix form mutates in place and returns the variable's own
    /// reference. The postfix form snapshots the pre-mutation value into
    /// a temporary first and returns the temporary, so an expression
    /// using the result observes the original value while later
    /// statements see the updated variable.
    fn emit_step(&mut self, target: &Operand, op: StepOp, prefix: bool) -> Result<Operand>;

    /// Emit an argument-stack push.
    fn emit_push(&mut self, operand: &Operand);

    /// Emit a print of a value.
    fn emit_print(&mut self, operand: &Operand);
}

impl ExpressionEmitter for CodeGenerator {
    fn emit_binary(
        &mut self,
        op: BinaryOp,
        lhs: &Operand,
        rhs: &Operand,
        result_type: ValueType,
    ) -> Operand {
        let temp = self.new_temp(result_type);
        self.emit(Quad::new(
            op.into(),
            Some(lhs.to_string()),
            Some(rhs.to_string()),
            Some(temp.to_string()),
        ));
        temp
    }

    fn emit_unary(&mut self, op: UnaryOp, operand: &Operand, result_type: ValueType) -> Operand {
        let temp = self.new_temp(result_type);
        self.emit(Quad::new(
            op.into(),
            Some(operand.to_string()),
            None,
            Some(temp.to_string()),
        ));
        temp
    }

    fn emit_assign(&mut self, target: &str, source: &Operand) {
        self.emit(Quad::new(
            QuadOp::Assign,
            Some(source.to_string()),
            None,
            Some(target.to_string()),
        ));
    }

    fn emit_step(&mut self, target: &Operand, op: StepOp, prefix: bool) -> Result<Operand> {
        let name = target
            .name()
            .ok_or_else(|| {
                CompileError::new(
                    ErrorCode::MissingOperand,
                    "Increment/decrement target must be a storage reference",
                    0,
                )
            })?
            .to_string();

        if prefix {
            self.emit(Quad::new(
                op.into(),
                Some(name.clone()),
                Some("1".to_string()),
                Some(name),
            ));
            return Ok(target.clone());
        }

        // Snapshot before mutating, so the returned temporary holds the
        // pre-step value.
        let temp = self.new_temp(target.value_type());
        self.emit(Quad::new(
            QuadOp::Assign,
            Some(name.clone()),
            None,
            Some(temp.to_string()),
        ));
        self.emit(Quad::new(
            op.into(),
            Some(name.clone()),
            Some("1".to_string()),
            Some(name),
        ));
        Ok(temp)
    }

    fn emit_push(&mut self, operand: &Operand) {
        self.emit(Quad::new(
            QuadOp::Push,
            Some(operand.to_string()),
            None,
            None,
        ));
    }

    fn emit_print(&mut self, operand: &Operand) {
        self.emit(Quad::new(
            QuadOp::Print,
            Some(operand.to_string()),
            None,
            None,
        ));
    }
}
