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

//! Function code generation.
//!
//! Calls use a stack-based convention: the caller pushes arguments left
//! to right (omitted trailing arguments are filled from parameter
//! defaults, pushed from the last parameter down), then transfers
//! control. The callee pops the return-address slot first, then pops its
//! parameters in reverse declaration order. The return value travels
//! through the reserved `@ret` slot.

use super::expressions::ExpressionEmitter;
use super::quad::{Quad, QuadOp};
use super::{CodeGenerator, CALL_SLOT};
use crate::analyzer::SymbolTable;
use crate::error::{CompileError, ErrorCode, Result};
use crate::operand::Operand;
use crate::types::ValueType;

/// Render a function's entry label.
fn entry_label(name: &str) -> String {
    format!("func_{}", name)
}

/// Extension trait for function code generation.
pub trait FunctionEmitter {
    /// Emit a function's entry label and the return-address pop.
    fn function_label(&mut self, name: &str);

    /// Emit the parameter pops at function entry, in reverse declaration
    /// order (the last-pushed argument is popped first).
    fn function_params_prolog(&mut self, name: &str, table: &SymbolTable) -> Result<()>;

    /// Emit a call: push defaults for omitted trailing arguments, then
    /// transfer control. Returns the `@ret` reference typed with the
    /// callee's declared return type.
    fn function_call(
        &mut self,
        name: &str,
        provided_args: usize,
        table: &SymbolTable,
    ) -> Result<Operand>;

    /// Emit a return statement, with or without a value. The returned
    /// descriptor is bound to the `@ret` slot so a caller-side
    /// [`FunctionEmitter::function_call`] can reference it uniformly.
    fn return_statement(&mut self, value: Option<&Operand>) -> Operand;
}

impl FunctionEmitter for CodeGenerator {
    fn function_label(&mut self, name: &str) {
        self.emit_label_record(entry_label(name));
        self.emit(Quad::new(
            QuadOp::Pop,
            None,
            None,
            Some(CALL_SLOT.to_string()),
        ));
    }

    fn function_params_prolog(&mut self, name: &str, table: &SymbolTable) -> Result<()> {
        let function = table.function(name).ok_or_else(|| {
            CompileError::new(
                ErrorCode::UndeclaredSymbol,
                format!("Function '{}' is not defined", name),
                0,
            )
        })?;

        for param_id in function.params.iter().rev() {
            let param_name = table.symbol(*param_id).name.clone();
            self.emit(Quad::new(QuadOp::Pop, None, None, Some(param_name)));
        }
        Ok(())
    }

    fn function_call(
        &mut self,
        name: &str,
        provided_args: usize,
        table: &SymbolTable,
    ) -> Result<Operand> {
        let function = table.function(name).ok_or_else(|| {
            CompileError::new(
                ErrorCode::UndeclaredSymbol,
                format!("Function '{}' is not defined", name),
                0,
            )
        })?;
        let params = function.params.clone();
        let return_type = function.value_type;

        // Fill omitted trailing arguments from the stored defaults,
        // last parameter first, matching the callee's pop order.
        for param_id in params.iter().skip(provided_args).rev() {
            let param = table.symbol(*param_id);
            let default = param.default_value.clone().ok_or_else(|| {
                CompileError::new(
                    ErrorCode::MissingOperand,
                    format!(
                        "Parameter '{}' of '{}' has no default value",
                        param.name, name
                    ),
                    0,
                )
            })?;
            self.emit_push(&default);
        }

        self.emit(Quad::new(
            QuadOp::Call,
            None,
            None,
            Some(entry_label(name)),
        ));
        Ok(Operand::ret_slot(return_type))
    }

    fn return_statement(&mut self, value: Option<&Operand>) -> Operand {
        match value {
            Some(operand) => {
                self.emit(Quad::new(
                    QuadOp::Ret,
                    Some(operand.to_string()),
                    None,
                    None,
                ));
                Operand::ret_slot(operand.value_type())
            }
            None => {
                self.emit(Quad::new(QuadOp::Ret, None, None, None));
                Operand::ret_slot(ValueType::Void)
            }
        }
    }
}
