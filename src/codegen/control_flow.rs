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

//! Control flow code generation.
//!
//! The three nested control structures:
//! - `if`: a pending-label stack, conditional-false jump over the body
//! - loops: an entry/exit label pair pushed in two phases, so `continue`
//!   targets the entry label and `break` the exit label
//! - `switch`/`case`: fall-through lands on the *guard* of the next case,
//!   not its body, so every guard is re-evaluated; `break` jumps to the
//!   switch's out label
//!
//! Mismatched constructs (a `case` outside a switch, `break` outside
//! anything breakable) are caller errors and are rejected instead of
//! emitting garbage labels.

use super::expressions::ExpressionEmitter;
use super::labels::{ControlKind, SwitchFrame};
use super::quad::{Quad, QuadOp};
use super::CodeGenerator;
use crate::analyzer::type_check;
use crate::error::{CompileError, ErrorCode, Result};
use crate::operand::Operand;
use crate::types::{BinaryOp, ValueType};

/// Extension trait for control flow code generation.
pub trait ControlFlowEmitter {
    /// Open an `if` statement: jump over the body when the condition is
    /// false.
    fn if_begin(&mut self, condition: &Operand);

    /// Switch to the `else` branch of the innermost open `if`.
    fn if_else(&mut self) -> Result<()>;

    /// Close the innermost open `if`.
    fn if_end(&mut self) -> Result<()>;

    /// Emit and push a loop's entry label, ahead of the condition code.
    fn loop_init(&mut self);

    /// Emit the conditional exit jump after the condition is evaluated.
    fn loop_begin(&mut self, condition: &Operand);

    /// Close the innermost loop: jump back to the entry label and emit
    /// the exit label.
    fn loop_exit(&mut self) -> Result<()>;

    /// Emit a jump out of the innermost breakable construct.
    fn break_statement(&mut self) -> Result<()>;

    /// Emit a jump back to the innermost loop's entry label.
    fn continue_statement(&mut self) -> Result<()>;

    /// Open a `switch` statement over a validated selector.
    fn switch_begin(&mut self, selector: &Operand, line: u32) -> Result<()>;

    /// Open a `case`: emit the pending fall-through landing label, then
    /// the selector comparison and its guard jump.
    fn switch_case(&mut self, case: &Operand) -> Result<()>;

    /// Close a `case` body: jump to a fresh fall-through label, then emit
    /// the guard's false label.
    fn switch_case_end(&mut self) -> Result<()>;

    /// Close the innermost `switch`: emit the final fall-through label
    /// and the out label.
    fn switch_end(&mut self) -> Result<()>;
}

impl ControlFlowEmitter for CodeGenerator {
    fn if_begin(&mut self, condition: &Operand) {
        let false_label = self.new_label();
        self.if_labels.push(false_label);
        self.emit(Quad::new(
            QuadOp::Jf,
            Some(condition.to_string()),
            None,
            Some(false_label.to_string()),
        ));
    }

    fn if_else(&mut self) -> Result<()> {
        let false_label = self.if_labels.pop().ok_or_else(|| {
            CompileError::new(ErrorCode::UnbalancedControl, "'else' without an open 'if'", 0)
        })?;

        let end_label = self.new_label();
        self.emit(Quad::new(
            QuadOp::Jmp,
            None,
            None,
            Some(end_label.to_string()),
        ));
        self.emit_label_record(false_label.to_string());
        self.if_labels.push(end_label);
        Ok(())
    }

    fn if_end(&mut self) -> Result<()> {
        let pending = self.if_labels.pop().ok_or_else(|| {
            CompileError::new(
                ErrorCode::UnbalancedControl,
                "'if' end without an open 'if'",
                0,
            )
        })?;
        self.emit_label_record(pending.to_string());
        Ok(())
    }

    fn loop_init(&mut self) {
        let entry = self.new_label();
        self.loop_labels.push(entry);
        self.emit_label_record(entry.to_string());
    }

    fn loop_begin(&mut self, condition: &Operand) {
        let exit = self.new_label();
        self.loop_labels.push(exit);
        self.emit(Quad::new(
            QuadOp::Jf,
            Some(condition.to_string()),
            None,
            Some(exit.to_string()),
        ));
        self.nesting.push(ControlKind::Loop);
    }

    fn loop_exit(&mut self) -> Result<()> {
        if !matches!(self.nesting.last(), Some(ControlKind::Loop)) || self.loop_labels.len() < 2 {
            return Err(CompileError::new(
                ErrorCode::UnbalancedControl,
                "Loop end without an open loop",
                0,
            ));
        }
        self.nesting.pop();

        // Two pops matching the two pushes, restoring the enclosing
        // loop's stack top.
        let exit = self.loop_labels.pop().expect("exit label present");
        let entry = self.loop_labels.pop().expect("entry label present");
        self.emit(Quad::new(QuadOp::Jmp, None, None, Some(entry.to_string())));
        self.emit_label_record(exit.to_string());
        Ok(())
    }

    fn break_statement(&mut self) -> Result<()> {
        let target = match self.nesting.last() {
            Some(ControlKind::Loop) => self
                .loop_labels
                .last()
                .expect("open loop has an exit label")
                .to_string(),
            Some(ControlKind::Switch) => self
                .switches
                .last()
                .expect("open switch has a frame")
                .out
                .to_string(),
            None => {
                return Err(CompileError::new(
                    ErrorCode::BreakOutsideControl,
                    "'break' outside of a loop or switch",
                    0,
                ))
            }
        };
        self.emit(Quad::new(QuadOp::Jmp, None, None, Some(target)));
        Ok(())
    }

    fn continue_statement(&mut self) -> Result<()> {
        if !self.nesting.contains(&ControlKind::Loop) || self.loop_labels.len() < 2 {
            return Err(CompileError::new(
                ErrorCode::ContinueOutsideLoop,
                "'continue' outside of a loop",
                0,
            ));
        }
        // The innermost loop's labels are the top pair: entry below exit.
        let entry = self.loop_labels[self.loop_labels.len() - 2];
        self.emit(Quad::new(QuadOp::Jmp, None, None, Some(entry.to_string())));
        Ok(())
    }

    fn switch_begin(&mut self, selector: &Operand, line: u32) -> Result<()> {
        type_check::switch_selector(selector, line)?;

        let out = self.new_label();
        let skip = self.new_label();
        self.switches.push(SwitchFrame {
            selector: selector.clone(),
            out,
            skip,
            pending_false: None,
        });
        self.nesting.push(ControlKind::Switch);
        Ok(())
    }

    fn switch_case(&mut self, case: &Operand) -> Result<()> {
        let (selector, skip) = match self.switches.last() {
            Some(frame) if frame.pending_false.is_none() => {
                (frame.selector.clone(), frame.skip)
            }
            Some(_) => {
                return Err(CompileError::new(
                    ErrorCode::UnbalancedControl,
                    "'case' while the previous case is still open",
                    0,
                ))
            }
            None => {
                return Err(CompileError::new(
                    ErrorCode::UnbalancedControl,
                    "'case' outside of a switch",
                    0,
                ))
            }
        };

        // Fall-through from the previous case lands here, ahead of the
        // guard, so the equality check is re-evaluated on that path too.
        self.emit_label_record(skip.to_string());

        let guard = self.emit_binary(BinaryOp::Eq, &selector, case, ValueType::Bool);
        let false_label = self.new_label();
        self.emit(Quad::new(
            QuadOp::Jf,
            Some(guard.to_string()),
            None,
            Some(false_label.to_string()),
        ));
        self.switches
            .last_mut()
            .expect("frame checked above")
            .pending_false = Some(false_label);
        Ok(())
    }

    fn switch_case_end(&mut self) -> Result<()> {
        let false_label = match self.switches.last_mut() {
            Some(frame) => frame.pending_false.take().ok_or_else(|| {
                CompileError::new(
                    ErrorCode::UnbalancedControl,
                    "Case end without an open case",
                    0,
                )
            })?,
            None => {
                return Err(CompileError::new(
                    ErrorCode::UnbalancedControl,
                    "Case end outside of a switch",
                    0,
                ))
            }
        };

        let next_skip = self.new_label();
        self.switches
            .last_mut()
            .expect("frame checked above")
            .skip = next_skip;
        self.emit(Quad::new(
            QuadOp::Jmp,
            None,
            None,
            Some(next_skip.to_string()),
        ));
        self.emit_label_record(false_label.to_string());
        Ok(())
    }

    fn switch_end(&mut self) -> Result<()> {
        if !matches!(self.nesting.last(), Some(ControlKind::Switch)) {
            return Err(CompileError::new(
                ErrorCode::UnbalancedControl,
                "Switch end without an open switch",
                0,
            ));
        }
        let frame = self.switches.pop().expect("open switch has a frame");
        if frame.pending_false.is_some() {
            return Err(CompileError::new(
                ErrorCode::UnbalancedControl,
                "Switch end while a case is still open",
                0,
            ));
        }
        self.nesting.pop();

        self.emit_label_record(frame.skip.to_string());
        self.emit_label_record(frame.out.to_string());
        Ok(())
    }
}
