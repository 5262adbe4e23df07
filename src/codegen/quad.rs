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

//! Quadruple instruction records.
//!
//! One quadruple is four tab-separated fields `operator arg1 arg2 result`;
//! absent fields render as the `_` placeholder. The rendered stream is the
//! sole artifact the downstream assembler consumes, so field order and
//! placeholder rendering are part of the compatibility surface.

use crate::types::{BinaryOp, StepOp, UnaryOp};

/// Placeholder token printed for an absent quadruple field.
pub const PLACEHOLDER: &str = "_";

/// A quadruple operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadOp {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division.
    Div,
    /// Modulo.
    Mod,
    /// Equality comparison.
    Eq,
    /// Inequality comparison.
    Ne,
    /// Less-than comparison.
    Lt,
    /// Less-or-equal comparison.
    Le,
    /// Greater-than comparison.
    Gt,
    /// Greater-or-equal comparison.
    Ge,
    /// Logical AND.
    And,
    /// Logical OR.
    Or,
    /// Arithmetic negation.
    Neg,
    /// Logical negation. Renders with three fields; the unused second
    /// argument slot is omitted entirely instead of printing a
    /// placeholder.
    Not,
    /// Value copy into named storage.
    Assign,
    /// Unconditional jump.
    Jmp,
    /// Conditional jump taken when the argument is false.
    Jf,
    /// Label definition record.
    Label,
    /// Push a value onto the argument stack.
    Push,
    /// Pop the argument stack into named storage.
    Pop,
    /// Transfer control to a function entry label.
    Call,
    /// Return from the current function.
    Ret,
    /// Write a value to the output device.
    Print,
}

impl QuadOp {
    /// Get the mnemonic printed in the instruction stream.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            QuadOp::Add => "add",
            QuadOp::Sub => "sub",
            QuadOp::Mul => "mul",
            QuadOp::Div => "div",
            QuadOp::Mod => "mod",
            QuadOp::Eq => "eq",
            QuadOp::Ne => "neq",
            QuadOp::Lt => "lt",
            QuadOp::Le => "le",
            QuadOp::Gt => "gt",
            QuadOp::Ge => "ge",
            QuadOp::And => "and",
            QuadOp::Or => "or",
            QuadOp::Neg => "neg",
            QuadOp::Not => "not",
            QuadOp::Assign => "assign",
            QuadOp::Jmp => "jmp",
            QuadOp::Jf => "jf",
            QuadOp::Label => "label",
            QuadOp::Push => "push",
            QuadOp::Pop => "pop",
            QuadOp::Call => "call",
            QuadOp::Ret => "ret",
            QuadOp::Print => "print",
        }
    }
}

impl std::fmt::Display for QuadOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

impl From<BinaryOp> for QuadOp {
    fn from(op: BinaryOp) -> Self {
        match op {
            BinaryOp::Add => QuadOp::Add,
            BinaryOp::Sub => QuadOp::Sub,
            BinaryOp::Mul => QuadOp::Mul,
            BinaryOp::Div => QuadOp::Div,
            BinaryOp::Mod => QuadOp::Mod,
            BinaryOp::Eq => QuadOp::Eq,
            BinaryOp::Ne => QuadOp::Ne,
            BinaryOp::Lt => QuadOp::Lt,
            BinaryOp::Le => QuadOp::Le,
            BinaryOp::Gt => QuadOp::Gt,
            BinaryOp::Ge => QuadOp::Ge,
            BinaryOp::And => QuadOp::And,
            BinaryOp::Or => QuadOp::Or,
        }
    }
}

impl From<UnaryOp> for QuadOp {
    fn from(op: UnaryOp) -> Self {
        match op {
            UnaryOp::Neg => QuadOp::Neg,
            UnaryOp::Not => QuadOp::Not,
        }
    }
}

impl From<StepOp> for QuadOp {
    fn from(op: StepOp) -> Self {
        match op {
            StepOp::Inc => QuadOp::Add,
            StepOp::Dec => QuadOp::Sub,
        }
    }
}

/// One four-address intermediate instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct Quad {
    /// The operator.
    pub op: QuadOp,
    /// First operand, if any.
    pub arg1: Option<String>,
    /// Second operand, if any.
    pub arg2: Option<String>,
    /// Result field (target storage or label name), if any.
    pub result: Option<String>,
}

impl Quad {
    /// Create a new quadruple.
    pub fn new(
        op: QuadOp,
        arg1: Option<String>,
        arg2: Option<String>,
        result: Option<String>,
    ) -> Self {
        Self {
            op,
            arg1,
            arg2,
            result,
        }
    }

    /// Create a label definition record.
    pub fn label(name: impl Into<String>) -> Self {
        Self::new(QuadOp::Label, None, None, Some(name.into()))
    }
}

impl std::fmt::Display for Quad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arg1 = self.arg1.as_deref().unwrap_or(PLACEHOLDER);
        let result = self.result.as_deref().unwrap_or(PLACEHOLDER);

        if self.op == QuadOp::Not {
            return write!(f, "{}\t{}\t{}", self.op, arg1, result);
        }

        let arg2 = self.arg2.as_deref().unwrap_or(PLACEHOLDER);
        write!(f, "{}\t{}\t{}\t{}", self.op, arg1, arg2, result)
    }
}
