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

//! Error types for the Quartz backend.
//!
//! All semantic and code-generation errors are fatal to the compilation
//! unit: the front end stops at the first `Err` and no recovery is
//! attempted. Unused-variable diagnostics are the one exception and are
//! reported as non-fatal [`Warning`] values instead.

use thiserror::Error;

/// Error codes for the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Semantic errors (E200-E230)
    DuplicateSymbol,
    UndeclaredSymbol,
    UseBeforeInit,
    ReturnTypeMismatch,
    MissingReturn,
    NotCallable,
    ArityMismatch,
    ArgumentTypeMismatch,
    ConstantReassignment,
    NoEnclosingFunction,
    TypeMismatch,
    InvalidComparison,
    InvalidUnaryOperand,
    InvalidSwitchExpression,
    SwitchRequiresVariable,
    UnusedVariable,

    // Code generation contract errors (E300-E303)
    MissingOperand,
    BreakOutsideControl,
    ContinueOutsideLoop,
    UnbalancedControl,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl ErrorCode {
    /// Get the numeric code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            // Semantic errors
            ErrorCode::DuplicateSymbol => "E200",
            ErrorCode::UndeclaredSymbol => "E201",
            ErrorCode::UseBeforeInit => "E202",
            ErrorCode::ReturnTypeMismatch => "E203",
            ErrorCode::MissingReturn => "E204",
            ErrorCode::NotCallable => "E205",
            ErrorCode::ArityMismatch => "E206",
            ErrorCode::ArgumentTypeMismatch => "E207",
            ErrorCode::ConstantReassignment => "E208",
            ErrorCode::NoEnclosingFunction => "E209",
            ErrorCode::TypeMismatch => "E210",
            ErrorCode::InvalidComparison => "E211",
            ErrorCode::InvalidUnaryOperand => "E212",
            ErrorCode::InvalidSwitchExpression => "E213",
            ErrorCode::SwitchRequiresVariable => "E214",
            ErrorCode::UnusedVariable => "E230",

            // Code generation contract errors
            ErrorCode::MissingOperand => "E300",
            ErrorCode::BreakOutsideControl => "E301",
            ErrorCode::ContinueOutsideLoop => "E302",
            ErrorCode::UnbalancedControl => "E303",
        }
    }
}

/// A backend error with the source line it was detected on.
#[derive(Debug, Error)]
#[error("[{code}] line {line}: {message}")]
pub struct CompileError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// The source line where the error occurred (1-indexed, 0 when unknown).
    pub line: u32,
    /// Optional hint for fixing the error.
    pub hint: Option<String>,
}

impl CompileError {
    /// Create a new compile error.
    pub fn new(code: ErrorCode, message: impl Into<String>, line: u32) -> Self {
        Self {
            code,
            message: message.into(),
            line,
            hint: None,
        }
    }

    /// Add a hint to this error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Get the error code string.
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }
}

/// Result type for backend operations.
pub type Result<T> = std::result::Result<T, CompileError>;

/// A non-fatal diagnostic, reported without aborting the compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// The warning code (currently always [`ErrorCode::UnusedVariable`]).
    pub code: ErrorCode,
    /// The warning message.
    pub message: String,
    /// The source line the warning refers to.
    pub line: u32,
}

impl Warning {
    /// Create a new warning.
    pub fn new(code: ErrorCode, message: impl Into<String>, line: u32) -> Self {
        Self {
            code,
            message: message.into(),
            line,
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] line {}: {}", self.code, self.line, self.message)
    }
}
