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

//! Quartz Backend Library
//!
//! Quartz is the semantic-analysis and intermediate-code-generation
//! backend of a small imperative-language compiler. A parser front end
//! (external to this crate) drives it synchronously in a single
//! left-to-right pass, calling in at scope boundaries, declarations,
//! expression checks and emission points.
//!
//! # Modules
//!
//! - [`error`] - Error codes, errors and warnings
//! - [`types`] - Value types and operator enums
//! - [`operand`] - Operand descriptors passed between semantic actions
//! - [`analyzer`] - Scoped symbol table, retained history, type rules
//! - [`codegen`] - Quadruple generation with nested label stacks
//!
//! # Example
//!
//! ```
//! use quartz::analyzer::{type_check, SymbolTable};
//! use quartz::codegen::{CodeGenerator, ControlFlowEmitter, ExpressionEmitter};
//! use quartz::{BinaryOp, Operand, ValueType};
//!
//! // int x = 5; if (x == 5) { print x; }
//! let mut table = SymbolTable::new();
//! let mut gen = CodeGenerator::new();
//!
//! table.declare_variable("x", ValueType::Int, true, 1).unwrap();
//! gen.emit_assign("x", &Operand::int(5));
//!
//! table.mark_used("x", 1).unwrap();
//! let x = Operand::reference("x", table.data_type_of("x", 1).unwrap());
//! let cond_type =
//!     type_check::comparison_result(x.value_type(), ValueType::Int, 1).unwrap();
//! let cond = gen.emit_binary(BinaryOp::Eq, &x, &Operand::int(5), cond_type);
//!
//! gen.if_begin(&cond);
//! table.enter_scope();
//! gen.emit_print(&x);
//! table.exit_scope();
//! gen.if_end().unwrap();
//!
//! assert_eq!(
//!     gen.render(),
//!     "assign\t5\t_\tx\neq\tx\t5\tt0\njf\tt0\t_\tL0\nprint\tx\t_\t_\nlabel\t_\t_\tL0\n"
//! );
//! ```

pub mod analyzer;
pub mod codegen;
pub mod error;
pub mod operand;
pub mod types;

// Re-export commonly used types
pub use analyzer::{RetainedHistory, Symbol, SymbolId, SymbolKind, SymbolTable};
pub use codegen::{CodeGenerator, ControlFlowEmitter, ExpressionEmitter, FunctionEmitter, Quad,
    QuadOp};
pub use error::{CompileError, ErrorCode, Result, Warning};
pub use operand::{Literal, Operand, RETURN_SLOT};
pub use types::{BinaryOp, StepOp, UnaryOp, ValueType};

/// The version of the Quartz backend.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the backend.
pub const NAME: &str = "Quartz";
