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

//! Semantic analysis for the Quartz backend.
//!
//! The parser drives this module synchronously while it recognizes the
//! input:
//! - [`symbol_table`] resolves names, enforces declaration and
//!   initialization rules, and retains exited symbols for reporting
//! - [`type_check`] classifies arithmetic, comparison, unary, assignment
//!   and switch-selector expressions
//!
//! A failed check aborts the compilation unit; there is no recovery.

pub mod history;
pub mod symbol;
pub mod symbol_table;
pub mod type_check;

pub use history::{HistoryEntry, RetainedHistory};
pub use symbol::{Symbol, SymbolId, SymbolKind};
pub use symbol_table::SymbolTable;
