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

//! Symbol and symbol-kind definitions for the semantic analyzer.
//!
//! Symbols live in an arena owned by the symbol table and are addressed
//! through stable [`SymbolId`] handles. A function's parameter list holds
//! the ids of its parameter symbols, which is why parameter entries are
//! kept alive after their declaring scope exits.

use crate::operand::Operand;
use crate::types::ValueType;

/// A stable handle into the symbol arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub usize);

impl SymbolId {
    /// Get the arena index of this handle.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// The kind of a declared symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// A function.
    Function,
    /// A mutable variable.
    Variable,
    /// An immutable constant.
    Constant,
    /// A function parameter.
    Parameter,
}

impl SymbolKind {
    /// Get the short tag used in the symbol report.
    pub fn name(&self) -> &'static str {
        match self {
            SymbolKind::Function => "func",
            SymbolKind::Variable => "var",
            SymbolKind::Constant => "const",
            SymbolKind::Parameter => "param",
        }
    }
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Symbol arena entry.
#[derive(Debug, Clone)]
pub struct Symbol {
    /// The arena handle of this entry.
    pub id: SymbolId,
    /// The symbol name.
    pub name: String,
    /// The symbol kind.
    pub kind: SymbolKind,
    /// The declared value type (return type for functions).
    pub value_type: ValueType,
    /// Scope depth recorded at declaration time. Parameters and loop
    /// variables are recorded one level deeper than the declaring scope.
    pub scope_depth: u16,
    /// Whether the symbol has a value before first use.
    pub is_initialized: bool,
    /// Whether the symbol was referenced anywhere.
    pub is_used: bool,
    /// Whether this is a loop-induction variable.
    pub is_loop_variable: bool,
    /// The source line of the declaration.
    pub line: u32,
    /// Whether the entry is still live. Scope exit tombstones everything
    /// at the departing depth except parameters.
    pub live: bool,
    /// Parameter symbol ids, in declaration order (functions only).
    pub params: Vec<SymbolId>,
    /// Whether a return statement was observed in the body (functions only;
    /// preset for void functions).
    pub has_return: bool,
    /// Default value pushed when a call site omits this parameter
    /// (parameters only).
    pub default_value: Option<Operand>,
}

impl Symbol {
    /// Create a new symbol entry.
    pub fn new(
        id: SymbolId,
        name: impl Into<String>,
        kind: SymbolKind,
        value_type: ValueType,
        scope_depth: u16,
        line: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            value_type,
            scope_depth,
            is_initialized: false,
            is_used: false,
            is_loop_variable: false,
            line,
            live: true,
            params: Vec::new(),
            // Void functions never need an explicit return statement.
            has_return: kind == SymbolKind::Function && value_type == ValueType::Void,
            default_value: None,
        }
    }

    /// Check if this is a function symbol.
    pub fn is_function(&self) -> bool {
        self.kind == SymbolKind::Function
    }

    /// Check if this is a parameter symbol.
    pub fn is_parameter(&self) -> bool {
        self.kind == SymbolKind::Parameter
    }

    /// Check if this symbol is scoped to the block it guards rather than
    /// the block it is declared adjacent to (parameters and loop
    /// variables).
    pub fn is_inner_scoped(&self) -> bool {
        self.is_parameter() || self.is_loop_variable
    }
}
