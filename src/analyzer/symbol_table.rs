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

//! Scope-indexed symbol table for the semantic analyzer.
//!
//! Symbols live in an arena and are indexed per scope depth. The table
//! enforces declaration, lookup, initialization and call rules, and copies
//! every entry into the retained history so post-compilation tooling can
//! see exited scopes.
//!
//! Two rules shape most of the code here:
//!
//! - Parameters and loop variables are recorded one scope level deeper
//!   than the scope they are declared adjacent to, because their scope is
//!   the block they guard.
//! - Scope exit tombstones everything at the departing depth except
//!   parameters, which are owned by their function's parameter list and
//!   must survive it.

use super::history::RetainedHistory;
use super::symbol::{Symbol, SymbolId, SymbolKind};
use crate::error::{CompileError, ErrorCode, Result, Warning};
use crate::operand::Operand;
use crate::types::ValueType;
use std::collections::HashMap;

/// The symbol table for one compilation unit.
#[derive(Debug, Default)]
pub struct SymbolTable {
    /// Symbol arena; ids are stable indices into this vector.
    symbols: Vec<Symbol>,
    /// Ids of the symbols recorded at each scope depth.
    depth_index: Vec<Vec<SymbolId>>,
    /// Current scope depth (0 = global).
    depth: u16,
    /// Function names are globally unique.
    functions: HashMap<String, SymbolId>,
    /// The most recently declared function. Parameters attach here, and
    /// the end-of-function return check consults it.
    last_function: Option<SymbolId>,
    /// The function whose body scope is open. Only advances when the next
    /// scope is actually entered, so return-type validation inside a body
    /// is not confused by a following declaration.
    current_function: Option<SymbolId>,
    /// Retained history of every symbol ever declared.
    history: RetainedHistory,
    /// Non-fatal diagnostics collected at scope exits.
    warnings: Vec<Warning>,
}

impl SymbolTable {
    /// Create a new symbol table with a global scope.
    pub fn new() -> Self {
        Self {
            depth_index: vec![Vec::new()],
            ..Self::default()
        }
    }

    /// Get the current scope depth.
    pub fn depth(&self) -> u16 {
        self.depth
    }

    /// Get the symbol for a handle.
    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    /// Look up a function symbol by name.
    pub fn function(&self, name: &str) -> Option<&Symbol> {
        self.functions.get(name).map(|id| &self.symbols[id.index()])
    }

    /// Get the warnings collected so far.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Get the retained history.
    pub fn history(&self) -> &RetainedHistory {
        &self.history
    }

    /// Enter a new lexical scope.
    pub fn enter_scope(&mut self) {
        self.depth += 1;
        self.ensure_level(self.depth as usize);
        // The body of the most recently declared function is now open.
        self.current_function = self.last_function;
    }

    /// Exit the current scope.
    ///
    /// Every entry at the departing depth is copied into the retained
    /// history, unused declarations are reported, and non-parameter
    /// entries are tombstoned.
    pub fn exit_scope(&mut self) {
        let departing = self.depth as usize;
        let ids: Vec<SymbolId> = self
            .depth_index
            .get(departing)
            .cloned()
            .unwrap_or_default();

        for id in &ids {
            if self.symbols[id.index()].live {
                self.history.record(&self.symbols[id.index()]);
            }
        }

        for id in &ids {
            let sym = &self.symbols[id.index()];
            if sym.live && !sym.is_used && sym.kind != SymbolKind::Function {
                self.warnings.push(Warning::new(
                    ErrorCode::UnusedVariable,
                    format!("Variable '{}' is declared but not used", sym.name),
                    sym.line,
                ));
            }
        }

        for id in &ids {
            let sym = &mut self.symbols[id.index()];
            if sym.live && !sym.is_parameter() {
                sym.live = false;
            }
        }
        let symbols = &self.symbols;
        if let Some(level) = self.depth_index.get_mut(departing) {
            level.retain(|id| symbols[id.index()].live);
        }

        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    /// Declare a symbol in the current scope.
    ///
    /// Parameters and loop variables are recorded one scope level deeper.
    /// Declaring a function makes it the attachment target for following
    /// parameter declarations.
    #[allow(clippy::too_many_arguments)]
    pub fn declare(
        &mut self,
        name: &str,
        kind: SymbolKind,
        value_type: ValueType,
        initialized: bool,
        is_parameter: bool,
        is_loop_variable: bool,
        line: u32,
    ) -> Result<SymbolId> {
        if self.is_duplicate(name) {
            return Err(CompileError::new(
                ErrorCode::DuplicateSymbol,
                format!("Symbol '{}' already declared", name),
                line,
            ));
        }

        // Resolve the owning function first so a failed attach never
        // leaves a half-inserted symbol behind.
        let owner = if is_parameter {
            Some(self.last_function.ok_or_else(|| {
                CompileError::new(
                    ErrorCode::NoEnclosingFunction,
                    format!("Parameter '{}' declared outside a function signature", name),
                    line,
                )
            })?)
        } else {
            None
        };

        let recorded = if is_parameter || is_loop_variable {
            self.depth + 1
        } else {
            self.depth
        };

        let id = SymbolId(self.symbols.len());
        let mut symbol = Symbol::new(id, name, kind, value_type, recorded, line);
        symbol.is_initialized = initialized;
        symbol.is_loop_variable = is_loop_variable;
        self.symbols.push(symbol);

        self.ensure_level(recorded as usize);
        self.depth_index[recorded as usize].push(id);

        if kind == SymbolKind::Function {
            self.functions.insert(name.to_string(), id);
            self.last_function = Some(id);
        }
        if let Some(owner) = owner {
            self.symbols[owner.index()].params.push(id);
        }

        self.history.record(&self.symbols[id.index()]);
        Ok(id)
    }

    /// Declare a variable in the current scope.
    pub fn declare_variable(
        &mut self,
        name: &str,
        value_type: ValueType,
        initialized: bool,
        line: u32,
    ) -> Result<SymbolId> {
        self.declare(
            name,
            SymbolKind::Variable,
            value_type,
            initialized,
            false,
            false,
            line,
        )
    }

    /// Declare a constant in the current scope.
    pub fn declare_constant(
        &mut self,
        name: &str,
        value_type: ValueType,
        line: u32,
    ) -> Result<SymbolId> {
        self.declare(name, SymbolKind::Constant, value_type, true, false, false, line)
    }

    /// Declare a function. The function becomes the attachment target for
    /// following parameter declarations.
    pub fn declare_function(
        &mut self,
        name: &str,
        return_type: ValueType,
        line: u32,
    ) -> Result<SymbolId> {
        self.declare(
            name,
            SymbolKind::Function,
            return_type,
            false,
            false,
            false,
            line,
        )
    }

    /// Declare a parameter of the most recently declared function.
    ///
    /// A parameter with a default value counts as initialized, which lets
    /// call sites omit it (trailing parameters only; see
    /// [`SymbolTable::validate_call`]).
    pub fn declare_parameter(
        &mut self,
        name: &str,
        value_type: ValueType,
        default_value: Option<Operand>,
        line: u32,
    ) -> Result<SymbolId> {
        let initialized = default_value.is_some();
        let id = self.declare(
            name,
            SymbolKind::Parameter,
            value_type,
            initialized,
            true,
            false,
            line,
        )?;
        self.symbols[id.index()].default_value = default_value;
        Ok(id)
    }

    /// Declare a loop-induction variable for the loop body about to be
    /// entered.
    ///
    /// Without an explicit type the name must already resolve to an `int`
    /// variable.
    pub fn declare_loop_variable(
        &mut self,
        name: &str,
        declared_type: Option<ValueType>,
        line: u32,
    ) -> Result<SymbolId> {
        let value_type = match declared_type {
            Some(t) => t,
            None => {
                let existing = self.data_type_of(name, line)?;
                if existing != ValueType::Int {
                    return Err(CompileError::new(
                        ErrorCode::TypeMismatch,
                        format!("For loop variable '{}' must be of type int", name),
                        line,
                    ));
                }
                existing
            }
        };
        self.declare(name, SymbolKind::Variable, value_type, true, false, true, line)
    }

    /// Resolve a name, searching from the current depth outward.
    ///
    /// Parameters and loop variables recorded at `d + 1` match a probe at
    /// depth `d`, mirroring the declare-time offset. The lowest arena id
    /// wins when several entries match at one depth.
    pub fn resolve(&self, name: &str, line: u32) -> Result<SymbolId> {
        for probe in (0..=self.depth).rev() {
            let mut best: Option<SymbolId> = None;

            if let Some(level) = self.depth_index.get(probe as usize) {
                for id in level {
                    let sym = &self.symbols[id.index()];
                    if sym.live && !sym.is_inner_scoped() && sym.name == name {
                        best = Some(match best {
                            Some(found) if found.index() < id.index() => found,
                            _ => *id,
                        });
                    }
                }
            }
            if let Some(level) = self.depth_index.get(probe as usize + 1) {
                for id in level {
                    let sym = &self.symbols[id.index()];
                    if sym.live && sym.is_inner_scoped() && sym.name == name {
                        best = Some(match best {
                            Some(found) if found.index() < id.index() => found,
                            _ => *id,
                        });
                    }
                }
            }

            if let Some(id) = best {
                return Ok(id);
            }
        }

        Err(CompileError::new(
            ErrorCode::UndeclaredSymbol,
            format!("Variable '{}' is not defined", name),
            line,
        ))
    }

    /// Mark a symbol as used.
    pub fn mark_used(&mut self, name: &str, line: u32) -> Result<()> {
        let id = self.resolve(name, line)?;
        self.symbols[id.index()].is_used = true;
        self.history.record(&self.symbols[id.index()]);
        Ok(())
    }

    /// Check that a symbol is initialized before use. Parameters are
    /// always considered initialized.
    pub fn check_initialized(&self, name: &str, line: u32) -> Result<()> {
        let id = self.resolve(name, line)?;
        let sym = &self.symbols[id.index()];
        if sym.is_parameter() {
            return Ok(());
        }
        if !sym.is_initialized {
            return Err(CompileError::new(
                ErrorCode::UseBeforeInit,
                format!("Variable '{}' is not initialized", name),
                line,
            ));
        }
        Ok(())
    }

    /// Get the declared type of a symbol.
    pub fn data_type_of(&self, name: &str, line: u32) -> Result<ValueType> {
        let id = self.resolve(name, line)?;
        Ok(self.symbols[id.index()].value_type)
    }

    /// Reject assignments to constants, at any visible scope.
    pub fn validate_not_const(&self, name: &str, line: u32) -> Result<()> {
        for sym in &self.symbols {
            if sym.live && sym.kind == SymbolKind::Constant && sym.name == name {
                return Err(CompileError::new(
                    ErrorCode::ConstantReassignment,
                    format!("Cannot modify constant '{}'", name),
                    line,
                ));
            }
        }
        Ok(())
    }

    /// Validate the type of a return expression against the enclosing
    /// function's declared return type. A `void` declaration accepts
    /// anything.
    pub fn validate_return_type(&self, actual: ValueType, line: u32) -> Result<()> {
        let id = self.require_current_function(line)?;
        let function = &self.symbols[id.index()];
        if function.value_type == ValueType::Void {
            return Ok(());
        }
        if function.value_type != actual {
            return Err(CompileError::new(
                ErrorCode::ReturnTypeMismatch,
                format!(
                    "Return type mismatch for function '{}': expected {}, got {}",
                    function.name, function.value_type, actual
                ),
                line,
            ));
        }
        Ok(())
    }

    /// Mark the enclosing function as having an observed return statement.
    ///
    /// Only a return at depth `function scope + 1` counts; a return inside
    /// a nested block is a silent no-op for this check. Not reachability
    /// analysis, just the straight-line fallthrough rule.
    pub fn mark_function_returned(&mut self, line: u32) -> Result<()> {
        let id = self.require_current_function(line)?;
        let function_scope = self.symbols[id.index()].scope_depth;

        if self.depth == function_scope + 1 {
            self.symbols[id.index()].has_return = true;
            self.history.record(&self.symbols[id.index()]);
            Ok(())
        } else if self.depth > function_scope + 1 {
            Ok(())
        } else {
            Err(CompileError::new(
                ErrorCode::NoEnclosingFunction,
                format!(
                    "Return statement outside the body of function '{}'",
                    self.symbols[id.index()].name
                ),
                line,
            ))
        }
    }

    /// Check that the function just declared satisfied the return rule.
    pub fn check_function_has_return(&self, line: u32) -> Result<()> {
        let id = self.last_function.ok_or_else(|| {
            CompileError::new(
                ErrorCode::NoEnclosingFunction,
                "No function in scope to check for a return statement",
                line,
            )
        })?;
        let function = &self.symbols[id.index()];
        if !function.has_return {
            return Err(CompileError::new(
                ErrorCode::MissingReturn,
                format!("Function '{}' does not have a return statement", function.name),
                line,
            ));
        }
        Ok(())
    }

    /// Validate a call site against the callee's signature.
    ///
    /// Trailing parameters with default values may be omitted, so the
    /// accepted argument count is `[params - defaults, params]`. Argument
    /// types must match the parameter types exactly, positionally.
    pub fn validate_call(
        &self,
        name: &str,
        argument_types: &[ValueType],
        line: u32,
    ) -> Result<()> {
        let id = self.resolve(name, line)?;
        let function = &self.symbols[id.index()];
        if !function.is_function() {
            return Err(CompileError::new(
                ErrorCode::NotCallable,
                format!("'{}' is not a function", name),
                line,
            ));
        }

        let total = function.params.len();
        let defaults = function
            .params
            .iter()
            .filter(|pid| self.symbols[pid.index()].is_initialized)
            .count();
        let provided = argument_types.len();
        if provided < total - defaults || provided > total {
            return Err(CompileError::new(
                ErrorCode::ArityMismatch,
                format!(
                    "Function '{}' expects at least {} arguments, but {} were provided",
                    name,
                    total - defaults,
                    provided
                ),
                line,
            ));
        }

        for (position, (pid, arg)) in function.params.iter().zip(argument_types).enumerate() {
            let expected = self.symbols[pid.index()].value_type;
            if expected != *arg {
                return Err(CompileError::new(
                    ErrorCode::ArgumentTypeMismatch,
                    format!(
                        "Type mismatch for argument {} of '{}': expected {}, got {}",
                        position + 1,
                        name,
                        expected,
                        arg
                    ),
                    line,
                ));
            }
        }
        Ok(())
    }

    /// Check that a `main` function was declared.
    pub fn check_main(&self, line: u32) -> Result<()> {
        if self.function("main").is_some() {
            Ok(())
        } else {
            Err(CompileError::new(
                ErrorCode::UndeclaredSymbol,
                "No main function defined in the program",
                line,
            ))
        }
    }

    fn require_current_function(&self, line: u32) -> Result<SymbolId> {
        self.current_function.ok_or_else(|| {
            CompileError::new(
                ErrorCode::NoEnclosingFunction,
                "No function in scope",
                line,
            )
        })
    }

    fn ensure_level(&mut self, depth: usize) {
        while self.depth_index.len() <= depth {
            self.depth_index.push(Vec::new());
        }
    }

    fn is_duplicate(&self, name: &str) -> bool {
        // A name matching a parameter of the currently open function is a
        // duplicate even though the parameter is recorded one level deeper.
        if let Some(f) = self.last_function {
            let function = &self.symbols[f.index()];
            if function.params.iter().any(|pid| {
                let param = &self.symbols[pid.index()];
                param.live && param.name == name
            }) {
                return true;
            }
        }

        // Function names are unique across all scopes.
        if self.functions.contains_key(name) {
            return true;
        }

        // Everything else clashes at the current depth only.
        self.depth_index
            .get(self.depth as usize)
            .map(|level| {
                level.iter().any(|id| {
                    let sym = &self.symbols[id.index()];
                    sym.live && !sym.is_parameter() && sym.name == name
                })
            })
            .unwrap_or(false)
    }
}
