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

//! Retained symbol history.
//!
//! Every symbol ever declared is copied into an append-only log so that
//! tooling consuming the final symbol table can see already-exited symbols
//! next to the ones still live at end of compilation. Entries are
//! deduplicated first-write-wins on (name, line, type, scope), so the log
//! keeps each symbol's declaration-time state.

use super::symbol::{Symbol, SymbolKind};
use crate::types::ValueType;
use std::collections::HashSet;
use std::io::{self, Write};
use std::path::Path;

/// One row of the retained history.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Log-local id, independent of the symbol arena.
    pub id: u32,
    /// The symbol name.
    pub name: String,
    /// The symbol kind.
    pub kind: SymbolKind,
    /// The declared value type.
    pub value_type: ValueType,
    /// The recorded scope depth.
    pub scope: u16,
    /// Whether the symbol was initialized when recorded.
    pub is_initialized: bool,
    /// The declaration line.
    pub line: u32,
    /// Whether the symbol was used when recorded.
    pub is_used: bool,
    /// Whether the symbol is a parameter.
    pub is_parameter: bool,
}

/// Append-only record of all symbols ever declared.
#[derive(Debug, Default)]
pub struct RetainedHistory {
    entries: Vec<HistoryEntry>,
    seen: HashSet<(String, u32, ValueType, u16)>,
    next_id: u32,
}

impl RetainedHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a symbol. The first write for a given
    /// (name, line, type, scope) wins; later writes are ignored.
    pub fn record(&mut self, symbol: &Symbol) {
        let key = (
            symbol.name.clone(),
            symbol.line,
            symbol.value_type,
            symbol.scope_depth,
        );
        if !self.seen.insert(key) {
            return;
        }

        self.entries.push(HistoryEntry {
            id: self.next_id,
            name: symbol.name.clone(),
            kind: symbol.kind,
            value_type: symbol.value_type,
            scope: symbol.scope_depth,
            is_initialized: symbol.is_initialized,
            line: symbol.line,
            is_used: symbol.is_used,
            is_parameter: symbol.is_parameter(),
        });
        self.next_id += 1;
    }

    /// Get the recorded entries in insertion order.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Get the number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the history is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the history as a tab-separated table.
    pub fn render(&self) -> String {
        let mut output = String::from("ID\tName\tKind\tType\tScope\tInitialized\tLine\tUsed\tParam\n");
        for entry in &self.entries {
            output.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
                entry.id,
                entry.name,
                entry.kind,
                entry.value_type,
                entry.scope,
                entry.is_initialized as u8,
                entry.line,
                entry.is_used as u8,
                entry.is_parameter as u8,
            ));
        }
        output
    }

    /// Write the rendered table to a writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.render().as_bytes())
    }

    /// Write the rendered table to a file, once, at end of compilation.
    pub fn write_report(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.render())
    }
}
