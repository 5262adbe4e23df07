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

//! Quadruple code generation.
//!
//! The [`CodeGenerator`] walks semantic actions in program order and
//! appends quadruples to an output stream. It owns the temporary and
//! label counters (monotonic for the whole compilation unit, never reset
//! per function) and the nested label-stack state machines for loops,
//! switches and call sequencing. Every piece of state is instance state:
//! independent compilations use independent generators.
//!
//! Emission happens after semantic validation has passed. Where the
//! caller contract is representable (a constant where storage is
//! required, a case outside a switch), violations are reported as errors
//! instead of emitting a malformed quadruple.

pub mod control_flow;
pub mod expressions;
pub mod functions;
pub mod labels;
pub mod quad;

pub use control_flow::ControlFlowEmitter;
pub use expressions::ExpressionEmitter;
pub use functions::FunctionEmitter;
pub use labels::LabelId;
pub use quad::{Quad, QuadOp, PLACEHOLDER};

use crate::error::{CompileError, ErrorCode, Result};
use crate::operand::Operand;
use crate::types::ValueType;
use labels::{ControlKind, SwitchFrame};
use std::io::{self, Write};
use std::path::Path;

/// The reserved pseudo-slot holding a call's return address at function
/// entry.
pub const CALL_SLOT: &str = "@call";

/// The quadruple generator for one compilation unit.
#[derive(Debug, Default)]
pub struct CodeGenerator {
    /// The emitted instruction stream, append-only.
    quads: Vec<Quad>,
    /// Next temporary number (`t<n>`).
    temp_counter: u32,
    /// Next label number (`L<n>`).
    label_counter: u32,
    /// Loop label stack: entry label pushed by `loop_init`, exit label by
    /// `loop_begin`, both popped by `loop_exit`.
    pub(crate) loop_labels: Vec<LabelId>,
    /// Pending labels of open `if` statements.
    pub(crate) if_labels: Vec<LabelId>,
    /// Open switches, innermost last.
    pub(crate) switches: Vec<SwitchFrame>,
    /// Open breakable constructs, innermost last.
    pub(crate) nesting: Vec<ControlKind>,
}

impl CodeGenerator {
    /// Create a new code generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the emitted instruction stream.
    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    /// Allocate a fresh temporary reference of the given type.
    pub fn new_temp(&mut self, value_type: ValueType) -> Operand {
        let name = format!("t{}", self.temp_counter);
        self.temp_counter += 1;
        Operand::reference(name, value_type)
    }

    /// Allocate a fresh label.
    pub fn new_label(&mut self) -> LabelId {
        let label = LabelId(self.label_counter);
        self.label_counter += 1;
        label
    }

    /// Check that every label stack is empty.
    pub fn is_balanced(&self) -> bool {
        self.loop_labels.is_empty()
            && self.if_labels.is_empty()
            && self.switches.is_empty()
            && self.nesting.is_empty()
    }

    /// Finish the compilation unit, returning the instruction stream.
    ///
    /// A well-formed program leaves every label stack empty; anything
    /// else means an unterminated control structure.
    pub fn finish(self) -> Result<Vec<Quad>> {
        if !self.is_balanced() {
            return Err(CompileError::new(
                ErrorCode::UnbalancedControl,
                "Unterminated control structure at end of compilation",
                0,
            ));
        }
        Ok(self.quads)
    }

    /// Render the stream, one quadruple per line.
    pub fn render(&self) -> String {
        let mut output = String::new();
        for quad in &self.quads {
            output.push_str(&quad.to_string());
            output.push('\n');
        }
        output
    }

    /// Write the rendered stream to a writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.render().as_bytes())
    }

    /// Write the rendered stream to a file.
    pub fn write_file(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.render())
    }

    /// Append a quadruple to the stream.
    pub(crate) fn emit(&mut self, quad: Quad) {
        self.quads.push(quad);
    }

    /// Append a label definition record.
    pub(crate) fn emit_label_record(&mut self, name: impl Into<String>) {
        self.emit(Quad::label(name));
    }
}
