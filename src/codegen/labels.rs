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

//! Label management for code generation.
//!
//! Labels are numbered from a single counter shared across the whole
//! compilation unit. The generator keeps separate stacks for the three
//! control structures; a [`SwitchFrame`] bundles everything one `switch`
//! needs, so nesting and the restore-on-exit of the switch state fall out
//! of ordinary stack discipline.

use crate::operand::Operand;

/// A unique label, rendered as `L<n>` in the instruction stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelId(pub u32);

impl std::fmt::Display for LabelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Per-switch generator state.
#[derive(Debug, Clone)]
pub struct SwitchFrame {
    /// The selector, re-read for every case comparison.
    pub selector: Operand,
    /// Label jumped to by `break` and reached at switch end.
    pub out: LabelId,
    /// The pending fall-through landing point. Replaced by a fresh label
    /// at every case end; the final one is emitted by `switch_end`.
    pub skip: LabelId,
    /// Label skipping the current case's body when its guard fails.
    /// `Some` between a case and its case end.
    pub pending_false: Option<LabelId>,
}

/// The kind of an open breakable construct, innermost last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// An open loop.
    Loop,
    /// An open switch.
    Switch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_rendering() {
        assert_eq!(LabelId(0).to_string(), "L0");
        assert_eq!(LabelId(42).to_string(), "L42");
    }
}
