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

//! Static type rules.
//!
//! Pure, stateless functions classifying operations over operand types.
//! The computed result type feeds straight into the operand descriptors
//! the code generator prints, so these rules and the emitter stay in
//! lockstep.

use crate::error::{CompileError, ErrorCode, Result};
use crate::operand::Operand;
use crate::types::ValueType;

/// Compute the result type of an arithmetic operation.
///
/// Identical non-void, non-string operands unify to themselves, except
/// that two bools produce an int. Mixing int and float widens to float;
/// char mixes with int as int; bool mixes with int as int and with float
/// as float.
pub fn arithmetic_result(lhs: ValueType, rhs: ValueType, line: u32) -> Result<ValueType> {
    use ValueType::*;

    match (lhs, rhs) {
        (Bool, Bool) => Ok(Int),
        (a, b) if a == b && a != Void && a != String => Ok(a),
        (Int, Float) | (Float, Int) => Ok(Float),
        (Int, Char) | (Char, Int) => Ok(Int),
        (Bool, Int) | (Int, Bool) => Ok(Int),
        (Bool, Float) | (Float, Bool) => Ok(Float),
        _ => Err(CompileError::new(
            ErrorCode::TypeMismatch,
            format!("Type mismatch between {} and {}", lhs, rhs),
            line,
        )),
    }
}

/// Compute the result type of a comparison.
///
/// Always bool. Void, string and char operands may only be compared
/// against the exact same type, so `char == char` is legal but
/// `char == int` is not.
pub fn comparison_result(lhs: ValueType, rhs: ValueType, line: u32) -> Result<ValueType> {
    const RESTRICTED: [ValueType; 3] = [ValueType::Void, ValueType::String, ValueType::Char];

    if lhs != rhs && (RESTRICTED.contains(&lhs) || RESTRICTED.contains(&rhs)) {
        return Err(CompileError::new(
            ErrorCode::InvalidComparison,
            format!("Cannot compare {} and {}", lhs, rhs),
            line,
        ));
    }
    Ok(ValueType::Bool)
}

/// Compute the result type of a unary operation.
///
/// Int, float and bool pass through unchanged; char promotes to int.
pub fn unary_result(operand: ValueType, line: u32) -> Result<ValueType> {
    use ValueType::*;

    match operand {
        Int | Float | Bool => Ok(operand),
        Char => Ok(Int),
        String | Void => Err(CompileError::new(
            ErrorCode::InvalidUnaryOperand,
            format!("Invalid operand type {} for unary operator", operand),
            line,
        )),
    }
}

/// Check that an expression type can be assigned to a declared type.
///
/// Exact equality only; arithmetic promotion does not apply to
/// assignments.
pub fn assignment_compatible(declared: ValueType, expr: ValueType, line: u32) -> Result<()> {
    if declared != expr {
        return Err(CompileError::new(
            ErrorCode::TypeMismatch,
            format!("Cannot assign {} to a variable of type {}", expr, declared),
            line,
        ));
    }
    Ok(())
}

/// Validate a switch selector.
///
/// The selector must be an int, char or bool, and must reference storage:
/// the generated code re-reads it for every case comparison, and a
/// constant has no storage to re-read.
pub fn switch_selector(selector: &Operand, line: u32) -> Result<()> {
    let value_type = selector.value_type();
    if !matches!(
        value_type,
        ValueType::Int | ValueType::Char | ValueType::Bool
    ) {
        return Err(CompileError::new(
            ErrorCode::InvalidSwitchExpression,
            format!(
                "Switch expression must be int, char, or bool, got {}",
                value_type
            ),
            line,
        ));
    }
    if selector.is_constant() {
        return Err(CompileError::new(
            ErrorCode::SwitchRequiresVariable,
            "Switch expression must be a variable",
            line,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ValueType::*;

    #[test]
    fn test_arithmetic_same_types() {
        assert_eq!(arithmetic_result(Int, Int, 1).unwrap(), Int);
        assert_eq!(arithmetic_result(Float, Float, 1).unwrap(), Float);
        assert_eq!(arithmetic_result(Char, Char, 1).unwrap(), Char);
    }

    #[test]
    fn test_arithmetic_promotions() {
        assert_eq!(arithmetic_result(Int, Float, 1).unwrap(), Float);
        assert_eq!(arithmetic_result(Float, Int, 1).unwrap(), Float);
        assert_eq!(arithmetic_result(Int, Char, 1).unwrap(), Int);
        assert_eq!(arithmetic_result(Char, Int, 1).unwrap(), Int);
        assert_eq!(arithmetic_result(Bool, Bool, 1).unwrap(), Int);
        assert_eq!(arithmetic_result(Bool, Int, 1).unwrap(), Int);
        assert_eq!(arithmetic_result(Bool, Float, 1).unwrap(), Float);
    }

    #[test]
    fn test_arithmetic_rejections() {
        for (a, b) in [
            (String, String),
            (Void, Void),
            (Int, String),
            (Char, Float),
            (Bool, Char),
        ] {
            let err = arithmetic_result(a, b, 1).unwrap_err();
            assert_eq!(err.code, ErrorCode::TypeMismatch, "{} and {}", a, b);
        }
    }

    #[test]
    fn test_comparison_rules() {
        assert_eq!(comparison_result(Int, Int, 1).unwrap(), Bool);
        assert_eq!(comparison_result(Int, Float, 1).unwrap(), Bool);
        assert_eq!(comparison_result(Char, Char, 1).unwrap(), Bool);

        let err = comparison_result(Char, Int, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidComparison);
        let err = comparison_result(String, Int, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidComparison);
        let err = comparison_result(Void, Bool, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidComparison);
    }

    #[test]
    fn test_unary_rules() {
        assert_eq!(unary_result(Int, 1).unwrap(), Int);
        assert_eq!(unary_result(Float, 1).unwrap(), Float);
        assert_eq!(unary_result(Bool, 1).unwrap(), Bool);
        assert_eq!(unary_result(Char, 1).unwrap(), Int);

        let err = unary_result(String, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidUnaryOperand);
        let err = unary_result(Void, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidUnaryOperand);
    }

    #[test]
    fn test_assignment_strictness() {
        assert!(assignment_compatible(Int, Int, 1).is_ok());
        // No implicit widening on assignment, unlike arithmetic.
        let err = assignment_compatible(Float, Int, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::TypeMismatch);
    }

    #[test]
    fn test_switch_selector_rules() {
        let var = Operand::reference("v", Int);
        assert!(switch_selector(&var, 1).is_ok());

        let float_var = Operand::reference("f", Float);
        let err = switch_selector(&float_var, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSwitchExpression);

        let constant = Operand::int(3);
        let err = switch_selector(&constant, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::SwitchRequiresVariable);
    }
}
