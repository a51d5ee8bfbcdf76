//! Operation evaluation.
//!
//! Maps one or two operands and an operation tag to a numeric result.
//! Stateless: every call is independent and safe from any session.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `cos` magnitude at or below which the tangent is treated as undefined.
const TANGENT_TOLERANCE: f64 = 1e-8;

/// Why an evaluation failed.
///
/// The `Display` text is exactly what the calculator shows.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum CalcError {
    #[error("Error: Division by zero")]
    DivisionByZero,

    #[error("Error: Modulo by zero")]
    ModuloByZero,

    #[error("Error: Log domain error (x <= 0)")]
    LogDomain,

    #[error("Error: Invalid log base")]
    InvalidLogBase,

    #[error("Error: Tangent undefined")]
    TangentUndefined,

    #[error("Error: Invalid operation")]
    InvalidOperation,

    /// Numeric fault that is not one of the domain checks above.
    #[error("Calculation Error: {0}")]
    Evaluation(String),
}

/// Operations consuming a single operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnaryOp {
    Sin,
    Cos,
    Tan,
    Log,
}

/// Operations consuming two operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

/// Any operation the evaluator understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Unary(UnaryOp),
    Binary(BinaryOp),
}

impl UnaryOp {
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log => "log",
        }
    }
}

impl BinaryOp {
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Modulo => "modulo",
            Self::Power => "power",
        }
    }

    /// Symbol used when echoing an expression back to the user.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "mod",
            Self::Power => "**",
        }
    }
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Self::Unary(op) => op.name(),
            Self::Binary(op) => op.name(),
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UnaryOp {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sin" => Ok(Self::Sin),
            "cos" => Ok(Self::Cos),
            "tan" => Ok(Self::Tan),
            "log" => Ok(Self::Log),
            _ => Err(CalcError::InvalidOperation),
        }
    }
}

impl FromStr for BinaryOp {
    type Err = CalcError;

    /// Accepts canonical names, symbols and the keypad labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "add" | "+" => Ok(Self::Add),
            "subtract" | "sub" | "-" => Ok(Self::Subtract),
            "multiply" | "mul" | "*" => Ok(Self::Multiply),
            "divide" | "div" | "/" => Ok(Self::Divide),
            "modulo" | "mod" | "%" => Ok(Self::Modulo),
            "power" | "exp" | "**" | "^" => Ok(Self::Power),
            _ => Err(CalcError::InvalidOperation),
        }
    }
}

impl FromStr for Operation {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<UnaryOp>()
            .map(Self::Unary)
            .or_else(|_| s.parse::<BinaryOp>().map(Self::Binary))
    }
}

impl From<UnaryOp> for Operation {
    fn from(op: UnaryOp) -> Self {
        Self::Unary(op)
    }
}

impl From<BinaryOp> for Operation {
    fn from(op: BinaryOp) -> Self {
        Self::Binary(op)
    }
}

/// Evaluate `operation` on the given operands.
///
/// `operand2` is required by binary operations and ignored by unary ones.
/// `parameter` is the logarithm base (`None` or `0` means natural log) and is
/// ignored by everything else.
pub fn evaluate(
    operand1: f64,
    operand2: Option<f64>,
    operation: Operation,
    parameter: Option<f64>,
) -> Result<f64, CalcError> {
    let value = match operation {
        Operation::Binary(op) => {
            let rhs = operand2
                .ok_or_else(|| CalcError::Evaluation("missing second operand".to_string()))?;
            apply_binary(operand1, rhs, op)?
        }
        Operation::Unary(op) => apply_unary(operand1, op, parameter)?,
    };

    check_finite(value, operand1, operand2)
}

fn apply_binary(lhs: f64, rhs: f64, op: BinaryOp) -> Result<f64, CalcError> {
    match op {
        BinaryOp::Add => Ok(lhs + rhs),
        BinaryOp::Subtract => Ok(lhs - rhs),
        BinaryOp::Multiply => Ok(lhs * rhs),
        BinaryOp::Divide => {
            if rhs == 0.0 {
                return Err(CalcError::DivisionByZero);
            }
            Ok(lhs / rhs)
        }
        BinaryOp::Modulo => {
            if rhs == 0.0 {
                return Err(CalcError::ModuloByZero);
            }
            Ok(floored_rem(lhs, rhs))
        }
        BinaryOp::Power => {
            if lhs == 0.0 && rhs < 0.0 {
                return Err(CalcError::Evaluation(
                    "0.0 cannot be raised to a negative power".to_string(),
                ));
            }
            Ok(lhs.powf(rhs))
        }
    }
}

fn apply_unary(x: f64, op: UnaryOp, base: Option<f64>) -> Result<f64, CalcError> {
    match op {
        UnaryOp::Sin => Ok(x.to_radians().sin()),
        UnaryOp::Cos => Ok(x.to_radians().cos()),
        UnaryOp::Tan => {
            if floored_rem(x, 180.0).to_radians().cos().abs() <= TANGENT_TOLERANCE {
                return Err(CalcError::TangentUndefined);
            }
            Ok(x.to_radians().tan())
        }
        UnaryOp::Log => {
            if x <= 0.0 {
                return Err(CalcError::LogDomain);
            }
            match base {
                None => Ok(x.ln()),
                Some(b) if b == 0.0 => Ok(x.ln()),
                Some(b) if b > 0.0 && b != 1.0 => Ok(x.ln() / b.ln()),
                Some(_) => Err(CalcError::InvalidLogBase),
            }
        }
    }
}

/// Remainder with the sign of the divisor: `-7 mod 3 == 2`.
fn floored_rem(lhs: f64, rhs: f64) -> f64 {
    let r = lhs % rhs;
    if r != 0.0 && (r < 0.0) != (rhs < 0.0) {
        r + rhs
    } else {
        r
    }
}

/// Non-finite output from finite input is a numeric fault.
fn check_finite(value: f64, operand1: f64, operand2: Option<f64>) -> Result<f64, CalcError> {
    let inputs_finite = operand1.is_finite() && operand2.is_none_or(f64::is_finite);

    if value.is_nan() && !operand1.is_nan() && !operand2.is_some_and(f64::is_nan) {
        Err(CalcError::Evaluation("math domain error".to_string()))
    } else if value.is_infinite() && inputs_finite {
        Err(CalcError::Evaluation(
            "numerical result out of range".to_string(),
        ))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn binary(a: f64, b: f64, op: BinaryOp) -> Result<f64, CalcError> {
        evaluate(a, Some(b), op.into(), None)
    }

    fn unary(x: f64, op: UnaryOp) -> Result<f64, CalcError> {
        evaluate(x, None, op.into(), None)
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(binary(2.0, 3.0, BinaryOp::Add), Ok(5.0));
        assert_eq!(binary(2.0, 3.0, BinaryOp::Subtract), Ok(-1.0));
        assert_eq!(binary(2.0, 3.0, BinaryOp::Multiply), Ok(6.0));
        assert_eq!(binary(3.0, 2.0, BinaryOp::Divide), Ok(1.5));
        assert_eq!(binary(2.0, 10.0, BinaryOp::Power), Ok(1024.0));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            binary(5.0, 0.0, BinaryOp::Divide),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(
            binary(5.0, -0.0, BinaryOp::Divide),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn test_modulo_by_zero() {
        assert_eq!(
            binary(5.0, 0.0, BinaryOp::Modulo),
            Err(CalcError::ModuloByZero)
        );
    }

    #[test]
    fn test_modulo_takes_sign_of_divisor() {
        assert_eq!(binary(7.0, 3.0, BinaryOp::Modulo), Ok(1.0));
        assert_eq!(binary(-7.0, 3.0, BinaryOp::Modulo), Ok(2.0));
        assert_eq!(binary(7.0, -3.0, BinaryOp::Modulo), Ok(-2.0));
        assert_eq!(binary(-7.0, -3.0, BinaryOp::Modulo), Ok(-1.0));
        assert_eq!(binary(5.5, 2.0, BinaryOp::Modulo), Ok(1.5));
    }

    #[test]
    fn test_power_fractional_and_negative() {
        assert_eq!(binary(16.0, 0.5, BinaryOp::Power), Ok(4.0));
        assert_eq!(binary(2.0, -2.0, BinaryOp::Power), Ok(0.25));
        assert!(matches!(
            binary(-8.0, 0.5, BinaryOp::Power),
            Err(CalcError::Evaluation(_))
        ));
        assert!(matches!(
            binary(0.0, -1.0, BinaryOp::Power),
            Err(CalcError::Evaluation(_))
        ));
    }

    #[test]
    fn test_overflow_is_evaluation_error() {
        let err = binary(10.0, 400.0, BinaryOp::Power).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Calculation Error: numerical result out of range"
        );
    }

    #[test]
    fn test_missing_second_operand() {
        let result = evaluate(1.0, None, BinaryOp::Add.into(), None);
        assert!(matches!(result, Err(CalcError::Evaluation(_))));
    }

    #[test]
    fn test_logarithms() {
        assert!(approx(
            evaluate(8.0, None, UnaryOp::Log.into(), Some(2.0)).unwrap(),
            3.0
        ));
        assert!(approx(
            evaluate(1000.0, None, UnaryOp::Log.into(), Some(10.0)).unwrap(),
            3.0
        ));
        assert!(approx(unary(std::f64::consts::E, UnaryOp::Log).unwrap(), 1.0));
        assert!(approx(
            evaluate(std::f64::consts::E, None, UnaryOp::Log.into(), Some(0.0)).unwrap(),
            1.0
        ));
    }

    #[test]
    fn test_log_errors() {
        assert_eq!(unary(-1.0, UnaryOp::Log), Err(CalcError::LogDomain));
        assert_eq!(unary(0.0, UnaryOp::Log), Err(CalcError::LogDomain));
        assert_eq!(
            evaluate(8.0, None, UnaryOp::Log.into(), Some(1.0)),
            Err(CalcError::InvalidLogBase)
        );
        assert_eq!(
            evaluate(8.0, None, UnaryOp::Log.into(), Some(-2.0)),
            Err(CalcError::InvalidLogBase)
        );
    }

    #[test]
    fn test_trig_in_degrees() {
        assert!(approx(unary(30.0, UnaryOp::Sin).unwrap(), 0.5));
        assert!(approx(unary(60.0, UnaryOp::Cos).unwrap(), 0.5));
        assert!(approx(unary(45.0, UnaryOp::Tan).unwrap(), 1.0));
        assert!(approx(unary(-45.0, UnaryOp::Tan).unwrap(), -1.0));
    }

    #[test]
    fn test_tangent_asymptotes() {
        for deg in [90.0, 270.0, -90.0, 450.0] {
            assert_eq!(unary(deg, UnaryOp::Tan), Err(CalcError::TangentUndefined));
        }
        assert!(unary(180.0, UnaryOp::Tan).is_ok());
    }

    #[test]
    fn test_unary_ignores_second_operand() {
        assert_eq!(
            evaluate(0.0, Some(99.0), UnaryOp::Sin.into(), None),
            Ok(0.0)
        );
    }

    #[test]
    fn test_parse_operations() {
        assert_eq!("+".parse::<Operation>(), Ok(Operation::Binary(BinaryOp::Add)));
        assert_eq!("MUL".parse::<Operation>(), Ok(Operation::Binary(BinaryOp::Multiply)));
        assert_eq!("**".parse::<Operation>(), Ok(Operation::Binary(BinaryOp::Power)));
        assert_eq!("mod".parse::<Operation>(), Ok(Operation::Binary(BinaryOp::Modulo)));
        assert_eq!("tan".parse::<Operation>(), Ok(Operation::Unary(UnaryOp::Tan)));
        assert_eq!(
            "sqrt".parse::<Operation>(),
            Err(CalcError::InvalidOperation)
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CalcError::DivisionByZero.to_string(),
            "Error: Division by zero"
        );
        assert_eq!(
            CalcError::TangentUndefined.to_string(),
            "Error: Tangent undefined"
        );
        assert_eq!(
            CalcError::Evaluation("boom".into()).to_string(),
            "Calculation Error: boom"
        );
    }
}
