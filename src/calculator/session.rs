//! Input state machine.
//!
//! A [`Session`] owns the state of one calculator: what is on the display,
//! which binary operation is waiting for its right-hand side, and whether the
//! next digit starts a fresh number. Every event is handled to completion and
//! always leaves a displayable string behind; failures never escape.

use serde::{Deserialize, Serialize};

use super::evaluation::{BinaryOp, CalcError, Operation, UnaryOp, evaluate};
use super::format::{DEFAULT_PRECISION, format_result, format_unary_result};
use crate::config::Config;

/// Shown when the display cannot be read back as a number.
pub const INVALID_INPUT: &str = "Error: Invalid Input";

const INITIAL_DISPLAY: &str = "0";

/// A single user action forwarded by the front end.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum Event {
    /// A digit key, `0..=9`.
    Digit(u8),
    DecimalPoint,
    Clear,
    Unary(UnaryOp),
    Binary(BinaryOp),
    Equals,
}

impl From<Operation> for Event {
    fn from(op: Operation) -> Self {
        match op {
            Operation::Unary(op) => Self::Unary(op),
            Operation::Binary(op) => Self::Binary(op),
        }
    }
}

/// Left-hand side of a binary operation waiting for its second operand.
///
/// Operator and operand are stored together so one can never be set
/// without the other.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Pending {
    operator: BinaryOp,
    operand: f64,
}

/// Outbound view of a session, as rendered by a front end.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub display: String,
    pub pending_operator: Option<BinaryOp>,
    pub first_operand: Option<f64>,
    pub awaiting_second_operand: bool,
    pub last_result: Option<f64>,
}

/// State of one calculator.
#[derive(Clone, Debug)]
pub struct Session {
    display: String,
    pending: Option<Pending>,
    awaiting_second_operand: bool,
    last_result: Option<f64>,
    /// Base handed to the evaluator for the `log` key; 0 is natural log.
    log_base: f64,
    precision: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            display: INITIAL_DISPLAY.to_string(),
            pending: None,
            awaiting_second_operand: false,
            last_result: None,
            log_base: 10.0,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session honoring the configured log base and precision.
    pub fn with_config(config: &Config) -> Self {
        Self {
            log_base: config.log_base,
            precision: config.precision,
            ..Self::default()
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn pending_operator(&self) -> Option<BinaryOp> {
        self.pending.map(|p| p.operator)
    }

    pub fn first_operand(&self) -> Option<f64> {
        self.pending.map(|p| p.operand)
    }

    pub fn awaiting_second_operand(&self) -> bool {
        self.awaiting_second_operand
    }

    pub fn last_result(&self) -> Option<f64> {
        self.last_result
    }

    /// Whether the display holds a message rather than a number.
    pub fn shows_error(&self) -> bool {
        self.display.trim().parse::<f64>().is_err()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            display: self.display.clone(),
            pending_operator: self.pending_operator(),
            first_operand: self.first_operand(),
            awaiting_second_operand: self.awaiting_second_operand,
            last_result: self.last_result,
        }
    }

    /// Apply one event and return the resulting display.
    pub fn dispatch(&mut self, event: Event) -> &str {
        tracing::debug!(?event, display = %self.display, "Handling event");

        match event {
            Event::Digit(d) => self.digit(d),
            Event::DecimalPoint => self.decimal_point(),
            Event::Clear => self.clear(),
            Event::Unary(op) => self.unary_operator(op),
            Event::Binary(op) => self.binary_operator(op),
            Event::Equals => self.equals(),
        }

        &self.display
    }

    /// Enter a digit. Values above 9 are ignored.
    pub fn digit(&mut self, d: u8) {
        if d > 9 {
            tracing::debug!(digit = d, "Ignoring out-of-range digit");
            return;
        }

        if self.awaiting_second_operand
            || self.display == INITIAL_DISPLAY
            || self.last_result.is_some()
        {
            self.display = d.to_string();
            self.awaiting_second_operand = false;
            self.last_result = None;
        } else {
            self.display.push(char::from(b'0' + d));
        }
    }

    pub fn decimal_point(&mut self) {
        if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    /// Return to the initial state.
    pub fn clear(&mut self) {
        self.display = INITIAL_DISPLAY.to_string();
        self.pending = None;
        self.awaiting_second_operand = false;
        self.last_result = None;
    }

    pub fn unary_operator(&mut self, op: UnaryOp) {
        let Some(value) = self.parse_display() else {
            return;
        };

        let parameter = match op {
            UnaryOp::Log => Some(self.log_base),
            _ => None,
        };

        match evaluate(value, None, op.into(), parameter) {
            Ok(result) => {
                self.display = format_unary_result(result, self.precision);
                self.last_result = Some(result);
            }
            Err(err) => self.show_error(&err),
        }

        self.awaiting_second_operand = true;
    }

    /// Press a binary operator, folding any pending operation first.
    pub fn binary_operator(&mut self, op: BinaryOp) {
        let Some(value) = self.parse_display() else {
            return;
        };

        let pending = match self.pending {
            Some(pending) if self.last_result.is_none() => pending,
            _ => {
                self.pending = Some(Pending {
                    operator: op,
                    operand: value,
                });
                self.awaiting_second_operand = true;
                self.last_result = None;
                return;
            }
        };

        match evaluate(pending.operand, Some(value), pending.operator.into(), None) {
            Ok(result) => {
                self.pending = Some(Pending {
                    operator: op,
                    operand: result,
                });
                self.display = format_result(result, self.precision);
            }
            Err(err) => {
                self.show_error(&err);
                self.pending = None;
            }
        }

        self.awaiting_second_operand = true;
    }

    /// Complete the pending operation. Without one this does nothing.
    ///
    /// A failed evaluation clears the pending operation, the same as a failed
    /// fold on operator press.
    pub fn equals(&mut self) {
        let Some(pending) = self.pending else {
            return;
        };
        let Some(value) = self.parse_display() else {
            return;
        };

        match evaluate(pending.operand, Some(value), pending.operator.into(), None) {
            Ok(result) => {
                tracing::debug!(
                    lhs = pending.operand,
                    op = pending.operator.symbol(),
                    rhs = value,
                    result,
                    "Computed result"
                );
                self.display = format_result(result, self.precision);
                self.last_result = Some(result);
            }
            Err(err) => {
                self.show_error(&err);
                self.last_result = None;
            }
        }

        self.pending = None;
        self.awaiting_second_operand = true;
    }

    fn parse_display(&mut self) -> Option<f64> {
        match self.display.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Some(value),
            _ => {
                tracing::debug!(display = %self.display, "Display is not a number");
                self.display = INVALID_INPUT.to_string();
                None
            }
        }
    }

    fn show_error(&mut self, err: &CalcError) {
        tracing::debug!(error = %err, "Evaluation failed");
        self.display = err.to_string();
    }
}
