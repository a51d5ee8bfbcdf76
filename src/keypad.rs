//! The calculator's button vocabulary.
//!
//! Each key pairs the label a front end shows with the event it sends to the
//! session. Layout is left to the front end.

use std::fmt;
use std::str::FromStr;

use crate::calculator::{BinaryOp, Event, UnaryOp};

/// How prominently a front end should draw a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
    /// Actions that end or reset a calculation.
    Primary,
    Secondary,
}

/// A labeled calculator button.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Key {
    label: &'static str,
    event: Event,
}

/// Every key, in the order the keypad presents them.
pub const KEYS: &[Key] = &[
    Key::new("sin", Event::Unary(UnaryOp::Sin)),
    Key::new("cos", Event::Unary(UnaryOp::Cos)),
    Key::new("tan", Event::Unary(UnaryOp::Tan)),
    Key::new("log", Event::Unary(UnaryOp::Log)),
    Key::new("AC", Event::Clear),
    Key::new("mod", Event::Binary(BinaryOp::Modulo)),
    Key::new("EXP", Event::Binary(BinaryOp::Power)),
    Key::new("7", Event::Digit(7)),
    Key::new("8", Event::Digit(8)),
    Key::new("9", Event::Digit(9)),
    Key::new("DIV", Event::Binary(BinaryOp::Divide)),
    Key::new("MUL", Event::Binary(BinaryOp::Multiply)),
    Key::new("4", Event::Digit(4)),
    Key::new("5", Event::Digit(5)),
    Key::new("6", Event::Digit(6)),
    Key::new("SUB", Event::Binary(BinaryOp::Subtract)),
    Key::new("ADD", Event::Binary(BinaryOp::Add)),
    Key::new("1", Event::Digit(1)),
    Key::new("2", Event::Digit(2)),
    Key::new("3", Event::Digit(3)),
    Key::new("0", Event::Digit(0)),
    Key::new(".", Event::DecimalPoint),
    Key::new("=", Event::Equals),
];

impl Key {
    const fn new(label: &'static str, event: Event) -> Self {
        Self { label, event }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn event(&self) -> Event {
        self.event
    }

    pub fn emphasis(&self) -> Emphasis {
        match self.event {
            Event::Clear | Event::Equals => Emphasis::Primary,
            _ => Emphasis::Secondary,
        }
    }

    /// Look a key up by label, ignoring case.
    pub fn find(label: &str) -> Option<Key> {
        KEYS.iter()
            .find(|key| key.label.eq_ignore_ascii_case(label))
            .copied()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::find(s).ok_or_else(|| format!("No key labeled '{}'", s))
    }
}

impl From<Key> for Event {
    fn from(key: Key) -> Self {
        key.event
    }
}
