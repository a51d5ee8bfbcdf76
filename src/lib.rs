//! A keypad calculator engine.
//!
//! [`Session`] accumulates digit entry and applies unary (trigonometric,
//! logarithmic) and binary (arithmetic, modulo, power) operations, folding a
//! pending operation whenever a new operator is pressed.

pub mod calculator;
pub mod config;
pub mod error;
pub mod keypad;
pub mod logging;

pub use calculator::{BinaryOp, CalcError, Event, Operation, Session, UnaryOp, evaluate};
pub use config::Config;
pub use error::{ClipboardError, ConfigError, InputError};
pub use keypad::{Emphasis, Key};
