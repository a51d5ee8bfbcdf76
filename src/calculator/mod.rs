//! Calculator core.
//!
//! This module provides functionality to:
//! - Evaluate unary and binary operations
//! - Drive a keypad-style input session with chained operations
//! - Format results for the display
//! - Turn typed key sequences into events
//! - Copy the display to the clipboard

mod clipboard;
mod evaluation;
mod format;
mod input;
mod session;

pub use clipboard::copy_to_clipboard;
pub use evaluation::{BinaryOp, CalcError, Operation, UnaryOp, evaluate};
pub use format::{DEFAULT_PRECISION, format_result, format_unary_result};
pub use input::{key_event, parse_keys};
pub use session::{Event, INVALID_INPUT, Session, SessionSnapshot};
