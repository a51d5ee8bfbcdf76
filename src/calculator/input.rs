//! Typed key input.
//!
//! Turns a line such as `12.5 * 3 =` or `90 tan` into the events a keypad
//! would have sent. Whitespace is only a separator, so `12+3=` and
//! `1 2 + 3 =` are the same sequence.

use lazy_static::lazy_static;
use regex::Regex;

use super::evaluation::Operation;
use super::session::Event;
use crate::error::InputError;
use crate::keypad::Key;

lazy_static! {
    /// One key per match. `**` must come before `*`.
    static ref KEY_TOKEN: Regex = Regex::new(
        r"(?P<key>\*\*|[0-9]|[.=+\-*/%^]|[A-Za-z]+)|(?P<space>\s+)|(?P<other>.)"
    ).unwrap();
}

/// Words accepted in addition to keypad labels and operation names.
const CLEAR_WORDS: &[&str] = &["c", "clear"];
const EQUALS_WORDS: &[&str] = &["equals"];

/// Split a line into events.
///
/// Fails on the first unrecognized key; no partial sequence is returned.
pub fn parse_keys(line: &str) -> Result<Vec<Event>, InputError> {
    let mut events = Vec::new();

    for caps in KEY_TOKEN.captures_iter(line) {
        if caps.name("space").is_some() {
            continue;
        }

        let Some(token) = caps.name("key").or_else(|| caps.name("other")) else {
            continue;
        };

        let event = key_event(token.as_str()).ok_or_else(|| InputError::UnknownKey {
            token: token.as_str().to_string(),
            position: line[..token.start()].chars().count(),
        })?;
        events.push(event);
    }

    Ok(events)
}

/// Resolve a single token to the event its key sends.
pub fn key_event(token: &str) -> Option<Event> {
    if let Some(key) = Key::find(token) {
        return Some(key.event());
    }

    let lower = token.to_lowercase();
    if CLEAR_WORDS.contains(&lower.as_str()) {
        return Some(Event::Clear);
    }
    if EQUALS_WORDS.contains(&lower.as_str()) {
        return Some(Event::Equals);
    }

    token.parse::<Operation>().ok().map(Event::from)
}
