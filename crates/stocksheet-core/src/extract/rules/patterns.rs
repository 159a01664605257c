//! Common regex patterns for stock list line parsing.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Optional word, a number, optional word: "kg 5", "5 kg", "5kg", "5"
    pub static ref QUANTITY_WITH_UNIT: Regex = Regex::new(
        r"(?i)(?:\b([a-z]+)\s*)?([0-9]+(?:\.[0-9]+)?)(?:\s*([a-z]+))?"
    ).unwrap();

    // Bare numeric token (rate, amount)
    pub static ref NUMBER: Regex = Regex::new(
        r"[0-9]+(?:\.[0-9]+)?"
    ).unwrap();
}

/// Characters stripped from the end of a leading serial token ("1.", "2-", "3)").
pub const SERIAL_SUFFIXES: &[char] = &['.', '-', ')'];

/// Tokens treated as list bullets when they stand alone at the start of a line.
pub const BULLET_CHARS: &[char] = &['-', '*', '•', '·', '>', '–'];
