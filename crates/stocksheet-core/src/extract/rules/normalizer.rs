//! Line cleanup before catalog matching.

use super::patterns::{BULLET_CHARS, SERIAL_SUFFIXES};

/// One input line and the text left after cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    pub raw: &'a str,
    pub normalized: &'a str,
}

/// Drops header/noise lines and strips leading serial numbers or bullets.
#[derive(Debug, Clone)]
pub struct LineNormalizer {
    /// Lower-case keywords; a line containing any of them is skipped.
    blacklist: Vec<String>,
}

impl LineNormalizer {
    pub fn new<I, S>(blacklist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            blacklist: blacklist
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Keyword that makes `line` a header/noise line, if any.
    pub fn blacklisted_keyword(&self, line: &str) -> Option<&str> {
        let lower = line.to_lowercase();
        self.blacklist
            .iter()
            .find(|k| lower.contains(k.as_str()))
            .map(String::as_str)
    }

    /// Clean one line; `None` means the line should be skipped.
    pub fn normalize<'a>(&self, raw: &'a str) -> Option<ParsedLine<'a>> {
        let line = raw.trim();
        if line.is_empty() || self.blacklisted_keyword(line).is_some() {
            return None;
        }

        let normalized = strip_leading_serial(line);
        if normalized.is_empty() {
            return None;
        }

        Some(ParsedLine { raw, normalized })
    }
}

/// Remove a leading serial number ("1.", "2-", "3)") or bullet token.
fn strip_leading_serial(line: &str) -> &str {
    let token_end = line.find(char::is_whitespace).unwrap_or(line.len());
    let token = &line[..token_end];

    let digits = token.trim_end_matches(SERIAL_SUFFIXES);
    let is_serial = !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit());
    let is_bullet = token.chars().all(|c| BULLET_CHARS.contains(&c));

    if is_serial || is_bullet {
        line[token_end..].trim_start()
    } else {
        line
    }
}
