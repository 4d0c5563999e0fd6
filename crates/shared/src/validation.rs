//! Syntactic email validation shared by the signup client and the notify endpoint.
//!
//! Only the shape of the address is checked; nothing here resolves domains
//! or verifies deliverability.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const MAX_EMAIL_CHARS: usize = 254;

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_TOO_LONG: &str = "Email is too long (maximum 254 characters)";
pub const EMAIL_INVALID_FORMAT: &str = "Please enter a valid email address";

// U+FEFF is whitespace for browser form input; `\s` alone does not cover it.
const EMAIL_PATTERN: &str = r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$";

fn is_blank(input: &str) -> bool {
    input
        .trim_matches(|ch: char| ch.is_whitespace() || ch == '\u{feff}')
        .is_empty()
}

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("static email pattern compiles"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// The message rendered inline under the input; only one is shown at a time.
    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }
}

/// Checks `input` against the required/length/format rules.
///
/// An empty (or whitespace-only) input short-circuits with a single error.
/// Otherwise the length and format rules are both evaluated, so an overlong
/// malformed address reports two errors.
pub fn validate_email(input: &str) -> ValidationResult {
    if is_blank(input) {
        return ValidationResult {
            is_valid: false,
            errors: vec![EMAIL_REQUIRED.to_string()],
        };
    }

    let mut errors = Vec::new();

    // Measured in UTF-16 code units, the unit browsers use for input length.
    if input.encode_utf16().count() > MAX_EMAIL_CHARS {
        errors.push(EMAIL_TOO_LONG.to_string());
    }

    if !email_regex().is_match(input) {
        errors.push(EMAIL_INVALID_FORMAT.to_string());
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
