//! Numeric literal parsing.
//!
//! Accepted forms: `0x` hex, `0b` binary, `0o` octal (prefixes are
//! case-insensitive), a leading `0` followed by more digits as octal, and
//! plain decimal. Signs and digit separators are not accepted.

use thiserror::Error;

/// Reason a token is not a numeric literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LiteralError {
    /// Nothing left after the base prefix (or an empty token).
    #[error("missing digits")]
    Empty,
    /// A character that is not a digit in the detected base.
    #[error("invalid digit '{digit}' for base {radix}")]
    InvalidDigit {
        /// The offending character.
        digit: char,
        /// The detected base.
        radix: u32,
    },
    /// Digits are well formed but the value does not fit in 64 bits.
    #[error("literal does not fit in 64 bits")]
    Overflow,
}

/// Splits a token into its base and the digits that follow the prefix.
fn split_radix(token: &str) -> (u32, &str) {
    let prefix = token.get(..2).map(str::to_ascii_lowercase);
    match prefix.as_deref() {
        Some("0x") => (16, &token[2..]),
        Some("0b") => (2, &token[2..]),
        Some("0o") => (8, &token[2..]),
        _ if token.len() > 1 && token.starts_with('0') => (8, &token[1..]),
        _ => (10, token),
    }
}

/// Parses a numeric literal.
///
/// # Errors
///
/// Returns [`LiteralError`] when the token is empty after its prefix,
/// contains a character outside the detected base, or overflows `u64`.
pub fn parse_number(token: &str) -> Result<u64, LiteralError> {
    let (radix, digits) = split_radix(token.trim());

    if digits.is_empty() {
        return Err(LiteralError::Empty);
    }

    if let Some(digit) = digits.chars().find(|c| !c.is_digit(radix)) {
        return Err(LiteralError::InvalidDigit { digit, radix });
    }

    u64::from_str_radix(digits, radix).map_err(|_| LiteralError::Overflow)
}
