//! Digit tokens read from a text source.

use std::fmt;

/// A string-encoded non-negative integer.
///
/// Identity is textual: `"07"` and `"7"` are distinct tokens even though
/// they denote the same number. Tokens may be longer than any machine
/// integer; only their residues are ever needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DigitToken(String);

impl DigitToken {
    /// Accepts a non-empty run of ASCII digits.
    pub fn parse(text: &str) -> Option<Self> {
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(text.to_owned()))
        } else {
            None
        }
    }

    /// Returns the token's value modulo `modulus`.
    ///
    /// # Panics
    ///
    /// Panics if `modulus` is zero.
    pub fn residue(&self, modulus: u64) -> u64 {
        assert!(modulus > 0, "zero modulus");
        let m = modulus as u128;
        self.0
            .bytes()
            .fold(0u128, |acc, b| (acc * 10 + u128::from(b - b'0')) % m) as u64
    }

    /// The token text as read from the source.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DigitToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
