//! Identifier normalization.
//!
//! Collection images are addressed by a small non-negative integer. User
//! input arrives as free text and is reduced to either a canonical decimal
//! identifier, an out-of-range remainder, or an empty state.

use std::sync::LazyLock;

use regex::Regex;

/// Default inclusive upper bound for identifiers.
pub const DEFAULT_MAX_ID: u32 = 99_999;

static NON_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]+").expect("valid regex"));

/// Outcome of normalizing raw identifier text.
///
/// `empty` and `valid` are mutually exclusive; a well-formed but
/// out-of-range number is neither empty nor valid, so callers can render
/// "invalid" feedback distinct from "nothing entered".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedId {
    /// Canonical decimal string when valid, otherwise the stripped digits.
    pub value: String,
    /// True when the digits parse to an integer in `[0, max]`.
    pub valid: bool,
    /// True when stripping non-digits left nothing.
    pub empty: bool,
}

impl NormalizedId {
    /// Returns the identifier string when valid.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.valid.then_some(self.value.as_str())
    }
}

/// Normalizes raw text into an identifier within `[0, max]`.
///
/// Strips every non-digit character, then parses the remainder as base-10.
/// Leading zeros collapse into the canonical form (`"007"` becomes `"7"`).
/// Never panics; malformed input is always representable as a non-valid
/// result.
#[must_use]
pub fn normalize(raw: &str, max: u32) -> NormalizedId {
    let stripped = NON_DIGITS.replace_all(raw.trim(), "");

    if stripped.is_empty() {
        return NormalizedId {
            value: String::new(),
            valid: false,
            empty: true,
        };
    }

    // Digit strings longer than u64 overflow are out of range by definition.
    match stripped.parse::<u64>() {
        Ok(n) if n <= u64::from(max) => NormalizedId {
            value: n.to_string(),
            valid: true,
            empty: false,
        },
        _ => NormalizedId {
            value: stripped.into_owned(),
            valid: false,
            empty: false,
        },
    }
}

/// Strips non-digit characters from raw input, preserving digit order.
#[must_use]
pub fn strip_non_digits(raw: &str) -> String {
    NON_DIGITS.replace_all(raw, "").into_owned()
}
