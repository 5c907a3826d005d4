//! Phone number format rules per region
//!
//! Numbers are checked after stripping common separators (spaces, dashes,
//! dots, parentheses). The stored value is never rewritten.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Region used to validate incoming phone numbers
pub const DEFAULT_PHONE_REGION: PhoneRegion = PhoneRegion::Uz;

/// `+998` country code, optional; then a 9-digit national number.
static UZ_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\+?998)?[235-9]\d{8}$").expect("UZ phone pattern is valid")
});

/// Supported phone numbering regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneRegion {
    /// Uzbekistan (+998)
    Uz,
}

impl PhoneRegion {
    /// ISO 3166-1 alpha-2 code
    pub const fn code(self) -> &'static str {
        match self {
            Self::Uz => "UZ",
        }
    }

    /// Check whether `raw` is a valid number for this region
    pub fn is_valid(self, raw: &str) -> bool {
        let compact = strip_separators(raw);
        if compact.is_empty() {
            return false;
        }
        match self {
            Self::Uz => UZ_PATTERN.is_match(&compact),
        }
    }
}

impl fmt::Display for PhoneRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

fn strip_separators(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect()
}
