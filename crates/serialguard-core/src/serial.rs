//! # Serial Module
//!
//! Normalization and validation of scanned serial numbers.
//!
//! ## Normalization Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Scanner Input → Serial                             │
//! │                                                                         │
//! │  Raw keystrokes:  "  abc-123\t"                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  trim()           "abc-123"                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  to_uppercase()   "ABC-123"                                             │
//! │       │                                                                 │
//! │       ├── empty?  → None  (reported as StatusKind::Empty)              │
//! │       │                                                                 │
//! │       └── Serial("ABC-123")                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No length limit and no character-class check: the scanner may emit any
//! symbology, and the session only cares about equality.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A normalized, non-empty serial number.
///
/// The only ways to build one are [`Serial::parse`] and [`normalize`], so a
/// `Serial` in hand is always trimmed and upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Serial(String);

impl Serial {
    /// Parses raw scanner input into a serial.
    ///
    /// ## Example
    /// ```rust
    /// use serialguard_core::Serial;
    ///
    /// assert_eq!(Serial::parse("  abc123 ").unwrap().as_str(), "ABC123");
    /// assert!(Serial::parse("   ").is_err());
    /// ```
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        let normalized = raw.trim().to_uppercase();

        if normalized.is_empty() {
            return Err(ValidationError::Required {
                field: "serial".to_string(),
            });
        }

        Ok(Serial(normalized))
    }

    /// Accepts text only if it is already in canonical form.
    ///
    /// Used when reading persisted data: a stored serial that would change
    /// under normalization did not come from this crate.
    pub fn from_normalized(text: &str) -> ValidationResult<Self> {
        if !Self::is_normalized(text) {
            return Err(ValidationError::NotNormalized {
                field: "serial".to_string(),
                value: text.to_string(),
            });
        }

        Ok(Serial(text.to_string()))
    }

    /// Returns true if `text` is non-empty and equal to its own normalization.
    pub fn is_normalized(text: &str) -> bool {
        !text.is_empty() && text.trim() == text && text.to_uppercase() == text
    }

    /// Returns the serial as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the serial, returning the inner string.
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Serial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Serial {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Serial {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Serial::from_normalized(&value)
    }
}

impl From<Serial> for String {
    fn from(serial: Serial) -> Self {
        serial.0
    }
}

/// Normalizes raw input, returning `None` when nothing is left.
///
/// Pure and idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> Option<Serial> {
    Serial::parse(raw).ok()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_uppercases() {
        assert_eq!(Serial::parse("abc123").unwrap().as_str(), "ABC123");
        assert_eq!(Serial::parse(" abc123 ").unwrap().as_str(), "ABC123");
        assert_eq!(Serial::parse("\tx-1_b\r\n").unwrap().as_str(), "X-1_B");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(Serial::parse("").is_err());
        assert!(Serial::parse("   ").is_err());
        assert!(Serial::parse("\t\r\n").is_err());
        assert_eq!(
            Serial::parse(" ").unwrap_err(),
            ValidationError::Required {
                field: "serial".to_string()
            }
        );
    }

    #[test]
    fn test_inner_whitespace_is_kept() {
        assert_eq!(Serial::parse(" a b ").unwrap().as_str(), "A B");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = ["abc", "  MiXeD 12 ", "ß-straße", "", "   ", "ñandú", "already"];
        for input in inputs {
            let once = normalize(input);
            let twice = once.as_ref().and_then(|s| normalize(s.as_str()));
            assert_eq!(once, twice, "input {:?}", input);
        }
    }

    #[test]
    fn test_is_normalized() {
        assert!(Serial::is_normalized("ABC123"));
        assert!(!Serial::is_normalized(""));
        assert!(!Serial::is_normalized("abc"));
        assert!(!Serial::is_normalized(" ABC"));
    }

    #[test]
    fn test_serde_rejects_non_normalized() {
        let ok: Serial = serde_json::from_str("\"ABC\"").unwrap();
        assert_eq!(ok.as_str(), "ABC");
        assert!(serde_json::from_str::<Serial>("\"abc\"").is_err());
        assert!(serde_json::from_str::<Serial>("\"\"").is_err());
        assert_eq!(serde_json::to_string(&ok).unwrap(), "\"ABC\"");
    }
}
