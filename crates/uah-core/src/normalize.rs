//! # Normalization Module
//!
//! Turns the optional text arguments into bounded, owned values.
//!
//! ## Normalization Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Optional Argument Rules                            │
//! │                                                                         │
//! │  Argument 1: currency code                                             │
//! │  ├── declared STRING, length 1..=20                                    │
//! │  ├── every byte ASCII-uppercased ("eur" → "EUR")                       │
//! │  └── otherwise: absent (no multiplier applied)                         │
//! │                                                                         │
//! │  Argument 2: reference date                                            │
//! │  ├── declared STRING, length 1..=40                                    │
//! │  ├── first 10 bytes kept verbatim ("2018-03-01T10:00" → "2018-03-01")  │
//! │  └── otherwise: absent                                                 │
//! │                                                                         │
//! │  A rejected argument is never an SQL error, only "not given"           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use uah_core::normalize::{CurrencyCode, DateKey};
//!
//! let code = CurrencyCode::parse(b"usd").unwrap();
//! assert_eq!(code.as_bytes(), b"USD");
//!
//! let date = DateKey::parse(b"2018-03-01 12:00:00").unwrap();
//! assert_eq!(date.as_bytes(), b"2018-03-01");
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

use crate::error::{ValidationError, ValidationResult};
use crate::types::{ArgType, Argument};
use crate::{CURRENCY_MAX_LEN, DATE_KEY_LEN, DATE_MAX_LEN};

// =============================================================================
// Bounded Byte Buffer
// =============================================================================

/// Inline byte buffer holding at most `N` bytes.
///
/// Only built through [`BoundedBytes::copy_truncated`], which never writes past
/// `N` no matter how long the source is.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundedBytes<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> BoundedBytes<N> {
    /// Copies the first `min(src.len(), N)` bytes of `src`.
    pub fn copy_truncated(src: &[u8]) -> Self {
        let len = src.len().min(N);
        let mut buf = [0u8; N];
        buf[..len].copy_from_slice(&src[..len]);
        BoundedBytes { buf, len }
    }

    /// Stored bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Number of stored bytes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Checks if nothing is stored.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of bytes this buffer can hold.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    fn to_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }
}

impl<const N: usize> fmt::Debug for BoundedBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_str_lossy())
    }
}

// =============================================================================
// Currency Code
// =============================================================================

/// Normalized currency code: 1 to 20 bytes, ASCII-uppercased.
///
/// Non-ASCII bytes are kept as they are; only `a..=z` is folded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(BoundedBytes<CURRENCY_MAX_LEN>);

impl CurrencyCode {
    /// Validates and normalizes raw currency bytes.
    ///
    /// ## Rules
    /// - Must not be empty
    /// - Must be at most 20 bytes (longer input is rejected, not truncated)
    ///
    /// ## Example
    /// ```rust
    /// use uah_core::normalize::CurrencyCode;
    ///
    /// assert_eq!(CurrencyCode::parse(b"eur").unwrap().to_string(), "EUR");
    /// assert!(CurrencyCode::parse(b"").is_err());
    /// assert!(CurrencyCode::parse("A".repeat(21).as_bytes()).is_err());
    /// ```
    pub fn parse(raw: &[u8]) -> ValidationResult<Self> {
        if raw.is_empty() {
            return Err(ValidationError::Required { field: "currency" });
        }

        if raw.len() > CURRENCY_MAX_LEN {
            return Err(ValidationError::TooLong {
                field: "currency",
                max: CURRENCY_MAX_LEN,
            });
        }

        let mut code = BoundedBytes::<CURRENCY_MAX_LEN>::copy_truncated(raw);
        code.buf[..code.len].make_ascii_uppercase();
        Ok(CurrencyCode(code))
    }

    /// Derives the code from a positional argument.
    ///
    /// The argument must be declared STRING and be non-NULL.
    pub fn from_arg(arg: &Argument<'_>) -> ValidationResult<Self> {
        let bytes = text_arg("currency", arg)?;
        Self::parse(bytes)
    }

    /// Normalized bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_str_lossy())
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CurrencyCode::parse(value.as_bytes())
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.to_string()
    }
}

// =============================================================================
// Date Key
// =============================================================================

/// Reference-date key: the first 10 bytes of the date argument.
///
/// The bytes are not interpreted during conversion. [`DateKey::as_date`] is a
/// best-effort reading for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(BoundedBytes<DATE_KEY_LEN>);

impl DateKey {
    /// Validates raw date bytes and keeps the first 10 of them.
    ///
    /// ## Rules
    /// - Must not be empty
    /// - Must be at most 40 bytes
    ///
    /// ## Example
    /// ```rust
    /// use uah_core::normalize::DateKey;
    ///
    /// let key = DateKey::parse(b"2018-03-01").unwrap();
    /// assert_eq!(key.to_string(), "2018-03-01");
    ///
    /// assert!(DateKey::parse(&[b'9'; 41]).is_err());
    /// ```
    pub fn parse(raw: &[u8]) -> ValidationResult<Self> {
        if raw.is_empty() {
            return Err(ValidationError::Required { field: "date" });
        }

        if raw.len() > DATE_MAX_LEN {
            return Err(ValidationError::TooLong {
                field: "date",
                max: DATE_MAX_LEN,
            });
        }

        Ok(DateKey(BoundedBytes::copy_truncated(raw)))
    }

    /// Derives the key from a positional argument.
    pub fn from_arg(arg: &Argument<'_>) -> ValidationResult<Self> {
        let bytes = text_arg("date", arg)?;
        Self::parse(bytes)
    }

    /// Stored key bytes (at most 10).
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Reads the key as an ISO `YYYY-MM-DD` date, if it is one.
    pub fn as_date(&self) -> Option<NaiveDate> {
        let text = std::str::from_utf8(self.as_bytes()).ok()?;
        NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_str_lossy())
    }
}

impl TryFrom<String> for DateKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        DateKey::parse(value.as_bytes())
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.to_string()
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn text_arg<'a>(field: &'static str, arg: &Argument<'a>) -> ValidationResult<&'a [u8]> {
    if arg.arg_type != ArgType::String {
        return Err(ValidationError::WrongType {
            field,
            expected: ArgType::String,
            actual: arg.arg_type,
        });
    }

    arg.as_text().ok_or(ValidationError::Required { field })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_bytes_truncates() {
        let short = BoundedBytes::<4>::copy_truncated(b"ab");
        assert_eq!(short.as_bytes(), b"ab");
        assert_eq!(short.capacity(), 4);

        let long = BoundedBytes::<4>::copy_truncated(b"abcdefgh");
        assert_eq!(long.as_bytes(), b"abcd");
        assert_eq!(long.len(), 4);

        assert!(BoundedBytes::<4>::copy_truncated(b"").is_empty());
    }

    #[test]
    fn test_currency_is_uppercased() {
        assert_eq!(CurrencyCode::parse(b"usd").unwrap().as_bytes(), b"USD");
        assert_eq!(CurrencyCode::parse(b"eUr").unwrap().as_bytes(), b"EUR");
        assert_eq!(CurrencyCode::parse(b"usd-1").unwrap().as_bytes(), b"USD-1");
    }

    #[test]
    fn test_currency_length_bounds() {
        assert!(CurrencyCode::parse(b"U").is_ok());
        assert!(CurrencyCode::parse(&[b'a'; 20]).is_ok());

        assert_eq!(
            CurrencyCode::parse(b""),
            Err(ValidationError::Required { field: "currency" })
        );
        assert_eq!(
            CurrencyCode::parse(&[b'a'; 21]),
            Err(ValidationError::TooLong {
                field: "currency",
                max: 20
            })
        );
    }

    #[test]
    fn test_currency_from_arg() {
        assert!(CurrencyCode::from_arg(&Argument::text(b"usd")).is_ok());
        assert_eq!(
            CurrencyCode::from_arg(&Argument::integer(840)),
            Err(ValidationError::WrongType {
                field: "currency",
                expected: ArgType::String,
                actual: ArgType::Integer,
            })
        );
        assert_eq!(
            CurrencyCode::from_arg(&Argument::null(ArgType::String)),
            Err(ValidationError::Required { field: "currency" })
        );
    }

    #[test]
    fn test_currency_keeps_non_ascii_bytes() {
        let code = CurrencyCode::parse("грн".as_bytes()).unwrap();
        assert_eq!(code.as_bytes(), "грн".as_bytes());
    }

    #[test]
    fn test_date_key_truncation() {
        let key = DateKey::parse(b"2018-03-01T10:15:00+02:00").unwrap();
        assert_eq!(key.as_bytes(), b"2018-03-01");

        let short = DateKey::parse(b"2018").unwrap();
        assert_eq!(short.as_bytes(), b"2018");

        assert!(DateKey::parse(&[b'x'; 40]).is_ok());
        assert!(DateKey::parse(&[b'x'; 41]).is_err());
        assert!(DateKey::parse(b"").is_err());
    }

    #[test]
    fn test_date_key_as_date() {
        let key = DateKey::parse(b"2018-03-01 00:00:00").unwrap();
        assert_eq!(key.as_date(), NaiveDate::from_ymd_opt(2018, 3, 1));

        // Never validated on the conversion path
        let junk = DateKey::parse(b"2018-02-30").unwrap();
        assert_eq!(junk.as_date(), None);
        assert_eq!(junk.as_bytes(), b"2018-02-30");
    }

    #[test]
    fn test_serde_goes_through_parse() {
        let code: CurrencyCode = serde_json::from_str(r#""eur""#).unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), r#""EUR""#);

        let too_long = format!("\"{}\"", "A".repeat(21));
        assert!(serde_json::from_str::<CurrencyCode>(&too_long).is_err());

        let key: DateKey = serde_json::from_str(r#""2018-03-01T00:00""#).unwrap();
        assert_eq!(key.to_string(), "2018-03-01");
    }
}
