//! # Rates Module
//!
//! The compiled-in table of multipliers into UAH.
//!
//! ## Lookup Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RATE TABLE (process lifetime, read-only)                               │
//! │                                                                         │
//! │    USD  ×26.0                                                           │
//! │    EUR  ×30.0                                                           │
//! │                                                                         │
//! │  Match: first 3 bytes of the normalized code only                      │
//! │    "USD"   → ×26                                                        │
//! │    "USDT"  → ×26   (known quirk: longer codes with the same prefix)    │
//! │    "US"    → ×1    (too short to match anything)                       │
//! │    "UAH"   → ×1    (already in the target currency)                    │
//! │    "GBP"   → ×1    (unknown codes pass the amount through)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use uah_core::normalize::CurrencyCode;
//! use uah_core::rates::RATES;
//!
//! let usd = CurrencyCode::parse(b"usd").unwrap();
//! assert_eq!(RATES.apply(10.0, &usd), 260.0);
//!
//! let gbp = CurrencyCode::parse(b"GBP").unwrap();
//! assert_eq!(RATES.apply(10.0, &gbp), 10.0);
//! ```

use serde::Serialize;

use crate::normalize::CurrencyCode;
use crate::CURRENCY_MATCH_LEN;

// =============================================================================
// Rate
// =============================================================================

/// A single table entry: how many UAH one unit of `code` is worth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rate {
    /// Three-letter code the entry is keyed by.
    pub code: &'static str,
    /// Positive multiplier into UAH.
    pub multiplier: f64,
}

impl Rate {
    /// Checks whether `code` selects this entry.
    ///
    /// Compares exactly [`CURRENCY_MATCH_LEN`] bytes. A code shorter than
    /// that never matches; a longer one matches on its prefix.
    pub fn matches(&self, code: &CurrencyCode) -> bool {
        match (
            code.as_bytes().get(..CURRENCY_MATCH_LEN),
            self.code.as_bytes().get(..CURRENCY_MATCH_LEN),
        ) {
            (Some(candidate), Some(key)) => candidate == key,
            _ => false,
        }
    }
}

// =============================================================================
// Rate Table
// =============================================================================

/// Immutable mapping from currency code to multiplier.
///
/// Lives in a `static`, so concurrent readers need no synchronization.
#[derive(Debug, Serialize)]
pub struct RateTable {
    entries: &'static [Rate],
}

/// The built-in rate table.
pub static RATES: RateTable = RateTable::builtin();

const BUILTIN_RATES: &[Rate] = &[
    Rate {
        code: "USD",
        multiplier: 26.0,
    },
    Rate {
        code: "EUR",
        multiplier: 30.0,
    },
];

impl RateTable {
    /// The compiled-in entries.
    pub const fn builtin() -> Self {
        RateTable {
            entries: BUILTIN_RATES,
        }
    }

    /// All entries, in lookup order.
    pub fn entries(&self) -> &[Rate] {
        self.entries
    }

    /// Finds the entry for `code`, first match wins.
    pub fn lookup(&self, code: &CurrencyCode) -> Option<&Rate> {
        self.entries.iter().find(|rate| rate.matches(code))
    }

    /// Multiplier for `code`, `1.0` when the code is unknown.
    pub fn multiplier(&self, code: &CurrencyCode) -> f64 {
        self.lookup(code).map_or(1.0, |rate| rate.multiplier)
    }

    /// Converts `amount` from `code` into UAH.
    #[inline]
    pub fn apply(&self, amount: f64, code: &CurrencyCode) -> f64 {
        match self.lookup(code) {
            Some(rate) => amount * rate.multiplier,
            None => amount,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn code(raw: &str) -> CurrencyCode {
        CurrencyCode::parse(raw.as_bytes()).unwrap()
    }

    #[test]
    fn test_builtin_entries() {
        let entries = RATES.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|rate| rate.multiplier > 0.0));
    }

    #[test]
    fn test_known_codes() {
        assert_eq!(RATES.multiplier(&code("USD")), 26.0);
        assert_eq!(RATES.multiplier(&code("eur")), 30.0);
        assert_eq!(RATES.apply(2.5, &code("usd")), 65.0);
    }

    #[test]
    fn test_unknown_codes_are_identity() {
        assert!(RATES.lookup(&code("UAH")).is_none());
        assert_eq!(RATES.apply(12.34, &code("GBP")), 12.34);
        assert_eq!(RATES.apply(12.34, &code("XUSD")), 12.34);
    }

    #[test]
    fn test_three_byte_prefix_quirk() {
        assert_eq!(RATES.lookup(&code("USDT")).map(|r| r.code), Some("USD"));
        assert_eq!(RATES.lookup(&code("euro")).map(|r| r.code), Some("EUR"));
        assert!(RATES.lookup(&code("US")).is_none());
        assert!(RATES.lookup(&code("E")).is_none());
    }

    #[test]
    fn test_table_serializes() {
        let json = serde_json::to_value(&RATES).unwrap();
        assert_eq!(json["entries"][0]["code"], "USD");
        assert_eq!(json["entries"][1]["multiplier"], 30.0);
    }
}
