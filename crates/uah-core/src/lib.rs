//! # uah-core: Pure Conversion Logic for TO_UAH
//!
//! This crate is the **heart** of the TO_UAH database function. It converts
//! an amount in USD or EUR (or already in UAH) into hryvnias using a small
//! compiled-in rate table, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        TO_UAH Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Database server (MySQL / MariaDB)               │   │
//! │  │    SELECT TO_UAH(amount, currency, signed_on) FROM contracts    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ UDF ABI (raw pointers)                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    uah-udf (shared object)                      │   │
//! │  │    to_uah_init, to_uah, to_uah_deinit, config, logging          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ safe slices                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ uah-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ normalize │  │   rates   │  │ converter │  │   │
//! │  │   │ Argument  │  │ Currency  │  │ RateTable │  │  Amount   │  │   │
//! │  │   │  ArgType  │  │  DateKey  │  │   RATES   │  │ Converter │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO RAW POINTERS • NO SHARED MUTABLE STATE           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Argument model and init-time schema types
//! - [`parse`] - Permissive leading-number parsing for text amounts
//! - [`normalize`] - Currency code and date key normalization
//! - [`rates`] - The compiled-in rate table
//! - [`converter`] - `AmountConverter` (initialize / convert / finalize)
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same arguments = same result, every time
//! 2. **No I/O**: pointers, files and log subscribers belong to uah-udf
//! 3. **NULL over errors**: per-row problems yield NULL or are ignored
//! 4. **Bounded strings**: optional arguments are copied with explicit limits
//!
//! ## Example Usage
//!
//! ```rust
//! use uah_core::{AmountConverter, Argument};
//!
//! let converter = AmountConverter::new();
//!
//! // 100 EUR on 2018-03-01
//! let row = [
//!     Argument::integer(100),
//!     Argument::text(b"eur"),
//!     Argument::text(b"2018-03-01"),
//! ];
//! assert_eq!(converter.convert(Some(&row[..])), Some(3000.0));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod converter;
pub mod error;
pub mod normalize;
pub mod parse;
pub mod rates;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use converter::{AmountConverter, ConversionRequest, InitOutcome};
pub use error::{CoreError, CoreResult, ValidationError};
pub use normalize::{CurrencyCode, DateKey};
pub use rates::{Rate, RateTable, RATES};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency every result is expressed in.
pub const TARGET_CURRENCY: &str = "UAH";

/// Longest accepted currency argument, in bytes.
pub const CURRENCY_MAX_LEN: usize = 20;

/// Longest accepted date argument, in bytes.
pub const DATE_MAX_LEN: usize = 40;

/// Bytes of the date argument that are kept (`YYYY-MM-DD`).
pub const DATE_KEY_LEN: usize = 10;

/// Bytes of the normalized currency code compared against the rate table.
///
/// ## Known Quirk
/// Only this prefix is compared, so `"USDT"` converts like `"USD"`. Kept as
/// is: existing reports depend on it.
pub const CURRENCY_MATCH_LEN: usize = 3;

/// Decimals advertised for the result column.
pub const RESULT_DECIMALS: u32 = 2;

/// Display width advertised for the result column (11 digits + `.` + 2).
pub const RESULT_MAX_LENGTH: u64 = 14;
