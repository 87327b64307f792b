//! # Converter Module
//!
//! `AmountConverter`: the TO_UAH function itself.
//!
//! ## Call Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Lifecycle of one SQL statement                       │
//! │                                                                         │
//! │  initialize(&declared_types)       once, before the first row          │
//! │       │                                                                 │
//! │       ├── 0 args? → CoreError::NoArguments (statement fails)           │
//! │       └── InitOutcome { schema, result }                               │
//! │                                                                         │
//! │  convert(Some(&row_args))          once per row                        │
//! │       │                                                                 │
//! │       ├── ConversionRequest::from_args  (amount, currency, date)       │
//! │       │        └── None → NULL row                                     │
//! │       └── ConversionRequest::to_uah     (rate lookup)                  │
//! │                                                                         │
//! │  finalize()                        once, nothing to release            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use uah_core::{AmountConverter, Argument};
//!
//! let converter = AmountConverter::new();
//!
//! let row = [Argument::real(10.0), Argument::text(b"usd")];
//! assert_eq!(converter.convert(Some(&row[..])), Some(260.0));
//!
//! let row = [Argument::text(b"12.5abc")];
//! assert_eq!(converter.convert(Some(&row[..])), Some(12.5));
//!
//! assert_eq!(converter.convert(Some(&[][..])), None);
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{CoreError, CoreResult};
use crate::normalize::{CurrencyCode, DateKey};
use crate::parse::parse_leading_f64;
use crate::rates::{RateTable, RATES};
use crate::types::{ArgType, Argument, ArgumentSchema, InputValue, ResultDescriptor};

/// Position of the amount argument.
const AMOUNT_ARG: usize = 0;
/// Position of the optional currency argument.
const CURRENCY_ARG: usize = 1;
/// Position of the optional reference-date argument.
const DATE_ARG: usize = 2;

// =============================================================================
// Init Outcome
// =============================================================================

/// What `initialize` hands back to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitOutcome {
    /// Types the server must use for each argument from now on.
    pub schema: ArgumentSchema,
    /// Result column hints.
    pub result: ResultDescriptor,
}

// =============================================================================
// Conversion Request
// =============================================================================

/// One row's arguments after extraction and normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionRequest {
    /// Amount in the source currency.
    pub amount: f64,
    /// Source currency, `None` when the amount is already in UAH.
    pub currency: Option<CurrencyCode>,
    /// Reference date. Carried along but not used by the lookup.
    pub date: Option<DateKey>,
}

impl ConversionRequest {
    /// Extracts a request from positional arguments.
    ///
    /// Returns `None` when the row must be NULL: no arguments, a NULL first
    /// argument, or a first argument of an unsupported type. Malformed
    /// optional arguments are dropped, never reported.
    pub fn from_args(args: &[Argument<'_>]) -> Option<Self> {
        let amount = extract_amount(args.get(AMOUNT_ARG)?)?;

        let currency = args
            .get(CURRENCY_ARG)
            .and_then(|arg| match CurrencyCode::from_arg(arg) {
                Ok(code) => Some(code),
                Err(err) => {
                    trace!(error = %err, "Ignoring currency argument");
                    None
                }
            });

        let date = args
            .get(DATE_ARG)
            .and_then(|arg| match DateKey::from_arg(arg) {
                Ok(key) => Some(key),
                Err(err) => {
                    trace!(error = %err, "Ignoring date argument");
                    None
                }
            });

        Some(ConversionRequest {
            amount,
            currency,
            date,
        })
    }

    /// Converts the amount into UAH using `rates`.
    pub fn to_uah(&self, rates: &RateTable) -> f64 {
        match &self.currency {
            Some(code) => rates.apply(self.amount, code),
            None => self.amount,
        }
    }
}

/// Reads the amount according to its declared type.
fn extract_amount(arg: &Argument<'_>) -> Option<f64> {
    let Some(value) = arg.value else {
        trace!("First argument is NULL");
        return None;
    };

    match (arg.arg_type, value) {
        (ArgType::String, InputValue::Text(bytes)) if bytes.is_empty() => Some(0.0),
        (ArgType::String, InputValue::Text(bytes)) => Some(parse_leading_f64(bytes)),
        (ArgType::Integer, InputValue::Integer(i)) => Some(i as f64),
        (ArgType::Real, InputValue::Real(r)) => Some(r),
        (arg_type, _) => {
            trace!(%arg_type, "Unsupported type for first argument");
            None
        }
    }
}

// =============================================================================
// Amount Converter
// =============================================================================

/// The TO_UAH function.
///
/// Stateless apart from a reference to an immutable [`RateTable`]; one
/// instance can serve any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct AmountConverter {
    rates: &'static RateTable,
}

impl Default for AmountConverter {
    fn default() -> Self {
        AmountConverter::new()
    }
}

impl AmountConverter {
    /// Creates a converter over the built-in [`RATES`].
    pub fn new() -> Self {
        AmountConverter { rates: &RATES }
    }

    /// The rate table used for lookups.
    pub fn rates(&self) -> &'static RateTable {
        self.rates
    }

    /// Validates the call shape and declares the argument schema.
    ///
    /// ## Schema
    /// - argument 0 → REAL
    /// - argument 1 → STRING (if present)
    /// - argument 2 → STRING (if present)
    /// - later arguments keep their declared type
    ///
    /// ## Example
    /// ```rust
    /// use uah_core::{AmountConverter, ArgType};
    ///
    /// let outcome = AmountConverter::new()
    ///     .initialize(&[ArgType::String, ArgType::Integer])
    ///     .unwrap();
    /// assert_eq!(outcome.schema.types(), &[ArgType::Real, ArgType::String]);
    /// assert_eq!(outcome.result.decimals, 2);
    ///
    /// assert!(AmountConverter::new().initialize(&[]).is_err());
    /// ```
    pub fn initialize(&self, declared: &[ArgType]) -> CoreResult<InitOutcome> {
        if declared.is_empty() {
            return Err(CoreError::NoArguments);
        }

        let types = declared
            .iter()
            .enumerate()
            .map(|(position, &declared_type)| match position {
                AMOUNT_ARG => ArgType::Real,
                CURRENCY_ARG | DATE_ARG => ArgType::String,
                _ => declared_type,
            })
            .collect();

        Ok(InitOutcome {
            schema: ArgumentSchema::new(types),
            result: ResultDescriptor::default(),
        })
    }

    /// Converts one row. `None` means the row's result is NULL.
    ///
    /// `args` is `None` when the server handed over no argument list at all.
    pub fn convert(&self, args: Option<&[Argument<'_>]>) -> Option<f64> {
        let request = ConversionRequest::from_args(args?)?;
        Some(request.to_uah(self.rates))
    }

    /// Releases per-statement resources. There are none.
    pub fn finalize(&self) {}
}

// =============================================================================
// Unit Tests
// =============================================================================
