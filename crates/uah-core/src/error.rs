//! # Error Types
//!
//! Domain-specific error types for uah-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  uah-core errors (this file)                                           │
//! │  ├── CoreError        - Registration-time failures                     │
//! │  └── ValidationError  - Optional argument rejected                     │
//! │                                                                         │
//! │  uah-udf errors (separate crate)                                       │
//! │  └── UdfError         - Config loading failures                        │
//! │                                                                         │
//! │  Row path: ValidationError → "argument ignored" (never an SQL error)   │
//! │  Init path: CoreError → message buffer → registration refused          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the field name in validation messages
//! 3. Errors are enum variants, never String
//! 4. Init messages stay under 80 bytes (the server prints them verbatim)

use thiserror::Error;

use crate::types::ArgType;

// =============================================================================
// Core Error
// =============================================================================

/// Errors that refuse the whole function registration.
///
/// Rows never produce a `CoreError`: every per-row problem is either a NULL
/// result or a silently ignored optional argument.
#[derive(Debug, Error)]
pub enum CoreError {
    /// `TO_UAH()` was called with an empty argument list.
    ///
    /// ## When This Occurs
    /// ```text
    /// SELECT TO_UAH();
    ///      │
    ///      ▼
    /// initialize(&[]) ──► NoArguments
    ///      │
    ///      ▼
    /// ERROR: TO_UAH must have at least one argument
    /// ```
    #[error("TO_UAH must have at least one argument")]
    NoArguments,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Optional argument validation errors.
///
/// Produced when a currency or date argument does not meet its shape
/// requirements. The converter treats any of these as "argument absent".
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The argument is NULL or has zero length.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// The argument is longer than the accepted maximum.
    #[error("{field} must be at most {max} bytes")]
    TooLong { field: &'static str, max: usize },

    /// The argument was declared with an unexpected type.
    #[error("{field} must be {expected}, got {actual}")]
    WrongType {
        field: &'static str,
        expected: ArgType,
        actual: ArgType,
    },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for argument validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
