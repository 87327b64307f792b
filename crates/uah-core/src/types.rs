//! # Argument & Schema Types
//!
//! The values that cross the boundary between the database server and the
//! converter.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Boundary Types                                  │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    ArgType      │   │   InputValue    │   │    Argument     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  String  (0)    │   │  Text(&[u8])    │   │  arg_type       │       │
//! │  │  Real    (1)    │   │  Integer(i64)   │   │  value (Option) │       │
//! │  │  Integer (2)    │   │  Real(f64)      │   │  None = NULL    │       │
//! │  │  Row/Decimal    │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐                             │
//! │  │ ArgumentSchema  │   │ ResultDescriptor │   Returned once by          │
//! │  │  coerced types  │   │  maybe_null      │   `initialize`, consumed    │
//! │  │  per position   │   │  decimals = 2    │   by the server before      │
//! │  └─────────────────┘   │  max_length = 14 │   the first row             │
//! │                        └──────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{RESULT_DECIMALS, RESULT_MAX_LENGTH};

// =============================================================================
// Declared Type Tag
// =============================================================================

/// The server's classification of an argument (`Item_result`).
///
/// The numeric values are part of the server ABI and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgType {
    /// Unknown or unset tag.
    Invalid,
    /// Byte string with an explicit length.
    String,
    /// 64-bit float.
    Real,
    /// 64-bit signed integer.
    Integer,
    /// Row value (never passed to scalar functions in practice).
    Row,
    /// Decimal, passed by the server as its textual form.
    Decimal,
}

impl ArgType {
    /// Maps a raw `Item_result` value to a tag. Unknown values become `Invalid`.
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            0 => ArgType::String,
            1 => ArgType::Real,
            2 => ArgType::Integer,
            3 => ArgType::Row,
            4 => ArgType::Decimal,
            _ => ArgType::Invalid,
        }
    }

    /// Returns the raw `Item_result` value for this tag.
    pub const fn to_raw(self) -> i32 {
        match self {
            ArgType::Invalid => -1,
            ArgType::String => 0,
            ArgType::Real => 1,
            ArgType::Integer => 2,
            ArgType::Row => 3,
            ArgType::Decimal => 4,
        }
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgType::Invalid => write!(f, "INVALID"),
            ArgType::String => write!(f, "STRING"),
            ArgType::Real => write!(f, "REAL"),
            ArgType::Integer => write!(f, "INT"),
            ArgType::Row => write!(f, "ROW"),
            ArgType::Decimal => write!(f, "DECIMAL"),
        }
    }
}

// =============================================================================
// Argument Values
// =============================================================================

/// A decoded, non-NULL argument value.
///
/// Which variant is active is decided by the declared type tag; the host glue
/// never reinterprets one representation as another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputValue<'a> {
    /// Raw bytes plus their declared length (the slice length).
    Text(&'a [u8]),
    /// Signed 64-bit integer.
    Integer(i64),
    /// 64-bit float.
    Real(f64),
}

/// One positional argument of a row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Argument<'a> {
    /// Type tag declared by the server for this position.
    pub arg_type: ArgType,
    /// Decoded value, `None` when the server passed SQL NULL.
    pub value: Option<InputValue<'a>>,
}

impl<'a> Argument<'a> {
    /// SQL NULL with the given declared type.
    #[inline]
    pub const fn null(arg_type: ArgType) -> Self {
        Argument {
            arg_type,
            value: None,
        }
    }

    /// A text argument.
    #[inline]
    pub const fn text(bytes: &'a [u8]) -> Self {
        Argument {
            arg_type: ArgType::String,
            value: Some(InputValue::Text(bytes)),
        }
    }

    /// An integer argument.
    #[inline]
    pub const fn integer(value: i64) -> Self {
        Argument {
            arg_type: ArgType::Integer,
            value: Some(InputValue::Integer(value)),
        }
    }

    /// A real argument.
    #[inline]
    pub const fn real(value: f64) -> Self {
        Argument {
            arg_type: ArgType::Real,
            value: Some(InputValue::Real(value)),
        }
    }

    /// Returns the text bytes when this is a non-NULL text argument.
    pub fn as_text(&self) -> Option<&'a [u8]> {
        match (self.arg_type, self.value) {
            (ArgType::String, Some(InputValue::Text(bytes))) => Some(bytes),
            _ => None,
        }
    }

    /// Checks if the server passed SQL NULL.
    #[inline]
    pub const fn is_null(&self) -> bool {
        self.value.is_none()
    }
}

// =============================================================================
// Init Outcome
// =============================================================================

/// The argument types the server must use for every following row.
///
/// `initialize` builds this from the declared types; the host glue writes it
/// back into the server's type array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentSchema(Vec<ArgType>);

impl ArgumentSchema {
    /// Wraps a list of per-position types.
    pub fn new(types: Vec<ArgType>) -> Self {
        ArgumentSchema(types)
    }

    /// Returns the per-position types.
    pub fn types(&self) -> &[ArgType] {
        &self.0
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if the schema has no arguments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Presentation hints for the result column.
///
/// The server uses these for metadata only; nothing enforces them at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultDescriptor {
    /// Whether the result may be NULL.
    pub maybe_null: bool,
    /// Digits after the decimal separator.
    pub decimals: u32,
    /// Display width: 11 digits + separator + 2 decimals.
    pub max_length: u64,
}

impl Default for ResultDescriptor {
    fn default() -> Self {
        ResultDescriptor {
            maybe_null: true,
            decimals: RESULT_DECIMALS,
            max_length: RESULT_MAX_LENGTH,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
