//! # UDF Error Types
//!
//! Errors raised by the shared-object side of TO_UAH.
//!
//! None of these ever reach SQL: a bad config file falls back to defaults
//! with a warning in the server error log, and init failures are reported
//! through `uah_core::CoreError`.

use thiserror::Error;

/// Result type alias for UDF-side operations.
pub type UdfResult<T> = Result<T, UdfError>;

/// UDF-side error covering config loading and validation.
#[derive(Debug, Error)]
pub enum UdfError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid configuration value.
    #[error("Invalid TO_UAH configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    // =========================================================================
    // Wrapped Errors
    // =========================================================================
    /// Malformed TOML.
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

// =============================================================================
// Unit Tests
// =============================================================================
