//! # uah-udf: TO_UAH Loadable Function
//!
//! Exposes [`uah_core::AmountConverter`] to MySQL / MariaDB through the
//! server's loadable-function ABI.
//!
//! ## Registration
//! ```sql
//! CREATE FUNCTION to_uah RETURNS REAL SONAME 'udf_to_uah.so';
//!
//! SELECT TO_UAH(100, 'usd');                -- 2600.00
//! SELECT TO_UAH('12.5', 'EUR', '2018-03-01'); -- 375.00
//! SELECT TO_UAH(NULL);                      -- NULL
//!
//! DROP FUNCTION IF EXISTS to_uah;
//! ```
//!
//! ## Call Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Server                          This crate                             │
//! │  ──────                          ──────────                             │
//! │                                                                         │
//! │  to_uah_init(initid, args, msg) ─► logging::init_once()                 │
//! │                                    AmountConverter::initialize          │
//! │                                    ├── Err → msg, return 1              │
//! │                                    └── Ok  → arg_type[], initid, 0      │
//! │                                                                         │
//! │  to_uah(initid, args, null, err) ─► RawArgs::decode (per row)           │
//! │                                    AmountConverter::convert             │
//! │                                    └── None → *is_null = 1, 0.0         │
//! │                                                                         │
//! │  to_uah_deinit(initid)          ─► AmountConverter::finalize            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Panics
//! No panic may unwind into the server. Every entry point runs its body under
//! `catch_unwind`; a panicking row yields NULL, a panicking init refuses the
//! registration.

pub mod args;
pub mod config;
pub mod error;
pub mod ffi;
pub mod logging;

pub use config::UdfConfig;
pub use error::{UdfError, UdfResult};

use std::os::raw::{c_char, c_ulong};
use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::{debug, info, trace, warn};
use uah_core::{AmountConverter, CoreResult};

use crate::args::RawArgs;
use crate::ffi::{my_bool, write_message, UDF_ARGS, UDF_INIT};

/// Registration statement, as shipped in `sql/install.sql`.
pub const CREATE_FUNCTION_SQL: &str = include_str!("../sql/install.sql");

/// Removal statement, as shipped in `sql/uninstall.sql`.
pub const DROP_FUNCTION_SQL: &str = include_str!("../sql/uninstall.sql");

const INIT_OK: my_bool = 0;
const INIT_FAILED: my_bool = 1;

// =============================================================================
// Exported Functions
// =============================================================================

/// Init hook: validates the call and declares the argument schema.
///
/// # Safety
/// Called by the server with pointers valid for the duration of the call;
/// `message` points to `MYSQL_ERRMSG_SIZE` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn to_uah_init(
    initid: *mut UDF_INIT,
    args: *mut UDF_ARGS,
    message: *mut c_char,
) -> my_bool {
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        logging::init_once();
        // SAFETY: forwarded from the server contract
        unsafe { init(initid, args) }
    }));

    match outcome {
        Ok(Ok(())) => INIT_OK,
        Ok(Err(e)) => {
            warn!(error = %e, "TO_UAH registration refused");
            // SAFETY: message buffer provided by the server
            unsafe { write_message(message, &e.to_string()) };
            INIT_FAILED
        }
        Err(_) => {
            // SAFETY: message buffer provided by the server
            unsafe { write_message(message, "TO_UAH: internal error during init") };
            INIT_FAILED
        }
    }
}

/// Row hook: converts one amount into UAH.
///
/// # Safety
/// Called by the server with the same `args` block that was passed to
/// [`to_uah_init`], refilled with this row's values.
#[no_mangle]
pub unsafe extern "C" fn to_uah(
    _initid: *mut UDF_INIT,
    args: *mut UDF_ARGS,
    is_null: *mut c_char,
    _error: *mut c_char,
) -> f64 {
    let result = catch_unwind(AssertUnwindSafe(|| {
        // SAFETY: forwarded from the server contract
        unsafe { convert_row(args) }
    }))
    .unwrap_or(None);

    match result {
        Some(value) => value,
        None => {
            if !is_null.is_null() {
                // SAFETY: non-null out-flag provided by the server
                unsafe { *is_null = 1 };
            }
            0.0
        }
    }
}

/// Deinit hook: nothing was acquired, nothing to free.
///
/// # Safety
/// Called by the server once, after the last row.
#[no_mangle]
pub unsafe extern "C" fn to_uah_deinit(_initid: *mut UDF_INIT) {
    AmountConverter::new().finalize();
    debug!("TO_UAH statement finished");
}

// =============================================================================
// Entry Point Bodies
// =============================================================================

unsafe fn init(initid: *mut UDF_INIT, args: *mut UDF_ARGS) -> CoreResult<()> {
    // SAFETY: forwarded from the server contract
    let raw = unsafe { RawArgs::from_ptr(args) };
    let declared = raw.map(|raw| raw.declared_types()).unwrap_or_default();

    let outcome = AmountConverter::new().initialize(&declared)?;

    if let Some(raw) = raw {
        // SAFETY: init is the one phase where arg_type may be rewritten
        unsafe { raw.write_schema(&outcome.schema) };
    }

    // SAFETY: initid is null or valid for writes during init
    if let Some(initid) = unsafe { initid.as_mut() } {
        initid.maybe_null = my_bool::from(outcome.result.maybe_null);
        initid.decimals = outcome.result.decimals;
        initid.max_length = outcome.result.max_length as c_ulong;
    }

    info!(arg_count = declared.len(), "TO_UAH registered");
    Ok(())
}

unsafe fn convert_row(args: *mut UDF_ARGS) -> Option<f64> {
    // SAFETY: forwarded from the server contract
    let decoded = unsafe { RawArgs::from_ptr(args) }.and_then(|raw| raw.decode());

    let result = AmountConverter::new().convert(decoded.as_deref());
    if result.is_none() {
        trace!("TO_UAH row is NULL");
    }
    result
}

// =============================================================================
// Unit Tests
// =============================================================================
