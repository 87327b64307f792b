//! # Server ABI Definitions
//!
//! `#[repr(C)]` mirrors of the structures the server passes to a loadable
//! function. Field order and widths must match `mysql_com.h` / `udf_registration_types.h`
//! exactly; never reorder.
//!
//! ## Memory Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Everything behind these pointers belongs to the server.               │
//! │                                                                         │
//! │  UDF_ARGS                                                              │
//! │  ├── arg_type[i]   writable during init only (schema coercion)         │
//! │  ├── args[i]       NULL pointer = SQL NULL                             │
//! │  │                 STRING/DECIMAL → bytes (not NUL-terminated)         │
//! │  │                 INT  → *const i64                                   │
//! │  │                 REAL → *const f64                                   │
//! │  └── lengths[i]    byte length for STRING/DECIMAL                      │
//! │                                                                         │
//! │  message           MYSQL_ERRMSG_SIZE bytes, init only                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

#![allow(non_camel_case_types)]

use std::os::raw::{c_char, c_int, c_uint, c_ulong, c_void};
use std::ptr;

/// `my_bool` (MariaDB) / `bool` (MySQL 8): one byte, 0 or 1.
pub type my_bool = c_char;

/// `enum Item_result`, an `int` on every supported platform.
pub type Item_result = c_int;

/// Size of the init error buffer, including the terminating NUL.
pub const MYSQL_ERRMSG_SIZE: usize = 512;

/// Per-statement state filled by `xxx_init`.
#[repr(C)]
#[derive(Debug)]
pub struct UDF_INIT {
    /// 1 if the function can return NULL.
    pub maybe_null: my_bool,
    /// Number of decimals in the result.
    pub decimals: c_uint,
    /// Display width of the result.
    pub max_length: c_ulong,
    /// Free pointer for the function's own use.
    pub ptr: *mut c_char,
    /// 1 if the function always returns the same value.
    pub const_item: my_bool,
    /// Reserved.
    pub extension: *mut c_void,
}

/// Argument block passed to `xxx_init` and to every row call.
#[repr(C)]
#[derive(Debug)]
pub struct UDF_ARGS {
    /// Number of arguments.
    pub arg_count: c_uint,
    /// Declared type per argument.
    pub arg_type: *mut Item_result,
    /// Value pointer per argument.
    pub args: *mut *mut c_char,
    /// Byte length per argument.
    pub lengths: *mut c_ulong,
    /// 1 per argument that may be NULL.
    pub maybe_null: *mut c_char,
    /// Argument names as written in the query.
    pub attributes: *mut *mut c_char,
    /// Lengths of `attributes`.
    pub attribute_lengths: *mut c_ulong,
    /// Reserved.
    pub extension: *mut c_void,
}

/// Copies `msg` into the server's init message buffer, NUL-terminated.
///
/// Messages longer than the buffer are cut at the last whole byte that fits.
///
/// # Safety
/// `dst` must be null or point to at least [`MYSQL_ERRMSG_SIZE`] writable bytes.
pub unsafe fn write_message(dst: *mut c_char, msg: &str) {
    if dst.is_null() {
        return;
    }

    let bytes = msg.as_bytes();
    let len = bytes.len().min(MYSQL_ERRMSG_SIZE - 1);
    // SAFETY: caller guarantees MYSQL_ERRMSG_SIZE bytes at `dst`, len < that
    unsafe {
        ptr::copy_nonoverlapping(bytes.as_ptr(), dst.cast::<u8>(), len);
        *dst.add(len) = 0;
    }
}

// =============================================================================
// Test Fixtures
// =============================================================================


// =============================================================================
// Unit Tests
// =============================================================================
