//! Decoding of the server's raw argument block into [`uah_core::Argument`]s.
//!
//! This is the only place that dereferences argument pointers. Everything it
//! hands out borrows from the server's buffers for the duration of one call.

use std::os::raw::c_ulong;
use std::slice;

use uah_core::{ArgType, Argument, ArgumentSchema, InputValue};

use crate::ffi::UDF_ARGS;

/// Arguments TO_UAH reads; any further ones are never decoded.
pub const USED_ARGS: usize = 3;

/// Borrowed view over a server-owned `UDF_ARGS`.
#[derive(Debug, Clone, Copy)]
pub struct RawArgs<'a> {
    inner: &'a UDF_ARGS,
}

impl<'a> RawArgs<'a> {
    /// Wraps a server pointer, `None` if it is null.
    ///
    /// # Safety
    /// `ptr` must be null or point to a `UDF_ARGS` whose arrays hold
    /// `arg_count` entries each and stay valid for `'a`.
    pub unsafe fn from_ptr(ptr: *const UDF_ARGS) -> Option<Self> {
        // SAFETY: forwarded from the caller
        unsafe { ptr.as_ref() }.map(|inner| RawArgs { inner })
    }

    /// Number of arguments the server declared.
    pub fn count(&self) -> usize {
        self.inner.arg_count as usize
    }

    /// Declared type of every argument.
    pub fn declared_types(&self) -> Vec<ArgType> {
        (0..self.count()).map(|i| self.declared_type(i)).collect()
    }

    fn declared_type(&self, index: usize) -> ArgType {
        if self.inner.arg_type.is_null() {
            return ArgType::Invalid;
        }
        // SAFETY: index < arg_count, array has arg_count entries
        ArgType::from_raw(unsafe { *self.inner.arg_type.add(index) })
    }

    /// Writes the coerced schema back into the server's type array.
    ///
    /// # Safety
    /// Only valid during init, while the server expects its `arg_type`
    /// array to be rewritten.
    pub unsafe fn write_schema(&self, schema: &ArgumentSchema) {
        if self.inner.arg_type.is_null() {
            return;
        }
        for (i, arg_type) in schema.types().iter().take(self.count()).enumerate() {
            // SAFETY: i < arg_count; the server allows writes during init
            unsafe { *self.inner.arg_type.add(i) = arg_type.to_raw() };
        }
    }

    /// Decodes the arguments TO_UAH reads.
    ///
    /// Returns `None` when the server passed no value array at all.
    pub fn decode(&self) -> Option<Vec<Argument<'a>>> {
        if self.inner.args.is_null() {
            return None;
        }

        let used = self.count().min(USED_ARGS);
        Some((0..used).map(|i| self.decode_one(i)).collect())
    }

    fn decode_one(&self, index: usize) -> Argument<'a> {
        let arg_type = self.declared_type(index);
        // SAFETY: args is non-null (checked in decode) and has arg_count entries
        let ptr = unsafe { *self.inner.args.add(index) };
        if ptr.is_null() {
            return Argument::null(arg_type);
        }

        // SAFETY: the server stores a value of the declared type at `ptr`;
        // numeric values are not guaranteed to be aligned
        let value = unsafe {
            match arg_type {
                ArgType::String | ArgType::Decimal => {
                    let len = self.length(index) as usize;
                    Some(InputValue::Text(slice::from_raw_parts(ptr.cast::<u8>(), len)))
                }
                ArgType::Integer => Some(InputValue::Integer(ptr.cast::<i64>().read_unaligned())),
                ArgType::Real => Some(InputValue::Real(ptr.cast::<f64>().read_unaligned())),
                ArgType::Row | ArgType::Invalid => None,
            }
        };

        Argument { arg_type, value }
    }

    fn length(&self, index: usize) -> c_ulong {
        if self.inner.lengths.is_null() {
            return 0;
        }
        // SAFETY: index < arg_count, array has arg_count entries
        unsafe { *self.inner.lengths.add(index) }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::fixture::{ArgsFixture, Raw};

    #[test]
    fn test_null_pointer_is_none() {
        assert!(unsafe { RawArgs::from_ptr(std::ptr::null()) }.is_none());
    }

    #[test]
    fn test_decode_each_type() {
        let mut fixture = ArgsFixture::new(&[Raw::Real(1.5), Raw::text("usd"), Raw::Int(20180301)]);
        let raw = unsafe { RawArgs::from_ptr(fixture.as_mut_ptr()) }.unwrap();

        let args = raw.decode().unwrap();
        assert_eq!(args.len(), 3);
        assert_eq!(args[0], Argument::real(1.5));
        assert_eq!(args[1], Argument::text(b"usd"));
        assert_eq!(args[2], Argument::integer(20180301));
    }

    #[test]
    fn test_decode_nulls_and_decimal() {
        let mut fixture = ArgsFixture::new(&[
            Raw::Decimal(b"10.50".to_vec()),
            Raw::Null(ArgType::String),
            Raw::Null(ArgType::Row),
        ]);
        let raw = unsafe { RawArgs::from_ptr(fixture.as_mut_ptr()) }.unwrap();

        let args = raw.decode().unwrap();
        assert_eq!(args[0].arg_type, ArgType::Decimal);
        assert_eq!(args[0].value, Some(InputValue::Text(b"10.50")));
        assert!(args[1].is_null());
        assert_eq!(args[2], Argument::null(ArgType::Row));
    }

    #[test]
    fn test_decode_stops_at_used_args() {
        let mut fixture = ArgsFixture::new(&[
            Raw::Real(1.0),
            Raw::text("EUR"),
            Raw::text("2018-03-01"),
            Raw::text("ignored"),
            Raw::Int(5),
        ]);
        let raw = unsafe { RawArgs::from_ptr(fixture.as_mut_ptr()) }.unwrap();

        assert_eq!(raw.count(), 5);
        assert_eq!(raw.decode().unwrap().len(), USED_ARGS);
    }

    #[test]
    fn test_missing_value_array() {
        let mut fixture = ArgsFixture::new(&[Raw::Real(1.0)]).without_values();
        let raw = unsafe { RawArgs::from_ptr(fixture.as_mut_ptr()) }.unwrap();
        assert!(raw.decode().is_none());
    }

    #[test]
    fn test_write_schema() {
        let mut fixture = ArgsFixture::new(&[Raw::text("12"), Raw::Int(1)]);
        let raw = unsafe { RawArgs::from_ptr(fixture.as_mut_ptr()) }.unwrap();

        assert_eq!(raw.declared_types(), vec![ArgType::String, ArgType::Integer]);
        let schema = ArgumentSchema::new(vec![ArgType::Real, ArgType::String]);
        unsafe { raw.write_schema(&schema) };

        assert_eq!(fixture.declared(), vec![ArgType::Real, ArgType::String]);
    }
}
