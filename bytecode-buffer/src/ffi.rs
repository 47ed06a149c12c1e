//! C-ABI callbacks for engines that take a plain function pointer plus an
//! opaque user pointer.
//!
//! ```
//! use bytecode_buffer::ByteCodeBuffer;
//! use bytecode_buffer::ffi::{as_user_data, bytecode_writer_raw};
//!
//! let mut buffer = ByteCodeBuffer::new();
//! let mut chunk = *b"\xFA\xFA";
//! let written = unsafe {
//!     bytecode_writer_raw(as_user_data(&mut buffer), chunk.as_mut_ptr().cast(), 2)
//! };
//! assert_eq!(written, 2);
//! ```

#![allow(unsafe_code)]

use crate::core::buffer::ByteCodeBuffer;
use crate::core::stream::{bytecode_reader, bytecode_writer, NO_DATA};
use std::ffi::c_void;
use std::slice;

/// Signature shared by the engine's read and write callbacks
pub type RawStreamFn = unsafe extern "C" fn(*mut c_void, *mut c_void, i64) -> i64;

/// Context pointer to register alongside the callbacks
pub fn as_user_data(buffer: &mut ByteCodeBuffer) -> *mut c_void {
    (buffer as *mut ByteCodeBuffer).cast()
}

/// # Safety
///
/// `user_data` must come from [`as_user_data`] on a buffer that outlives the
/// call and is not otherwise borrowed during it. `data` must be valid for
/// writes of `size` bytes.
pub unsafe extern "C" fn bytecode_reader_raw(
    user_data: *mut c_void,
    data: *mut c_void,
    size: i64,
) -> i64 {
    let Ok(len) = usize::try_from(size) else {
        return NO_DATA;
    };
    if user_data.is_null() || (data.is_null() && len > 0) {
        return NO_DATA;
    }

    // SAFETY: non-null and produced by `as_user_data`, exclusive for this call.
    let buffer = unsafe { &mut *user_data.cast::<ByteCodeBuffer>() };
    if len == 0 {
        return bytecode_reader(buffer, &mut []);
    }
    // SAFETY: caller guarantees `data` is writable for `len` bytes.
    let dest = unsafe { slice::from_raw_parts_mut(data.cast::<u8>(), len) };
    bytecode_reader(buffer, dest)
}

/// # Safety
///
/// `user_data` must come from [`as_user_data`] on a buffer that outlives the
/// call and is not otherwise borrowed during it. `data` must be valid for
/// reads of `size` bytes.
pub unsafe extern "C" fn bytecode_writer_raw(
    user_data: *mut c_void,
    data: *mut c_void,
    size: i64,
) -> i64 {
    let Ok(len) = usize::try_from(size) else {
        return -1;
    };
    if user_data.is_null() || (data.is_null() && len > 0) {
        return -1;
    }

    // SAFETY: non-null and produced by `as_user_data`, exclusive for this call.
    let buffer = unsafe { &mut *user_data.cast::<ByteCodeBuffer>() };
    if len == 0 {
        return bytecode_writer(buffer, &[]);
    }
    // SAFETY: caller guarantees `data` is readable for `len` bytes.
    let src = unsafe { slice::from_raw_parts(data.cast::<u8>().cast_const(), len) };
    bytecode_writer(buffer, src)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn test_raw_callbacks_round_trip() {
        let mut buffer = ByteCodeBuffer::new();
        let ctx = as_user_data(&mut buffer);
        let writer: RawStreamFn = bytecode_writer_raw;
        let reader: RawStreamFn = bytecode_reader_raw;

        let mut chunk = [1u8, 2, 3, 4, 5];
        assert_eq!(unsafe { writer(ctx, chunk.as_mut_ptr().cast(), 5) }, 5);

        let mut dest = [0u8; 4];
        assert_eq!(unsafe { reader(ctx, dest.as_mut_ptr().cast(), 4) }, 4);
        assert_eq!(dest, [1, 2, 3, 4]);
        assert_eq!(unsafe { reader(ctx, dest.as_mut_ptr().cast(), 4) }, 1);
        assert_eq!(dest[0], 5);
        assert_eq!(unsafe { reader(ctx, dest.as_mut_ptr().cast(), 4) }, NO_DATA);

        assert_eq!(buffer.size(), 5);
    }

    #[test]
    fn test_raw_callbacks_reject_bad_arguments() {
        let mut buffer = ByteCodeBuffer::from(vec![1, 2, 3]);
        let ctx = as_user_data(&mut buffer);
        let mut dest = [0u8; 2];

        unsafe {
            assert_eq!(bytecode_reader_raw(ptr::null_mut(), dest.as_mut_ptr().cast(), 2), NO_DATA);
            assert_eq!(bytecode_reader_raw(ctx, ptr::null_mut(), 2), NO_DATA);
            assert_eq!(bytecode_reader_raw(ctx, dest.as_mut_ptr().cast(), -3), NO_DATA);
            assert_eq!(bytecode_writer_raw(ctx, ptr::null_mut(), 4), -1);
            assert_eq!(bytecode_writer_raw(ctx, ptr::null_mut(), 0), 0);
        }

        assert_eq!(buffer.data(), &[1, 2, 3]);
        assert_eq!(buffer.position(), 0);
    }
}
