//! Reader/writer adapters for the engine's closure serialization callbacks
//!
//! The engine drives a single serialize or deserialize pass by calling a
//! reader or writer repeatedly with the same context. Both adapters only
//! forward to the buffer and translate the result into the engine's signed
//! count convention.

use crate::core::buffer::ByteCodeBuffer;
use tracing::trace;

/// Returned by the reader once the buffer has nothing left
pub const NO_DATA: i64 = -1;

/// Read callback: fills `dest` from the buffer's cursor
pub fn bytecode_reader(buffer: &mut ByteCodeBuffer, dest: &mut [u8]) -> i64 {
    let result = match buffer.read_data(dest) {
        Some(count) => count as i64,
        None => NO_DATA,
    };
    trace!(requested = dest.len(), result, "bytecode read");
    result
}

/// Write callback: appends `src` to the buffer
pub fn bytecode_writer(buffer: &mut ByteCodeBuffer, src: &[u8]) -> i64 {
    let appended = buffer.append_data(src) as i64;
    trace!(appended, total = buffer.size(), "bytecode write");
    appended
}

impl ByteCodeBuffer {
    /// Reader callback bound to this buffer
    pub fn reader(&mut self) -> impl FnMut(&mut [u8]) -> i64 + '_ {
        move |dest: &mut [u8]| bytecode_reader(self, dest)
    }

    /// Writer callback bound to this buffer
    pub fn writer(&mut self) -> impl FnMut(&[u8]) -> i64 + '_ {
        move |src: &[u8]| bytecode_writer(self, src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_forwards_sentinel() {
        let mut buffer = ByteCodeBuffer::new();
        let mut dest = [0u8; 4];
        assert_eq!(bytecode_reader(&mut buffer, &mut dest), NO_DATA);
    }

    #[test]
    fn test_writer_then_reader() {
        let mut buffer = ByteCodeBuffer::new();
        assert_eq!(bytecode_writer(&mut buffer, &[0xFA, 0xFA]), 2);
        assert_eq!(bytecode_writer(&mut buffer, &[0x01]), 1);

        let mut dest = [0u8; 2];
        assert_eq!(bytecode_reader(&mut buffer, &mut dest), 2);
        assert_eq!(dest, [0xFA, 0xFA]);
        assert_eq!(bytecode_reader(&mut buffer, &mut dest), 1);
        assert_eq!(bytecode_reader(&mut buffer, &mut dest), NO_DATA);
    }

    #[test]
    fn test_closure_callbacks() {
        let mut buffer = ByteCodeBuffer::new();
        {
            let mut write = buffer.writer();
            assert_eq!(write(b"RI"), 2);
            assert_eq!(write(b"QS"), 2);
        }
        assert_eq!(buffer.data(), b"RIQS");

        let mut read = buffer.reader();
        let mut dest = [0u8; 3];
        assert_eq!(read(&mut dest), 3);
        assert_eq!(&dest, b"RIQ");
        assert_eq!(read(&mut dest), 1);
        assert_eq!(read(&mut dest), NO_DATA);
    }
}
