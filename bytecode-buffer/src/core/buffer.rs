//! Growable bytecode store with a sequential read cursor and file persistence

use crate::core::config::{BufferConfig, GrowthPolicy};
use crate::error::{BytecodeError, Result};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Owned bytecode storage
///
/// Bytes are appended by the compiler-side writer and consumed in order by the
/// loader-side reader. Replacing the content (`set_data`, `load_from_file`)
/// resets the read cursor; appending never does.
#[derive(Debug, Clone, Default)]
pub struct ByteCodeBuffer {
    data: Vec<u8>,
    /// Offset of the next `read_data` call, always `<= data.len()`
    read_pos: usize,
    config: BufferConfig,
}

impl ByteCodeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BufferConfig) -> Self {
        Self {
            data: Vec::with_capacity(config.initial_capacity),
            read_pos: 0,
            config,
        }
    }

    /// Create a buffer holding the contents of `path`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut buffer = Self::new();
        buffer.load_from_file(path)?;
        Ok(buffer)
    }

    /// Write the whole content to `path`, replacing any existing file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if self.data.is_empty() {
            return Err(BytecodeError::EmptyBuffer);
        }

        let mut file = File::create(path).map_err(|err| {
            warn!(path = %path.display(), error = %err, "cannot open bytecode file for writing");
            BytecodeError::io(path, err)
        })?;
        self.persist(&mut file, path)?;

        if self.config.sync_on_save {
            file.sync_all().map_err(|err| BytecodeError::io(path, err))?;
        }

        debug!(path = %path.display(), bytes = self.data.len(), "saved bytecode");
        Ok(())
    }

    fn persist<W: Write>(&self, writer: &mut W, path: &Path) -> Result<()> {
        let written = write_fully(writer, &self.data).map_err(|err| BytecodeError::io(path, err))?;
        if written != self.data.len() {
            warn!(path = %path.display(), expected = self.data.len(), written, "short bytecode write");
            return Err(BytecodeError::ShortWrite {
                expected: self.data.len(),
                written,
            });
        }
        Ok(())
    }

    /// Replace the content with the bytes of `path`
    ///
    /// The previous content is dropped before the file is opened, so the
    /// buffer is empty after any failure.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.clear();

        let file = File::open(path).map_err(|err| {
            warn!(path = %path.display(), error = %err, "cannot open bytecode file");
            BytecodeError::io(path, err)
        })?;
        let len = file
            .metadata()
            .map_err(|err| BytecodeError::io(path, err))?
            .len();
        if len == 0 {
            return Err(BytecodeError::EmptyFile {
                path: path.to_path_buf(),
            });
        }
        let expected = usize::try_from(len).map_err(|_| {
            BytecodeError::io(
                path,
                io::Error::new(io::ErrorKind::InvalidData, "file too large to buffer"),
            )
        })?;

        let mut data = Vec::with_capacity(expected);
        let actual = file
            .take(len)
            .read_to_end(&mut data)
            .map_err(|err| BytecodeError::io(path, err))?;
        if actual != expected {
            warn!(path = %path.display(), expected, actual, "bytecode file changed while reading");
            return Err(BytecodeError::SizeMismatch { expected, actual });
        }

        self.data = data;
        self.read_pos = 0;
        debug!(path = %path.display(), bytes = expected, "loaded bytecode");
        Ok(())
    }

    /// Borrow the raw content
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Replace the content with a copy of `bytes` and rewind the cursor
    pub fn set_data(&mut self, bytes: &[u8]) {
        self.data = bytes.to_vec();
        self.read_pos = 0;
    }

    /// Append `bytes` to the end, leaving the read cursor where it is
    ///
    /// Returns the number of bytes appended.
    pub fn append_data(&mut self, bytes: &[u8]) -> usize {
        if self.config.growth == GrowthPolicy::Exact {
            self.data.reserve_exact(bytes.len());
        }
        self.data.extend_from_slice(bytes);
        bytes.len()
    }

    /// Copy up to `dest.len()` bytes from the cursor into `dest`
    ///
    /// Returns `None` once nothing is left to read (or nothing was ever
    /// stored). A count smaller than `dest.len()` is a normal short read at
    /// the end of the content.
    pub fn read_data(&mut self, dest: &mut [u8]) -> Option<usize> {
        let remaining = self.remaining();
        if remaining == 0 {
            return None;
        }

        let count = dest.len().min(remaining);
        let end = self.read_pos + count;
        dest[..count].copy_from_slice(&self.data[self.read_pos..end]);
        self.read_pos = end;
        Some(count)
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Current read cursor
    pub fn position(&self) -> usize {
        self.read_pos
    }

    /// Bytes left between the cursor and the end
    pub fn remaining(&self) -> usize {
        self.data.len() - self.read_pos
    }

    /// Move the cursor back to the start without touching the content
    pub fn rewind(&mut self) {
        self.read_pos = 0;
    }

    /// Drop the content and release its storage
    pub fn clear(&mut self) {
        self.data = Vec::new();
        self.read_pos = 0;
    }

    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

fn write_fully<W: Write>(writer: &mut W, mut bytes: &[u8]) -> io::Result<usize> {
    let mut written = 0;
    while !bytes.is_empty() {
        match writer.write(bytes) {
            Ok(0) => break,
            Ok(n) => {
                written += n;
                bytes = &bytes[n..];
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
    Ok(written)
}

impl Read for ByteCodeBuffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_data(buf).unwrap_or(0))
    }
}

impl Write for ByteCodeBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.append_data(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl From<Vec<u8>> for ByteCodeBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self {
            data,
            read_pos: 0,
            config: BufferConfig::default(),
        }
    }
}

impl From<&[u8]> for ByteCodeBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from(bytes.to_vec())
    }
}

impl AsRef<[u8]> for ByteCodeBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
