//! Bytecode Buffer
//!
//! Owned byte storage for persisting and restoring compiled script bytecode,
//! with reader/writer adapters for an embedding engine's serialization
//! callbacks.
//!
//! ```no_run
//! use bytecode_buffer::{bytecode_writer, ByteCodeBuffer};
//!
//! let mut buffer = ByteCodeBuffer::new();
//! bytecode_writer(&mut buffer, &[0xFA, 0xFA, 0x52, 0x49]);
//! buffer.save_to_file("main.cnut")?;
//!
//! let restored = ByteCodeBuffer::from_file("main.cnut")?;
//! assert_eq!(restored.data(), buffer.data());
//! # Ok::<(), bytecode_buffer::BytecodeError>(())
//! ```

#![warn(rust_2018_idioms)]
#![deny(unsafe_code)] // `ffi` opts back in with a safety comment on each block

pub mod core;
pub mod error;
pub mod ffi;

// Re-export commonly used types
pub use crate::core::{
    buffer::ByteCodeBuffer,
    config::{BufferConfig, GrowthPolicy},
    stream::{bytecode_reader, bytecode_writer, NO_DATA},
};

pub use crate::error::{BytecodeError, Result};
