pub mod buffer;
pub mod config;
pub mod stream;

// Re-export core types
pub use self::buffer::ByteCodeBuffer;
pub use self::config::{BufferConfig, GrowthPolicy};
pub use self::stream::{bytecode_reader, bytecode_writer, NO_DATA};
