//! Buffer configuration
//!
//! ```
//! use bytecode_buffer::{BufferConfig, ByteCodeBuffer, GrowthPolicy};
//!
//! let config = BufferConfig::new()
//!     .growth(GrowthPolicy::Exact)
//!     .initial_capacity(256)
//!     .sync_on_save(true);
//!
//! let buffer = ByteCodeBuffer::with_config(config);
//! assert!(buffer.capacity() >= 256);
//! ```

/// How storage grows when bytes are appended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrowthPolicy {
    /// Let the allocator double capacity as needed
    #[default]
    Amortized,

    /// Reserve exactly the appended amount on every append
    Exact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferConfig {
    pub growth: GrowthPolicy,
    pub initial_capacity: usize,
    /// Flush file contents to disk before `save_to_file` returns
    pub sync_on_save: bool,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            growth: GrowthPolicy::Amortized,
            initial_capacity: 0,
            sync_on_save: false,
        }
    }
}

impl BufferConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn growth(mut self, growth: GrowthPolicy) -> Self {
        self.growth = growth;
        self
    }

    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn sync_on_save(mut self, sync: bool) -> Self {
        self.sync_on_save = sync;
        self
    }
}
