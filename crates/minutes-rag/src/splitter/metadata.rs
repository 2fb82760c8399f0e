//! Split chunk metadata.

use serde::{Deserialize, Serialize};

/// Location of a chunk in the source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitMetadata {
    /// Chunk index within the source (0-based).
    pub chunk_index: u32,

    /// Start byte offset in the source text.
    pub start_offset: u32,

    /// End byte offset in the source text.
    pub end_offset: u32,
}

impl SplitMetadata {
    /// Creates metadata with offset information.
    pub fn new(chunk_index: u32, start_offset: u32, end_offset: u32) -> Self {
        Self {
            chunk_index,
            start_offset,
            end_offset,
        }
    }

    /// Returns the byte length of the chunk.
    pub fn byte_len(&self) -> u32 {
        self.end_offset - self.start_offset
    }
}
