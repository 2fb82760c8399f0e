//! Retrieval configuration.

use std::num::NonZeroU32;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Default maximum chunk size in characters.
pub const DEFAULT_MAX_CHUNK_CHARACTERS: u32 = 1000;

/// Default number of chunks retrieved per question.
pub const DEFAULT_MAX_RESULTS: u32 = 4;

/// Configuration for chunking and retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct RagConfig {
    /// Maximum chunk size in characters for text splitting.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "RAG_MAX_CHUNK_CHARACTERS", default_value_t = DEFAULT_MAX_CHUNK_CHARACTERS)
    )]
    pub max_chunk_characters: u32,

    /// Number of characters to overlap between chunks.
    #[cfg_attr(feature = "config", arg(long, env = "RAG_CHUNK_OVERLAP_CHARACTERS"))]
    pub chunk_overlap_characters: Option<NonZeroU32>,

    /// Whether to trim whitespace from chunks.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "RAG_TRIM_WHITESPACE", default_value_t = true, action = clap::ArgAction::Set)
    )]
    pub trim_whitespace: bool,

    /// Maximum chunks to retrieve per question.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "RAG_MAX_RESULTS", default_value_t = DEFAULT_MAX_RESULTS)
    )]
    pub max_results: u32,

    /// Minimum similarity score (-1.0 to 1.0). If `None`, no filtering is applied.
    #[cfg_attr(feature = "config", arg(long, env = "RAG_MIN_SCORE"))]
    pub min_score: Option<f64>,
}

impl RagConfig {
    /// Returns the overlap in characters, zero when unset.
    pub fn overlap(&self) -> u32 {
        self.chunk_overlap_characters.map_or(0, NonZeroU32::get)
    }
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            max_chunk_characters: DEFAULT_MAX_CHUNK_CHARACTERS,
            chunk_overlap_characters: None,
            trim_whitespace: true,
            max_results: DEFAULT_MAX_RESULTS,
            min_score: None,
        }
    }
}
