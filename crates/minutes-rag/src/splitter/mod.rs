//! Text splitting for chunk creation.

mod chunk;
mod metadata;

use std::sync::Arc;

use text_splitter::{Characters, ChunkConfig, TextSplitter};

pub use self::chunk::{OwnedSplitChunk, SplitChunk};
pub use self::metadata::SplitMetadata;
use crate::{Error, RagConfig, Result, TRACING_TARGET};

/// Character-bounded text splitter with byte offset tracking.
#[derive(Clone)]
pub struct Splitter {
    max_characters: u32,
    overlap: u32,
    trim: bool,
    inner: Arc<TextSplitter<Characters>>,
}

impl Splitter {
    /// Creates a new text splitter.
    ///
    /// Fails when `max_characters` is zero or the overlap is not smaller
    /// than the chunk size.
    pub fn new(max_characters: u32, overlap: u32, trim: bool) -> Result<Self> {
        if max_characters == 0 {
            return Err(Error::config("chunk size must be greater than zero"));
        }
        let chunk_config = ChunkConfig::new(max_characters as usize)
            .with_overlap(overlap as usize)
            .map_err(|_| {
                Error::config(format!(
                    "chunk overlap ({overlap}) must be less than chunk size ({max_characters})"
                ))
            })?
            .with_trim(trim);

        tracing::debug!(target: TRACING_TARGET, max_characters, overlap, trim, "created text splitter");
        Ok(Self {
            max_characters,
            overlap,
            trim,
            inner: Arc::new(TextSplitter::new(chunk_config)),
        })
    }

    /// Creates a splitter from the retrieval configuration.
    pub fn from_config(config: &RagConfig) -> Result<Self> {
        Self::new(
            config.max_chunk_characters,
            config.overlap(),
            config.trim_whitespace,
        )
    }

    /// Returns the maximum characters per chunk.
    pub fn max_characters(&self) -> u32 {
        self.max_characters
    }

    /// Splits text into chunks with byte offset tracking.
    #[tracing::instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn split<'a>(&self, text: &'a str) -> Vec<SplitChunk<'a>> {
        let chunks: Vec<_> = self
            .inner
            .chunk_indices(text)
            .enumerate()
            .map(|(chunk_index, (byte_offset, chunk_text))| {
                let end_offset = byte_offset + chunk_text.len();

                SplitChunk {
                    text: chunk_text,
                    metadata: SplitMetadata::new(
                        chunk_index as u32,
                        byte_offset as u32,
                        end_offset as u32,
                    ),
                }
            })
            .collect();

        tracing::debug!(target: TRACING_TARGET, chunk_count = chunks.len(), "split text into chunks");
        chunks
    }

    /// Splits text and returns owned chunks.
    pub fn split_owned(&self, text: &str) -> Vec<OwnedSplitChunk> {
        self.split(text)
            .into_iter()
            .map(|c| c.into_owned())
            .collect()
    }
}

impl std::fmt::Debug for Splitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Splitter")
            .field("max_characters", &self.max_characters)
            .field("overlap", &self.overlap)
            .field("trim", &self.trim)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTES: &str = "Attendees: Ana, Ben, Chloe.\n\n\
        Budget review: Ana presented the Q3 numbers. Spending is on track.\n\n\
        Action items: Ben will email the vendor. Chloe owns the launch checklist.";

    #[test]
    fn chunks_respect_size_limit() {
        let splitter = Splitter::new(40, 0, true).unwrap();
        let chunks = splitter.split(MINUTES);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 40);
        }
    }

    #[test]
    fn offsets_point_into_source() {
        let splitter = Splitter::new(40, 0, true).unwrap();
        for (index, chunk) in splitter.split(MINUTES).iter().enumerate() {
            let SplitMetadata {
                chunk_index,
                start_offset,
                end_offset,
            } = chunk.metadata;

            assert_eq!(chunk_index as usize, index);
            assert_eq!(&MINUTES[start_offset as usize..end_offset as usize], chunk.text);
        }
    }

    #[test]
    fn short_text_is_a_single_chunk() {
        let chunks = Splitter::from_config(&RagConfig::default())
            .unwrap()
            .split_owned(MINUTES);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].metadata.byte_len() as usize, MINUTES.len());
    }

    #[test]
    fn overlapping_chunks_share_text() {
        let plain = Splitter::new(30, 0, true).unwrap().split(MINUTES);
        for pair in plain.windows(2) {
            assert!(pair[1].metadata.start_offset >= pair[0].metadata.end_offset);
        }

        let overlapping = Splitter::new(30, 10, true).unwrap().split(MINUTES);
        let mut shared = 0;
        for pair in overlapping.windows(2) {
            let (prev, next) = (&pair[0].metadata, &pair[1].metadata);
            if next.start_offset < prev.end_offset {
                let text = &MINUTES[next.start_offset as usize..prev.end_offset as usize];
                assert!(pair[0].text.ends_with(text));
                assert!(pair[1].text.starts_with(text));
                shared += 1;
            }
        }
        assert!(shared > 0);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        assert!(matches!(Splitter::new(0, 0, true), Err(Error::Config(_))));
        assert!(matches!(Splitter::new(10, 10, true), Err(Error::Config(_))));
    }
}
