#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
pub mod embedding;
mod error;
mod indexer;
mod loader;
mod qa;
pub mod search;
pub mod splitter;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use indexer::Indexer;
pub use loader::{Document, DocumentLoader};
pub use qa::{QaAnswer, RetrievalQa, RetrievalQaTool};

/// Tracing target for the main library.
pub const TRACING_TARGET: &str = "minutes_rag";
