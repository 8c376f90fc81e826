//! Vector index trait: the retrieval collaborator behind the document
//! retriever tool.
//!
//! Documents go in as plain text plus metadata; queries come back as hits
//! ordered by ascending distance (smaller = more similar).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::error::MemoryError;

/// Metadata attached to an indexed document chunk.
///
/// Chunked documents carry `source` and `chunk_index`; anything else goes
/// into `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_index: Option<usize>,

    #[serde(default, flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl DocumentMetadata {
    /// Metadata for chunk `index` of `source`.
    pub fn chunk(source: impl Into<String>, index: usize) -> Self {
        Self {
            source: Some(source.into()),
            chunk_index: Some(index),
            extra: BTreeMap::new(),
        }
    }
}

impl std::fmt::Display for DocumentMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
        f.write_str(&json)
    }
}

/// A single search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub document: String,
    pub metadata: DocumentMetadata,
    /// Non-negative; smaller means more similar.
    pub distance: f32,
}

/// The core VectorIndex trait.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// The backend name (e.g., "in_memory").
    fn name(&self) -> &str;

    /// Add documents. `metadata` is either empty or one entry per document.
    async fn add_documents(
        &self,
        texts: Vec<String>,
        metadata: Vec<DocumentMetadata>,
    ) -> std::result::Result<(), MemoryError>;

    /// Return up to `k` hits ordered by ascending distance.
    async fn search(&self, query: &str, k: usize) -> std::result::Result<Vec<SearchHit>, MemoryError>;

    /// Number of indexed documents.
    async fn count(&self) -> std::result::Result<usize, MemoryError>;
}
