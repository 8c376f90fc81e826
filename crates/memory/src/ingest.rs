//! Document ingestion: read, chunk, and index.

use crate::chunker::chunk_text;
use crate::reader::read_document;
use ressa_config::ChunkingConfig;
use ressa_core::error::MemoryError;
use ressa_core::event::{DomainEvent, EventBus};
use ressa_core::memory::{DocumentMetadata, VectorIndex};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Chunks documents and adds them to a [`VectorIndex`].
pub struct Ingestor {
    index: Arc<dyn VectorIndex>,
    chunking: ChunkingConfig,
    events: Option<Arc<EventBus>>,
}

impl Ingestor {
    pub fn new(index: Arc<dyn VectorIndex>, chunking: ChunkingConfig) -> Self {
        Self {
            index,
            chunking,
            events: None,
        }
    }

    /// Publish a `DocumentsIndexed` event per ingested document.
    pub fn with_events(mut self, events: Arc<EventBus>) -> Self {
        self.events = Some(events);
        self
    }

    /// Chunk `text` and index each chunk with `{source, chunk_index}` metadata.
    /// Returns the number of chunks indexed.
    pub async fn ingest_text(&self, text: &str, source: &str) -> Result<usize, MemoryError> {
        let chunks = chunk_text(
            text,
            self.chunking.chunk_size,
            self.chunking.overlap,
            self.chunking.max_chunks,
        );
        if chunks.is_empty() {
            return Ok(0);
        }

        let count = chunks.len();
        let metadata = (0..count).map(|i| DocumentMetadata::chunk(source, i)).collect();
        self.index.add_documents(chunks, metadata).await?;

        info!(source, chunks = count, index = self.index.name(), "Indexed document");
        if let Some(events) = &self.events {
            events.publish(DomainEvent::DocumentsIndexed {
                source: source.to_string(),
                chunks: count,
                timestamp: chrono::Utc::now(),
            });
        }
        Ok(count)
    }

    /// Read a file from disk and ingest it under its file name.
    pub async fn ingest_file(&self, path: &Path) -> Result<usize, MemoryError> {
        let (text, name) = read_document(path).await?;
        self.ingest_text(&text, &name).await
    }
}
