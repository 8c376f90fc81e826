//! Document retriever tool: top-k lookup against the vector index.
//!
//! The index is optional. Without one the tool still registers, and every
//! call reports that retrieval is unavailable.

use async_trait::async_trait;
use ressa_core::error::MemoryError;
use ressa_core::memory::{SearchHit, VectorIndex};
use ressa_core::tool::Tool;
use std::sync::Arc;
use tracing::{info, warn};

pub const DEFAULT_TOP_K: usize = 3;

pub struct DocumentRetrieverTool {
    index: Option<Arc<dyn VectorIndex>>,
    top_k: usize,
}

impl DocumentRetrieverTool {
    pub fn new(index: Option<Arc<dyn VectorIndex>>, top_k: usize) -> Self {
        Self { index, top_k }
    }

    async fn retrieve(&self, index: &dyn VectorIndex, query: &str) -> Result<String, MemoryError> {
        if index.count().await? == 0 {
            return Ok("No documents in knowledge base. Please add documents first.".into());
        }

        let hits = index.search(query, self.top_k).await?;
        if hits.is_empty() {
            return Ok(format!("No relevant documents found for query: '{query}'"));
        }

        info!(query, hits = hits.len(), "Retrieved documents");
        Ok(format_hits(&hits))
    }
}

fn format_hits(hits: &[SearchHit]) -> String {
    hits.iter()
        .enumerate()
        .map(|(i, hit)| {
            format!(
                "Document {} (relevance: {:.2}):\n{}\nMetadata: {}",
                i + 1,
                1.0 - hit.distance,
                hit.document,
                hit.metadata
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[async_trait]
impl Tool for DocumentRetrieverTool {
    fn name(&self) -> &str {
        "document_retriever"
    }

    fn description(&self) -> &str {
        "Retrieves relevant documents from the knowledge base. Input should be a search query."
    }

    async fn run(&self, input: &str) -> String {
        let Some(index) = &self.index else {
            return "Error: Vector store not available. Check configuration.".into();
        };

        let query = input.trim();
        match self.retrieve(index.as_ref(), query).await {
            Ok(text) => text,
            Err(e) => {
                warn!(query, error = %e, "Document retrieval failed");
                format!("Error retrieving documents: {e}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ressa_core::memory::DocumentMetadata;

    struct FixedIndex {
        hits: Vec<SearchHit>,
        fail: bool,
    }

    #[async_trait]
    impl VectorIndex for FixedIndex {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn add_documents(
            &self,
            _texts: Vec<String>,
            _metadata: Vec<DocumentMetadata>,
        ) -> Result<(), MemoryError> {
            Ok(())
        }

        async fn search(&self, _query: &str, k: usize) -> Result<Vec<SearchHit>, MemoryError> {
            if self.fail {
                return Err(MemoryError::EmbeddingFailed("index offline".into()));
            }
            Ok(self.hits.iter().take(k).cloned().collect())
        }

        async fn count(&self) -> Result<usize, MemoryError> {
            Ok(if self.fail { 1 } else { self.hits.len() })
        }
    }

    fn hit(text: &str, distance: f32) -> SearchHit {
        SearchHit {
            document: text.into(),
            metadata: DocumentMetadata::chunk("guide.md", 0),
            distance,
        }
    }

    #[tokio::test]
    async fn unavailable_without_index() {
        let tool = DocumentRetrieverTool::new(None, DEFAULT_TOP_K);
        assert_eq!(
            tool.run("anything").await,
            "Error: Vector store not available. Check configuration."
        );
    }

    #[tokio::test]
    async fn empty_index() {
        let index = Arc::new(FixedIndex { hits: vec![], fail: false });
        let tool = DocumentRetrieverTool::new(Some(index), DEFAULT_TOP_K);
        assert_eq!(
            tool.run("q").await,
            "No documents in knowledge base. Please add documents first."
        );
    }

    #[tokio::test]
    async fn formats_hits_with_relevance() {
        let index = Arc::new(FixedIndex {
            hits: vec![hit("Ownership rules.", 0.125), hit("Borrowing.", 0.5), hit("Unused.", 0.9)],
            fail: false,
        });
        let tool = DocumentRetrieverTool::new(Some(index), 2);

        let out = tool.run("ownership").await;
        assert_eq!(
            out,
            "Document 1 (relevance: 0.88):\nOwnership rules.\nMetadata: {\"source\":\"guide.md\",\"chunk_index\":0}\n\n\
             Document 2 (relevance: 0.50):\nBorrowing.\nMetadata: {\"source\":\"guide.md\",\"chunk_index\":0}"
        );
    }

    #[tokio::test]
    async fn no_hits() {
        let index = Arc::new(FixedIndex { hits: vec![hit("x", 0.1)], fail: false });
        let tool = DocumentRetrieverTool::new(Some(index), 0);
        assert_eq!(tool.run(" lifetimes ").await, "No relevant documents found for query: 'lifetimes'");
    }

    #[tokio::test]
    async fn index_errors_are_text() {
        let index = Arc::new(FixedIndex { hits: vec![], fail: true });
        let tool = DocumentRetrieverTool::new(Some(index), 3);
        let out = tool.run("q").await;
        assert_eq!(out, "Error retrieving documents: Embedding generation failed: index offline");
    }
}
