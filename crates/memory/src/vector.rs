//! In-memory vector index.
//!
//! Embeddings come from a [`Provider`]'s `embed` endpoint; search is an exact
//! cosine scan over every stored document.

use async_trait::async_trait;
use ressa_core::error::MemoryError;
use ressa_core::memory::{DocumentMetadata, SearchHit, VectorIndex};
use ressa_core::provider::Provider;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Compute cosine similarity between two vectors.
///
/// Returns a value in [-1, 1] where 1 = identical, 0 = orthogonal, -1 = opposite.
/// Returns 0.0 if the lengths differ or either vector is empty or zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b.iter()) {
        let x = *x as f64;
        let y = *y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < 1e-10 {
        return 0.0;
    }

    (dot / denom) as f32
}

/// Cosine distance: `1 - similarity`, clamped to `[0, 2]`.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    (1.0 - cosine_similarity(a, b)).clamp(0.0, 2.0)
}

#[derive(Debug, Clone)]
struct IndexedDocument {
    id: String,
    text: String,
    metadata: DocumentMetadata,
    embedding: Vec<f32>,
}

/// Exact-search vector index held entirely in memory.
pub struct InMemoryIndex {
    embedder: Arc<dyn Provider>,
    documents: RwLock<Vec<IndexedDocument>>,
}

impl InMemoryIndex {
    pub fn new(embedder: Arc<dyn Provider>) -> Self {
        Self {
            embedder,
            documents: RwLock::new(Vec::new()),
        }
    }

    /// Ids of the stored documents, in insertion order.
    pub async fn ids(&self) -> Vec<String> {
        self.documents.read().await.iter().map(|d| d.id.clone()).collect()
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, MemoryError> {
        let embeddings = self
            .embedder
            .embed(texts)
            .await
            .map_err(|e| MemoryError::EmbeddingFailed(e.to_string()))?;

        if embeddings.len() != texts.len() {
            return Err(MemoryError::EmbeddingFailed(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                embeddings.len()
            )));
        }
        Ok(embeddings)
    }
}

#[async_trait]
impl VectorIndex for InMemoryIndex {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn add_documents(
        &self,
        texts: Vec<String>,
        metadata: Vec<DocumentMetadata>,
    ) -> Result<(), MemoryError> {
        if texts.is_empty() {
            return Ok(());
        }
        if !metadata.is_empty() && metadata.len() != texts.len() {
            return Err(MemoryError::MetadataMismatch {
                documents: texts.len(),
                metadata: metadata.len(),
            });
        }

        let embeddings = self.embed(&texts).await?;
        let mut metadata = metadata.into_iter();

        let mut documents = self.documents.write().await;
        for (text, embedding) in texts.into_iter().zip(embeddings) {
            let id = format!("doc_{}", documents.len());
            documents.push(IndexedDocument {
                id,
                text,
                metadata: metadata.next().unwrap_or_default(),
                embedding,
            });
        }

        debug!(total = documents.len(), "Indexed documents");
        Ok(())
    }

    async fn search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>, MemoryError> {
        if k == 0 || self.documents.read().await.is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = self
            .embed(&[query.to_string()])
            .await?
            .pop()
            .ok_or_else(|| MemoryError::EmbeddingFailed("empty query embedding".into()))?;

        let documents = self.documents.read().await;
        let mut hits: Vec<SearchHit> = documents
            .iter()
            .map(|doc| SearchHit {
                document: doc.text.clone(),
                metadata: doc.metadata.clone(),
                distance: cosine_distance(&doc.embedding, &query_embedding),
            })
            .collect();

        hits.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(k);
        Ok(hits)
    }

    async fn count(&self) -> Result<usize, MemoryError> {
        Ok(self.documents.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ressa_core::error::ProviderError;
    use ressa_core::message::Message;

    /// Embeds text as letter-frequency vectors over `a..=e`.
    struct LetterEmbedder;

    #[async_trait]
    impl Provider for LetterEmbedder {
        fn name(&self) -> &str {
            "letters"
        }

        async fn chat(&self, _messages: &[Message], _temperature: f32) -> Result<String, ProviderError> {
            Ok(String::new())
        }

        async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
            Ok(texts
                .iter()
                .map(|t| {
                    ('a'..='e')
                        .map(|c| t.chars().filter(|&x| x == c).count() as f32)
                        .collect()
                })
                .collect())
        }
    }

    struct NoEmbedder;

    #[async_trait]
    impl Provider for NoEmbedder {
        fn name(&self) -> &str {
            "none"
        }

        async fn chat(&self, _messages: &[Message], _temperature: f32) -> Result<String, ProviderError> {
            Ok(String::new())
        }
    }

    #[test]
    fn identical_vectors() {
        let v = vec![1.0, 2.0, 3.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
        assert!(cosine_distance(&v, &v).abs() < 1e-6);
    }

    #[test]
    fn orthogonal_and_opposite_vectors() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert!((cosine_distance(&[1.0, 0.0], &[-1.0, 0.0]) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_vectors() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
    }

    #[tokio::test]
    async fn add_and_search_orders_by_distance() {
        let index = InMemoryIndex::new(Arc::new(LetterEmbedder));
        index
            .add_documents(
                vec!["aaaa".into(), "bbbb".into(), "aabb".into()],
                vec![
                    DocumentMetadata::chunk("a.txt", 0),
                    DocumentMetadata::chunk("b.txt", 0),
                    DocumentMetadata::chunk("ab.txt", 0),
                ],
            )
            .await
            .unwrap();

        assert_eq!(index.count().await.unwrap(), 3);
        assert_eq!(index.ids().await, vec!["doc_0", "doc_1", "doc_2"]);

        let hits = index.search("a", 2).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].document, "aaaa");
        assert_eq!(hits[1].document, "aabb");
        assert!(hits[0].distance <= hits[1].distance);
        assert!(hits.iter().all(|h| h.distance >= 0.0));
        assert_eq!(hits[0].metadata.source.as_deref(), Some("a.txt"));
    }

    #[tokio::test]
    async fn empty_metadata_defaults() {
        let index = InMemoryIndex::new(Arc::new(LetterEmbedder));
        index.add_documents(vec!["abc".into()], vec![]).await.unwrap();
        let hits = index.search("abc", 5).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].metadata, DocumentMetadata::default());
    }

    #[tokio::test]
    async fn metadata_length_mismatch_rejected() {
        let index = InMemoryIndex::new(Arc::new(LetterEmbedder));
        let err = index
            .add_documents(vec!["a".into(), "b".into()], vec![DocumentMetadata::default()])
            .await
            .unwrap_err();
        assert!(matches!(err, MemoryError::MetadataMismatch { documents: 2, metadata: 1 }));
        assert_eq!(index.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn search_on_empty_index() {
        let index = InMemoryIndex::new(Arc::new(LetterEmbedder));
        assert!(index.search("anything", 3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn embedding_failure_surfaces() {
        let index = InMemoryIndex::new(Arc::new(NoEmbedder));
        let err = index.add_documents(vec!["x".into()], vec![]).await.unwrap_err();
        assert!(matches!(err, MemoryError::EmbeddingFailed(_)));
    }
}
