//! Memory for Ressa: the bounded conversation window, text chunking, and a
//! document index for retrieval.

pub mod chunker;
pub mod conversation;
pub mod ingest;
pub mod reader;
pub mod vector;

pub use chunker::{chunk_display, chunk_text, extractive_summary};
pub use conversation::ConversationMemory;
pub use ingest::Ingestor;
pub use reader::read_document;
pub use vector::{InMemoryIndex, cosine_similarity};
