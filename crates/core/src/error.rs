//! Error types for the Ressa domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Ressa operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Memory / index errors ---
    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("Embedding generation failed: {0}")]
    EmbeddingFailed(String),

    #[error("Failed to read document {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("Unsupported document format '{suffix}' for {path}")]
    UnsupportedFormat { path: String, suffix: String },

    #[error("Metadata count {metadata} does not match document count {documents}")]
    MetadataMismatch { documents: usize, metadata: usize },
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool already registered: {0}")]
    DuplicateName(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn duplicate_tool_error_names_the_tool() {
        let err = Error::Tool(ToolError::DuplicateName("calculator".into()));
        assert!(err.to_string().contains("calculator"));
        assert!(err.to_string().contains("already registered"));
    }

    #[test]
    fn unsupported_format_mentions_suffix() {
        let err = MemoryError::UnsupportedFormat {
            path: "paper.pdf".into(),
            suffix: "pdf".into(),
        };
        assert!(err.to_string().contains("pdf"));
        assert!(err.to_string().contains("paper.pdf"));
    }

    #[test]
    fn index_errors_convert_into_domain_error() {
        let err: Error = MemoryError::MetadataMismatch { documents: 2, metadata: 1 }.into();
        assert!(matches!(err, Error::Memory(_)));
        assert!(err.to_string().starts_with("Memory error: Metadata count 1"));
    }
}
