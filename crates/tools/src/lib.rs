//! Built-in tool implementations for Ressa.
//!
//! Tools give the agent the ability to act: do math, search the web,
//! summarize text, and retrieve indexed documents.

pub mod calculator;
pub mod document_retriever;
pub mod summarizer;
pub mod web_search;

use std::sync::Arc;
use ressa_config::AppConfig;
use ressa_core::error::ToolError;
use ressa_core::memory::VectorIndex;
use ressa_core::provider::Provider;
use ressa_core::tool::ToolRegistry;

pub use calculator::CalculatorTool;
pub use document_retriever::DocumentRetrieverTool;
pub use summarizer::SummarizerTool;
pub use web_search::{HttpSearchClient, SearchClient, WebSearchTool};

/// Create the default tool registry.
///
/// Registration order (and so prompt order): calculator, web_search,
/// summarizer, document_retriever. `model` backs the summarizer; `index`
/// backs the retriever and may be absent.
pub fn default_registry(
    model: Option<Arc<dyn Provider>>,
    index: Option<Arc<dyn VectorIndex>>,
    config: &AppConfig,
) -> Result<ToolRegistry, ToolError> {
    let search = Arc::new(HttpSearchClient::from_config(&config.web_search));

    let mut registry = ToolRegistry::new();
    registry.register(Box::new(CalculatorTool))?;
    registry.register(Box::new(WebSearchTool::new(search, config.web_search.max_results)))?;
    registry.register(Box::new(SummarizerTool::new(model, config.summarizer.max_words)))?;
    registry.register(Box::new(DocumentRetrieverTool::new(index, config.retrieval.top_k)))?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_order() {
        let registry = default_registry(None, None, &AppConfig::default()).unwrap();
        assert_eq!(
            registry.names(),
            vec!["calculator", "web_search", "summarizer", "document_retriever"]
        );
    }

    #[tokio::test]
    async fn registry_dispatches_calculator() {
        let registry = default_registry(None, None, &AppConfig::default()).unwrap();
        let tool = registry.get("calculator").unwrap();
        assert_eq!(tool.run("6 * 7").await, "Result: 42");
    }
}
