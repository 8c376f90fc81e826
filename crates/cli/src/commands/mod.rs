pub mod ask;
pub mod chat;
pub mod config_cmd;
pub mod ingest;
pub mod tools;

use ressa_agent::ReactAgent;
use ressa_config::AppConfig;
use ressa_core::agent::AgentConfig;
use ressa_core::event::EventBus;
use ressa_core::memory::VectorIndex;
use ressa_memory::{InMemoryIndex, Ingestor};
use std::path::PathBuf;
use std::sync::Arc;

/// Wire a provider, the default tools and (when `docs` are given) an
/// in-memory index into a ready agent.
pub(crate) async fn build_agent(
    config: &AppConfig,
    docs: &[PathBuf],
) -> Result<ReactAgent, Box<dyn std::error::Error>> {
    let provider = ressa_providers::build_from_config(config)?;
    let event_bus = Arc::new(EventBus::default());

    let index: Option<Arc<dyn VectorIndex>> = if docs.is_empty() {
        None
    } else {
        let index: Arc<dyn VectorIndex> = Arc::new(InMemoryIndex::new(provider.clone()));
        let ingestor = Ingestor::new(index.clone(), config.chunking.clone())
            .with_events(event_bus.clone());
        for path in docs {
            let chunks = ingestor.ingest_file(path).await?;
            eprintln!("  Indexed {} ({chunks} chunks)", path.display());
        }
        Some(index)
    };

    let tools = ressa_tools::default_registry(Some(provider.clone()), index, config)?;
    let agent_config = AgentConfig {
        temperature: config.temperature,
        max_iterations: config.agent.max_iterations,
        memory_capacity: config.memory.max_messages,
    };

    Ok(ReactAgent::from_config(provider, tools, &agent_config).with_event_bus(event_bus))
}
