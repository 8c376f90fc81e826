//! Domain events published by the agent and ingestion pipeline.
//!
//! The agent publishes events when something interesting happens (a tool
//! ran, an answer was produced, the model failed). Front-ends and tests
//! subscribe instead of reaching into process-wide state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::trace;

/// All domain events in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DomainEvent {
    /// A tool was executed
    ToolExecuted {
        tool_name: String,
        success: bool,
        duration_ms: u64,
        timestamp: DateTime<Utc>,
    },

    /// A `run` finished with an answer (possibly the exhaustion fallback)
    AnswerProduced {
        iterations: usize,
        fallback: bool,
        timestamp: DateTime<Utc>,
    },

    /// The model call failed and the run was aborted
    ModelFailed {
        error_message: String,
        timestamp: DateTime<Utc>,
    },

    /// Conversation memory was cleared
    MemoryReset { timestamp: DateTime<Utc> },

    /// A document was chunked and added to the index
    DocumentsIndexed {
        source: String,
        chunks: usize,
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent {
    /// Short event name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ToolExecuted { .. } => "tool_executed",
            Self::AnswerProduced { .. } => "answer_produced",
            Self::ModelFailed { .. } => "model_failed",
            Self::MemoryReset { .. } => "memory_reset",
            Self::DocumentsIndexed { .. } => "documents_indexed",
        }
    }
}

/// Fan-out of [`DomainEvent`]s to any number of subscribers.
///
/// Slow subscribers lag rather than block the publisher; see
/// [`broadcast::error::RecvError::Lagged`].
pub struct EventBus {
    sender: broadcast::Sender<Arc<DomainEvent>>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish to current subscribers. Returns how many received it.
    pub fn publish(&self, event: DomainEvent) -> usize {
        let kind = event.kind();
        let delivered = self.sender.send(Arc::new(event)).unwrap_or(0);
        trace!(event = kind, delivered, "Published domain event");
        delivered
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<DomainEvent>> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
