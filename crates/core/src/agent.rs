//! Agent configuration types.

use serde::{Deserialize, Serialize};

/// Configuration for the agent's reasoning loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Model temperature passed on every call
    #[serde(default = "default_temp")]
    pub temperature: f32,

    /// Maximum reasoning iterations per `run` (safety limit)
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Conversation memory capacity, in messages
    #[serde(default = "default_memory_capacity")]
    pub memory_capacity: usize,
}

fn default_temp() -> f32 {
    0.7
}
fn default_max_iterations() -> usize {
    10
}
fn default_memory_capacity() -> usize {
    10
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            temperature: default_temp(),
            max_iterations: default_max_iterations(),
            memory_capacity: default_memory_capacity(),
        }
    }
}
