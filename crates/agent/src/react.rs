//! ReAct agent: Thought → Action → Observation loop.
//!
//! Each iteration sends the working message list to the model and parses the
//! reply. A final answer ends the loop; an action dispatches one tool and
//! feeds its observation back as a user turn; anything else is taken as the
//! answer verbatim. Only the query and the final answer are written to
//! conversation memory. Intermediate turns live in the per-run message list.
//!
//! The loop is bounded by `max_iterations`. Running out of iterations is not
//! an error: the agent answers with a summary of the tool results it did get.

use ressa_core::agent::AgentConfig;
use ressa_core::event::{DomainEvent, EventBus};
use ressa_core::message::Message;
use ressa_core::provider::Provider;
use ressa_core::tool::{ToolDescriptor, ToolRegistry};
use ressa_memory::ConversationMemory;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::parser::{ParsedResponse, parse_response};
use crate::prompt::{
    CHAT_PREAMBLE, IntermediateStep, fallback_answer, observation_message, system_prompt,
    unknown_tool_observation,
};

/// A reasoning agent bound to one conversation.
pub struct ReactAgent {
    provider: Arc<dyn Provider>,
    tools: ToolRegistry,
    memory: ConversationMemory,
    temperature: f32,
    max_iterations: usize,
    event_bus: Arc<EventBus>,
}

/// The result of a ReAct execution.
#[derive(Debug, Clone)]
pub struct ReactOutcome {
    /// The final answer text.
    pub answer: String,
    /// Every tool dispatch, in order.
    pub steps: Vec<IntermediateStep>,
    /// Model calls made.
    pub iterations: usize,
    /// True when the budget ran out and `answer` is the fallback summary.
    pub exhausted: bool,
}

impl ReactAgent {
    /// Create an agent with default settings (10 iterations, 10-message memory).
    pub fn new(provider: Arc<dyn Provider>, tools: ToolRegistry) -> Self {
        Self::from_config(provider, tools, &AgentConfig::default())
    }

    pub fn from_config(provider: Arc<dyn Provider>, tools: ToolRegistry, config: &AgentConfig) -> Self {
        info!(
            provider = provider.name(),
            tools = tools.len(),
            max_iterations = config.max_iterations,
            "Initialized ReactAgent"
        );
        Self {
            provider,
            tools,
            memory: ConversationMemory::new(config.memory_capacity),
            temperature: config.temperature,
            max_iterations: config.max_iterations.max(1),
            event_bus: Arc::new(EventBus::default()),
        }
    }

    /// Set max iterations (minimum 1).
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max.max(1);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Replace the conversation memory.
    pub fn with_memory(mut self, memory: ConversationMemory) -> Self {
        self.memory = memory;
        self
    }

    /// Publish agent events on a shared bus.
    pub fn with_event_bus(mut self, event_bus: Arc<EventBus>) -> Self {
        self.event_bus = event_bus;
        self
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Name and description of every tool, in registration order.
    pub fn tool_info(&self) -> Vec<ToolDescriptor> {
        self.tools.descriptors()
    }

    /// Run the reasoning loop and return the answer.
    ///
    /// Never fails: a model error comes back as an apology string.
    pub async fn run(&mut self, query: &str, use_memory: bool) -> String {
        match self.try_run(query, use_memory).await {
            Ok(outcome) => outcome.answer,
            Err(e) => format!("I encountered an error: {e}"),
        }
    }

    /// Run the reasoning loop, propagating model failures.
    pub async fn try_run(&mut self, query: &str, use_memory: bool) -> ressa_core::Result<ReactOutcome> {
        info!(max_iterations = self.max_iterations, use_memory, "ReAct loop starting");

        let mut messages = vec![Message::system(system_prompt(&self.tools.descriptors()))];
        if use_memory {
            self.memory.add_user_message(query);
            let history = self.memory.messages();
            let prior = history.len().saturating_sub(1);
            messages.extend(history.into_iter().take(prior));
        }
        messages.push(Message::user(query));

        let mut steps: Vec<IntermediateStep> = Vec::new();

        for iteration in 1..=self.max_iterations {
            debug!(iteration, max = self.max_iterations, "ReAct iteration");

            let response = match self.provider.chat(&messages, self.temperature).await {
                Ok(response) => response,
                Err(e) => {
                    error!(iteration, error = %e, "Model call failed");
                    self.event_bus.publish(DomainEvent::ModelFailed {
                        error_message: e.to_string(),
                        timestamp: chrono::Utc::now(),
                    });
                    return Err(e.into());
                }
            };
            debug!(iteration, response = %preview(&response, 200), "Model responded");

            match parse_response(&response) {
                ParsedResponse::FinalAnswer(answer) => {
                    return Ok(self.finish(answer, steps, iteration, use_memory, false));
                }
                ParsedResponse::Action { tool_name, tool_input } => {
                    let observation = self.dispatch(&tool_name, &tool_input).await;
                    messages.push(Message::assistant(response));
                    messages.push(Message::user(observation_message(&observation)));
                    steps.push(IntermediateStep {
                        action: tool_name,
                        input: tool_input,
                        observation,
                    });
                }
                ParsedResponse::None => {
                    debug!(iteration, "No action parsed, treating response as final answer");
                    return Ok(self.finish(response, steps, iteration, use_memory, false));
                }
            }
        }

        warn!(max_iterations = self.max_iterations, steps = steps.len(), "ReAct: max iterations reached");
        let answer = fallback_answer(&steps);
        Ok(self.finish(answer, steps, self.max_iterations, use_memory, true))
    }

    /// Single-turn chat without tools: preamble plus the whole memory.
    pub async fn chat(&mut self, message: &str) -> String {
        self.memory.add_user_message(message);

        let mut messages = vec![Message::system(CHAT_PREAMBLE)];
        messages.extend(self.memory.messages());

        match self.provider.chat(&messages, self.temperature).await {
            Ok(reply) => {
                self.memory.add_assistant_message(reply.clone());
                reply
            }
            Err(e) => {
                error!(error = %e, "Chat model call failed");
                self.event_bus.publish(DomainEvent::ModelFailed {
                    error_message: e.to_string(),
                    timestamp: chrono::Utc::now(),
                });
                format!("I encountered an error: {}", ressa_core::Error::from(e))
            }
        }
    }

    /// Clear conversation memory.
    pub fn reset_memory(&mut self) {
        self.memory.clear();
        self.event_bus.publish(DomainEvent::MemoryReset {
            timestamp: chrono::Utc::now(),
        });
        info!("Agent memory reset");
    }

    async fn dispatch(&self, tool_name: &str, tool_input: &str) -> String {
        let Some(tool) = self.tools.get(tool_name) else {
            warn!(tool = %tool_name, "Model requested an unknown tool");
            return unknown_tool_observation(tool_name, &self.tools.names());
        };

        info!(tool = %tool_name, input = %preview(tool_input, 50), "Executing tool");
        let start = Instant::now();
        let observation = tool.run(tool_input).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let success = !observation.starts_with("Error");
        if !success {
            warn!(tool = %tool_name, observation = %preview(&observation, 200), "Tool returned an error");
        }

        self.event_bus.publish(DomainEvent::ToolExecuted {
            tool_name: tool_name.to_string(),
            success,
            duration_ms,
            timestamp: chrono::Utc::now(),
        });

        observation
    }

    fn finish(
        &mut self,
        answer: String,
        steps: Vec<IntermediateStep>,
        iterations: usize,
        use_memory: bool,
        exhausted: bool,
    ) -> ReactOutcome {
        if use_memory {
            self.memory.add_assistant_message(answer.clone());
        }

        self.event_bus.publish(DomainEvent::AnswerProduced {
            iterations,
            fallback: exhausted,
            timestamp: chrono::Utc::now(),
        });
        info!(iterations, tool_calls = steps.len(), exhausted, "ReAct loop completed");

        ReactOutcome {
            answer,
            steps,
            iterations,
            exhausted,
        }
    }
}

/// First `max` characters of `text`, for logging.
fn preview(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((i, _)) => format!("{}...", &text[..i]),
        None => text.to_string(),
    }
}
