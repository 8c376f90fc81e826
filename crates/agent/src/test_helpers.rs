//! Shared test helpers for agent tests.

use async_trait::async_trait;
use ressa_core::error::ProviderError;
use ressa_core::message::Message;
use ressa_core::provider::Provider;
use ressa_core::tool::Tool;
use std::sync::Mutex;

/// A mock provider that returns a sequence of scripted responses.
///
/// Each call to `chat` returns the next response in the queue. Once the
/// script is exhausted it keeps returning `repeat` if set, otherwise a
/// network error.
pub struct SequentialMockProvider {
    responses: Mutex<Vec<Result<String, ProviderError>>>,
    repeat: Option<String>,
    call_count: Mutex<usize>,
    seen: Mutex<Vec<Vec<Message>>>,
}

impl SequentialMockProvider {
    pub fn new(responses: Vec<&str>) -> Self {
        Self::scripted(responses.into_iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn scripted(responses: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            repeat: None,
            call_count: Mutex::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// A provider that gives the same reply forever.
    pub fn always(text: &str) -> Self {
        let mut provider = Self::scripted(Vec::new());
        provider.repeat = Some(text.to_string());
        provider
    }

    /// A provider whose every call fails.
    pub fn failing(error: ProviderError) -> Self {
        Self::scripted(vec![Err(error)])
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// The message list sent on call `n` (0-based).
    pub fn request(&self, n: usize) -> Vec<Message> {
        self.seen.lock().unwrap()[n].clone()
    }
}

#[async_trait]
impl Provider for SequentialMockProvider {
    fn name(&self) -> &str {
        "sequential_mock"
    }

    async fn chat(&self, messages: &[Message], _temperature: f32) -> Result<String, ProviderError> {
        self.seen.lock().unwrap().push(messages.to_vec());

        let mut count = self.call_count.lock().unwrap();
        let responses = self.responses.lock().unwrap();
        let index = *count;
        *count += 1;

        if let Some(response) = responses.get(index) {
            return response.clone();
        }
        if let Some(text) = &self.repeat {
            return Ok(text.clone());
        }
        // A failing script keeps failing the same way.
        match responses.last() {
            Some(Err(e)) => Err(e.clone()),
            _ => Err(ProviderError::Network(format!(
                "SequentialMockProvider: no more responses (call #{index}, have {})",
                responses.len()
            ))),
        }
    }
}

/// Echoes its input back, prefixed with its name.
pub struct EchoTool(pub &'static str);

#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        self.0
    }

    fn description(&self) -> &str {
        "Echoes its input."
    }

    async fn run(&self, input: &str) -> String {
        format!("{}: {input}", self.0)
    }
}
