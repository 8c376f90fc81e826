//! The `Provider` trait: the abstraction over language-model backends.
//!
//! A Provider knows how to send an ordered list of messages to a model and
//! get the reply text back. The agent loop never knows which backend it is
//! talking to.
//!
//! Implementations: OpenAI-compatible HTTP (OpenAI, Ollama), scripted mocks.

use async_trait::async_trait;
use crate::error::ProviderError;
use crate::message::Message;

/// The core Provider trait.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "openai", "ollama").
    fn name(&self) -> &str;

    /// Send a conversation and get the assistant's reply text.
    async fn chat(
        &self,
        messages: &[Message],
        temperature: f32,
    ) -> std::result::Result<String, ProviderError>;

    /// Single-prompt completion.
    ///
    /// Default implementation wraps the prompt as one user message and
    /// calls `chat()`; `max_tokens` is advisory for providers that can't
    /// cap a single request.
    async fn generate(
        &self,
        prompt: &str,
        _max_tokens: Option<u32>,
    ) -> std::result::Result<String, ProviderError> {
        self.chat(&[Message::user(prompt)], 0.7).await
    }

    /// Generate embeddings for the given texts, one vector per input.
    ///
    /// Default implementation returns an error indicating embeddings aren't supported.
    async fn embed(&self, _texts: &[String]) -> std::result::Result<Vec<Vec<f32>>, ProviderError> {
        Err(ProviderError::NotConfigured(format!(
            "Provider '{}' does not support embeddings",
            self.name()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct EchoProvider {
        seen: Mutex<Vec<Message>>,
    }

    #[async_trait]
    impl Provider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        async fn chat(
            &self,
            messages: &[Message],
            _temperature: f32,
        ) -> Result<String, ProviderError> {
            self.seen.lock().unwrap().extend_from_slice(messages);
            Ok(messages.last().map(|m| m.content().to_string()).unwrap_or_default())
        }
    }

    #[tokio::test]
    async fn generate_defaults_to_single_user_message() {
        let provider = EchoProvider { seen: Mutex::new(vec![]) };
        let out = provider.generate("summarize this", Some(64)).await.unwrap();
        assert_eq!(out, "summarize this");

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], Message::user("summarize this"));
    }

    #[tokio::test]
    async fn embed_unsupported_by_default() {
        let provider = EchoProvider { seen: Mutex::new(vec![]) };
        let err = provider.embed(&["x".to_string()]).await.unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
        assert!(err.to_string().contains("echo"));
    }
}
