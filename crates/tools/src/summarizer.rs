//! Summarizer tool.
//!
//! With a model provider attached, asks the model for an abstractive summary.
//! Without one, falls back to the deterministic extractive strategy in
//! [`ressa_memory::chunker::extractive_summary`].

use async_trait::async_trait;
use ressa_core::provider::Provider;
use ressa_core::tool::Tool;
use ressa_memory::chunker::extractive_summary;
use std::sync::Arc;
use tracing::{info, warn};

pub struct SummarizerTool {
    model: Option<Arc<dyn Provider>>,
    max_words: usize,
}

impl SummarizerTool {
    pub fn new(model: Option<Arc<dyn Provider>>, max_words: usize) -> Self {
        Self { model, max_words }
    }

    /// Extractive-only summarizer.
    pub fn extractive(max_words: usize) -> Self {
        Self::new(None, max_words)
    }

    fn prompt(&self, text: &str) -> String {
        format!(
            "Summarize the following text concisely in about {} words:\n\n{text}\n\nSummary:",
            self.max_words
        )
    }
}

#[async_trait]
impl Tool for SummarizerTool {
    fn name(&self) -> &str {
        "summarizer"
    }

    fn description(&self) -> &str {
        "Summarizes long text documents into concise summaries. Input should be the text to summarize."
    }

    async fn run(&self, input: &str) -> String {
        if input.trim().is_empty() {
            return "Error: No text provided to summarize.".into();
        }

        let Some(model) = &self.model else {
            return match extractive_summary(input, self.max_words) {
                Some(summary) => {
                    info!(input_chars = input.len(), summary_chars = summary.len(), "Created extractive summary");
                    summary
                }
                None => "Error: Could not extract sentences from text.".into(),
            };
        };

        let max_tokens = u32::try_from(self.max_words.saturating_mul(2)).unwrap_or(u32::MAX);
        match model.generate(&self.prompt(input), Some(max_tokens)).await {
            Ok(summary) => {
                info!(input_chars = input.len(), summary_chars = summary.len(), "Generated summary");
                summary.trim().to_string()
            }
            Err(e) => {
                warn!(error = %e, "Summarization failed");
                format!("Error summarizing text: {e}")
            }
        }
    }
}
