//! Web search tool.
//!
//! The HTTP side lives behind [`SearchClient`] so the tool can be exercised
//! without network access. [`HttpSearchClient`] talks to SerpAPI when a key
//! is configured and falls back to the DuckDuckGo instant-answer API.

use async_trait::async_trait;
use ressa_config::WebSearchConfig;
use ressa_core::tool::Tool;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

const SERPAPI_URL: &str = "https://serpapi.com/search";
const DUCKDUCKGO_URL: &str = "https://api.duckduckgo.com/";

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search API returned status {0}")]
    Status(u16),
}

/// A backend that answers a query with preformatted result text.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<String, SearchError>;
}

/// SerpAPI / DuckDuckGo over `reqwest`.
pub struct HttpSearchClient {
    client: reqwest::Client,
    serpapi_key: Option<String>,
}

impl HttpSearchClient {
    pub fn new(serpapi_key: Option<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {e}");
                reqwest::Client::new()
            });
        Self { client, serpapi_key }
    }

    pub fn from_config(config: &WebSearchConfig) -> Self {
        Self::new(
            config.serpapi_key.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Which backend queries go to.
    pub fn backend(&self) -> &'static str {
        if self.serpapi_key.is_some() { "serpapi" } else { "duckduckgo" }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, SearchError> {
        let response = self.client.get(url).query(params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }
        Ok(response.json().await?)
    }

    async fn search_serpapi(&self, key: &str, query: &str, max_results: usize) -> Result<String, SearchError> {
        let params = [
            ("q", query.to_string()),
            ("api_key", key.to_string()),
            ("num", max_results.to_string()),
        ];
        let data: SerpApiResponse = self.get_json(SERPAPI_URL, &params).await?;
        Ok(format_serpapi(&data, max_results))
    }

    async fn search_duckduckgo(&self, query: &str, max_results: usize) -> Result<String, SearchError> {
        let params = [
            ("q", query.to_string()),
            ("format", "json".to_string()),
            ("no_html", "1".to_string()),
            ("skip_disambig", "1".to_string()),
        ];
        let data: DuckDuckGoResponse = self.get_json(DUCKDUCKGO_URL, &params).await?;
        Ok(format_duckduckgo(&data, query, max_results))
    }
}

#[async_trait]
impl SearchClient for HttpSearchClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<String, SearchError> {
        match &self.serpapi_key {
            Some(key) => self.search_serpapi(key, query, max_results).await,
            None => self.search_duckduckgo(query, max_results).await,
        }
    }
}

// --- Response types (internal) ---

#[derive(Debug, Default, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<SerpApiResult>,
}

#[derive(Debug, Deserialize)]
struct SerpApiResult {
    title: Option<String>,
    snippet: Option<String>,
    link: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DuckDuckGoResponse {
    #[serde(default)]
    abstract_text: String,
    #[serde(default, rename = "Abstract")]
    abstract_summary: String,
    #[serde(default)]
    related_topics: Vec<serde_json::Value>,
}

fn format_serpapi(data: &SerpApiResponse, max_results: usize) -> String {
    let results: Vec<String> = data
        .organic_results
        .iter()
        .take(max_results)
        .enumerate()
        .map(|(i, item)| {
            format!(
                "{}. {}\n   {}\n   {}",
                i + 1,
                item.title.as_deref().unwrap_or("No title"),
                item.snippet.as_deref().unwrap_or("No description"),
                item.link.as_deref().unwrap_or(""),
            )
        })
        .collect();

    if results.is_empty() {
        return "No results found.".into();
    }
    results.join("\n\n")
}

fn format_duckduckgo(data: &DuckDuckGoResponse, query: &str, max_results: usize) -> String {
    let mut results = Vec::new();

    let summary = if data.abstract_summary.is_empty() {
        &data.abstract_text
    } else {
        &data.abstract_summary
    };
    if !summary.is_empty() {
        results.push(format!("Summary: {summary}"));
    }

    // Grouped topics have no top-level "Text" and are skipped.
    for (i, topic) in data.related_topics.iter().take(max_results).enumerate() {
        let text = topic.get("Text").and_then(|t| t.as_str()).unwrap_or_default();
        if text.is_empty() {
            continue;
        }
        let url = topic.get("FirstURL").and_then(|u| u.as_str()).unwrap_or_default();
        results.push(format!("{}. {text}\n   {url}", i + 1));
    }

    if results.is_empty() {
        return format!("No detailed results found for '{query}'. Try a more specific query.");
    }
    results.join("\n\n")
}

/// Searches the web through a [`SearchClient`].
pub struct WebSearchTool {
    client: Arc<dyn SearchClient>,
    max_results: usize,
}

impl WebSearchTool {
    pub fn new(client: Arc<dyn SearchClient>, max_results: usize) -> Self {
        Self { client, max_results }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Searches the web for information. Input should be a search query string."
    }

    async fn run(&self, input: &str) -> String {
        let query = input.trim();
        match self.client.search(query, self.max_results).await {
            Ok(results) => {
                info!(query, "Web search completed");
                results
            }
            Err(e) => {
                warn!(query, error = %e, "Web search failed");
                format!("Error searching for '{query}': {e}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FakeSearch {
        reply: Result<String, u16>,
        seen: Mutex<Vec<(String, usize)>>,
    }

    impl FakeSearch {
        fn ok(reply: &str) -> Self {
            Self { reply: Ok(reply.into()), seen: Mutex::new(vec![]) }
        }
    }

    #[async_trait]
    impl SearchClient for FakeSearch {
        async fn search(&self, query: &str, max_results: usize) -> Result<String, SearchError> {
            self.seen.lock().unwrap().push((query.to_string(), max_results));
            self.reply.clone().map_err(SearchError::Status)
        }
    }

    #[tokio::test]
    async fn tool_passes_trimmed_query() {
        let fake = Arc::new(FakeSearch::ok("1. Rust\n   A language\n   https://rust-lang.org"));
        let tool = WebSearchTool::new(fake.clone(), 5);

        let out = tool.run("  rust language ").await;
        assert!(out.starts_with("1. Rust"));
        assert_eq!(fake.seen.lock().unwrap()[0], ("rust language".to_string(), 5));
    }

    #[tokio::test]
    async fn tool_renders_failures_as_text() {
        let fake = Arc::new(FakeSearch { reply: Err(503), seen: Mutex::new(vec![]) });
        let tool = WebSearchTool::new(fake, 5);

        let out = tool.run("outage").await;
        assert_eq!(out, "Error searching for 'outage': Search API returned status 503");
    }

    #[test]
    fn serpapi_formatting() {
        let data: SerpApiResponse = serde_json::from_str(
            r#"{"organic_results":[
                {"title":"Rust","snippet":"Fast and safe","link":"https://rust-lang.org"},
                {"title":"Cargo"},
                {"title":"Third"}
            ]}"#,
        )
        .unwrap();

        let out = format_serpapi(&data, 2);
        assert_eq!(
            out,
            "1. Rust\n   Fast and safe\n   https://rust-lang.org\n\n2. Cargo\n   No description\n   "
        );
    }

    #[test]
    fn serpapi_empty() {
        assert_eq!(format_serpapi(&SerpApiResponse::default(), 5), "No results found.");
    }

    #[test]
    fn duckduckgo_formatting() {
        let data: DuckDuckGoResponse = serde_json::from_str(
            r#"{"Abstract":"Rust is a language.","RelatedTopics":[
                {"Text":"Rust (language)","FirstURL":"https://duckduckgo.com/Rust"},
                {"Name":"Group","Topics":[]},
                {"Text":"Cargo","FirstURL":"https://duckduckgo.com/Cargo"}
            ]}"#,
        )
        .unwrap();

        let out = format_duckduckgo(&data, "rust", 5);
        let parts: Vec<&str> = out.split("\n\n").collect();
        assert_eq!(parts[0], "Summary: Rust is a language.");
        assert_eq!(parts[1], "1. Rust (language)\n   https://duckduckgo.com/Rust");
        assert_eq!(parts[2], "3. Cargo\n   https://duckduckgo.com/Cargo");
    }

    #[test]
    fn duckduckgo_empty() {
        let out = format_duckduckgo(&DuckDuckGoResponse::default(), "zzz", 5);
        assert_eq!(out, "No detailed results found for 'zzz'. Try a more specific query.");
    }

    #[test]
    fn backend_selection() {
        let ddg = HttpSearchClient::new(None, Duration::from_secs(1));
        assert_eq!(ddg.backend(), "duckduckgo");

        let serp = HttpSearchClient::from_config(&WebSearchConfig {
            serpapi_key: Some("k".into()),
            ..WebSearchConfig::default()
        });
        assert_eq!(serp.backend(), "serpapi");
    }
}
