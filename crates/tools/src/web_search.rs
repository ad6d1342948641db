//! Web search tool — ranked results from the Tavily search API.
//!
//! Free-text query in, up to three ranked results out, serialized as
//! structured text for the model to read. Provider failures come back as
//! descriptive error outcomes; they never escape the tool boundary.

use async_trait::async_trait;
use loreseek_core::error::ToolError;
use loreseek_core::tool::{Tool, ToolOutcome};
use serde::{Deserialize, Serialize};
use tracing::debug;

const TAVILY_URL: &str = "https://api.tavily.com/search";
const MAX_RESULTS: usize = 3;

pub struct WebSearchTool {
    api_key: Option<String>,
    client: reqwest::Client,
}

impl WebSearchTool {
    pub fn new(api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(20))
            .build()
            .unwrap_or_default();
        Self { api_key, client }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web for general information and current events. Use this for queries about recent developments or general topics."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<ToolOutcome, ToolError> {
        let query = arguments["query"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'query' argument".into()))?;

        let Some(api_key) = &self.api_key else {
            return Ok(ToolOutcome::error(
                "Web search is not configured: set TAVILY_API_KEY or search.tavily_api_key in the config file.",
            ));
        };

        debug!(query, "Running web search");

        let body = serde_json::json!({
            "api_key": api_key,
            "query": query,
            "max_results": MAX_RESULTS,
        });

        let response = match self.client.post(TAVILY_URL).json(&body).send().await {
            Ok(r) => r,
            Err(e) => {
                return Ok(ToolOutcome::error(format!(
                    "Web search request failed: {e}"
                )));
            }
        };

        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Ok(ToolOutcome::error(format!(
                "Web search provider returned status {status}"
            )));
        }

        let parsed: TavilyResponse = match response.json().await {
            Ok(p) => p,
            Err(e) => {
                return Ok(ToolOutcome::error(format!(
                    "Web search returned an unreadable response: {e}"
                )));
            }
        };

        let results: Vec<SearchResult> = parsed
            .results
            .into_iter()
            .take(MAX_RESULTS)
            .map(|r| SearchResult {
                title: r.title,
                url: r.url,
                snippet: r.content,
            })
            .collect();

        if results.is_empty() {
            return Ok(ToolOutcome::ok(format!("No web results for '{query}'.")));
        }

        let output = serde_json::to_string_pretty(&results).unwrap_or_default();
        Ok(ToolOutcome::ok(output))
    }
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Serialize)]
struct SearchResult {
    title: String,
    url: String,
    snippet: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_query_returns_error() {
        let tool = WebSearchTool::new(Some("tvly-test".into()));
        let result = tool.execute(serde_json::json!({})).await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }

    #[tokio::test]
    async fn missing_api_key_is_a_described_failure() {
        let tool = WebSearchTool::new(None);
        let outcome = tool
            .execute(serde_json::json!({"query": "rust"}))
            .await
            .unwrap();
        assert!(!outcome.success);
        assert!(outcome.output.contains("TAVILY_API_KEY"));
    }

    #[test]
    fn tavily_response_parsing() {
        let data = r#"{
            "results": [
                {"title": "Rust", "url": "https://rust-lang.org", "content": "A language"},
                {"title": "Crates", "url": "https://crates.io", "content": "Registry"}
            ]
        }"#;
        let parsed: TavilyResponse = serde_json::from_str(data).unwrap();
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].title, "Rust");
    }

    #[test]
    fn tool_definition() {
        let tool = WebSearchTool::new(None);
        let def = tool.to_definition();
        assert_eq!(def.name, "web_search");
        assert!(!def.description.is_empty());
    }
}
