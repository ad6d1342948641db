//! Background search tool — summarized encyclopedia entries from Wikipedia.
//!
//! Uses the MediaWiki query API with a search generator and plain-text
//! intro extracts, so one request yields up to three summarized entries.

use async_trait::async_trait;
use loreseek_core::error::ToolError;
use loreseek_core::tool::{Tool, ToolOutcome};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

const WIKIPEDIA_URL: &str = "https://en.wikipedia.org/w/api.php";
const MAX_RESULTS: usize = 3;

pub struct BackgroundSearchTool {
    client: reqwest::Client,
}

impl BackgroundSearchTool {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(20))
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for BackgroundSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for BackgroundSearchTool {
    fn name(&self) -> &str {
        "background_search"
    }

    fn description(&self) -> &str {
        "Search an encyclopedia for comprehensive background information on a topic. Use this for factual summaries and foundational knowledge."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The topic to look up"
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

        debug!(query, "Running background search");

        let response = match self
            .client
            .get(WIKIPEDIA_URL)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("generator", "search"),
                ("gsrsearch", query),
                ("gsrlimit", "3"),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("exchars", "1200"),
            ])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                return Ok(ToolOutcome::error(format!(
                    "Background search request failed: {e}"
                )));
            }
        };

        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Ok(ToolOutcome::error(format!(
                "Background search provider returned status {status}"
            )));
        }

        let parsed: WikiResponse = match response.json().await {
            Ok(p) => p,
            Err(e) => {
                return Ok(ToolOutcome::error(format!(
                    "Background search returned an unreadable response: {e}"
                )));
            }
        };

        let entries = parsed.into_entries(MAX_RESULTS);
        if entries.is_empty() {
            return Ok(ToolOutcome::ok(format!(
                "No encyclopedia entries found for '{query}'."
            )));
        }

        let mut output = String::new();
        for (i, (title, extract)) in entries.iter().enumerate() {
            if i > 0 {
                output.push_str("\n\n");
            }
            output.push_str(&format!("{}. {title}\n{extract}", i + 1));
        }
        Ok(ToolOutcome::ok(output))
    }
}

#[derive(Debug, Deserialize)]
struct WikiResponse {
    #[serde(default)]
    query: Option<WikiQuery>,
}

#[derive(Debug, Deserialize)]
struct WikiQuery {
    #[serde(default)]
    pages: HashMap<String, WikiPage>,
}

#[derive(Debug, Deserialize)]
struct WikiPage {
    title: String,
    #[serde(default)]
    extract: Option<String>,
    /// Position in the search ranking (the pages map is unordered).
    #[serde(default)]
    index: Option<i64>,
}

impl WikiResponse {
    fn into_entries(self, limit: usize) -> Vec<(String, String)> {
        let Some(query) = self.query else {
            return Vec::new();
        };
        let mut pages: Vec<WikiPage> = query.pages.into_values().collect();
        pages.sort_by_key(|p| p.index.unwrap_or(i64::MAX));
        pages
            .into_iter()
            .filter_map(|p| {
                let extract = p.extract.filter(|e| !e.trim().is_empty())?;
                Some((p.title, extract))
            })
            .take(limit)
            .collect()
    }
}
