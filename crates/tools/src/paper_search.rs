//! Research paper search tool — literature lookup via the arXiv export API.
//!
//! The export endpoint returns an Atom feed; the handful of fields we need
//! (title, authors, date, summary, link) are pulled out with a small tag
//! scanner rather than a full XML parse.

use async_trait::async_trait;
use loreseek_core::error::ToolError;
use loreseek_core::tool::{Tool, ToolOutcome};
use tracing::debug;

const ARXIV_URL: &str = "https://export.arxiv.org/api/query";
const MAX_RESULTS: usize = 3;

pub struct PaperSearchTool {
    client: reqwest::Client,
}

impl PaperSearchTool {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(20))
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for PaperSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for PaperSearchTool {
    fn name(&self) -> &str {
        "paper_search"
    }

    fn description(&self) -> &str {
        "Search for academic research papers on a topic. Use this for scientific information and academic knowledge."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The literature search query"
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

        debug!(query, "Running paper search");

        let response = match self
            .client
            .get(ARXIV_URL)
            .query(&[
                ("search_query", format!("all:{query}")),
                ("start", "0".into()),
                ("max_results", MAX_RESULTS.to_string()),
            ])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                return Ok(ToolOutcome::error(format!(
                    "Paper search request failed: {e}"
                )));
            }
        };

        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Ok(ToolOutcome::error(format!(
                "Paper search provider returned status {status}"
            )));
        }

        let feed = match response.text().await {
            Ok(t) => t,
            Err(e) => {
                return Ok(ToolOutcome::error(format!(
                    "Paper search returned an unreadable response: {e}"
                )));
            }
        };

        let entries = parse_atom_entries(&feed, MAX_RESULTS);
        if entries.is_empty() {
            return Ok(ToolOutcome::ok(format!(
                "No papers found for '{query}'."
            )));
        }

        let mut output = String::new();
        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                output.push_str("\n\n");
            }
            output.push_str(&entry.render(i + 1));
        }
        Ok(ToolOutcome::ok(output))
    }
}

/// One paper pulled out of the Atom feed.
#[derive(Debug, PartialEq)]
pub(crate) struct PaperEntry {
    pub title: String,
    pub authors: Vec<String>,
    pub published: String,
    pub summary: String,
    pub link: String,
}

impl PaperEntry {
    fn render(&self, index: usize) -> String {
        format!(
            "{index}. {title}\n   Authors: {authors}\n   Published: {published}\n   Link: {link}\n   Summary: {summary}",
            title = self.title,
            authors = self.authors.join(", "),
            published = self.published,
            link = self.link,
            summary = self.summary,
        )
    }
}

/// Extract up to `limit` `<entry>` blocks from an arXiv Atom feed.
pub(crate) fn parse_atom_entries(feed: &str, limit: usize) -> Vec<PaperEntry> {
    let mut entries = Vec::new();
    let mut rest = feed;

    while entries.len() < limit {
        let Some(block) = next_block(rest, "entry") else {
            break;
        };
        let (body, after) = block;

        let authors = all_tags(body, "name");
        entries.push(PaperEntry {
            title: first_tag(body, "title").unwrap_or_default(),
            authors,
            published: first_tag(body, "published")
                .map(|p| p.chars().take(10).collect())
                .unwrap_or_default(),
            summary: first_tag(body, "summary").unwrap_or_default(),
            link: first_tag(body, "id").unwrap_or_default(),
        });
        rest = after;
    }

    entries
}

/// Find the next `<tag>...</tag>` block; returns (inner text, remainder).
fn next_block<'a>(input: &'a str, tag: &str) -> Option<(&'a str, &'a str)> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = input.find(&open)? + open.len();
    let end = start + input[start..].find(&close)?;
    Some((&input[start..end], &input[end + close.len()..]))
}

/// First occurrence of a tag's inner text, whitespace-normalized.
fn first_tag(input: &str, tag: &str) -> Option<String> {
    next_block(input, tag).map(|(body, _)| normalize(body))
}

/// All occurrences of a tag's inner text.
fn all_tags(input: &str, tag: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = input;
    while let Some((body, after)) = next_block(rest, tag) {
        out.push(normalize(body));
        rest = after;
    }
    out
}

/// Collapse runs of whitespace and decode the entities arXiv emits.
fn normalize(s: &str) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title type="html">ArXiv Query: search_query=all:attention</title>
  <entry>
    <id>http://arxiv.org/abs/1706.03762v7</id>
    <published>2017-06-12T17:57:34Z</published>
    <title>Attention Is All You Need</title>
    <summary>  The dominant sequence transduction models are based on complex
  recurrent or convolutional neural networks.  </summary>
    <author><name>Ashish Vaswani</name></author>
    <author><name>Noam Shazeer</name></author>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2005.14165v4</id>
    <published>2020-05-28T17:29:03Z</published>
    <title>Language Models are Few-Shot Learners</title>
    <summary>Scaling up language models greatly improves performance.</summary>
    <author><name>Tom B. Brown</name></author>
  </entry>
</feed>"#;

    #[test]
    fn parses_entries_from_feed() {
        let entries = parse_atom_entries(SAMPLE_FEED, 3);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Attention Is All You Need");
        assert_eq!(
            entries[0].authors,
            vec!["Ashish Vaswani".to_string(), "Noam Shazeer".to_string()]
        );
        assert_eq!(entries[0].published, "2017-06-12");
        assert_eq!(entries[0].link, "http://arxiv.org/abs/1706.03762v7");
    }

    #[test]
    fn summary_whitespace_is_collapsed() {
        let entries = parse_atom_entries(SAMPLE_FEED, 1);
        assert!(entries[0]
            .summary
            .starts_with("The dominant sequence transduction models"));
        assert!(!entries[0].summary.contains('\n'));
    }

    #[test]
    fn respects_the_limit() {
        let entries = parse_atom_entries(SAMPLE_FEED, 1);
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn empty_feed_yields_no_entries() {
        let entries = parse_atom_entries("<feed></feed>", 3);
        assert!(entries.is_empty());
    }

    #[test]
    fn entities_are_decoded() {
        let feed = "<entry><title>P &amp; NP</title></entry>";
        let entries = parse_atom_entries(feed, 1);
        assert_eq!(entries[0].title, "P & NP");
    }

    #[test]
    fn render_includes_all_fields() {
        let entry = PaperEntry {
            title: "A Paper".into(),
            authors: vec!["Ada".into()],
            published: "2024-01-01".into(),
            summary: "About things.".into(),
            link: "http://arxiv.org/abs/0000.0001".into(),
        };
        let rendered = entry.render(1);
        assert!(rendered.contains("A Paper"));
        assert!(rendered.contains("Ada"));
        assert!(rendered.contains("2024-01-01"));
    }

    #[tokio::test]
    async fn missing_query_returns_error() {
        let tool = PaperSearchTool::new();
        let result = tool.execute(serde_json::json!({})).await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }

    #[test]
    fn tool_definition() {
        let tool = PaperSearchTool::new();
        let def = tool.to_definition();
        assert_eq!(def.name, "paper_search");
    }
}
