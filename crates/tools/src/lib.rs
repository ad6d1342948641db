//! Built-in lookup tool implementations for LoreSeek.
//!
//! Four tools, each independent and side-effect-isolated:
//! web search (Tavily), research paper search (arXiv), background
//! search (Wikipedia), and tabular data analysis.

pub mod background_search;
pub mod data_analysis;
pub mod frame;
pub mod paper_search;
pub mod web_search;

use loreseek_config::SearchConfig;
use loreseek_core::tool::ToolRegistry;

/// Create the default tool registry with all four baseline tools.
///
/// Registration order is the order tools appear in model bindings and in
/// the user-facing tool menu.
pub fn default_registry(search: &SearchConfig) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(web_search::WebSearchTool::new(
        search.tavily_api_key.clone(),
    )));
    registry.register(Box::new(paper_search::PaperSearchTool::new()));
    registry.register(Box::new(background_search::BackgroundSearchTool::new()));
    registry.register(Box::new(data_analysis::DataAnalysisTool));
    registry
}
