//! Tool trait — the abstraction over lookup capabilities.
//!
//! Tools are what let the assistant reach outside the conversation:
//! search the web, query academic indexes, pull encyclopedia background,
//! analyze user-provided data.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ToolError;
use crate::provider::ToolDefinition;

/// A request to execute a tool, as emitted by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolRequest {
    /// Unique call ID (matches the model's tool_call id)
    pub id: String,

    /// Name of the tool to execute
    pub name: String,

    /// Structured arguments as a JSON value
    pub arguments: serde_json::Value,
}

/// The output of one tool execution.
///
/// Tool failures that the tool itself can describe (bad input, provider
/// error) come back as `success: false` with explanatory text — the loop
/// turns either shape into a tool-result turn and keeps going.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutcome {
    /// Whether the tool executed successfully
    pub success: bool,

    /// The output content, always plain text
    pub output: String,
}

impl ToolOutcome {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
        }
    }

    pub fn error(output: impl Into<String>) -> Self {
        Self {
            success: false,
            output: output.into(),
        }
    }
}

/// The core Tool trait.
///
/// Each lookup capability implements this trait. Tools are registered in
/// the [`ToolRegistry`] once at startup and shared read-only across
/// sessions.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique, stable name of this tool (e.g., "web_search").
    fn name(&self) -> &str;

    /// A natural-language description of what this tool does. The model
    /// uses it to decide which tool to select — phrasing matters.
    fn description(&self) -> &str;

    /// JSON Schema describing this tool's parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments.
    ///
    /// Must be total over the declared schema: failures past the argument
    /// shape resolve to a descriptive `ToolOutcome`, never a panic.
    async fn execute(&self, arguments: serde_json::Value)
        -> std::result::Result<ToolOutcome, ToolError>;

    /// Convert this tool into a ToolDefinition for sending to the model.
    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

/// A registry of available tools.
///
/// Built once at startup, immutable afterwards. Insertion order is
/// preserved: the definitions sent to the model and the tool menu shown to
/// users list tools in the same stable order.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool. Replaces any existing tool with the same name,
    /// keeping its position.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        if let Some(slot) = self.tools.iter_mut().find(|t| t.name() == tool.name()) {
            *slot = tool;
        } else {
            self.tools.push(tool);
        }
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    /// All tool definitions, in registration order (for model binding).
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.to_definition()).collect()
    }

    /// Execute a tool request. Unknown names fail with `ToolError::NotFound`.
    pub async fn execute(&self, request: &ToolRequest) -> std::result::Result<ToolOutcome, ToolError> {
        let tool = self
            .get(&request.name)
            .ok_or_else(|| ToolError::NotFound(request.name.clone()))?;
        tool.execute(request.arguments.clone()).await
    }

    /// All registered tool names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
