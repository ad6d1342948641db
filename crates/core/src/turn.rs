//! Turn and Conversation domain types.
//!
//! A [`Conversation`] is the ordered, append-only log that every loop
//! iteration threads through: directive, user input, assistant output,
//! tool results. `Turn` is an explicit tagged enum so every consumer
//! pattern-matches exhaustively — there is no attribute probing anywhere
//! in the system.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Domain;
use crate::tool::ToolRequest;

/// One atomic entry in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Turn {
    /// Domain-scoped system instructions. Always index 0 of a conversation.
    Directive { domain: Domain, text: String },

    /// Literal text from the human.
    UserInput { text: String },

    /// Text produced by the model, carrying zero or more tool requests.
    AssistantOutput {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        requests: Vec<ToolRequest>,
    },

    /// The answer to exactly one earlier tool request.
    ToolResult {
        call_id: String,
        tool: String,
        output: String,
        #[serde(default)]
        is_error: bool,
    },
}

impl Turn {
    /// Create a directive turn for a domain, filling the specialization template.
    pub fn directive(domain: Domain) -> Self {
        Turn::Directive {
            domain,
            text: domain.directive_text(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Turn::UserInput { text: text.into() }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Turn::AssistantOutput {
            text: text.into(),
            requests: Vec::new(),
        }
    }

    pub fn assistant_with_requests(text: impl Into<String>, requests: Vec<ToolRequest>) -> Self {
        Turn::AssistantOutput {
            text: text.into(),
            requests,
        }
    }

    pub fn tool_result(
        call_id: impl Into<String>,
        tool: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Turn::ToolResult {
            call_id: call_id.into(),
            tool: tool.into(),
            output: output.into(),
            is_error: false,
        }
    }

    pub fn tool_error(
        call_id: impl Into<String>,
        tool: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Turn::ToolResult {
            call_id: call_id.into(),
            tool: tool.into(),
            output: output.into(),
            is_error: true,
        }
    }

    /// Whether this turn is a directive for the given domain.
    pub fn is_directive_for(&self, wanted: Domain) -> bool {
        matches!(self, Turn::Directive { domain, .. } if *domain == wanted)
    }
}

/// Unique identifier for a conversation (session).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub String);

impl ConversationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered sequence of turns, exclusively owned by one session.
///
/// Invariants the orchestration loop maintains:
/// - index 0 is always a `Directive`
/// - every tool request is answered by exactly one later `ToolResult` with
///   a matching call id, before the next `AssistantOutput`
/// - turns are never rewritten or deleted within one loop invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub turns: Vec<Turn>,
}

impl Conversation {
    /// Create a new empty conversation.
    pub fn new() -> Self {
        Self {
            id: ConversationId::new(),
            turns: Vec::new(),
        }
    }

    /// Create a conversation holding only the directive for `domain`.
    pub fn with_directive(domain: Domain) -> Self {
        let mut conv = Self::new();
        conv.turns.push(Turn::directive(domain));
        conv
    }

    /// Append a turn.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Hard context reset: replace everything with a fresh directive.
    pub fn reset_to_domain(&mut self, domain: Domain) {
        self.turns.clear();
        self.turns.push(Turn::directive(domain));
    }

    /// Whether the conversation opens with a directive for `domain`.
    pub fn has_directive_for(&self, domain: Domain) -> bool {
        self.turns
            .first()
            .is_some_and(|t| t.is_directive_for(domain))
    }

    /// The text of the last assistant output, if any.
    pub fn last_answer(&self) -> Option<&str> {
        self.turns.iter().rev().find_map(|t| match t {
            Turn::AssistantOutput { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_seeds_the_conversation() {
        let conv = Conversation::with_directive(Domain::Medicine);
        assert_eq!(conv.turns.len(), 1);
        assert!(conv.has_directive_for(Domain::Medicine));
        assert!(!conv.has_directive_for(Domain::Physics));
    }

    #[test]
    fn reset_discards_history() {
        let mut conv = Conversation::with_directive(Domain::GeneralResearch);
        conv.push(Turn::user("hello"));
        conv.push(Turn::assistant("hi there"));

        conv.reset_to_domain(Domain::Medicine);
        assert_eq!(conv.turns.len(), 1);
        match &conv.turns[0] {
            Turn::Directive { domain, text } => {
                assert_eq!(*domain, Domain::Medicine);
                assert!(text.contains("Medicine"));
            }
            other => panic!("expected directive, got {other:?}"),
        }
    }

    #[test]
    fn last_answer_skips_tool_results() {
        let mut conv = Conversation::with_directive(Domain::GeneralResearch);
        conv.push(Turn::user("question"));
        conv.push(Turn::assistant("final answer"));
        conv.push(Turn::tool_result("call_1", "web_search", "ignored"));
        assert_eq!(conv.last_answer(), Some("final answer"));
    }

    #[test]
    fn turn_serialization_roundtrip() {
        let turn = Turn::assistant_with_requests(
            "let me look that up",
            vec![ToolRequest {
                id: "call_1".into(),
                name: "web_search".into(),
                arguments: serde_json::json!({"query": "rust"}),
            }],
        );
        let json = serde_json::to_string(&turn).unwrap();
        let back: Turn = serde_json::from_str(&json).unwrap();
        match back {
            Turn::AssistantOutput { requests, .. } => {
                assert_eq!(requests.len(), 1);
                assert_eq!(requests[0].name, "web_search");
            }
            other => panic!("expected assistant output, got {other:?}"),
        }
    }

    #[test]
    fn tool_error_marks_the_result() {
        let turn = Turn::tool_error("call_9", "data_analysis", "Error analyzing data");
        match turn {
            Turn::ToolResult { is_error, .. } => assert!(is_error),
            other => panic!("expected tool result, got {other:?}"),
        }
    }
}
