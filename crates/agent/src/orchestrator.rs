//! The orchestration loop implementation.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use loreseek_core::domain::Domain;
use loreseek_core::error::ToolError;
use loreseek_core::event::{EventBus, SessionEvent};
use loreseek_core::provider::{Provider, ProviderRequest};
use loreseek_core::tool::{ToolRegistry, ToolRequest};
use loreseek_core::turn::{Conversation, Turn};
use tracing::{debug, info, warn};

/// What the loop says when it runs out of rounds without a plain-text answer.
const ROUND_GUARD_MESSAGE: &str =
    "I was unable to finish this research within the allowed number of reasoning rounds. \
     Please narrow the question or ask again.";

/// The orchestration loop: drives model calls and tool execution for one
/// user input at a time.
///
/// Owns no conversation state. Callers pass the [`Conversation`] in by
/// mutable reference, so a session can outlive any number of loop
/// invocations.
pub struct Orchestrator {
    /// The model backend
    provider: Arc<dyn Provider>,

    /// The model to request
    model: String,

    /// Sampling temperature
    temperature: f32,

    /// Max tokens per model response
    max_tokens: Option<u32>,

    /// The tool registry shared across sessions
    tools: Arc<ToolRegistry>,

    /// Maximum model-invocation rounds per user input
    max_rounds: u32,

    /// Per-tool-call timeout
    tool_timeout: Duration,

    /// Event bus for session events
    event_bus: Arc<EventBus>,
}

impl Orchestrator {
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        temperature: f32,
        tools: Arc<ToolRegistry>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            max_tokens: None,
            tools,
            max_rounds: 8,
            tool_timeout: Duration::from_secs(30),
            event_bus,
        }
    }

    /// Set the maximum number of model-invocation rounds per user input.
    pub fn with_max_rounds(mut self, max: u32) -> Self {
        self.max_rounds = max.max(1);
        self
    }

    /// Set the max tokens per model response.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Set the per-tool-call timeout.
    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = timeout;
        self
    }

    /// Process one user input and produce the assistant's answer.
    ///
    /// Appends the user turn, then alternates model calls and tool
    /// execution until the model answers in plain text. Tool failures are
    /// recorded as error-bearing tool results and the loop continues; only
    /// model-invocation failures abort with an error, leaving the
    /// conversation with every turn produced so far.
    pub async fn advance(
        &self,
        conversation: &mut Conversation,
        domain: Domain,
        user_input: &str,
    ) -> Result<String, loreseek_core::Error> {
        // Directive guard: index 0 is always the directive for the active
        // domain. A stale or missing directive gets replaced, never duplicated.
        match conversation.turns.first() {
            Some(Turn::Directive { .. }) => {
                if !conversation.has_directive_for(domain) {
                    conversation.turns[0] = Turn::directive(domain);
                }
            }
            _ => conversation.turns.insert(0, Turn::directive(domain)),
        }

        conversation.push(Turn::user(user_input));

        info!(
            conversation_id = %conversation.id,
            %domain,
            turns = conversation.turns.len(),
            "Advancing conversation"
        );

        let tool_definitions = self.tools.definitions();

        for round in 1..=self.max_rounds {
            debug!(conversation_id = %conversation.id, round, "Orchestration round");

            let request = ProviderRequest {
                model: self.model.clone(),
                turns: conversation.turns.clone(),
                temperature: self.temperature,
                max_tokens: self.max_tokens,
                tools: tool_definitions.clone(),
            };

            let response = self.provider.complete(request).await?;

            if let Some(usage) = &response.usage {
                self.event_bus.publish(SessionEvent::ResponseGenerated {
                    conversation_id: conversation.id.to_string(),
                    model: response.model.clone(),
                    tokens_used: usage.total_tokens,
                    timestamp: chrono::Utc::now(),
                });
            }

            if response.requests.is_empty() {
                // Plain text terminates the loop.
                let answer = response.text.clone();
                conversation.push(response.into_turn());
                return Ok(answer);
            }

            let requests = response.requests.clone();
            conversation.push(response.into_turn());

            debug!(request_count = requests.len(), "Executing tool requests");
            for turn in self.run_tool_batch(&requests).await {
                conversation.push(turn);
            }
        }

        warn!(
            conversation_id = %conversation.id,
            max_rounds = self.max_rounds,
            "Round guard reached, forcing text answer"
        );
        conversation.push(Turn::assistant(ROUND_GUARD_MESSAGE));
        Ok(ROUND_GUARD_MESSAGE.into())
    }

    /// Execute one batch of tool requests concurrently.
    ///
    /// Results come back as tool-result turns in the model's emission
    /// order, regardless of completion order. Every failure shape (unknown
    /// tool, execution error, timeout) becomes an error-bearing result.
    async fn run_tool_batch(&self, requests: &[ToolRequest]) -> Vec<Turn> {
        for request in requests {
            self.event_bus.publish(SessionEvent::ToolRequested {
                call_id: request.id.clone(),
                tool_name: request.name.clone(),
                timestamp: chrono::Utc::now(),
            });
        }

        let executions = requests.iter().map(|request| async {
            let start = std::time::Instant::now();
            let result =
                match tokio::time::timeout(self.tool_timeout, self.tools.execute(request)).await
                {
                    Ok(inner) => inner,
                    Err(_) => Err(ToolError::Timeout {
                        tool_name: request.name.clone(),
                        timeout_secs: self.tool_timeout.as_secs(),
                    }),
                };
            (result, start.elapsed().as_millis() as u64)
        });

        let results = join_all(executions).await;

        requests
            .iter()
            .zip(results)
            .map(|(request, (result, duration_ms))| {
                let (success, turn) = match result {
                    Ok(outcome) => {
                        let success = outcome.success;
                        let turn = if success {
                            Turn::tool_result(&request.id, &request.name, outcome.output)
                        } else {
                            Turn::tool_error(&request.id, &request.name, outcome.output)
                        };
                        (success, turn)
                    }
                    Err(e) => {
                        warn!(tool = %request.name, error = %e, "Tool request failed");
                        (
                            false,
                            Turn::tool_error(&request.id, &request.name, format!("Error: {e}")),
                        )
                    }
                };

                self.event_bus.publish(SessionEvent::ToolCompleted {
                    call_id: request.id.clone(),
                    tool_name: request.name.clone(),
                    success,
                    duration_ms,
                    timestamp: chrono::Utc::now(),
                });

                turn
            })
            .collect()
    }
}
