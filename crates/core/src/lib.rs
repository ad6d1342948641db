//! # LoreSeek Core
//!
//! Domain types, traits, and error definitions for the LoreSeek research
//! assistant. No HTTP, no filesystem, no runtime wiring — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every subsystem is defined as a trait here. Implementations live in their
//! respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod domain;
pub mod error;
pub mod event;
pub mod provider;
pub mod tool;
pub mod turn;

// Re-export key types at crate root for ergonomics
pub use domain::Domain;
pub use error::{DomainError, Error, ProviderError, Result, ToolError};
pub use event::{EventBus, SessionEvent};
pub use provider::{Provider, ProviderRequest, ProviderResponse, ToolDefinition, Usage};
pub use tool::{Tool, ToolOutcome, ToolRegistry, ToolRequest};
pub use turn::{Conversation, Turn};
