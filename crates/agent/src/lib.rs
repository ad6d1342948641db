//! The orchestration loop — the heart of LoreSeek.
//!
//! Each user input drives a bounded cycle:
//!
//! 1. **Guard** the conversation (directive at index 0)
//! 2. **Send** the full ordered conversation to the model
//! 3. **If tool requests**: execute them, append results, loop back to 2
//! 4. **If text only**: append and return the answer
//!
//! The cycle ends when the model answers in plain text or the round guard
//! is hit, whichever comes first.

pub mod orchestrator;
pub mod session;

pub use orchestrator::Orchestrator;
pub use session::ResearchSession;
