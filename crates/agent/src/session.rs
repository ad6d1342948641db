//! Session state: the active domain, debug flag, and the conversation.
//!
//! A session owns exactly one conversation. Switching domain is a hard
//! context reset — prior turns are discarded so no cross-domain framing
//! leaks into the new specialization.

use loreseek_core::domain::Domain;
use loreseek_core::error::DomainError;
use loreseek_core::turn::Conversation;
use tracing::info;

pub struct ResearchSession {
    conversation: Conversation,
    domain: Domain,
    debug: bool,
}

impl ResearchSession {
    /// Start a session in the given domain with a directive-only conversation.
    pub fn new(domain: Domain, debug: bool) -> Self {
        Self {
            conversation: Conversation::with_directive(domain),
            domain,
            debug,
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn set_debug(&mut self, enabled: bool) {
        self.debug = enabled;
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn conversation_mut(&mut self) -> &mut Conversation {
        &mut self.conversation
    }

    /// Switch to the domain named by `name`.
    ///
    /// An unknown name fails with [`DomainError::Unknown`] and leaves the
    /// session untouched. A known name resets the conversation to a fresh
    /// directive, even when it names the current domain.
    pub fn switch_domain(&mut self, name: &str) -> Result<Domain, DomainError> {
        let domain = Domain::parse(name)?;
        info!(from = %self.domain, to = %domain, "Switching research domain");
        self.domain = domain;
        self.conversation.reset_to_domain(domain);
        Ok(domain)
    }
}
