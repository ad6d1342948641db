//! Research domains — the closed set of assistant specializations.
//!
//! Selecting a domain produces a fresh directive turn and hard-resets the
//! conversation. Parsing is case-insensitive exact match; anything else is
//! [`DomainError::Unknown`] and leaves state untouched.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A specialization label shaping the directive text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    GeneralResearch,
    ComputerScience,
    Medicine,
    Finance,
    ClimateScience,
    ArtificialIntelligence,
    History,
    Psychology,
    Physics,
    Biology,
}

impl Domain {
    /// All recognized domains, in presentation order.
    pub const ALL: [Domain; 10] = [
        Domain::GeneralResearch,
        Domain::ComputerScience,
        Domain::Medicine,
        Domain::Finance,
        Domain::ClimateScience,
        Domain::ArtificialIntelligence,
        Domain::History,
        Domain::Psychology,
        Domain::Physics,
        Domain::Biology,
    ];

    /// The display name, as shown to users and spliced into the directive.
    pub fn name(&self) -> &'static str {
        match self {
            Domain::GeneralResearch => "General Research",
            Domain::ComputerScience => "Computer Science",
            Domain::Medicine => "Medicine",
            Domain::Finance => "Finance",
            Domain::ClimateScience => "Climate Science",
            Domain::ArtificialIntelligence => "Artificial Intelligence",
            Domain::History => "History",
            Domain::Psychology => "Psychology",
            Domain::Physics => "Physics",
            Domain::Biology => "Biology",
        }
    }

    /// Parse a user-supplied name. Case-insensitive exact match only.
    pub fn parse(name: &str) -> Result<Domain, DomainError> {
        let wanted = name.trim().to_lowercase();
        Domain::ALL
            .into_iter()
            .find(|d| d.name().to_lowercase() == wanted)
            .ok_or_else(|| DomainError::Unknown(name.trim().to_string()))
    }

    /// The directive (system instruction) text for this domain: role
    /// description, tool menu, and usage guidance.
    pub fn directive_text(&self) -> String {
        let domain = self.name();
        format!(
            "You are an AI research assistant specialized in {domain}.\n\
             Your goal is to help users find accurate information about {domain} topics.\n\
             \n\
             You have access to the following tools:\n\
             1. Web Search - For general queries and recent information\n\
             2. Research Paper Search - For academic and scientific information\n\
             3. Background Search - For comprehensive background information and factual summaries\n\
             4. Data Analysis - For analyzing data provided by the user\n\
             \n\
             Choose the most appropriate tool(s) based on the user's question:\n\
             - Use Web Search for current events, recent developments, or general information\n\
             - Use Research Paper Search for academic knowledge, scientific findings, or technical details\n\
             - Use Background Search for conceptual explanations, definitions, historical context, or general facts\n\
             - Use Data Analysis when the user provides data to be analyzed\n\
             \n\
             Always try to provide the most accurate and helpful information.\n\
             When responding, cite your sources appropriately."
        )
    }
}

impl Default for Domain {
    fn default() -> Self {
        Domain::GeneralResearch
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Domain {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Domain::parse(s)
    }
}
