//! Action records and their codices.
//!
//! Cards reference an action from the store; the action's `codex` names
//! what the ability does and `value` parameterizes it. Codices arrive as
//! free-form strings, so unknown ones are kept verbatim as `Codex::Other`
//! and resolve to nothing.

use serde::{Deserialize, Serialize};

/// What an action does.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Codex {
    /// Adjust health by `value`.
    Hp,
    /// Adjust draw points by `value`.
    Card,
    /// Drop draw points to zero.
    Stop,
    /// Zero the highest score(s) in hand.
    Zero,
    /// Unrecognized codex, kept for round-tripping.
    Other(String),
}

impl Codex {
    /// Wire tag for this codex.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Hp => "HP",
            Self::Card => "CARD",
            Self::Stop => "STOP",
            Self::Zero => "ZERO",
            Self::Other(tag) => tag.as_str(),
        }
    }
}

impl From<String> for Codex {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "HP" => Self::Hp,
            "CARD" => Self::Card,
            "STOP" => Self::Stop,
            "ZERO" => Self::Zero,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for Codex {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<Codex> for String {
    fn from(codex: Codex) -> Self {
        match codex {
            Codex::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Codex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action as stored alongside a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionData {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,

    pub title: String,

    pub codex: Codex,

    #[serde(default)]
    pub value: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ActionData {
    /// Create an action with the given codex and value.
    #[must_use]
    pub fn new(title: impl Into<String>, codex: impl Into<Codex>, value: i64) -> Self {
        Self {
            record_id: None,
            title: title.into(),
            codex: codex.into(),
            value,
            description: None,
        }
    }
}
