//! Card instances - one physical copy of a definition.
//!
//! Instances with the same `card_id` are fungible for game rules but are
//! tracked separately because they move between pools independently.
//! The instance keeps its own `score`: effects such as `ZERO` overwrite
//! it for the rest of the session without touching the definition.

use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardId, CardType};
use crate::core::entity::EntityId;

/// A card instance in a session.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique entity ID for this instance.
    pub entity_id: EntityId,

    /// Reference to the card definition.
    pub card_id: CardId,

    /// Card family, copied from the definition for pool routing.
    pub card_type: CardType,

    /// Current attack score.
    pub score: i64,
}

impl CardInstance {
    /// Create an instance of a definition.
    #[must_use]
    pub fn new(entity_id: EntityId, definition: &CardDefinition) -> Self {
        Self {
            entity_id,
            card_id: definition.id,
            card_type: definition.card_type,
            score: definition.score.unwrap_or(0),
        }
    }

    /// Is this an AGE card?
    #[must_use]
    pub fn is_age(&self) -> bool {
        self.card_type == CardType::Age
    }
}
