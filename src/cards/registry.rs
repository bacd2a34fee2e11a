//! Card registry for definition lookup.
//!
//! The `CardRegistry` stores the catalog loaded for a session. Ids are
//! assigned densely in registration order, so lookup is an index.

use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardId, CardType};

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use castaway::cards::{CardDefinition, CardId, CardRegistry, CardType};
///
/// let mut registry = CardRegistry::new();
/// let id = registry.register(CardDefinition::new(CardId::new(7), "Castaway", CardType::Robinson));
///
/// let found = registry.get(id).unwrap();
/// assert_eq!(found.title, "Castaway");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardRegistry {
    cards: Vec<CardDefinition>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next registered definition will receive.
    #[must_use]
    pub fn next_id(&self) -> CardId {
        CardId::new(self.cards.len() as u32)
    }

    /// Register a definition, reassigning its id to the next dense id.
    ///
    /// Returns the assigned ID.
    pub fn register(&mut self, mut card: CardDefinition) -> CardId {
        let id = self.next_id();
        card.id = id;
        self.cards.push(card);
        id
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(id.raw() as usize)
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        (id.raw() as usize) < self.cards.len()
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter()
    }

    /// Find cards by type.
    pub fn find_by_type(&self, card_type: CardType) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter().filter(move |c| c.card_type == card_type)
    }
}
