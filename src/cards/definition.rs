//! Card definitions - static catalog data.
//!
//! `CardDefinition` holds the immutable properties of a catalog entry:
//! its type, how many copies exist, danger values, score, and the action
//! its ability triggers. Definitions are fetched once per session.
//!
//! Instance-specific data (current score, location) is stored separately
//! in `CardInstance` and the pool manager.

use serde::{Deserialize, Serialize};

use crate::effects::ActionData;

/// Identifier for a card definition within a session's registry.
///
/// Dense: assigned in catalog order starting at 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The four card families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    /// The castaway's own cards, drawn into the hand.
    Robinson,
    /// Hazards faced in encounters.
    Danger,
    /// Lessons paired with dangers; become Robinson cards once won.
    Knowledge,
    /// Aging cards shuffled into the Robinson pool on every replenish.
    Age,
}

impl CardType {
    /// Types that are recycled from the deck into the Robinson pool.
    #[must_use]
    pub const fn refills_robinson(self) -> bool {
        matches!(self, Self::Robinson | Self::Age | Self::Knowledge)
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Self::Robinson => "ROBINSON",
            Self::Danger => "DANGER",
            Self::Knowledge => "KNOWLEDGE",
            Self::Age => "AGE",
        };
        f.write_str(tag)
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use castaway::cards::{CardDefinition, CardId, CardType};
///
/// let wolf = CardDefinition::new(CardId::new(1), "Wolf", CardType::Danger)
///     .with_quantity(2)
///     .with_pick(3)
///     .with_danger_values([2, 4, 6]);
///
/// assert_eq!(wolf.danger_value(1), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Registry identifier.
    pub id: CardId,

    /// Identifier in the document store, if the card came from one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,

    /// Display title.
    pub title: String,

    /// Card family.
    pub card_type: CardType,

    /// Number of physical copies.
    pub quantity: u32,

    /// Cards drawn when this danger is chosen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pick: Option<i64>,

    /// Danger value per difficulty field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub danger_values: Option<Vec<i64>>,

    /// Attack contribution while in hand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,

    /// Action triggered by the card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<i64>,

    /// Aging level (1 or 2), AGE cards only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

impl CardDefinition {
    /// Create a definition with one copy and no optional data.
    #[must_use]
    pub fn new(id: CardId, title: impl Into<String>, card_type: CardType) -> Self {
        Self {
            id,
            record_id: None,
            title: title.into(),
            card_type,
            quantity: 1,
            pick: None,
            danger_values: None,
            score: None,
            action: None,
            token: None,
            level: None,
        }
    }

    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    #[must_use]
    pub fn with_pick(mut self, pick: i64) -> Self {
        self.pick = Some(pick);
        self
    }

    #[must_use]
    pub fn with_danger_values(mut self, values: impl Into<Vec<i64>>) -> Self {
        self.danger_values = Some(values.into());
        self
    }

    #[must_use]
    pub fn with_score(mut self, score: i64) -> Self {
        self.score = Some(score);
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: ActionData) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    /// Danger value for a difficulty field.
    ///
    /// Fields beyond the recorded values use the last column; a card
    /// without danger values is worth 0.
    #[must_use]
    pub fn danger_value(&self, field: usize) -> i64 {
        self.danger_values
            .as_deref()
            .and_then(|values| values.get(field).or_else(|| values.last()))
            .copied()
            .unwrap_or(0)
    }

    /// Cards granted when this danger is chosen (0 if unset).
    #[must_use]
    pub fn pick_or_zero(&self) -> i64 {
        self.pick.unwrap_or(0)
    }
}
