//! Session state: the single mutable aggregate of a game.
//!
//! ## SessionState
//!
//! Everything a running adventure needs:
//! - Progression (field, round, health, draw points, win/lose tallies)
//! - The catalog registry and the instance arena
//! - Pools, hand, pending encounter offer and active encounter
//! - Chat log and RNG position
//!
//! `SessionState` is pure data. Operations live in `pools`, `rules` and
//! `effects`, and take the state by `&mut` reference. Serializing and
//! deserializing it is lossless.

use chrono::{DateTime, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::GameConfig;
use super::entity::EntityId;
use super::rng::GameRng;
use crate::cards::{CardDefinition, CardInstance, CardRegistry, CardType};
use crate::pools::{Pool, PoolManager};

/// Difficulty tier selecting the danger-value column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Field(u8);

impl Field {
    /// The hardest tier.
    pub const HARDEST: Field = Field(2);

    /// Create a field, clamped to the hardest tier.
    #[must_use]
    pub fn new(tier: u8) -> Self {
        Self(tier.min(Self::HARDEST.0))
    }

    /// Column index into danger values.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The next tier, capped at the hardest.
    #[must_use]
    pub fn advanced(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A card held in the hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandCard {
    /// The underlying instance.
    pub entity: EntityId,
    /// Position assigned when drawn.
    pub hand_id: usize,
    /// Can the card's ability still fire?
    pub is_active: bool,
}

/// A Danger/Knowledge pair offered as an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EncounterPair {
    pub id: u32,
    pub danger: EntityId,
    pub knowledge: EntityId,
}

/// Up to two (by default) encounter pairs.
pub type EncounterOffer = SmallVec<[EncounterPair; 2]>;

/// Who wrote a chat entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    Player,
}

/// Presentation hint for a chat entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Success,
    Warning,
    Info,
}

/// One line of the adventure log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub role: ChatRole,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

impl ChatEntry {
    /// A system message stamped now.
    #[must_use]
    pub fn system(message: impl Into<String>, severity: Option<Severity>) -> Self {
        Self {
            role: ChatRole::System,
            message: message.into(),
            timestamp: Utc::now(),
            severity,
        }
    }

    /// A player message stamped now.
    #[must_use]
    pub fn player(message: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Player,
            message: message.into(),
            timestamp: Utc::now(),
            severity: None,
        }
    }
}

/// Complete state of one adventure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    // === Progression ===
    pub field: Field,
    /// Round number (starts at 1).
    pub round: u32,
    pub health: i64,
    pub draw_point: i64,
    pub win: u32,
    pub lose: u32,
    /// A danger has been chosen and the player is drawing against it.
    pub on_draw: bool,
    /// The adventure has been set up.
    pub on_game_start: bool,

    // === Cards ===
    /// Catalog loaded for this session.
    pub registry: CardRegistry,
    /// Instance arena, indexed by `EntityId`.
    cards: Vec<CardInstance>,
    pub pools: PoolManager,
    pub hand: Vec<HandCard>,
    /// Pairs offered but not yet chosen.
    pub offered: EncounterOffer,
    pub danger_selected: Option<EncounterPair>,

    // === Log ===
    pub chat_log: Vector<ChatEntry>,

    /// Shuffle RNG.
    pub rng: GameRng,
}

impl SessionState {
    /// Create an empty state (no cards) using the config's health and seed.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        Self {
            field: Field::default(),
            round: 1,
            health: config.starting_health,
            draw_point: 0,
            win: 0,
            lose: 0,
            on_draw: false,
            on_game_start: false,
            registry: CardRegistry::new(),
            cards: Vec::new(),
            pools: PoolManager::new(),
            hand: Vec::new(),
            offered: EncounterOffer::new(),
            danger_selected: None,
            chat_log: Vector::new(),
            rng,
        }
    }

    // === Instance Arena ===

    /// Allocate an instance of a definition. It is not placed anywhere yet.
    pub fn alloc_instance(&mut self, definition: &CardDefinition) -> EntityId {
        let id = EntityId(self.cards.len() as u32);
        self.cards.push(CardInstance::new(id, definition));
        id
    }

    /// Get a card instance.
    #[must_use]
    pub fn card(&self, entity: EntityId) -> Option<&CardInstance> {
        self.cards.get(entity.index())
    }

    /// Get a mutable card instance.
    pub fn card_mut(&mut self, entity: EntityId) -> Option<&mut CardInstance> {
        self.cards.get_mut(entity.index())
    }

    /// All instances ever created this session.
    #[must_use]
    pub fn instances(&self) -> &[CardInstance] {
        &self.cards
    }

    /// Definition behind an instance.
    #[must_use]
    pub fn definition(&self, entity: EntityId) -> Option<&CardDefinition> {
        self.card(entity).and_then(|c| self.registry.get(c.card_id))
    }

    /// Title of an instance, for log messages.
    #[must_use]
    pub fn title(&self, entity: EntityId) -> &str {
        self.definition(entity).map_or("?", |d| d.title.as_str())
    }

    /// Remove every card of `pool` whose type matches `predicate`.
    ///
    /// Removed cards are returned in pool order and must be placed again.
    pub fn drain_pool_by_type<F>(&mut self, pool: Pool, predicate: F) -> Vec<EntityId>
    where
        F: Fn(CardType) -> bool,
    {
        let cards = &self.cards;
        self.pools.drain_where(pool, |e| {
            cards.get(e.index()).is_some_and(|c| predicate(c.card_type))
        })
    }

    // === Queries ===

    /// Definitions behind the cards of a pool, head first.
    #[must_use]
    pub fn pool_cards(&self, pool: Pool) -> Vec<&CardDefinition> {
        self.pools
            .cards(pool)
            .iter()
            .filter_map(|&e| self.definition(e))
            .collect()
    }

    /// Hand slot with the given id.
    #[must_use]
    pub fn hand_card(&self, hand_id: usize) -> Option<&HandCard> {
        self.hand.iter().find(|h| h.hand_id == hand_id)
    }

    /// Has the castaway run out of health?
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Append a chat entry.
    pub fn log(&mut self, entry: ChatEntry) {
        self.chat_log.push_back(entry);
    }

    // === Conservation ===

    /// Number of cards in some location (pool, hand, offer, encounter).
    #[must_use]
    pub fn located_cards(&self) -> usize {
        self.pools.total_cards()
            + self.hand.len()
            + self.offered.len() * 2
            + self.danger_selected.map_or(0, |_| 2)
    }

    /// Instances that are not in exactly one location.
    ///
    /// Empty for every reachable state.
    #[must_use]
    pub fn check_conservation(&self) -> Vec<EntityId> {
        let mut seen = vec![0usize; self.cards.len()];
        let mut stray = Vec::new();
        let mut mark = |entity: EntityId| match seen.get_mut(entity.index()) {
            Some(count) => *count += 1,
            None => stray.push(entity),
        };

        for pool in Pool::ALL {
            self.pools.cards(pool).iter().copied().for_each(&mut mark);
        }
        self.hand.iter().for_each(|h| mark(h.entity));
        for pair in self.offered.iter().chain(self.danger_selected.iter()) {
            mark(pair.danger);
            mark(pair.knowledge);
        }

        stray.extend(
            seen.iter()
                .enumerate()
                .filter(|&(_, &count)| count != 1)
                .map(|(i, _)| EntityId(i as u32)),
        );
        stray
    }
}
