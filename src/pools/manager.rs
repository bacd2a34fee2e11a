//! Pool manager for card locations and movement.
//!
//! The `PoolManager` tracks which pool every card instance is in and keeps
//! each pool as an ordered sequence. It supports:
//! - Head/tail insertion and head removal
//! - Predicate-based draining that preserves the order of what stays
//! - Uniform shuffles
//! - Card lookup by entity ID
//!
//! Cards that leave the manager (`pop_head`, `remove`, `drain_where`) are
//! the caller's to place: into the hand, an encounter, or another pool.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::entity::EntityId;
use crate::core::rng::GameRng;

/// The seven card pools of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pool {
    /// Draw source for the hand.
    Robinson,
    /// Encounter hazards.
    Danger,
    /// Encounter rewards.
    Knowledge,
    /// Aging cards waiting to be mixed into the Robinson pool.
    Age,
    /// Played cards awaiting a Robinson replenish.
    Deck,
    /// Removed from the game.
    Destroy,
    /// Discarded encounter cards awaiting an encounter replenish.
    Graveyard,
}

impl Pool {
    /// Every pool, in display order.
    pub const ALL: [Pool; 7] = [
        Pool::Robinson,
        Pool::Danger,
        Pool::Knowledge,
        Pool::Age,
        Pool::Deck,
        Pool::Destroy,
        Pool::Graveyard,
    ];

    const fn slot(self) -> usize {
        match self {
            Pool::Robinson => 0,
            Pool::Danger => 1,
            Pool::Knowledge => 2,
            Pool::Age => 3,
            Pool::Deck => 4,
            Pool::Destroy => 5,
            Pool::Graveyard => 6,
        }
    }

    /// Human-readable pool name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Pool::Robinson => "Robinson",
            Pool::Danger => "Danger",
            Pool::Knowledge => "Knowledge",
            Pool::Age => "Age",
            Pool::Deck => "Deck",
            Pool::Destroy => "Destroyed",
            Pool::Graveyard => "Graveyard",
        }
    }
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Where to insert a card into a pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolPosition {
    /// Next card to be popped.
    Head,
    /// Last card to be popped.
    Tail,
}

/// Manages card locations across pools.
///
/// ## Usage
///
/// ```
/// use castaway::core::EntityId;
/// use castaway::pools::{Pool, PoolManager, PoolPosition};
///
/// let mut pools = PoolManager::new();
/// pools.add(EntityId(10), Pool::Robinson, PoolPosition::Tail);
/// pools.add(EntityId(11), Pool::Robinson, PoolPosition::Tail);
///
/// assert_eq!(pools.head(Pool::Robinson), Some(EntityId(10)));
/// assert_eq!(pools.pop_head(Pool::Robinson), Some(EntityId(10)));
/// assert!(!pools.contains(EntityId(10)));
/// assert_eq!(pools.cards(Pool::Robinson), &[EntityId(11)]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PoolSnapshot", into = "PoolSnapshot")]
pub struct PoolManager {
    /// Card locations: entity_id -> pool
    locations: FxHashMap<EntityId, Pool>,

    /// Ordered contents per pool, head first.
    order: [Vec<EntityId>; 7],
}

impl PoolManager {
    /// Create a new empty pool manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, entity: EntityId, pool: Pool, position: PoolPosition) {
        self.locations.insert(entity, pool);
        let order = &mut self.order[pool.slot()];
        match position {
            PoolPosition::Head => order.insert(0, entity),
            PoolPosition::Tail => order.push(entity),
        }
    }

    /// Add a card to a pool.
    ///
    /// Panics if the entity is already tracked; a card is never in two
    /// places at once.
    pub fn add(&mut self, entity: EntityId, pool: Pool, position: PoolPosition) {
        if self.locations.contains_key(&entity) {
            panic!("Entity {:?} already exists in pool manager", entity);
        }
        self.insert(entity, pool, position);
    }

    /// Add several cards to the tail of a pool, in order.
    pub fn extend(&mut self, pool: Pool, entities: impl IntoIterator<Item = EntityId>) {
        for entity in entities {
            self.add(entity, pool, PoolPosition::Tail);
        }
    }

    /// Get the pool a card is in.
    #[must_use]
    pub fn pool_of(&self, entity: EntityId) -> Option<Pool> {
        self.locations.get(&entity).copied()
    }

    /// Check if the manager tracks an entity.
    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.locations.contains_key(&entity)
    }

    /// Cards in a pool, head first.
    #[must_use]
    pub fn cards(&self, pool: Pool) -> &[EntityId] {
        &self.order[pool.slot()]
    }

    /// Number of cards in a pool.
    #[must_use]
    pub fn len(&self, pool: Pool) -> usize {
        self.order[pool.slot()].len()
    }

    /// Is a pool empty?
    #[must_use]
    pub fn is_empty(&self, pool: Pool) -> bool {
        self.order[pool.slot()].is_empty()
    }

    /// Next card to be popped from a pool.
    #[must_use]
    pub fn head(&self, pool: Pool) -> Option<EntityId> {
        self.order[pool.slot()].first().copied()
    }

    /// Remove and return the head of a pool.
    pub fn pop_head(&mut self, pool: Pool) -> Option<EntityId> {
        let order = &mut self.order[pool.slot()];
        if order.is_empty() {
            return None;
        }
        let entity = order.remove(0);
        self.locations.remove(&entity);
        Some(entity)
    }

    /// Remove every card of a pool matching `predicate`.
    ///
    /// Removed cards are returned in pool order; the rest keep their order.
    pub fn drain_where<F>(&mut self, pool: Pool, mut predicate: F) -> Vec<EntityId>
    where
        F: FnMut(EntityId) -> bool,
    {
        let order = std::mem::take(&mut self.order[pool.slot()]);
        let (taken, kept): (Vec<_>, Vec<_>) = order.into_iter().partition(|&e| predicate(e));
        for entity in &taken {
            self.locations.remove(entity);
        }
        self.order[pool.slot()] = kept;
        taken
    }

    /// Remove and return every card of a pool.
    pub fn take_all(&mut self, pool: Pool) -> Vec<EntityId> {
        self.drain_where(pool, |_| true)
    }

    /// Shuffle a pool.
    pub fn shuffle(&mut self, pool: Pool, rng: &mut GameRng) {
        rng.shuffle(&mut self.order[pool.slot()]);
    }

    /// Get total number of cards tracked.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.locations.len()
    }
}

/// Serialized layout: one ordered list per pool. Locations are rebuilt.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct PoolSnapshot {
    robinson: Vec<EntityId>,
    danger: Vec<EntityId>,
    knowledge: Vec<EntityId>,
    age: Vec<EntityId>,
    deck: Vec<EntityId>,
    destroy: Vec<EntityId>,
    graveyard: Vec<EntityId>,
}

impl From<PoolManager> for PoolSnapshot {
    fn from(manager: PoolManager) -> Self {
        let [robinson, danger, knowledge, age, deck, destroy, graveyard] = manager.order;
        Self {
            robinson,
            danger,
            knowledge,
            age,
            deck,
            destroy,
            graveyard,
        }
    }
}

impl TryFrom<PoolSnapshot> for PoolManager {
    type Error = String;

    fn try_from(snapshot: PoolSnapshot) -> Result<Self, Self::Error> {
        let lists = [
            (Pool::Robinson, snapshot.robinson),
            (Pool::Danger, snapshot.danger),
            (Pool::Knowledge, snapshot.knowledge),
            (Pool::Age, snapshot.age),
            (Pool::Deck, snapshot.deck),
            (Pool::Destroy, snapshot.destroy),
            (Pool::Graveyard, snapshot.graveyard),
        ];

        let mut manager = PoolManager::new();
        for (pool, entities) in lists {
            for entity in entities {
                if let Some(other) = manager.pool_of(entity) {
                    return Err(format!("{entity} listed in both {other} and {pool}"));
                }
                manager.insert(entity, pool, PoolPosition::Tail);
            }
        }
        Ok(manager)
    }
}
