//! # castaway
//!
//! Session engine for a single-player survival card game. A castaway
//! draws from a Robinson pool, faces Danger/Knowledge encounters, and
//! fights or flees while difficulty rises each time the encounter pools
//! run dry.
//!
//! ## Design Principles
//!
//! 1. **Explicit State**: One owned `SessionState` is passed by reference
//!    to every operation. No globals.
//!
//! 2. **Conservation**: Card instances live in an arena and move between
//!    ordered pools by id. No card is ever created or lost after dealing,
//!    and `SessionState::check_conservation` verifies it.
//!
//! 3. **Lossless Persistence**: The whole state, RNG position included,
//!    round-trips through JSON.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, RNG, configuration, session state
//! - `cards`: Card definitions, instances, registry, catalog loading
//! - `effects`: Action codices and their effects
//! - `pools`: Pool manager and replenish rules
//! - `rules`: Encounter engine and hand & draw engine
//! - `session`: Lifecycle controller and storage capability
//! - `error`: Error taxonomy

pub mod core;
pub mod cards;
pub mod effects;
pub mod pools;
pub mod rules;
pub mod session;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    EntityId, GameRng, GameRngState, GameConfig,
    ChatEntry, ChatRole, Severity,
    EncounterOffer, EncounterPair, Field, HandCard, SessionState,
};

pub use crate::cards::{
    CardId, CardType, CardDefinition, CardInstance, CardRegistry,
    CardCatalog, CatalogRecord, CatalogResponse, StaticCatalog,
};

pub use crate::effects::{ActionData, Codex, Effect};

pub use crate::pools::{Pool, PoolManager, PoolPosition};

pub use crate::rules::{ResolutionOptions, RoundOutcome};

pub use crate::session::{KeyValueStore, MemoryStore, Session, SetupOutcome};

pub use crate::error::GameError;
