//! Core types: entities, RNG, configuration and the session aggregate.
//!
//! Everything else in the crate operates on a `SessionState` built from a
//! `GameConfig`.

pub mod entity;
pub mod rng;
pub mod config;
pub mod state;

pub use entity::EntityId;
pub use rng::{GameRng, GameRngState};
pub use config::GameConfig;
pub use state::{
    ChatEntry, ChatRole, EncounterOffer, EncounterPair, Field, HandCard, SessionState, Severity,
};
