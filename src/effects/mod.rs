//! Effect system for card actions.
//!
//! ## Key Types
//!
//! - `Codex` / `ActionData`: the action record a card references
//! - `Effect`: atomic state change derived from an action
//! - `resolve`: applies an effect to a session

pub mod codex;
pub mod effect;
pub mod resolver;

pub use codex::{ActionData, Codex};
pub use effect::Effect;
pub use resolver::resolve;
