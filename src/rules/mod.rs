//! Round rules: the encounter engine and the hand & draw engine.
//!
//! Both operate on a `SessionState` by `&mut` reference and never touch
//! storage; the session controller persists after each call.

pub mod encounter;
pub mod hand;

pub use encounter::{
    choose_encounter, danger_score, danger_value, end_round, fight, flee, offer_encounters,
    resolution_options, ResolutionOptions, RoundOutcome,
};
pub use hand::{activate_hand_card, attack_score, draw, force_draw, trigger_age_effect};
