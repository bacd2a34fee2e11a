//! Refilling exhausted draw pools from the discard pools.
//!
//! Two rules, each moving cards without ever creating or dropping one:
//!
//! - **Robinson**: the deck's Robinson/Age/Knowledge cards plus the next
//!   Age card are shuffled into a new Robinson pool.
//! - **Encounters**: the graveyard's Danger and Knowledge cards refill the
//!   encounter pools, the rest of the graveyard goes to the deck, and the
//!   difficulty field advances. This is the only way the field increases.

use log::debug;

use super::manager::Pool;
use crate::cards::CardType;
use crate::core::state::SessionState;

/// Refill the Robinson pool from the deck and the Age pool.
///
/// No-op while the Robinson pool still has cards. Returns the new size of
/// the Robinson pool, which is 0 when both sources are exhausted.
pub fn replenish_robinson(state: &mut SessionState) -> usize {
    if !state.pools.is_empty(Pool::Robinson) {
        return state.pools.len(Pool::Robinson);
    }

    let mut refill = state.drain_pool_by_type(Pool::Deck, CardType::refills_robinson);
    let age = state.pools.pop_head(Pool::Age);
    refill.extend(age);

    state.rng.shuffle(&mut refill);
    let size = refill.len();
    state.pools.extend(Pool::Robinson, refill);

    debug!(
        "replenished Robinson pool with {size} cards (age card added: {}, deck left: {})",
        age.is_some(),
        state.pools.len(Pool::Deck)
    );
    size
}

/// Refill the Danger and Knowledge pools from the graveyard.
///
/// Cards still left in either pool are kept and shuffled in with the
/// recovered ones. Everything else in the graveyard moves to the deck.
/// The field advances by one tier, capped at the hardest.
pub fn replenish_encounter_pools(state: &mut SessionState) {
    let mut dangers = state.pools.take_all(Pool::Danger);
    dangers.extend(state.drain_pool_by_type(Pool::Graveyard, |t| t == CardType::Danger));
    let mut knowledge = state.pools.take_all(Pool::Knowledge);
    knowledge.extend(state.drain_pool_by_type(Pool::Graveyard, |t| t == CardType::Knowledge));
    let rest = state.pools.take_all(Pool::Graveyard);

    state.rng.shuffle(&mut dangers);
    state.rng.shuffle(&mut knowledge);
    state.pools.extend(Pool::Danger, dangers);
    state.pools.extend(Pool::Knowledge, knowledge);
    state.pools.extend(Pool::Deck, rest);

    state.field = state.field.advanced();
    debug!(
        "replenished encounter pools: {} danger, {} knowledge, field now {}",
        state.pools.len(Pool::Danger),
        state.pools.len(Pool::Knowledge),
        state.field
    );
}
