//! Encounter engine: offering Danger/Knowledge pairs and resolving the
//! chosen one by fighting or fleeing.
//!
//! A round moves through three states:
//! - **Idle**: no offer, no encounter. `offer_encounters` pops pairs.
//! - **Offered**: pairs wait in `SessionState::offered` for a choice.
//! - **Drawing**: `danger_selected` is set; the player draws against it
//!   and finally fights or flees, which ends the round.
//!
//! Fight and flee are advisory: the engine resolves whichever the caller
//! asks for while an encounter is active. [`resolution_options`] reports
//! which one the caller is expected to offer.

use log::debug;
use serde::{Deserialize, Serialize};

use super::hand::attack_score;
use crate::core::state::{EncounterOffer, EncounterPair, SessionState};
use crate::error::GameError;
use crate::pools::{replenish_encounter_pools, Pool};

/// How a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// The danger was defeated and destroyed.
    Won,
    /// The castaway fled and lost `damage` health.
    Fled { damage: i64 },
}

/// Which resolutions the caller should offer right now.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolutionOptions {
    pub fight: bool,
    pub flee: bool,
}

/// Offer up to `count` encounter pairs.
///
/// Refills the encounter pools first if either is empty. Pairs get
/// sequential ids starting at 0. While an offer is pending it is returned
/// unchanged; during an active encounter nothing is offered.
pub fn offer_encounters(state: &mut SessionState, count: usize) -> EncounterOffer {
    if state.danger_selected.is_some() {
        return EncounterOffer::new();
    }
    if !state.offered.is_empty() {
        return state.offered.clone();
    }

    if state.pools.is_empty(Pool::Danger) || state.pools.is_empty(Pool::Knowledge) {
        replenish_encounter_pools(state);
    }

    let mut offer = EncounterOffer::new();
    for id in 0..count as u32 {
        if state.pools.is_empty(Pool::Danger) || state.pools.is_empty(Pool::Knowledge) {
            break;
        }
        let (Some(danger), Some(knowledge)) = (
            state.pools.pop_head(Pool::Danger),
            state.pools.pop_head(Pool::Knowledge),
        ) else {
            break;
        };
        offer.push(EncounterPair {
            id,
            danger,
            knowledge,
        });
    }

    debug!("offering {} encounter(s) at field {}", offer.len(), state.field);
    state.offered = offer.clone();
    offer
}

/// Engage one of the offered pairs.
///
/// The other offered pairs go to the graveyard. Draw points grow by the
/// danger's `pick`.
pub fn choose_encounter(state: &mut SessionState, chosen: &EncounterPair) -> Result<(), GameError> {
    if !state.offered.contains(chosen) {
        return Err(GameError::InvalidSelection { id: chosen.id });
    }

    for pair in std::mem::take(&mut state.offered) {
        if pair != *chosen {
            state.pools.extend(Pool::Graveyard, [pair.danger, pair.knowledge]);
        }
    }

    let pick = state.definition(chosen.danger).map_or(0, |d| d.pick_or_zero());
    state.danger_selected = Some(*chosen);
    state.draw_point += pick;
    state.on_draw = true;
    debug!("facing {}: pick {pick}", state.title(chosen.danger));
    Ok(())
}

/// Danger value of the active encounter at the current field.
#[must_use]
pub fn danger_value(state: &SessionState) -> Option<i64> {
    let pair = state.danger_selected?;
    state
        .definition(pair.danger)
        .map(|d| d.danger_value(state.field.index()))
}

/// Danger value minus attack score. Positive means the danger is ahead.
#[must_use]
pub fn danger_score(state: &SessionState) -> Option<i64> {
    danger_value(state).map(|value| value - attack_score(state))
}

/// Which resolutions to offer: none while draw points remain, fight when
/// the attack score is at least the danger score, flee otherwise.
#[must_use]
pub fn resolution_options(state: &SessionState) -> ResolutionOptions {
    match danger_score(state) {
        Some(score) if state.draw_point <= 0 => {
            let attack = attack_score(state);
            ResolutionOptions {
                fight: attack >= score,
                flee: attack < score,
            }
        }
        _ => ResolutionOptions::default(),
    }
}

/// Defeat the active danger.
///
/// The knowledge card and the hand go to the deck, the danger card is
/// destroyed. Returns `None` without an active encounter.
pub fn fight(state: &mut SessionState) -> Option<RoundOutcome> {
    let pair = state.danger_selected.take()?;

    state.pools.extend(Pool::Deck, [pair.knowledge]);
    discard_hand(state);
    state.pools.extend(Pool::Destroy, [pair.danger]);
    state.win += 1;

    end_round(state);
    Some(RoundOutcome::Won)
}

/// Run from the active danger.
///
/// Health drops by the danger score, never below zero damage. The hand
/// goes to the deck and both encounter cards to the graveyard. Returns
/// `None` without an active encounter.
pub fn flee(state: &mut SessionState) -> Option<RoundOutcome> {
    let damage = danger_score(state)?.max(0);
    let pair = state.danger_selected.take()?;

    discard_hand(state);
    state.health -= damage;
    state.lose += 1;
    state.pools.extend(Pool::Graveyard, [pair.knowledge, pair.danger]);

    end_round(state);
    Some(RoundOutcome::Fled { damage })
}

/// Advance to the next round.
///
/// An encounter still active at this point is abandoned to the graveyard.
pub fn end_round(state: &mut SessionState) {
    if let Some(pair) = state.danger_selected.take() {
        state.pools.extend(Pool::Graveyard, [pair.knowledge, pair.danger]);
    }
    state.round += 1;
    state.on_draw = false;
    state.draw_point = 0;
    debug!("round {} begins", state.round);
}

fn discard_hand(state: &mut SessionState) {
    let hand = std::mem::take(&mut state.hand);
    state.pools.extend(Pool::Deck, hand.into_iter().map(|h| h.entity));
}
