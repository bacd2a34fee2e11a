//! Hand & draw engine.
//!
//! Draw points are the budget for drawing from the Robinson pool. Cards
//! enter the hand active unless they are AGE cards, whose effect fires
//! once on draw instead. Active cards can fire their ability once.

use log::debug;

use crate::cards::CardType;
use crate::core::entity::EntityId;
use crate::core::state::{HandCard, SessionState};
use crate::effects::{resolve, Effect};
use crate::pools::{replenish_robinson, Pool};

/// Sum of the scores of every card in hand.
#[must_use]
pub fn attack_score(state: &SessionState) -> i64 {
    state
        .hand
        .iter()
        .filter_map(|h| state.card(h.entity))
        .map(|c| c.score)
        .sum()
}

/// Draw one card into the hand.
///
/// Returns `None`, leaving draw points untouched, when there are no draw
/// points or no card can be found even after a Robinson refill.
pub fn draw(state: &mut SessionState) -> Option<EntityId> {
    if state.draw_point <= 0 {
        return None;
    }

    replenish_robinson(state);
    let entity = state.pools.pop_head(Pool::Robinson)?;
    let is_age = state.card(entity).is_some_and(|c| c.is_age());

    state.hand.push(HandCard {
        entity,
        hand_id: state.hand.len(),
        is_active: !is_age,
    });
    state.draw_point -= 1;
    debug!("drew {} ({} draw points left)", state.title(entity), state.draw_point);
    Some(entity)
}

/// Draw at the cost of one health when out of draw points.
///
/// With draw points left this is a plain [`draw`]. The health is paid
/// even if nothing can be drawn.
pub fn force_draw(state: &mut SessionState) -> Option<EntityId> {
    if state.draw_point <= 0 {
        state.health -= 1;
        state.draw_point += 1;
    }
    draw(state)
}

/// Fire the on-draw effect of an AGE card.
///
/// Returns the effect applied; anything but an AGE card with a known
/// codex yields [`Effect::Nothing`].
pub fn trigger_age_effect(state: &mut SessionState, entity: EntityId) -> Effect {
    let effect = match state.definition(entity) {
        Some(def) if def.card_type == CardType::Age => def
            .action
            .as_ref()
            .map_or(Effect::Nothing, Effect::for_age_card),
        _ => Effect::Nothing,
    };
    resolve(state, effect);
    effect
}

/// Fire the ability of the hand card with the given id.
///
/// Returns `false` and changes nothing if there is no such card or its
/// ability has already been used. Otherwise the card is spent for good.
pub fn activate_hand_card(state: &mut SessionState, hand_id: usize) -> bool {
    let Some(slot) = state.hand.iter().position(|h| h.hand_id == hand_id) else {
        return false;
    };
    let card = state.hand[slot];
    if !card.is_active {
        return false;
    }

    let effect = state
        .definition(card.entity)
        .and_then(|d| d.action.as_ref())
        .map_or(Effect::Nothing, Effect::for_hand_ability);
    state.hand[slot].is_active = false;
    resolve(state, effect);
    debug!("activated {} in slot {hand_id}: {effect:?}", state.title(card.entity));
    true
}
