//! Effect resolution against a session.

use log::debug;

use super::effect::Effect;
use crate::core::state::SessionState;

/// Apply an effect to the session.
pub fn resolve(state: &mut SessionState, effect: Effect) {
    match effect {
        Effect::ModifyHealth { delta } => state.health += delta,
        Effect::ModifyDrawPoint { delta } => state.draw_point += delta,
        Effect::ClearDrawPoint => state.draw_point = 0,
        Effect::ZeroHighestScores => zero_highest_scores(state),
        Effect::Nothing => return,
    }
    debug!("resolved {effect:?}: health {}, draw points {}", state.health, state.draw_point);
}

fn zero_highest_scores(state: &mut SessionState) {
    let hand: Vec<_> = state.hand.iter().map(|h| h.entity).collect();
    let Some(max) = hand
        .iter()
        .filter_map(|&e| state.card(e).map(|c| c.score))
        .max()
    else {
        return;
    };

    for entity in hand {
        if let Some(card) = state.card_mut(entity) {
            if card.score == max {
                card.score = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId, CardType};
    use crate::core::{GameConfig, HandCard};

    fn state_with_hand(scores: &[i64]) -> SessionState {
        let mut state = SessionState::new(&GameConfig::default().with_seed(3));
        for (i, &score) in scores.iter().enumerate() {
            let id = state.registry.register(
                CardDefinition::new(CardId::new(0), format!("c{i}"), CardType::Robinson)
                    .with_score(score),
            );
            let def = state.registry.get(id).cloned().unwrap();
            let entity = state.alloc_instance(&def);
            state.hand.push(HandCard {
                entity,
                hand_id: i,
                is_active: true,
            });
        }
        state
    }

    fn hand_scores(state: &SessionState) -> Vec<i64> {
        state
            .hand
            .iter()
            .map(|h| state.card(h.entity).unwrap().score)
            .collect()
    }

    #[test]
    fn test_counters() {
        let mut state = state_with_hand(&[]);
        state.draw_point = 3;

        resolve(&mut state, Effect::ModifyHealth { delta: -4 });
        resolve(&mut state, Effect::ModifyDrawPoint { delta: 2 });
        assert_eq!(state.health, 16);
        assert_eq!(state.draw_point, 5);

        resolve(&mut state, Effect::ClearDrawPoint);
        assert_eq!(state.draw_point, 0);

        resolve(&mut state, Effect::Nothing);
        assert_eq!(state.health, 16);
    }

    #[test]
    fn test_zero_highest_scores_zeroes_all_ties() {
        let mut state = state_with_hand(&[1, 3, 2, 3]);
        resolve(&mut state, Effect::ZeroHighestScores);
        assert_eq!(hand_scores(&state), vec![1, 0, 2, 0]);
    }

    #[test]
    fn test_zero_highest_scores_on_empty_hand() {
        let mut state = state_with_hand(&[]);
        resolve(&mut state, Effect::ZeroHighestScores);
        assert!(state.hand.is_empty());
    }
}
