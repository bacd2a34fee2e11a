//! Effect definitions.
//!
//! Effects are the atomic state changes an action can cause. A codex
//! and its value are translated into an `Effect` depending on *how* the
//! card fired: AGE cards fire on draw with their full codex table, while
//! hand abilities currently only know how to heal.

use serde::{Deserialize, Serialize};

use super::codex::{ActionData, Codex};

/// An atomic session effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Add `delta` to health.
    ModifyHealth { delta: i64 },

    /// Add `delta` to draw points.
    ModifyDrawPoint { delta: i64 },

    /// Set draw points to zero.
    ClearDrawPoint,

    /// Set score to 0 on every hand card holding the highest score.
    ZeroHighestScores,

    /// No effect.
    Nothing,
}

impl Effect {
    /// Effect of an AGE card entering the hand.
    #[must_use]
    pub fn for_age_card(action: &ActionData) -> Self {
        match action.codex {
            Codex::Hp => Self::ModifyHealth {
                delta: action.value,
            },
            Codex::Card => Self::ModifyDrawPoint {
                delta: action.value,
            },
            Codex::Stop => Self::ClearDrawPoint,
            Codex::Zero => Self::ZeroHighestScores,
            Codex::Other(_) => Self::Nothing,
        }
    }

    /// Effect of activating a hand card's ability.
    #[must_use]
    pub fn for_hand_ability(action: &ActionData) -> Self {
        match action.codex {
            Codex::Hp => Self::ModifyHealth {
                delta: action.value,
            },
            _ => Self::Nothing,
        }
    }

    /// Does this effect change anything?
    #[must_use]
    pub fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_card_table() {
        let hp = ActionData::new("Rest", "HP", 2);
        let card = ActionData::new("Hurry", "CARD", -1);
        let stop = ActionData::new("Exhausted", "STOP", 0);
        let zero = ActionData::new("Forget", "ZERO", 0);
        let other = ActionData::new("Mystery", "TELEPORT", 4);

        assert_eq!(Effect::for_age_card(&hp), Effect::ModifyHealth { delta: 2 });
        assert_eq!(Effect::for_age_card(&card), Effect::ModifyDrawPoint { delta: -1 });
        assert_eq!(Effect::for_age_card(&stop), Effect::ClearDrawPoint);
        assert_eq!(Effect::for_age_card(&zero), Effect::ZeroHighestScores);
        assert!(Effect::for_age_card(&other).is_nothing());
    }

    #[test]
    fn test_hand_abilities_only_heal() {
        let hp = ActionData::new("Eat", "HP", 1);
        let card = ActionData::new("Scout", "CARD", 2);

        assert_eq!(Effect::for_hand_ability(&hp), Effect::ModifyHealth { delta: 1 });
        assert!(Effect::for_hand_ability(&card).is_nothing());
    }
}
