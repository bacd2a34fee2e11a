//! Session lifecycle controller.
//!
//! `Session` owns the `SessionState` together with its two collaborators:
//! the card catalog a fresh game is dealt from and the key-value store the
//! state is persisted to. Every mutating operation narrates itself in the
//! chat log and then persists, so the stored snapshot is never behind the
//! state it was produced from by more than one failed write.

use log::{error, info, warn};

use super::storage::KeyValueStore;
use crate::cards::{expand, load_catalog, CardCatalog, CardDefinition, CardInstance, CardType};
use crate::core::config::GameConfig;
use crate::core::entity::EntityId;
use crate::core::state::{ChatEntry, EncounterOffer, EncounterPair, SessionState, Severity};
use crate::error::GameError;
use crate::pools::Pool;
use crate::rules::{self, ResolutionOptions, RoundOutcome};

/// How `setup` produced the current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetupOutcome {
    /// Dealt a new game from the catalog.
    Fresh,
    /// Continued the persisted game.
    Restored,
}

/// A single-player adventure bound to its catalog and storage.
pub struct Session<C, S>
where
    C: CardCatalog,
    S: KeyValueStore,
{
    config: GameConfig,
    catalog: C,
    store: S,
    state: SessionState,
}

impl<C, S> Session<C, S>
where
    C: CardCatalog,
    S: KeyValueStore,
{
    /// Create a session. Nothing is loaded until [`Session::setup`].
    pub fn new(config: GameConfig, catalog: C, store: S) -> Self {
        let state = SessionState::new(&config);
        Self {
            config,
            catalog,
            store,
            state,
        }
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the session, keeping only its state.
    #[must_use]
    pub fn into_state(self) -> SessionState {
        self.state
    }

    // === Lifecycle ===

    /// Restore the persisted game, or deal a fresh one.
    ///
    /// A missing or corrupt save under a set start flag is logged and
    /// treated as no save.
    ///
    /// # Errors
    ///
    /// Fails if the catalog cannot be loaded for a fresh game or storage
    /// cannot be accessed.
    pub fn setup(&mut self) -> Result<SetupOutcome, GameError> {
        let started = self
            .store
            .read_key(&self.config.start_flag_key)
            .map_err(GameError::storage)?;

        if started.as_deref() == Some("true") {
            match self.load_save() {
                Ok(Some(state)) => {
                    self.state = state;
                    info!(
                        "restored session at round {}, field {}",
                        self.state.round, self.state.field
                    );
                    return Ok(SetupOutcome::Restored);
                }
                Ok(None) => warn!(
                    "start flag set but nothing stored under '{}', starting fresh",
                    self.config.save_key
                ),
                Err(GameError::SaveCorrupt(err)) => {
                    warn!("discarding corrupt save, starting fresh: {err}");
                }
                Err(err) => return Err(err),
            }
        }

        self.start_fresh()?;
        Ok(SetupOutcome::Fresh)
    }

    fn start_fresh(&mut self) -> Result<(), GameError> {
        let definitions = load_catalog(&self.catalog, self.config.catalog_limit)?;
        let mut state = SessionState::new(&self.config);
        for definition in definitions {
            state.registry.register(definition);
        }
        let definitions: Vec<CardDefinition> = state.registry.iter().cloned().collect();

        let mut age = expand_type(&mut state, &definitions, CardType::Age);
        let mut robinson = expand_type(&mut state, &definitions, CardType::Robinson);
        // Knowledge cards are dealt twice: as Robinson filler and as rewards.
        let mut filler = expand_type(&mut state, &definitions, CardType::Knowledge);
        let mut danger = expand_type(&mut state, &definitions, CardType::Danger);
        let mut knowledge = expand_type(&mut state, &definitions, CardType::Knowledge);

        state.rng.shuffle(&mut age);
        state.rng.shuffle(&mut filler);
        robinson.append(&mut filler);
        state.rng.shuffle(&mut robinson);
        state.rng.shuffle(&mut danger);
        state.rng.shuffle(&mut knowledge);

        state.pools.extend(Pool::Age, age);
        state.pools.extend(Pool::Robinson, robinson);
        state.pools.extend(Pool::Danger, danger);
        state.pools.extend(Pool::Knowledge, knowledge);

        state.log(ChatEntry::system("Adventure started", None));
        state.on_game_start = true;
        self.state = state;

        info!(
            "dealt fresh session: {} cards from {} definitions (seed {})",
            self.state.instances().len(),
            definitions.len(),
            self.state.rng.seed()
        );
        self.commit()
    }

    /// Forget the persisted game. The in-memory state is left alone; the
    /// next [`Session::setup`] deals a fresh game.
    ///
    /// # Errors
    ///
    /// Fails if storage cannot be modified.
    pub fn reset(&self) -> Result<(), GameError> {
        self.store
            .delete_key(&self.config.save_key)
            .map_err(GameError::storage)?;
        self.store
            .delete_key(&self.config.start_flag_key)
            .map_err(GameError::storage)?;
        info!("session reset");
        Ok(())
    }

    /// Write the state and the start flag to storage.
    ///
    /// # Errors
    ///
    /// Fails if the state cannot be encoded or storage cannot be written.
    pub fn persist(&self) -> Result<(), GameError> {
        let json = serde_json::to_string(&self.state).map_err(GameError::storage)?;
        self.store
            .write_key(&self.config.save_key, &json)
            .map_err(GameError::storage)?;
        let flag = if self.state.on_game_start { "true" } else { "false" };
        self.store
            .write_key(&self.config.start_flag_key, flag)
            .map_err(GameError::storage)
    }

    /// Read the persisted state, if any.
    ///
    /// # Errors
    ///
    /// `SaveCorrupt` if the stored snapshot cannot be decoded or places a
    /// card anywhere but exactly once, `Storage` if it cannot be read.
    pub fn load_save(&self) -> Result<Option<SessionState>, GameError> {
        let Some(json) = self
            .store
            .read_key(&self.config.save_key)
            .map_err(GameError::storage)?
        else {
            return Ok(None);
        };
        let state: SessionState = serde_json::from_str(&json).map_err(GameError::SaveCorrupt)?;

        let misplaced = state.check_conservation();
        if !misplaced.is_empty() {
            return Err(GameError::SaveCorrupt(serde::de::Error::custom(format!(
                "cards out of place: {misplaced:?}"
            ))));
        }
        Ok(Some(state))
    }

    fn commit(&self) -> Result<(), GameError> {
        self.persist()
            .inspect_err(|err| error!("failed to persist session: {err}"))
    }

    // === Encounters ===

    /// Offer encounter pairs for the player to choose from.
    ///
    /// # Errors
    ///
    /// Fails only if the new state cannot be persisted.
    pub fn offer_encounters(&mut self) -> Result<EncounterOffer, GameError> {
        let fresh_offer = self.state.offered.is_empty() && self.state.danger_selected.is_none();
        let offer = rules::offer_encounters(&mut self.state, self.config.offers_per_encounter);
        if fresh_offer {
            self.state
                .log(ChatEntry::system("Danger!", Some(Severity::Warning)));
        }
        self.commit()?;
        Ok(offer)
    }

    /// Engage one of the offered pairs.
    ///
    /// # Errors
    ///
    /// `InvalidSelection` if `chosen` was not offered; storage failures.
    pub fn choose_encounter(&mut self, chosen: &EncounterPair) -> Result<(), GameError> {
        rules::choose_encounter(&mut self.state, chosen)?;

        let title = self.state.title(chosen.danger).to_string();
        let value = rules::danger_value(&self.state).unwrap_or(0);
        let pick = self
            .state
            .definition(chosen.danger)
            .map_or(0, CardDefinition::pick_or_zero);
        self.state.log(ChatEntry::system(
            format!("Facing {title}"),
            Some(Severity::Error),
        ));
        self.state.log(ChatEntry::system(
            format!("Danger value {value}"),
            Some(Severity::Warning),
        ));
        self.state.log(ChatEntry::system(
            format!("Draw {pick} cards"),
            Some(Severity::Info),
        ));
        self.commit()
    }

    /// Defeat the active danger. `None` without an active encounter.
    ///
    /// # Errors
    ///
    /// Fails only if the new state cannot be persisted.
    pub fn fight(&mut self) -> Result<Option<RoundOutcome>, GameError> {
        let title = self.active_danger_title();
        let Some(outcome) = rules::fight(&mut self.state) else {
            return Ok(None);
        };
        self.state.log(ChatEntry::system(
            format!("Defeated {title}"),
            Some(Severity::Success),
        ));
        self.commit()?;
        Ok(Some(outcome))
    }

    /// Run from the active danger. `None` without an active encounter.
    ///
    /// # Errors
    ///
    /// Fails only if the new state cannot be persisted.
    pub fn flee(&mut self) -> Result<Option<RoundOutcome>, GameError> {
        let title = self.active_danger_title();
        let Some(outcome) = rules::flee(&mut self.state) else {
            return Ok(None);
        };
        if let RoundOutcome::Fled { damage } = outcome {
            self.state.log(ChatEntry::system(
                format!("Fled from {title}, health -{damage}"),
                Some(Severity::Warning),
            ));
        }
        self.commit()?;
        Ok(Some(outcome))
    }

    fn active_danger_title(&self) -> String {
        self.state
            .danger_selected
            .map(|pair| self.state.title(pair.danger).to_string())
            .unwrap_or_default()
    }

    // === Hand ===

    /// Draw one card, firing its effect if it is an AGE card.
    ///
    /// # Errors
    ///
    /// Fails only if the new state cannot be persisted.
    pub fn draw(&mut self) -> Result<Option<EntityId>, GameError> {
        let drawn = rules::draw(&mut self.state);
        self.after_draw(drawn);
        self.commit()?;
        Ok(drawn)
    }

    /// Pay one health for a draw when out of draw points.
    ///
    /// # Errors
    ///
    /// Fails only if the new state cannot be persisted.
    pub fn force_draw(&mut self) -> Result<Option<EntityId>, GameError> {
        let injured = self.state.draw_point <= 0;
        let drawn = rules::force_draw(&mut self.state);
        if injured {
            self.state.log(ChatEntry::player("Injured, health -1"));
        }
        self.after_draw(drawn);
        self.commit()?;
        Ok(drawn)
    }

    fn after_draw(&mut self, drawn: Option<EntityId>) {
        let Some(entity) = drawn else {
            return;
        };
        let message = format!("Drew {}", self.state.title(entity));
        self.state.log(ChatEntry::player(message));
        if self.state.card(entity).is_some_and(CardInstance::is_age) {
            rules::trigger_age_effect(&mut self.state, entity);
        }
    }

    /// Fire a hand card's ability. `false` if it was already used.
    ///
    /// # Errors
    ///
    /// Fails only if the new state cannot be persisted.
    pub fn activate_hand_card(&mut self, hand_id: usize) -> Result<bool, GameError> {
        if !rules::activate_hand_card(&mut self.state, hand_id) {
            return Ok(false);
        }
        self.commit()?;
        Ok(true)
    }

    // === Queries ===

    #[must_use]
    pub fn attack_score(&self) -> i64 {
        rules::attack_score(&self.state)
    }

    /// Danger value minus attack score for the active encounter.
    #[must_use]
    pub fn danger_score(&self) -> Option<i64> {
        rules::danger_score(&self.state)
    }

    #[must_use]
    pub fn resolution_options(&self) -> ResolutionOptions {
        rules::resolution_options(&self.state)
    }

    #[must_use]
    pub fn pool_cards(&self, pool: Pool) -> Vec<&CardDefinition> {
        self.state.pool_cards(pool)
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.state.is_defeated()
    }
}

fn expand_type(
    state: &mut SessionState,
    definitions: &[CardDefinition],
    card_type: CardType,
) -> Vec<EntityId> {
    let matching: Vec<CardDefinition> = definitions
        .iter()
        .filter(|d| d.card_type == card_type)
        .cloned()
        .collect();
    expand(state, &matching)
}
