//! Session scenario tests.
//!
//! These tests drive a full `Session` through setup, encounters, draws
//! and persistence:
//! - Fresh deal from a catalog
//! - Encounter, draw and fight
//! - Soft failures (no draw points, nothing to draw)
//! - Restore, reset and corrupt saves
//! - Catalog failures

mod common;

use castaway::cards::CardType;
use castaway::{
    CatalogRecord, Field, GameConfig, GameError, KeyValueStore, MemoryStore, Pool, RoundOutcome,
    SessionState, Session, SetupOutcome, StaticCatalog,
};
use common::*;

/// Test the fresh deal from a small catalog.
#[test]
fn test_fresh_game() {
    init_logging();
    let (mut session, _) = new_session(starter_catalog(None), 42);

    assert_eq!(session.setup().unwrap(), SetupOutcome::Fresh);

    let state = session.state();
    // 2 Robinson + 2 Knowledge filler
    assert_eq!(state.pools.len(Pool::Robinson), 4);
    assert_eq!(state.pools.len(Pool::Danger), 2);
    assert_eq!(state.pools.len(Pool::Knowledge), 2);
    assert!(state.pools.is_empty(Pool::Age));
    assert_eq!(state.field, Field::default());
    assert_eq!(state.health, 20);
    assert_eq!(state.round, 1);
    assert!(state.on_game_start);
    assert!(state.check_conservation().is_empty());

    let knowledge_in_robinson = session
        .pool_cards(Pool::Robinson)
        .iter()
        .filter(|d| d.card_type == CardType::Knowledge)
        .count();
    assert_eq!(knowledge_in_robinson, 2);
}

/// Test an encounter from offer to fight.
#[test]
fn test_encounter_and_fight() {
    init_logging();
    let (mut session, _) = new_session(starter_catalog(Some(2)), 7);
    session.setup().unwrap();

    let offer = session.offer_encounters().unwrap();
    assert_eq!(offer.len(), 2);
    assert!(session.state().pools.is_empty(Pool::Danger));
    assert!(session.state().pools.is_empty(Pool::Knowledge));

    let chosen = offer[0];
    session.choose_encounter(&chosen).unwrap();
    assert_eq!(session.state().draw_point, 2);
    assert!(session.state().on_draw);
    // The pair not chosen is discarded.
    assert_eq!(session.state().pools.len(Pool::Graveyard), 2);

    assert!(session.draw().unwrap().is_some());
    assert!(session.draw().unwrap().is_some());
    assert_eq!(session.state().draw_point, 0);
    assert_eq!(session.state().hand.len(), 2);

    // Every card in the Robinson pool scores 2.
    assert_eq!(session.attack_score(), 4);
    assert_eq!(session.danger_score(), Some(-1));
    assert!(session.resolution_options().fight);

    assert_eq!(session.fight().unwrap(), Some(RoundOutcome::Won));

    let state = session.state();
    assert_eq!(state.win, 1);
    assert_eq!(state.round, 2);
    assert!(state.hand.is_empty());
    assert_eq!(state.danger_selected, None);
    assert_eq!(state.pools.cards(Pool::Destroy), &[chosen.danger]);
    assert!(state.pools.cards(Pool::Deck).contains(&chosen.knowledge));
    assert_eq!(state.pools.len(Pool::Deck), 3);
    assert!(state.check_conservation().is_empty());
}

/// Test fleeing a danger the hand cannot match.
#[test]
fn test_encounter_and_flee() {
    let (mut session, _) = new_session(starter_catalog(None), 3);
    session.setup().unwrap();
    let offer = session.offer_encounters().unwrap();
    session.choose_encounter(&offer[1]).unwrap();

    // Run before drawing anything.
    assert_eq!(session.danger_score(), Some(3));
    assert_eq!(session.flee().unwrap(), Some(RoundOutcome::Fled { damage: 3 }));

    let state = session.state();
    assert_eq!(state.health, 17);
    assert_eq!(state.lose, 1);
    assert_eq!(state.round, 2);
    assert_eq!(state.draw_point, 0);
    assert_eq!(state.pools.len(Pool::Graveyard), 4);
    assert!(state.check_conservation().is_empty());
}

/// Test that the next offer after exhausting the encounter pools raises
/// the difficulty.
#[test]
fn test_second_offer_advances_field() {
    let (mut session, _) = new_session(starter_catalog(None), 5);
    session.setup().unwrap();
    let offer = session.offer_encounters().unwrap();
    session.choose_encounter(&offer[0]).unwrap();
    session.flee().unwrap();

    let offer = session.offer_encounters().unwrap();

    assert_eq!(session.state().field, Field::new(1));
    assert_eq!(offer.len(), 2);
    assert!(session.state().pools.is_empty(Pool::Graveyard));
}

/// Test that drawing without draw points changes nothing.
#[test]
fn test_insufficient_draw_point() {
    let (mut session, _) = new_session(starter_catalog(None), 11);
    session.setup().unwrap();
    let before = session.state().clone();

    assert_eq!(session.draw().unwrap(), None);

    assert_eq!(session.state(), &before);
}

/// Test paying health for a draw.
#[test]
fn test_force_draw() {
    let (mut session, _) = new_session(starter_catalog(None), 13);
    session.setup().unwrap();

    let drawn = session.force_draw().unwrap();

    assert!(drawn.is_some());
    let state = session.state();
    assert_eq!(state.health, 19);
    assert_eq!(state.draw_point, 0);
    assert_eq!(state.hand.len(), 1);
    let last_two: Vec<_> = state
        .chat_log
        .iter()
        .skip(state.chat_log.len() - 2)
        .map(|c| c.message.as_str())
        .collect();
    assert_eq!(last_two[0], "Injured, health -1");
    assert!(last_two[1].starts_with("Drew "));
}

/// Test that an AGE card with STOP ends the drawing.
#[test]
fn test_age_stop_effect() {
    init_logging();
    let catalog = StaticCatalog::new(vec![
        danger("Storm", 3, [3, 5, 7]),
        knowledge("Fishing", 2),
        age("Exhausted", "STOP", 0),
    ]);
    let (mut session, _) = new_session(catalog, 17);
    session.setup().unwrap();
    let offer = session.offer_encounters().unwrap();
    session.choose_encounter(&offer[0]).unwrap();
    assert_eq!(session.state().draw_point, 3);

    // The only Robinson card is the Knowledge filler.
    session.draw().unwrap().unwrap();
    assert_eq!(session.state().draw_point, 2);

    // The Robinson pool refills with the Age card alone.
    let age_card = session.draw().unwrap().unwrap();
    let state = session.state();
    assert!(state.card(age_card).unwrap().is_age());
    assert!(!state.hand[1].is_active);
    assert_eq!(state.draw_point, 0);

    assert_eq!(session.draw().unwrap(), None);
}

/// Test activating a hand ability once.
#[test]
fn test_activate_hand_card_once() {
    let mut eat = robinson("Coconut", Some(0));
    eat.action_data = Some(castaway::ActionData::new("Eat", "HP", 2));
    let catalog = StaticCatalog::new(vec![eat, danger("Storm", 1, [3, 5, 7]), knowledge("Fishing", 0)]);
    let (mut session, _) = new_session(catalog, 19);
    session.setup().unwrap();
    let offer = session.offer_encounters().unwrap();
    session.choose_encounter(&offer[0]).unwrap();

    // Draw until the coconut shows up.
    let mut coconut = None;
    while let Some(entity) = session.force_draw().unwrap() {
        if session.state().title(entity) == "Coconut" {
            coconut = session.state().hand.last().map(|h| h.hand_id);
            break;
        }
    }
    let hand_id = coconut.unwrap();
    let health = session.state().health;

    assert!(session.activate_hand_card(hand_id).unwrap());
    assert!(!session.activate_hand_card(hand_id).unwrap());
    assert_eq!(session.state().health, health + 2);
}

/// Test that a session continues from its save.
#[test]
fn test_restore_mid_encounter() {
    init_logging();
    let (mut session, store) = new_session(island_catalog(), 23);
    session.setup().unwrap();
    let offer = session.offer_encounters().unwrap();
    session.choose_encounter(&offer[0]).unwrap();
    session.draw().unwrap();

    let mut restored = Session::new(GameConfig::default(), island_catalog(), store);
    assert_eq!(restored.setup().unwrap(), SetupOutcome::Restored);

    assert_eq!(restored.state(), session.state());
    assert!(restored.state().danger_selected.is_some());

    // Both continue identically, shuffles included.
    session.fight().unwrap();
    restored.fight().unwrap();
    session.offer_encounters().unwrap();
    restored.offer_encounters().unwrap();
    assert_eq!(
        restored.state().pools.cards(Pool::Danger),
        session.state().pools.cards(Pool::Danger)
    );
}

/// Test that a save taken while an offer is open keeps the offered cards.
#[test]
fn test_restore_with_pending_offer() {
    let (mut session, store) = new_session(island_catalog(), 29);
    session.setup().unwrap();
    let offer = session.offer_encounters().unwrap();

    let mut restored = Session::new(GameConfig::default(), island_catalog(), store);
    restored.setup().unwrap();

    assert_eq!(restored.state().offered, offer);
    assert!(restored.state().check_conservation().is_empty());
    assert_eq!(restored.offer_encounters().unwrap(), offer);
}

/// Test the JSON round-trip of a busy state.
#[test]
fn test_state_json_roundtrip() {
    let (mut session, _) = new_session(island_catalog(), 31);
    session.setup().unwrap();
    let offer = session.offer_encounters().unwrap();
    session.choose_encounter(&offer[0]).unwrap();
    session.force_draw().unwrap();
    session.force_draw().unwrap();

    let json = serde_json::to_string(session.state()).unwrap();
    let restored: SessionState = serde_json::from_str(&json).unwrap();

    assert_eq!(&restored, session.state());
    assert_eq!(session.load_save().unwrap().as_ref(), Some(session.state()));
}

/// Test that reset makes the next setup deal a new game.
#[test]
fn test_reset_then_setup_is_fresh() {
    let (mut session, store) = new_session(starter_catalog(None), 37);
    session.setup().unwrap();
    session.offer_encounters().unwrap();

    session.reset().unwrap();
    assert_eq!(store.read_key("onGameStart").unwrap(), None);
    assert_eq!(store.read_key("save").unwrap(), None);

    assert_eq!(session.setup().unwrap(), SetupOutcome::Fresh);
    assert!(session.state().offered.is_empty());
    assert_eq!(session.state().pools.len(Pool::Danger), 2);
}

/// Test that a corrupt save is replaced by a fresh game.
#[test]
fn test_corrupt_save_starts_fresh() {
    init_logging();
    let store = MemoryStore::new();
    store.write_key("onGameStart", "true").unwrap();
    store.write_key("save", r#"{"field": 9, "round": "two"}"#).unwrap();

    let mut session = Session::new(GameConfig::default().with_seed(41), starter_catalog(None), store.clone());

    assert_eq!(session.setup().unwrap(), SetupOutcome::Fresh);
    assert_eq!(session.state().round, 1);
    assert!(session.load_save().unwrap().is_some());
}

/// Test custom storage keys.
#[test]
fn test_custom_storage_keys() {
    let store = MemoryStore::new();
    let config = GameConfig::default()
        .with_seed(43)
        .with_storage_keys("castaway/save", "castaway/started");
    let mut session = Session::new(config, starter_catalog(None), store.clone());
    session.setup().unwrap();

    assert_eq!(store.read_key("castaway/started").unwrap().as_deref(), Some("true"));
    assert!(store.read_key("save").unwrap().is_none());
}

/// Test that a failed catalog fetch fails setup.
#[test]
fn test_catalog_unavailable() {
    struct Offline;
    impl castaway::CardCatalog for Offline {
        fn fetch_all_cards(&self, _limit: usize) -> castaway::CatalogResponse {
            castaway::CatalogResponse::failed("Failed to get cards")
        }
    }

    let store = MemoryStore::new();
    let mut session = Session::new(GameConfig::default(), Offline, store.clone());

    let err = session.setup().unwrap_err();

    assert!(matches!(err, GameError::CatalogUnavailable { .. }));
    assert!(store.is_empty());
}

/// Test that a negative quantity fails setup.
#[test]
fn test_invalid_catalog_entry() {
    let catalog = StaticCatalog::new(vec![CatalogRecord::new("Ghost", CardType::Robinson, -2)]);
    let (mut session, _) = new_session(catalog, 47);

    let err = session.setup().unwrap_err();

    assert!(matches!(err, GameError::InvalidCatalogEntry { ref title, .. } if title == "Ghost"));
}

/// Test that choosing a pair that was never offered is rejected.
#[test]
fn test_invalid_selection() {
    let (mut session, _) = new_session(starter_catalog(None), 53);
    session.setup().unwrap();
    let mut forged = session.offer_encounters().unwrap()[0];
    forged.id = 5;

    let err = session.choose_encounter(&forged).unwrap_err();

    assert!(matches!(err, GameError::InvalidSelection { id: 5 }));
    assert!(session.state().danger_selected.is_none());
}
