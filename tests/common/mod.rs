//! Shared fixtures for integration tests.

#![allow(dead_code)]

use castaway::{
    ActionData, CardType, CatalogRecord, GameConfig, MemoryStore, Session, StaticCatalog,
};

/// Route `log` output through the test harness. Safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn robinson(title: &str, score: Option<i64>) -> CatalogRecord {
    let mut record = CatalogRecord::new(title, CardType::Robinson, 1);
    record.score = score;
    record
}

pub fn danger(title: &str, pick: i64, values: [i64; 3]) -> CatalogRecord {
    let mut record = CatalogRecord::new(title, CardType::Danger, 1);
    record.pick = Some(pick);
    record.danger = Some(values.to_vec());
    record
}

pub fn knowledge(title: &str, score: i64) -> CatalogRecord {
    let mut record = CatalogRecord::new(title, CardType::Knowledge, 1);
    record.score = Some(score);
    record
}

pub fn age(title: &str, codex: &str, value: i64) -> CatalogRecord {
    let mut record = CatalogRecord::new(title, CardType::Age, 1);
    record.level = Some(1);
    record.action_data = Some(ActionData::new(title, codex, value));
    record
}

/// Two Robinson, two Danger (pick 2, values [3, 5, 7]) and two Knowledge
/// (score 2) cards, one copy each, no Age cards.
pub fn starter_catalog(robinson_score: Option<i64>) -> StaticCatalog {
    StaticCatalog::new(vec![
        robinson("Rope", robinson_score),
        robinson("Knife", robinson_score),
        danger("Storm", 2, [3, 5, 7]),
        danger("Wild Boar", 2, [3, 5, 7]),
        knowledge("Fishing", 2),
        knowledge("Fire Making", 2),
    ])
}

/// A larger catalog with every card type and codex.
pub fn island_catalog() -> StaticCatalog {
    let mut records = vec![
        robinson("Rope", Some(1)),
        robinson("Knife", Some(2)),
        robinson("Driftwood", None),
        danger("Storm", 2, [3, 5, 7]),
        danger("Wild Boar", 1, [2, 4, 6]),
        danger("Shark", 3, [5, 7, 9]),
        knowledge("Fishing", 2),
        knowledge("Fire Making", 1),
        knowledge("Shelter", 3),
        age("Tired", "CARD", -1),
        age("Sick", "HP", -2),
        age("Exhausted", "STOP", 0),
        age("Forgetful", "ZERO", 0),
    ];
    records[0].quantity = 3;
    let mut eat = robinson("Coconut", Some(0));
    eat.quantity = 2;
    eat.action_data = Some(ActionData::new("Eat", "HP", 1));
    records.push(eat);
    StaticCatalog::new(records)
}

pub fn new_session(
    catalog: StaticCatalog,
    seed: u64,
) -> (Session<StaticCatalog, MemoryStore>, MemoryStore) {
    let store = MemoryStore::new();
    let session = Session::new(GameConfig::default().with_seed(seed), catalog, store.clone());
    (session, store)
}
