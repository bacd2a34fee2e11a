//! Session lifecycle: setup, restore, reset and persistence around the
//! round rules.

pub mod controller;
pub mod storage;

pub use controller::{Session, SetupOutcome};
pub use storage::{KeyValueStore, MemoryStore};
