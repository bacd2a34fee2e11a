//! Card pools: ordered locations for every card not in the hand or an
//! encounter, and the rules that refill them.

pub mod manager;
pub mod replenish;

pub use manager::{Pool, PoolManager, PoolPosition};
pub use replenish::{replenish_encounter_pools, replenish_robinson};
