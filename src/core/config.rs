//! Session configuration.
//!
//! `GameConfig` holds the tunables of a session: starting health, the size
//! of the catalog fetch, how many encounters are offered per round, the
//! storage keys used for persistence and an optional fixed shuffle seed.
//!
//! Every field has a default, so a partial JSON document is a valid config:
//!
//! ```
//! use castaway::core::GameConfig;
//!
//! let config = GameConfig::from_json(r#"{ "starting_health": 12 }"#).unwrap();
//! assert_eq!(config.starting_health, 12);
//! assert_eq!(config.offers_per_encounter, 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Default storage key for the serialized session.
pub const DEFAULT_SAVE_KEY: &str = "save";

/// Default storage key for the "game started" flag.
pub const DEFAULT_START_FLAG_KEY: &str = "onGameStart";

/// Tunables for a game session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Health at the start of a fresh game.
    pub starting_health: i64,

    /// Page size used to fetch the whole catalog in one request.
    pub catalog_limit: usize,

    /// Maximum encounter pairs offered per round.
    pub offers_per_encounter: usize,

    /// Key the serialized session is stored under.
    pub save_key: String,

    /// Key the "game started" flag is stored under.
    pub start_flag_key: String,

    /// Fixed shuffle seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_health: 20,
            catalog_limit: 1000,
            offers_per_encounter: 2,
            save_key: DEFAULT_SAVE_KEY.to_string(),
            start_flag_key: DEFAULT_START_FLAG_KEY.to_string(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON, filling unset fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        serde_json::from_str(json).map_err(GameError::Config)
    }

    /// Set the starting health.
    #[must_use]
    pub fn with_starting_health(mut self, health: i64) -> Self {
        self.starting_health = health;
        self
    }

    /// Set the catalog fetch size.
    #[must_use]
    pub fn with_catalog_limit(mut self, limit: usize) -> Self {
        self.catalog_limit = limit;
        self
    }

    /// Set how many encounters are offered per round.
    #[must_use]
    pub fn with_offers_per_encounter(mut self, offers: usize) -> Self {
        self.offers_per_encounter = offers;
        self
    }

    /// Use a fixed shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Override both storage keys (e.g. for separate save slots).
    #[must_use]
    pub fn with_storage_keys(
        mut self,
        save_key: impl Into<String>,
        start_flag_key: impl Into<String>,
    ) -> Self {
        self.save_key = save_key.into();
        self.start_flag_key = start_flag_key.into();
        self
    }
}
