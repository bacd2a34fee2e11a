//! Catalog loading: fetching card records and expanding them into
//! play instances.
//!
//! The catalog lives in an external document store. The engine only needs
//! one capability from it, [`CardCatalog::fetch_all_cards`], which returns
//! the records as the store's API shapes them. [`load_catalog`] validates
//! those records into [`CardDefinition`]s and [`expand`] turns each
//! definition into `quantity` physical instances.

use log::debug;
use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardId, CardType};
use crate::core::entity::EntityId;
use crate::core::state::SessionState;
use crate::effects::ActionData;
use crate::error::GameError;

/// A card record as served by the document store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,

    pub title: String,

    #[serde(rename = "type")]
    pub card_type: CardType,

    #[serde(default)]
    pub quantity: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pick: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub danger: Option<Vec<i64>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,

    /// Id of the referenced action record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    /// The referenced action, joined in by the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_data: Option<ActionData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

impl CatalogRecord {
    /// Create a record with the given type and quantity.
    #[must_use]
    pub fn new(title: impl Into<String>, card_type: CardType, quantity: i64) -> Self {
        Self {
            record_id: None,
            title: title.into(),
            card_type,
            quantity,
            pick: None,
            danger: None,
            score: None,
            action: None,
            action_data: None,
            token: None,
            level: None,
        }
    }

    /// Validate this record into a definition with the given id.
    pub fn into_definition(self, id: CardId) -> Result<CardDefinition, GameError> {
        let invalid = |reason: String| GameError::InvalidCatalogEntry {
            title: self.title.clone(),
            reason,
        };

        let quantity = u32::try_from(self.quantity)
            .map_err(|_| invalid(format!("quantity {} is not a valid copy count", self.quantity)))?;
        if let Some(level) = self.level {
            if !(1..=2).contains(&level) {
                return Err(invalid(format!("level {level} is not 1 or 2")));
            }
        }

        Ok(CardDefinition {
            id,
            record_id: self.record_id,
            title: self.title,
            card_type: self.card_type,
            quantity,
            pick: self.pick,
            danger_values: self.danger,
            score: self.score,
            action: self.action_data,
            token: self.token,
            level: self.level,
        })
    }
}

/// What a catalog fetch returns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub items: Vec<CatalogRecord>,
}

impl CatalogResponse {
    /// A successful response.
    #[must_use]
    pub fn ok(items: Vec<CatalogRecord>) -> Self {
        Self {
            success: true,
            message: String::new(),
            items,
        }
    }

    /// A failed response.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            items: Vec::new(),
        }
    }
}

/// Source of card records.
///
/// Implemented by the persistence layer; [`StaticCatalog`] serves records
/// from memory.
pub trait CardCatalog {
    /// Fetch up to `limit` card records in one request.
    fn fetch_all_cards(&self, limit: usize) -> CatalogResponse;
}

/// In-memory catalog.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    records: Vec<CatalogRecord>,
}

impl StaticCatalog {
    /// Serve the given records.
    #[must_use]
    pub fn new(records: Vec<CatalogRecord>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of catalog records.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }
}

impl CardCatalog for StaticCatalog {
    fn fetch_all_cards(&self, limit: usize) -> CatalogResponse {
        CatalogResponse::ok(self.records.iter().take(limit).cloned().collect())
    }
}

/// Fetch the full catalog and validate every record.
///
/// Definition ids are assigned in catalog order starting at 0.
pub fn load_catalog<C: CardCatalog + ?Sized>(
    catalog: &C,
    limit: usize,
) -> Result<Vec<CardDefinition>, GameError> {
    let response = catalog.fetch_all_cards(limit);
    if !response.success {
        return Err(GameError::CatalogUnavailable {
            message: response.message,
        });
    }

    let definitions = response
        .items
        .into_iter()
        .enumerate()
        .map(|(i, record)| record.into_definition(CardId::new(i as u32)))
        .collect::<Result<Vec<_>, _>>()?;
    debug!("loaded {} card definitions", definitions.len());
    Ok(definitions)
}

/// Create `quantity` instances of each definition.
///
/// Instances are allocated in the session arena but not placed in any
/// pool; the caller decides where they go.
pub fn expand(state: &mut SessionState, definitions: &[CardDefinition]) -> Vec<EntityId> {
    definitions
        .iter()
        .flat_map(|def| std::iter::repeat(def).take(def.quantity as usize))
        .map(|def| state.alloc_instance(def))
        .collect()
}
