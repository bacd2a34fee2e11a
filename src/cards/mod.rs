//! Card system: definitions, instances, registry and catalog loading.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardType`: Robinson, Danger, Knowledge or Age
//! - `CardDefinition`: Static catalog entry
//! - `CardInstance`: One physical copy with its current score
//! - `CardRegistry`: Card definition lookup
//! - `CardCatalog`: Where definitions come from

pub mod catalog;
pub mod definition;
pub mod instance;
pub mod registry;

pub use catalog::{
    expand, load_catalog, CardCatalog, CatalogRecord, CatalogResponse, StaticCatalog,
};
pub use definition::{CardDefinition, CardId, CardType};
pub use instance::CardInstance;
pub use registry::CardRegistry;
