//! Product configurator models.
//!
//! A product's configurator is a set of groups (axes of variation such as
//! "Color"), each owning the options a customer can pick. The tree is a
//! read-only snapshot built per request by the configurator gateway.

use serde::Serialize;
use sqlx::FromRow;
use storefront_core::configurator::ConfiguratorType;
use storefront_core::types::DbId;

use super::media::Media;

// ---------------------------------------------------------------------------
// Flat row
// ---------------------------------------------------------------------------

/// One row of the configurator listing query: a single option joined with
/// its group and set, plus the raw translation payloads.
#[derive(Debug, Clone, FromRow)]
pub struct ConfiguratorRow {
    pub set_id: DbId,
    pub set_name: String,
    pub set_type: i32,
    pub group_id: DbId,
    pub group_name: String,
    pub group_description: Option<String>,
    pub group_position: i32,
    pub option_id: DbId,
    pub option_name: String,
    pub option_position: i32,
    pub group_translation: Option<serde_json::Value>,
    pub group_fallback_translation: Option<serde_json::Value>,
    pub option_translation: Option<serde_json::Value>,
    pub option_fallback_translation: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

/// The configurator of one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfiguratorSet {
    pub id: DbId,
    pub name: String,
    pub configurator_type: ConfiguratorType,
    /// Ordered by (position, name).
    pub groups: Vec<ConfiguratorGroup>,
}

/// One axis of variation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfiguratorGroup {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub position: i32,
    /// Whether the current selection contains an option of this group.
    pub selected: bool,
    /// Ordered by (position, name).
    pub options: Vec<ConfiguratorOption>,
}

/// One selectable value of a group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfiguratorOption {
    pub id: DbId,
    pub name: String,
    pub position: i32,
    pub selected: bool,
    /// Whether the option can be combined with the current selection.
    pub active: bool,
    pub media: Option<Media>,
    /// Ids of options this one co-occurs with on an available variant.
    pub combinations: Vec<DbId>,
}

impl ConfiguratorSet {
    /// All option ids in tree order.
    pub fn option_ids(&self) -> Vec<DbId> {
        self.groups
            .iter()
            .flat_map(|g| g.options.iter().map(|o| o.id))
            .collect()
    }
}
