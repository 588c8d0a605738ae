//! Product configurator rules.
//!
//! Provides configurator type codes, parsing of the aggregated combination
//! strings produced by the combination query, and the pure evaluation logic
//! deciding which options stay selectable for a given selection. The `core`
//! crate contains no database dependencies; evaluation is done against
//! pre-loaded data passed in by the caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Configurator type codes stored in `configurator_sets.configurator_type`.
pub const CONFIGURATOR_TYPE_STANDARD: i32 = 0;
pub const CONFIGURATOR_TYPE_SELECTION: i32 = 1;
pub const CONFIGURATOR_TYPE_PICTURE: i32 = 2;

/// Separator used when option ids are aggregated into a single string.
pub const COMBINATION_SEPARATOR: char = '|';

/// A customer's current choice: group id -> selected option id.
pub type Selection = BTreeMap<DbId, DbId>;

/// Option id -> ids of the options it can be combined with.
pub type Combinations = BTreeMap<DbId, Vec<DbId>>;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// How the storefront presents a configurator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfiguratorType {
    /// Free choice per group.
    Standard,
    /// Step-by-step selection, group after group.
    Selection,
    /// Options are presented with their representative images.
    Picture,
}

impl ConfiguratorType {
    /// Convert from the database type code.
    pub fn from_code(code: i32) -> Result<Self, CoreError> {
        match code {
            CONFIGURATOR_TYPE_STANDARD => Ok(Self::Standard),
            CONFIGURATOR_TYPE_SELECTION => Ok(Self::Selection),
            CONFIGURATOR_TYPE_PICTURE => Ok(Self::Picture),
            _ => Err(CoreError::Validation(format!(
                "Invalid configurator type {code}. Must be one of: \
                 {CONFIGURATOR_TYPE_STANDARD}, {CONFIGURATOR_TYPE_SELECTION}, \
                 {CONFIGURATOR_TYPE_PICTURE}"
            ))),
        }
    }

    /// Convert to the database type code.
    pub fn code(&self) -> i32 {
        match self {
            Self::Standard => CONFIGURATOR_TYPE_STANDARD,
            Self::Selection => CONFIGURATOR_TYPE_SELECTION,
            Self::Picture => CONFIGURATOR_TYPE_PICTURE,
        }
    }
}

// ---------------------------------------------------------------------------
// Combination parsing
// ---------------------------------------------------------------------------

/// Split an aggregated combination string into option ids.
///
/// `None` and the empty string both mean "no co-occurring options" and
/// yield an empty list. The order of the aggregate is preserved.
pub fn parse_combinations(raw: Option<&str>) -> Result<Vec<DbId>, CoreError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(Vec::new());
    };

    raw.split(COMBINATION_SEPARATOR)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<DbId>().map_err(|_| {
                CoreError::Validation(format!(
                    "Invalid option id '{part}' in combination list '{raw}'"
                ))
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Selection evaluation
// ---------------------------------------------------------------------------

/// Whether an option of `group_id` with the given combination list can be
/// chosen alongside the current selection.
///
/// An option without any combination is never valid. Otherwise every
/// selected option of another group must appear in the list; the option's
/// own group is ignored so that switching within a group stays possible.
pub fn is_combination_valid(group_id: DbId, combinations: &[DbId], selection: &Selection) -> bool {
    if combinations.is_empty() {
        return false;
    }

    selection
        .iter()
        .all(|(&selected_group, selected_option)| {
            selected_group == group_id || combinations.contains(selected_option)
        })
}

/// Whether an option should be offered as selectable.
///
/// In a configurator with a single group there is nothing to combine with,
/// so any option used by an available variant stays active.
pub fn is_option_active(
    group_id: DbId,
    option_id: DbId,
    combinations: &Combinations,
    selection: &Selection,
    only_one_group: bool,
) -> bool {
    match combinations.get(&option_id) {
        Some(list) => only_one_group || is_combination_valid(group_id, list, selection),
        None => false,
    }
}

/// Whether `option_id` is one of the selected options.
pub fn is_option_selected(option_id: DbId, selection: &Selection) -> bool {
    selection.values().any(|&selected| selected == option_id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
