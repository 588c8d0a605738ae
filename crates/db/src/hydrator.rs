//! Row-to-tree hydration for configurator listings.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use storefront_core::configurator::ConfiguratorType;
use storefront_core::error::CoreError;
use storefront_core::translation::{translate, translate_optional, FIELD_DESCRIPTION, FIELD_NAME};
use storefront_core::types::DbId;

use crate::models::configurator::{
    ConfiguratorGroup, ConfiguratorOption, ConfiguratorRow, ConfiguratorSet,
};

/// Builds a [`ConfiguratorSet`] from the flat rows of the listing query.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfiguratorHydrator;

impl ConfiguratorHydrator {
    /// Hydrate rows in a single pass.
    ///
    /// Groups and options keep the order in which they first appear, so the
    /// query's ordering carries over. Rows repeating an already-seen group or
    /// option are ignored. No rows means the product has no configurator.
    pub fn hydrate(&self, rows: &[ConfiguratorRow]) -> Result<Option<ConfiguratorSet>, CoreError> {
        let Some(first) = rows.first() else {
            return Ok(None);
        };

        let mut set = self.hydrate_set(first)?;
        let mut group_index: HashMap<DbId, usize> = HashMap::new();
        let mut seen_options: HashSet<DbId> = HashSet::new();

        for row in rows {
            let index = match group_index.entry(row.group_id) {
                Entry::Occupied(entry) => *entry.get(),
                Entry::Vacant(entry) => {
                    set.groups.push(self.hydrate_group(row));
                    *entry.insert(set.groups.len() - 1)
                }
            };

            if seen_options.insert(row.option_id) {
                set.groups[index].options.push(self.hydrate_option(row));
            }
        }

        Ok(Some(set))
    }

    fn hydrate_set(&self, row: &ConfiguratorRow) -> Result<ConfiguratorSet, CoreError> {
        Ok(ConfiguratorSet {
            id: row.set_id,
            name: row.set_name.clone(),
            configurator_type: ConfiguratorType::from_code(row.set_type)?,
            groups: Vec::new(),
        })
    }

    fn hydrate_group(&self, row: &ConfiguratorRow) -> ConfiguratorGroup {
        let layers = [
            row.group_fallback_translation.as_ref(),
            row.group_translation.as_ref(),
        ];

        ConfiguratorGroup {
            id: row.group_id,
            name: translate(&row.group_name, FIELD_NAME, &layers),
            description: translate_optional(
                row.group_description.as_deref(),
                FIELD_DESCRIPTION,
                &layers,
            ),
            position: row.group_position,
            selected: false,
            options: Vec::new(),
        }
    }

    fn hydrate_option(&self, row: &ConfiguratorRow) -> ConfiguratorOption {
        let layers = [
            row.option_fallback_translation.as_ref(),
            row.option_translation.as_ref(),
        ];

        ConfiguratorOption {
            id: row.option_id,
            name: translate(&row.option_name, FIELD_NAME, &layers),
            position: row.option_position,
            selected: false,
            active: false,
            media: None,
            combinations: Vec::new(),
        }
    }
}
