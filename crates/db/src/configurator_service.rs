//! Product configurator assembly for a customer's current selection.
//!
//! Combines the three configurator gateway reads: the listing provides the
//! tree, the combinations decide which options stay selectable, and picture
//! configurators get their option images attached.

use std::collections::BTreeMap;

use sqlx::PgPool;
use storefront_core::configurator::{
    is_option_active, is_option_selected, Combinations, ConfiguratorType, Selection,
};
use storefront_core::context::ShopContext;
use storefront_core::types::DbId;

use crate::models::configurator::ConfiguratorSet;
use crate::models::media::Media;
use crate::repositories::configurator_gateway::ConfiguratorGateway;
use crate::repositories::media_repo::MediaGateway;

/// Builds the configurator a storefront renders for a product.
#[derive(Debug, Clone)]
pub struct ConfiguratorService<M> {
    gateway: ConfiguratorGateway<M>,
}

impl<M: MediaGateway> ConfiguratorService<M> {
    pub fn new(gateway: ConfiguratorGateway<M>) -> Self {
        Self { gateway }
    }

    /// Load the product's configurator and apply `selection` (group id ->
    /// option id) to it.
    ///
    /// Returns `None` for products without a configurator. Media is only
    /// loaded for picture configurators.
    pub async fn product_configurator(
        &self,
        pool: &PgPool,
        product_id: DbId,
        context: &ShopContext,
        selection: &Selection,
    ) -> Result<Option<ConfiguratorSet>, sqlx::Error> {
        let Some(mut set) = self.gateway.get(pool, product_id, context).await? else {
            return Ok(None);
        };

        let combinations = self
            .gateway
            .get_product_combinations(pool, product_id)
            .await?;

        let media = if set.configurator_type == ConfiguratorType::Picture {
            self.gateway
                .get_configurator_media(pool, product_id, context)
                .await?
        } else {
            BTreeMap::new()
        };

        apply_selection(&mut set, &combinations, media, selection);
        Ok(Some(set))
    }
}

/// Mark selected groups and options, compute option availability, and
/// attach combinations and media.
fn apply_selection(
    set: &mut ConfiguratorSet,
    combinations: &Combinations,
    mut media: BTreeMap<DbId, Media>,
    selection: &Selection,
) {
    let only_one_group = set.groups.len() == 1;

    for group in &mut set.groups {
        group.selected = selection.contains_key(&group.id);

        for option in &mut group.options {
            option.selected = is_option_selected(option.id, selection);
            option.active =
                is_option_active(group.id, option.id, combinations, selection, only_one_group);
            option.combinations = combinations.get(&option.id).cloned().unwrap_or_default();
            option.media = media.remove(&option.id);
        }
    }
}
