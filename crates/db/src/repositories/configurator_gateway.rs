//! Storefront reads for product configurators.
//!
//! Covers the configurator listing (set, groups, options), the
//! representative image of each option, and the option combinations
//! available on active, in-stock variants.

use std::collections::{BTreeMap, HashMap};

use sqlx::PgPool;
use storefront_core::configurator::{parse_combinations, Combinations};
use storefront_core::context::ShopContext;
use storefront_core::error::CoreError;
use storefront_core::types::DbId;

use crate::field_helper::{FieldHelper, GROUP_ALIAS, OPTION_ALIAS, SET_ALIAS};
use crate::hydrator::ConfiguratorHydrator;
use crate::models::configurator::{ConfiguratorRow, ConfiguratorSet};
use crate::models::media::Media;
use crate::query::SelectQuery;
use crate::repositories::media_repo::{MediaGateway, MediaRepo};

/// Reads configurator data for a single product.
#[derive(Debug, Clone)]
pub struct ConfiguratorGateway<M> {
    field_helper: FieldHelper,
    hydrator: ConfiguratorHydrator,
    media_gateway: M,
}

impl Default for ConfiguratorGateway<MediaRepo> {
    fn default() -> Self {
        Self::new(FieldHelper, ConfiguratorHydrator, MediaRepo)
    }
}

impl<M: MediaGateway> ConfiguratorGateway<M> {
    pub fn new(field_helper: FieldHelper, hydrator: ConfiguratorHydrator, media_gateway: M) -> Self {
        Self {
            field_helper,
            hydrator,
            media_gateway,
        }
    }

    /// Load the configurator set of a product with its groups and options,
    /// translated for `context`.
    ///
    /// Returns `None` for products without a configurator.
    pub async fn get(
        &self,
        pool: &PgPool,
        product_id: DbId,
        context: &ShopContext,
    ) -> Result<Option<ConfiguratorSet>, sqlx::Error> {
        let mut query = Self::base_query();
        query
            .select_all(self.field_helper.configurator_set_fields())
            .select_all(self.field_helper.configurator_group_fields())
            .select_all(self.field_helper.configurator_option_fields());

        self.field_helper
            .add_configurator_translation(&mut query, context);

        query
            .and_where("products.id = :product_id")
            .set_parameter("product_id", product_id);

        let built = query.build().map_err(build_error)?;
        let rows = built
            .query_as::<ConfiguratorRow>()
            .fetch_all(pool)
            .await?;

        let set = self
            .hydrator
            .hydrate(&rows)
            .map_err(|e| decode_error("set_type", e))?;

        tracing::debug!(
            product_id,
            rows = rows.len(),
            groups = set.as_ref().map_or(0, |s| s.groups.len()),
            "Loaded product configurator"
        );
        Ok(set)
    }

    /// Load the representative image of every option of a product's
    /// configurator.
    ///
    /// For each option the lowest-position product image whose mapping rules
    /// reference the option is chosen. Options without such an image, or whose
    /// media cannot be resolved, are absent from the result.
    pub async fn get_configurator_media(
        &self,
        pool: &PgPool,
        product_id: DbId,
        context: &ShopContext,
    ) -> Result<BTreeMap<DbId, Media>, sqlx::Error> {
        let mut image_query = SelectQuery::new();
        image_query
            .select("image.media_id")
            .from("product_images", "image")
            .inner_join(
                "product_image_mappings",
                "mapping",
                "mapping.image_id = image.id",
            )
            .inner_join(
                "product_image_mapping_rules",
                "rules",
                "rules.mapping_id = mapping.id",
            )
            .and_where("image.product_id = product.id")
            .and_where("rules.option_id = option_relation.option_id")
            .order_by("image.position")
            .order_by("image.id")
            .limit(1);

        let mut query = SelectQuery::new();
        query
            .select("option_relation.option_id")
            .select_sub_query(image_query, "media_id")
            .from("products", "product")
            .inner_join(
                "configurator_set_option_relations",
                "option_relation",
                "product.configurator_set_id = option_relation.set_id",
            )
            .and_where("product.id = :product_id")
            .group_by("option_relation.option_id")
            .group_by("product.id")
            .order_by("option_relation.option_id")
            .set_parameter("product_id", product_id);

        let built = query.build().map_err(build_error)?;
        let rows = built
            .query_as::<(DbId, Option<DbId>)>()
            .fetch_all(pool)
            .await?;

        let candidates = option_media_ids(&rows);
        if candidates.is_empty() {
            tracing::debug!(product_id, "No configurator images mapped");
            return Ok(BTreeMap::new());
        }

        let media_ids = unique_media_ids(&candidates);
        let media = self
            .media_gateway
            .get_list(pool, &media_ids, context)
            .await?;

        let result = pair_option_media(&candidates, &media);
        tracing::debug!(
            product_id,
            candidates = candidates.len(),
            resolved = result.len(),
            "Loaded configurator media"
        );
        Ok(result)
    }

    /// Load, for every option used by an active and available variant of the
    /// product, the options it co-occurs with on such a variant.
    ///
    /// A variant is available when
    /// `last_stock * in_stock >= last_stock * min_purchase`. An option whose
    /// variants carry no other option maps to an empty list.
    pub async fn get_product_combinations(
        &self,
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Combinations, sqlx::Error> {
        let mut query = SelectQuery::new();
        query
            .select("relations.option_id")
            .select("string_agg(DISTINCT assigned_relations.option_id::text, '|') AS combinations")
            .from("configurator_option_relations", "relations")
            .inner_join(
                "product_variants",
                "variant",
                "variant.id = relations.variant_id \
                 AND variant.product_id = :product_id \
                 AND variant.active = TRUE",
            )
            .inner_join(
                "products",
                "product",
                "product.id = variant.product_id \
                 AND (product.last_stock * variant.in_stock) >= \
                     (product.last_stock * variant.min_purchase)",
            )
            .left_join(
                "configurator_option_relations",
                "assigned_relations",
                "assigned_relations.variant_id = relations.variant_id \
                 AND assigned_relations.option_id <> relations.option_id",
            )
            .group_by("relations.option_id")
            .order_by("relations.option_id")
            .set_parameter("product_id", product_id);

        let built = query.build().map_err(build_error)?;
        let rows = built
            .query_as::<(DbId, Option<String>)>()
            .fetch_all(pool)
            .await?;

        let combinations = rows
            .into_iter()
            .map(|(option_id, raw)| {
                parse_combinations(raw.as_deref())
                    .map(|list| (option_id, list))
                    .map_err(|e| decode_error("combinations", e))
            })
            .collect::<Result<Combinations, _>>()?;

        tracing::debug!(
            product_id,
            options = combinations.len(),
            "Loaded product combinations"
        );
        Ok(combinations)
    }

    /// Shared listing query: set -> product -> groups -> options, ordered by
    /// group (position, name) then option (position, name), one row per option.
    fn base_query() -> SelectQuery {
        let mut query = SelectQuery::new();
        query
            .from("configurator_sets", SET_ALIAS)
            .inner_join(
                "products",
                "products",
                format!("products.configurator_set_id = {SET_ALIAS}.id"),
            )
            .inner_join(
                "configurator_set_group_relations",
                "group_relation",
                format!("group_relation.set_id = {SET_ALIAS}.id"),
            )
            .inner_join(
                "configurator_groups",
                GROUP_ALIAS,
                format!("{GROUP_ALIAS}.id = group_relation.group_id"),
            )
            .inner_join(
                "configurator_set_option_relations",
                "option_relation",
                format!("option_relation.set_id = {SET_ALIAS}.id"),
            )
            .inner_join(
                "configurator_options",
                OPTION_ALIAS,
                format!(
                    "{OPTION_ALIAS}.id = option_relation.option_id \
                     AND {OPTION_ALIAS}.group_id = {GROUP_ALIAS}.id"
                ),
            )
            .order_by(format!("{GROUP_ALIAS}.position"))
            .order_by(format!("{GROUP_ALIAS}.name"))
            .order_by(format!("{OPTION_ALIAS}.position"))
            .order_by(format!("{OPTION_ALIAS}.name"))
            .group_by(format!("{OPTION_ALIAS}.id"))
            .group_by(format!("{GROUP_ALIAS}.id"))
            .group_by(format!("{SET_ALIAS}.id"));
        query
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Options that have an image candidate, in query order.
fn option_media_ids(rows: &[(DbId, Option<DbId>)]) -> Vec<(DbId, DbId)> {
    rows.iter()
        .filter_map(|&(option_id, media_id)| media_id.map(|m| (option_id, m)))
        .collect()
}

/// Distinct media ids, so shared images are resolved once.
fn unique_media_ids(candidates: &[(DbId, DbId)]) -> Vec<DbId> {
    let mut ids: Vec<DbId> = candidates.iter().map(|&(_, media_id)| media_id).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Attach resolved media to their options, dropping unresolved ids.
fn pair_option_media(
    candidates: &[(DbId, DbId)],
    media: &HashMap<DbId, Media>,
) -> BTreeMap<DbId, Media> {
    candidates
        .iter()
        .filter_map(|(option_id, media_id)| media.get(media_id).map(|m| (*option_id, m.clone())))
        .collect()
}

fn build_error(err: CoreError) -> sqlx::Error {
    sqlx::Error::Protocol(err.to_string())
}

fn decode_error(column: &str, err: CoreError) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(err),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
