//! Column and translation-join fragments for the configurator tables.
//!
//! The selected aliases match the fields of
//! [`ConfiguratorRow`](crate::models::configurator::ConfiguratorRow); every
//! query that decodes into that struct must select all four fragments.

use storefront_core::context::ShopContext;
use storefront_core::translation::{
    OBJECT_TYPE_CONFIGURATOR_GROUP, OBJECT_TYPE_CONFIGURATOR_OPTION,
};

use crate::query::SelectQuery;

/// Table aliases the fragments refer to.
pub const SET_ALIAS: &str = "configurator_set";
pub const GROUP_ALIAS: &str = "configurator_group";
pub const OPTION_ALIAS: &str = "configurator_option";

const SHOP_PARAM: &str = "translation_shop_id";
const FALLBACK_SHOP_PARAM: &str = "translation_fallback_shop_id";

/// Provides the column lists and translation joins used by storefront reads.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldHelper;

impl FieldHelper {
    pub fn configurator_set_fields(&self) -> Vec<String> {
        vec![
            format!("{SET_ALIAS}.id AS set_id"),
            format!("{SET_ALIAS}.name AS set_name"),
            format!("{SET_ALIAS}.configurator_type AS set_type"),
        ]
    }

    pub fn configurator_group_fields(&self) -> Vec<String> {
        vec![
            format!("{GROUP_ALIAS}.id AS group_id"),
            format!("{GROUP_ALIAS}.name AS group_name"),
            format!("{GROUP_ALIAS}.description AS group_description"),
            format!("{GROUP_ALIAS}.position AS group_position"),
        ]
    }

    pub fn configurator_option_fields(&self) -> Vec<String> {
        vec![
            format!("{OPTION_ALIAS}.id AS option_id"),
            format!("{OPTION_ALIAS}.name AS option_name"),
            format!("{OPTION_ALIAS}.position AS option_position"),
        ]
    }

    /// Join the group and option translations for the context's shop and,
    /// when one applies, its fallback shop.
    ///
    /// Each joined translation id is added to `GROUP BY` so the payload stays
    /// selectable in grouped queries. Without a fallback shop the fallback
    /// columns are selected as `NULL`.
    pub fn add_configurator_translation(&self, query: &mut SelectQuery, context: &ShopContext) {
        let fallback = context.fallback_shop();

        for (object_type, entity_alias, column_prefix) in [
            (OBJECT_TYPE_CONFIGURATOR_GROUP, GROUP_ALIAS, "group"),
            (OBJECT_TYPE_CONFIGURATOR_OPTION, OPTION_ALIAS, "option"),
        ] {
            let type_param = format!("{column_prefix}_object_type");
            query.set_parameter(&type_param, object_type);

            let alias = format!("{column_prefix}_translation_data");
            join_translation(query, &alias, &type_param, entity_alias, SHOP_PARAM);
            query.select(format!(
                "{alias}.object_data AS {column_prefix}_translation"
            ));

            if fallback.is_some() {
                let alias = format!("{column_prefix}_fallback_translation_data");
                join_translation(query, &alias, &type_param, entity_alias, FALLBACK_SHOP_PARAM);
                query.select(format!(
                    "{alias}.object_data AS {column_prefix}_fallback_translation"
                ));
            } else {
                query.select(format!(
                    "NULL::jsonb AS {column_prefix}_fallback_translation"
                ));
            }
        }

        query.set_parameter(SHOP_PARAM, context.shop_id);
        if let Some(fallback_shop_id) = fallback {
            query.set_parameter(FALLBACK_SHOP_PARAM, fallback_shop_id);
        }
    }
}

fn join_translation(
    query: &mut SelectQuery,
    alias: &str,
    type_param: &str,
    entity_alias: &str,
    shop_param: &str,
) {
    query
        .left_join(
            "translations",
            alias,
            format!(
                "{alias}.object_type = :{type_param} \
                 AND {alias}.object_key = {entity_alias}.id \
                 AND {alias}.shop_id = :{shop_param}"
            ),
        )
        .group_by(format!("{alias}.id"));
}
