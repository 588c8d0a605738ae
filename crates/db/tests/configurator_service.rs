//! Integration tests for configurator assembly with a customer selection.

mod common;

use sqlx::PgPool;
use storefront_core::configurator::{
    ConfiguratorType, Selection, CONFIGURATOR_TYPE_PICTURE, CONFIGURATOR_TYPE_STANDARD,
};
use storefront_core::context::ShopContext;
use storefront_db::configurator_service::ConfiguratorService;
use storefront_db::models::configurator::{ConfiguratorOption, ConfiguratorSet};
use storefront_db::repositories::{ConfiguratorGateway, MediaRepo};

use common::*;

fn service() -> ConfiguratorService<MediaRepo> {
    ConfiguratorService::new(ConfiguratorGateway::default())
}

fn option(set: &ConfiguratorSet, id: i64) -> &ConfiguratorOption {
    set.groups
        .iter()
        .flat_map(|g| g.options.iter())
        .find(|o| o.id == id)
        .expect("option should exist")
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_product_without_configurator(pool: PgPool) {
    let product_id = insert_product(&pool, "Mug", None, 0).await;

    let set = service()
        .product_configurator(&pool, product_id, &ShopContext::new(1), &Selection::new())
        .await
        .unwrap();
    assert!(set.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_selection_limits_active_options(pool: PgPool) {
    let shirt = seed_shirt_with_type(&pool, CONFIGURATOR_TYPE_STANDARD).await;
    let selection: Selection = [(shirt.size, shirt.medium)].into_iter().collect();

    let set = service()
        .product_configurator(&pool, shirt.product_id, &ShopContext::new(1), &selection)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(set.configurator_type, ConfiguratorType::Standard);

    // Only blue is sold in M.
    assert!(option(&set, shirt.blue).active);
    assert!(!option(&set, shirt.red).active);

    // Other sizes stay selectable; L has no available variant at all.
    assert!(option(&set, shirt.small).active);
    assert!(!option(&set, shirt.large).active);

    assert!(option(&set, shirt.medium).selected);
    assert!(!option(&set, shirt.small).selected);

    let size = set.groups.iter().find(|g| g.id == shirt.size).unwrap();
    let color = set.groups.iter().find(|g| g.id == shirt.color).unwrap();
    assert!(size.selected);
    assert!(!color.selected);

    assert_eq!(option(&set, shirt.medium).combinations, vec![shirt.blue]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_picture_configurator_attaches_media(pool: PgPool) {
    let shirt = seed_shirt_with_type(&pool, CONFIGURATOR_TYPE_PICTURE).await;
    let red = insert_media(&pool, "red").await;
    insert_image(&pool, shirt.product_id, red, 0, &[shirt.red]).await;

    let set = service()
        .product_configurator(&pool, shirt.product_id, &ShopContext::new(1), &Selection::new())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(set.configurator_type, ConfiguratorType::Picture);
    assert_eq!(option(&set, shirt.red).media.as_ref().map(|m| m.id), Some(red));
    assert!(option(&set, shirt.blue).media.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_standard_configurator_skips_media(pool: PgPool) {
    let shirt = seed_shirt_with_type(&pool, CONFIGURATOR_TYPE_STANDARD).await;
    let red = insert_media(&pool, "red").await;
    insert_image(&pool, shirt.product_id, red, 0, &[shirt.red]).await;

    let set = service()
        .product_configurator(&pool, shirt.product_id, &ShopContext::new(1), &Selection::new())
        .await
        .unwrap()
        .unwrap();

    assert!(set
        .groups
        .iter()
        .flat_map(|g| g.options.iter())
        .all(|o| o.media.is_none()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_single_group_keeps_listed_options_active(pool: PgPool) {
    let set_id = insert_set(&pool, "Socks", CONFIGURATOR_TYPE_STANDARD).await;
    let size = insert_group(&pool, set_id, "Size", 0).await;
    let small = insert_option(&pool, set_id, size, "S", 0).await;
    let large = insert_option(&pool, set_id, size, "L", 1).await;

    let product_id = insert_product(&pool, "Socks", Some(set_id), 1).await;
    insert_variant(&pool, product_id, "SOCKS-S", true, 4, &[small]).await;
    insert_variant(&pool, product_id, "SOCKS-L", true, 0, &[large]).await;

    let set = service()
        .product_configurator(&pool, product_id, &ShopContext::new(1), &Selection::new())
        .await
        .unwrap()
        .unwrap();

    assert!(option(&set, small).active);
    // Sold out while last_stock is set.
    assert!(!option(&set, large).active);
}
