//! Fixture helpers shared by the integration tests.
//!
//! Each helper inserts a single row (or a small set of junction rows) with
//! plain SQL and returns the generated id.

#![allow(dead_code)]

use serde_json::Value;
use sqlx::PgPool;
use storefront_core::configurator::CONFIGURATOR_TYPE_STANDARD;
use storefront_core::types::DbId;

// ---------------------------------------------------------------------------
// Configurator definitions
// ---------------------------------------------------------------------------

pub async fn insert_set(pool: &PgPool, name: &str, configurator_type: i32) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO configurator_sets (name, configurator_type) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind(configurator_type)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn insert_group(pool: &PgPool, set_id: DbId, name: &str, position: i32) -> DbId {
    let group_id: DbId = sqlx::query_scalar(
        "INSERT INTO configurator_groups (name, position) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind(position)
    .fetch_one(pool)
    .await
    .unwrap();

    sqlx::query("INSERT INTO configurator_set_group_relations (set_id, group_id) VALUES ($1, $2)")
        .bind(set_id)
        .bind(group_id)
        .execute(pool)
        .await
        .unwrap();

    group_id
}

pub async fn insert_option(
    pool: &PgPool,
    set_id: DbId,
    group_id: DbId,
    name: &str,
    position: i32,
) -> DbId {
    let option_id: DbId = sqlx::query_scalar(
        "INSERT INTO configurator_options (group_id, name, position) \
         VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(group_id)
    .bind(name)
    .bind(position)
    .fetch_one(pool)
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO configurator_set_option_relations (set_id, option_id) VALUES ($1, $2)",
    )
    .bind(set_id)
    .bind(option_id)
    .execute(pool)
    .await
    .unwrap();

    option_id
}

// ---------------------------------------------------------------------------
// Products and variants
// ---------------------------------------------------------------------------

pub async fn insert_product(
    pool: &PgPool,
    name: &str,
    configurator_set_id: Option<DbId>,
    last_stock: i32,
) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO products (name, configurator_set_id, last_stock) \
         VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(configurator_set_id)
    .bind(last_stock)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Insert a variant carrying `option_ids` with a minimum purchase of 1.
pub async fn insert_variant(
    pool: &PgPool,
    product_id: DbId,
    order_number: &str,
    active: bool,
    in_stock: i32,
    option_ids: &[DbId],
) -> DbId {
    insert_variant_with_min_purchase(pool, product_id, order_number, active, in_stock, 1, option_ids)
        .await
}

pub async fn insert_variant_with_min_purchase(
    pool: &PgPool,
    product_id: DbId,
    order_number: &str,
    active: bool,
    in_stock: i32,
    min_purchase: i32,
    option_ids: &[DbId],
) -> DbId {
    let variant_id: DbId = sqlx::query_scalar(
        "INSERT INTO product_variants (product_id, order_number, active, in_stock, min_purchase) \
         VALUES ($1, $2, $3, $4, $5) RETURNING id",
    )
    .bind(product_id)
    .bind(order_number)
    .bind(active)
    .bind(in_stock)
    .bind(min_purchase)
    .fetch_one(pool)
    .await
    .unwrap();

    for &option_id in option_ids {
        sqlx::query(
            "INSERT INTO configurator_option_relations (variant_id, option_id) VALUES ($1, $2)",
        )
        .bind(variant_id)
        .bind(option_id)
        .execute(pool)
        .await
        .unwrap();
    }

    variant_id
}

// ---------------------------------------------------------------------------
// Media and images
// ---------------------------------------------------------------------------

pub async fn insert_media(pool: &PgPool, name: &str) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO media (name, path, file_type, extension, width, height) \
         VALUES ($1, $2, 'IMAGE', 'jpg', 800, 600) RETURNING id",
    )
    .bind(name)
    .bind(format!("media/image/{name}.jpg"))
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Insert a product image and one mapping whose rules reference `option_ids`.
pub async fn insert_image(
    pool: &PgPool,
    product_id: DbId,
    media_id: DbId,
    position: i32,
    option_ids: &[DbId],
) -> DbId {
    let image_id: DbId = sqlx::query_scalar(
        "INSERT INTO product_images (product_id, media_id, position) \
         VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(product_id)
    .bind(media_id)
    .bind(position)
    .fetch_one(pool)
    .await
    .unwrap();

    if !option_ids.is_empty() {
        let mapping_id: DbId = sqlx::query_scalar(
            "INSERT INTO product_image_mappings (image_id) VALUES ($1) RETURNING id",
        )
        .bind(image_id)
        .fetch_one(pool)
        .await
        .unwrap();

        for &option_id in option_ids {
            sqlx::query(
                "INSERT INTO product_image_mapping_rules (mapping_id, option_id) VALUES ($1, $2)",
            )
            .bind(mapping_id)
            .bind(option_id)
            .execute(pool)
            .await
            .unwrap();
        }
    }

    image_id
}

// ---------------------------------------------------------------------------
// Translations
// ---------------------------------------------------------------------------

pub async fn insert_translation(
    pool: &PgPool,
    object_type: &str,
    object_key: DbId,
    shop_id: DbId,
    data: Value,
) {
    sqlx::query(
        "INSERT INTO translations (object_type, object_key, shop_id, object_data) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(object_type)
    .bind(object_key)
    .bind(shop_id)
    .bind(data)
    .execute(pool)
    .await
    .unwrap();
}

// ---------------------------------------------------------------------------
// Shirt fixture
// ---------------------------------------------------------------------------

/// A shirt with a "Color" group (Red, Blue) and a "Size" group (S, M, L).
///
/// Variants:
/// - red/S and blue/S and blue/M: active, in stock
/// - red/L: inactive
/// - blue/L: out of stock while `last_stock` is set
pub struct Shirt {
    pub product_id: DbId,
    pub set_id: DbId,
    pub color: DbId,
    pub size: DbId,
    pub red: DbId,
    pub blue: DbId,
    pub small: DbId,
    pub medium: DbId,
    pub large: DbId,
}

pub async fn seed_shirt(pool: &PgPool) -> Shirt {
    seed_shirt_with_type(pool, CONFIGURATOR_TYPE_STANDARD).await
}

pub async fn seed_shirt_with_type(pool: &PgPool, configurator_type: i32) -> Shirt {
    let set_id = insert_set(pool, "Shirt", configurator_type).await;

    // Inserted out of display order on purpose.
    let size = insert_group(pool, set_id, "Size", 0).await;
    let color = insert_group(pool, set_id, "Color", 0).await;

    let large = insert_option(pool, set_id, size, "L", 2).await;
    let medium = insert_option(pool, set_id, size, "M", 1).await;
    let small = insert_option(pool, set_id, size, "S", 0).await;
    let red = insert_option(pool, set_id, color, "Red", 0).await;
    let blue = insert_option(pool, set_id, color, "Blue", 0).await;

    let product_id = insert_product(pool, "Shirt", Some(set_id), 1).await;

    insert_variant(pool, product_id, "SW-RED-S", true, 10, &[red, small]).await;
    insert_variant(pool, product_id, "SW-BLUE-S", true, 5, &[blue, small]).await;
    insert_variant(pool, product_id, "SW-BLUE-M", true, 1, &[blue, medium]).await;
    insert_variant(pool, product_id, "SW-RED-L", false, 10, &[red, large]).await;
    insert_variant(pool, product_id, "SW-BLUE-L", true, 0, &[blue, large]).await;

    Shirt {
        product_id,
        set_id,
        color,
        size,
        red,
        blue,
        small,
        medium,
        large,
    }
}
