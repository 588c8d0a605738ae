//! Repository for the `media` table and the batch media lookup used by
//! storefront gateways.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use storefront_core::context::ShopContext;
use storefront_core::types::DbId;

use crate::models::media::Media;

/// Column list for the `media` table.
const COLUMNS: &str = "id, name, description, path, file_type, extension, width, height, \
    created_at";

/// Batch resolution of media ids.
///
/// Ids without a matching media entry are absent from the returned map.
#[async_trait]
pub trait MediaGateway: Send + Sync {
    async fn get_list(
        &self,
        pool: &PgPool,
        ids: &[DbId],
        context: &ShopContext,
    ) -> Result<HashMap<DbId, Media>, sqlx::Error>;
}

/// Provides read access to media entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaRepo;

impl MediaRepo {
    /// Find a media entry by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Media>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media WHERE id = $1");
        sqlx::query_as::<_, Media>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find all media entries whose id is in `ids`, ordered by id.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Media>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut unique = ids.to_vec();
        unique.sort_unstable();
        unique.dedup();

        let query = format!("SELECT {COLUMNS} FROM media WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, Media>(&query)
            .bind(&unique)
            .fetch_all(pool)
            .await
    }
}

#[async_trait]
impl MediaGateway for MediaRepo {
    async fn get_list(
        &self,
        pool: &PgPool,
        ids: &[DbId],
        _context: &ShopContext,
    ) -> Result<HashMap<DbId, Media>, sqlx::Error> {
        let media = Self::find_by_ids(pool, ids).await?;
        Ok(media.into_iter().map(|m| (m.id, m)).collect())
    }
}
