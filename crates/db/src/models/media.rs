//! Media entity model.

use serde::Serialize;
use sqlx::FromRow;
use storefront_core::types::{DbId, Timestamp};

/// A row from the `media` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Media {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub path: String,
    pub file_type: String,
    pub extension: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub created_at: Timestamp,
}
