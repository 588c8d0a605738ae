//! Localization context for storefront reads.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// The shop a read is performed for, plus the shop whose translations fill
/// in anything the current shop does not translate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopContext {
    pub shop_id: DbId,
    pub fallback_shop_id: Option<DbId>,
}

impl ShopContext {
    pub fn new(shop_id: DbId) -> Self {
        Self {
            shop_id,
            fallback_shop_id: None,
        }
    }

    pub fn with_fallback(shop_id: DbId, fallback_shop_id: DbId) -> Self {
        Self {
            shop_id,
            fallback_shop_id: Some(fallback_shop_id),
        }
    }

    /// The fallback shop, if one is configured and differs from the current shop.
    pub fn fallback_shop(&self) -> Option<DbId> {
        self.fallback_shop_id.filter(|&id| id != self.shop_id)
    }
}
