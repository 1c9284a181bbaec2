//! Client site (tenant) model.

use pagehost_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Tenant-level default SEO metadata, stored in the `meta_defaults` JSONB
/// column. Used as the last fallback when a page carries no metadata of its
/// own and none can be extracted from its markup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetaDefaults {
    pub default_description: Option<String>,
    pub default_og_image: Option<String>,
}

/// A row from the `client_sites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClientSite {
    pub id: DbId,
    pub slug: String,
    pub name: String,
    pub global_css: Option<String>,
    pub favicon: Option<String>,
    pub meta_defaults: Option<sqlx::types::Json<MetaDefaults>>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new client site.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClientSite {
    pub slug: String,
    pub name: String,
    pub global_css: Option<String>,
    pub favicon: Option<String>,
    pub meta_defaults: Option<MetaDefaults>,
    /// Defaults to `true` if omitted.
    pub is_active: Option<bool>,
}

impl ClientSite {
    pub fn default_description(&self) -> Option<&str> {
        self.meta_defaults
            .as_ref()
            .and_then(|m| m.default_description.as_deref())
    }

    pub fn default_og_image(&self) -> Option<&str> {
        self.meta_defaults
            .as_ref()
            .and_then(|m| m.default_og_image.as_deref())
    }
}
