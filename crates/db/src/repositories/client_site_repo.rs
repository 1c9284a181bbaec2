//! Repository for the `client_sites` table.

use sqlx::PgPool;

use crate::models::client_site::{ClientSite, CreateClientSite};

/// Column list for client_sites queries.
const COLUMNS: &str =
    "id, slug, name, global_css, favicon, meta_defaults, is_active, created_at, updated_at";

/// Provides lookups for client sites (tenants).
pub struct ClientSiteRepo;

impl ClientSiteRepo {
    /// Insert a new client site, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateClientSite,
    ) -> Result<ClientSite, sqlx::Error> {
        let query = format!(
            "INSERT INTO client_sites (slug, name, global_css, favicon, meta_defaults, is_active)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClientSite>(&query)
            .bind(&input.slug)
            .bind(&input.name)
            .bind(&input.global_css)
            .bind(&input.favicon)
            .bind(input.meta_defaults.clone().map(sqlx::types::Json))
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find an active client site by slug. Inactive tenants are invisible to
    /// every caller, preview mode included.
    pub async fn find_active_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<ClientSite>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM client_sites
             WHERE slug = $1 AND is_active = TRUE"
        );
        sqlx::query_as::<_, ClientSite>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }
}
