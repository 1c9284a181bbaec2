//! Repository for the `client_page_versions` table.
//!
//! Version rows are immutable snapshots written by `publish_page_draft`;
//! this repository only reads them.

use pagehost_core::types::DbId;
use sqlx::PgPool;

use crate::models::page_version::PageVersion;

/// Column list for client_page_versions queries.
const COLUMNS: &str = "id, page_id, version_number, html_content, css_content, js_content, \
    meta_title, meta_description, meta_keywords, og_image, canonical_url, \
    published_by, created_at";

/// Provides read access to page version history.
pub struct PageVersionRepo;

impl PageVersionRepo {
    /// List all versions for a page, newest first.
    pub async fn list_by_page(
        pool: &PgPool,
        page_id: DbId,
    ) -> Result<Vec<PageVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM client_page_versions
             WHERE page_id = $1
             ORDER BY version_number DESC"
        );
        sqlx::query_as::<_, PageVersion>(&query)
            .bind(page_id)
            .fetch_all(pool)
            .await
    }

    /// Find a specific version of a page.
    pub async fn find_by_page_and_version(
        pool: &PgPool,
        page_id: DbId,
        version_number: i32,
    ) -> Result<Option<PageVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM client_page_versions
             WHERE page_id = $1 AND version_number = $2"
        );
        sqlx::query_as::<_, PageVersion>(&query)
            .bind(page_id)
            .bind(version_number)
            .fetch_optional(pool)
            .await
    }
}
