//! Immutable page version snapshots, written by `publish_page_draft`.

use pagehost_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `client_page_versions` table. Each row captures the
/// published state of a page immediately after a publish.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PageVersion {
    pub id: DbId,
    pub page_id: DbId,
    pub version_number: i32,
    pub html_content: Option<String>,
    pub css_content: Option<String>,
    pub js_content: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub og_image: Option<String>,
    pub canonical_url: Option<String>,
    pub published_by: Option<DbId>,
    pub created_at: Timestamp,
}
