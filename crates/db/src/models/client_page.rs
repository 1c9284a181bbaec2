//! Content page model, DTOs, and the draft-resolved effective view.

use chrono::NaiveDate;
use pagehost_core::content;
use pagehost_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `client_pages` table, draft columns included.
///
/// This struct never leaves the repository/handler layer directly; responses
/// are built from [`PageView`], which resolves drafts explicitly.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClientPage {
    pub id: DbId,
    pub client_id: DbId,
    pub slug: String,
    pub title: String,
    pub category: Option<String>,
    pub page_type: String,

    pub html_content: Option<String>,
    pub css_content: Option<String>,
    pub js_content: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub og_image: Option<String>,
    pub canonical_url: Option<String>,

    pub html_content_draft: Option<String>,
    pub css_content_draft: Option<String>,
    pub js_content_draft: Option<String>,
    pub meta_title_draft: Option<String>,
    pub meta_description_draft: Option<String>,
    pub meta_keywords_draft: Option<String>,
    pub og_image_draft: Option<String>,
    pub canonical_url_draft: Option<String>,

    pub is_published: bool,
    pub has_draft: bool,
    pub is_home_page: bool,
    pub use_client_header: bool,
    pub use_client_footer: bool,
    pub sort_order: i32,

    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub author: Option<String>,
    pub published_date: Option<NaiveDate>,

    pub published_at: Option<Timestamp>,
    pub published_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ClientPage {
    /// Build the effective view of this page for the given mode.
    ///
    /// Enumerates the override-eligible fields explicitly: in preview mode
    /// with a draft present, each field individually falls back to its draft
    /// counterpart when that counterpart is non-empty. Draft columns are
    /// never exposed on the view.
    pub fn view(&self, preview: bool) -> PageView {
        let overlay = preview && self.has_draft;
        let pick = |published: &Option<String>, draft: &Option<String>| {
            if overlay {
                content::override_field(published, draft)
            } else {
                published.clone()
            }
        };

        PageView {
            id: self.id,
            client_id: self.client_id,
            slug: self.slug.clone(),
            title: self.title.clone(),
            category: self.category.clone(),
            page_type: self.page_type.clone(),
            html_content: pick(&self.html_content, &self.html_content_draft),
            css_content: pick(&self.css_content, &self.css_content_draft),
            js_content: pick(&self.js_content, &self.js_content_draft),
            meta_title: pick(&self.meta_title, &self.meta_title_draft),
            meta_description: pick(&self.meta_description, &self.meta_description_draft),
            meta_keywords: pick(&self.meta_keywords, &self.meta_keywords_draft),
            og_image: pick(&self.og_image, &self.og_image_draft),
            canonical_url: pick(&self.canonical_url, &self.canonical_url_draft),
            is_published: self.is_published,
            has_draft: self.has_draft,
            is_home_page: self.is_home_page,
            use_client_header: self.use_client_header,
            use_client_footer: self.use_client_footer,
            sort_order: self.sort_order,
            excerpt: self.excerpt.clone(),
            featured_image: self.featured_image.clone(),
            author: self.author.clone(),
            published_date: self.published_date,
            published_at: self.published_at,
            is_preview: overlay,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Effective view of a content page: published fields, or the field-level
/// draft overlay when resolved in preview mode.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub id: DbId,
    pub client_id: DbId,
    pub slug: String,
    pub title: String,
    pub category: Option<String>,
    pub page_type: String,

    pub html_content: Option<String>,
    pub css_content: Option<String>,
    pub js_content: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub og_image: Option<String>,
    pub canonical_url: Option<String>,

    pub is_published: bool,
    pub has_draft: bool,
    pub is_home_page: bool,
    pub use_client_header: bool,
    pub use_client_footer: bool,
    pub sort_order: i32,

    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub author: Option<String>,
    pub published_date: Option<NaiveDate>,

    pub published_at: Option<Timestamp>,
    /// True when this view carries draft-overlaid content.
    pub is_preview: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new content page. Pages are created with published
/// fields only; drafts come later through [`UpdatePageDraft`].
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClientPage {
    /// Auto-generated from title if `None`.
    pub slug: Option<String>,
    pub title: String,
    pub category: Option<String>,
    /// Defaults to `normal` if omitted.
    pub page_type: Option<String>,
    pub html_content: Option<String>,
    pub css_content: Option<String>,
    pub js_content: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub og_image: Option<String>,
    pub canonical_url: Option<String>,
    pub is_published: Option<bool>,
    pub is_home_page: Option<bool>,
    pub use_client_header: Option<bool>,
    pub use_client_footer: Option<bool>,
    pub sort_order: Option<i32>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub author: Option<String>,
    pub published_date: Option<NaiveDate>,
}

/// DTO for a draft update. The field set is the allow-list: anything outside
/// it is rejected at deserialization, so a caller cannot reach publish flags
/// or other columns through the draft endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePageDraft {
    pub html_content_draft: Option<String>,
    pub css_content_draft: Option<String>,
    pub js_content_draft: Option<String>,
    pub meta_title_draft: Option<String>,
    pub meta_description_draft: Option<String>,
    pub meta_keywords_draft: Option<String>,
    pub og_image_draft: Option<String>,
    pub canonical_url_draft: Option<String>,
}

impl UpdatePageDraft {
    /// True when no field is set; such an update would only flip `has_draft`.
    pub fn is_empty(&self) -> bool {
        self.html_content_draft.is_none()
            && self.css_content_draft.is_none()
            && self.js_content_draft.is_none()
            && self.meta_title_draft.is_none()
            && self.meta_description_draft.is_none()
            && self.meta_keywords_draft.is_none()
            && self.og_image_draft.is_none()
            && self.canonical_url_draft.is_none()
    }
}

/// Optional request body for the publish endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublishRequest {
    pub publisher_id: Option<DbId>,
}
