//! Repository for the `client_pages` table and its draft lifecycle
//! stored procedures.

use pagehost_core::lifecycle::ProcedureOutcome;
use pagehost_core::types::DbId;
use sqlx::PgPool;

use crate::models::client_page::{ClientPage, CreateClientPage, UpdatePageDraft};

/// Column list for client_pages queries.
const COLUMNS: &str = "id, client_id, slug, title, category, page_type, \
    html_content, css_content, js_content, \
    meta_title, meta_description, meta_keywords, og_image, canonical_url, \
    html_content_draft, css_content_draft, js_content_draft, \
    meta_title_draft, meta_description_draft, meta_keywords_draft, \
    og_image_draft, canonical_url_draft, \
    is_published, has_draft, is_home_page, use_client_header, use_client_footer, \
    sort_order, excerpt, featured_image, author, published_date, \
    published_at, published_by, created_at, updated_at";

/// Provides CRUD and lifecycle operations for content pages.
pub struct ClientPageRepo;

impl ClientPageRepo {
    /// Insert a new page with published fields only (no draft).
    pub async fn create(
        pool: &PgPool,
        client_id: DbId,
        slug: &str,
        input: &CreateClientPage,
    ) -> Result<ClientPage, sqlx::Error> {
        let query = format!(
            "INSERT INTO client_pages
                (client_id, slug, title, category, page_type,
                 html_content, css_content, js_content,
                 meta_title, meta_description, meta_keywords, og_image, canonical_url,
                 is_published, is_home_page, use_client_header, use_client_footer,
                 sort_order, excerpt, featured_image, author, published_date)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'normal'),
                     $6, $7, $8,
                     $9, $10, $11, $12, $13,
                     COALESCE($14, FALSE), COALESCE($15, FALSE),
                     COALESCE($16, TRUE), COALESCE($17, TRUE),
                     COALESCE($18, 0), $19, $20, $21, $22)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClientPage>(&query)
            .bind(client_id)
            .bind(slug)
            .bind(&input.title)
            .bind(&input.category)
            .bind(&input.page_type)
            .bind(&input.html_content)
            .bind(&input.css_content)
            .bind(&input.js_content)
            .bind(&input.meta_title)
            .bind(&input.meta_description)
            .bind(&input.meta_keywords)
            .bind(&input.og_image)
            .bind(&input.canonical_url)
            .bind(input.is_published)
            .bind(input.is_home_page)
            .bind(input.use_client_header)
            .bind(input.use_client_footer)
            .bind(input.sort_order)
            .bind(&input.excerpt)
            .bind(&input.featured_image)
            .bind(&input.author)
            .bind(input.published_date)
            .fetch_one(pool)
            .await
    }

    /// Find a page by tenant and slug.
    pub async fn find_by_slug(
        pool: &PgPool,
        client_id: DbId,
        slug: &str,
    ) -> Result<Option<ClientPage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM client_pages
             WHERE client_id = $1 AND slug = $2"
        );
        sqlx::query_as::<_, ClientPage>(&query)
            .bind(client_id)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Find a page by tenant, category, and slug.
    pub async fn find_by_category_and_slug(
        pool: &PgPool,
        client_id: DbId,
        category: &str,
        slug: &str,
    ) -> Result<Option<ClientPage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM client_pages
             WHERE client_id = $1 AND category = $2 AND slug = $3"
        );
        sqlx::query_as::<_, ClientPage>(&query)
            .bind(client_id)
            .bind(category)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Find the page flagged as the tenant's home page, if any.
    pub async fn find_home_flagged(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Option<ClientPage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM client_pages
             WHERE client_id = $1 AND is_home_page = TRUE
             ORDER BY updated_at DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, ClientPage>(&query)
            .bind(client_id)
            .fetch_optional(pool)
            .await
    }

    /// List pages for a tenant with optional category filter, ordered by
    /// `sort_order`. Unpublished pages are excluded unless requested.
    pub async fn list(
        pool: &PgPool,
        client_id: DbId,
        include_unpublished: bool,
        category: Option<&str>,
    ) -> Result<Vec<ClientPage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM client_pages
             WHERE client_id = $1
               AND ($2::TEXT IS NULL OR category = $2)
               AND ($3::BOOL OR is_published = TRUE)
             ORDER BY sort_order ASC, created_at ASC"
        );
        sqlx::query_as::<_, ClientPage>(&query)
            .bind(client_id)
            .bind(category)
            .bind(include_unpublished)
            .fetch_all(pool)
            .await
    }

    /// Merge draft fields into the page. Only non-`None` fields are applied;
    /// `has_draft` is set and `updated_at` touched either way.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_draft(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePageDraft,
    ) -> Result<Option<ClientPage>, sqlx::Error> {
        let query = format!(
            "UPDATE client_pages SET
                html_content_draft     = COALESCE($2, html_content_draft),
                css_content_draft      = COALESCE($3, css_content_draft),
                js_content_draft       = COALESCE($4, js_content_draft),
                meta_title_draft       = COALESCE($5, meta_title_draft),
                meta_description_draft = COALESCE($6, meta_description_draft),
                meta_keywords_draft    = COALESCE($7, meta_keywords_draft),
                og_image_draft         = COALESCE($8, og_image_draft),
                canonical_url_draft    = COALESCE($9, canonical_url_draft),
                has_draft = TRUE,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClientPage>(&query)
            .bind(id)
            .bind(&input.html_content_draft)
            .bind(&input.css_content_draft)
            .bind(&input.js_content_draft)
            .bind(&input.meta_title_draft)
            .bind(&input.meta_description_draft)
            .bind(&input.meta_keywords_draft)
            .bind(&input.og_image_draft)
            .bind(&input.canonical_url_draft)
            .fetch_optional(pool)
            .await
    }

    /// Promote a page's draft to published state via `publish_page_draft`.
    pub async fn publish(
        pool: &PgPool,
        id: DbId,
        publisher: Option<DbId>,
    ) -> Result<ProcedureOutcome, sqlx::Error> {
        let (status,): (String,) = sqlx::query_as("SELECT publish_page_draft($1, $2)")
            .bind(id)
            .bind(publisher)
            .fetch_one(pool)
            .await?;
        decode_outcome("publish_page_draft", &status)
    }

    /// Discard a page's draft via `discard_page_draft`.
    pub async fn discard(pool: &PgPool, id: DbId) -> Result<ProcedureOutcome, sqlx::Error> {
        let (status,): (String,) = sqlx::query_as("SELECT discard_page_draft($1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        decode_outcome("discard_page_draft", &status)
    }

    /// Restore a historical version snapshot via `rollback_to_version`.
    pub async fn rollback(
        pool: &PgPool,
        id: DbId,
        version_number: i32,
    ) -> Result<ProcedureOutcome, sqlx::Error> {
        let (status,): (String,) = sqlx::query_as("SELECT rollback_to_version($1, $2)")
            .bind(id)
            .bind(version_number)
            .fetch_one(pool)
            .await?;
        decode_outcome("rollback_to_version", &status)
    }
}

/// Map a procedure status text to its outcome. An unrecognized status means
/// the code and database procedures have drifted apart.
fn decode_outcome(procedure: &str, status: &str) -> Result<ProcedureOutcome, sqlx::Error> {
    ProcedureOutcome::parse(status).ok_or_else(|| {
        sqlx::Error::Decode(format!("unexpected status '{status}' from {procedure}").into())
    })
}
