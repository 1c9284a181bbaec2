//! Handlers for the page CRUD, draft lifecycle, and version history
//! endpoints under `/clients/{slug}/pages`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use pagehost_core::content::{generate_slug, validate_category, validate_page_type, validate_slug, validate_title};
use pagehost_core::error::CoreError;
use pagehost_core::lifecycle::ProcedureOutcome;
use pagehost_core::types::DbId;

use pagehost_db::models::client_page::{
    ClientPage, CreateClientPage, PageView, PublishRequest, UpdatePageDraft,
};
use pagehost_db::repositories::{ClientPageRepo, PageVersionRepo};

use crate::error::{AppError, AppResult};
use crate::resolver;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Query param types
-------------------------------------------------------------------------- */

#[derive(Debug, serde::Deserialize)]
pub struct ListPagesParams {
    #[serde(default)]
    pub include_unpublished: bool,
    pub category: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct PreviewParams {
    #[serde(default)]
    pub preview: bool,
}

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Fetch a page row by tenant + slug without publish gating, or 404.
///
/// Lifecycle endpoints operate on the raw row: a draft on an unpublished
/// page must still be editable, publishable, and discardable.
async fn ensure_page(
    pool: &sqlx::PgPool,
    client_id: DbId,
    slug: &str,
) -> AppResult<ClientPage> {
    ClientPageRepo::find_by_slug(pool, client_id, slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Page",
                key: slug.to_string(),
            })
        })
}

/// Map a lifecycle procedure outcome to the refreshed page view or an error.
async fn outcome_to_view(
    pool: &sqlx::PgPool,
    client_id: DbId,
    slug: &str,
    outcome: ProcedureOutcome,
) -> AppResult<PageView> {
    match outcome {
        ProcedureOutcome::Applied => {
            let page = ensure_page(pool, client_id, slug).await?;
            Ok(page.view(false))
        }
        // The route-level guard already checked has_draft; reaching this arm
        // means a concurrent caller won the row lock first.
        ProcedureOutcome::NoDraft => Err(AppError::Core(CoreError::Conflict(
            "Draft was already published or discarded".into(),
        ))),
        ProcedureOutcome::NotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "Page",
            key: slug.to_string(),
        })),
        ProcedureOutcome::VersionNotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "Page version",
            key: slug.to_string(),
        })),
    }
}

/* --------------------------------------------------------------------------
Page CRUD
-------------------------------------------------------------------------- */

/// GET /api/v1/clients/{slug}/pages
///
/// List a tenant's pages, published only unless `include_unpublished`.
pub async fn list_pages(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<ListPagesParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref category) = params.category {
        validate_category(category).map_err(AppError::Core)?;
    }

    let tenant = resolver::resolve_tenant(&state.pool, &slug).await?;
    let pages = ClientPageRepo::list(
        &state.pool,
        tenant.id,
        params.include_unpublished,
        params.category.as_deref(),
    )
    .await?;

    let views: Vec<PageView> = pages.iter().map(|p| p.view(false)).collect();
    Ok(Json(DataResponse { data: views }))
}

/// POST /api/v1/clients/{slug}/pages
///
/// Create a new page with published fields only (no draft). Generates the
/// slug from the title if not provided.
pub async fn create_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<CreateClientPage>,
) -> AppResult<impl IntoResponse> {
    validate_title(&input.title).map_err(AppError::Core)?;
    if let Some(ref page_type) = input.page_type {
        validate_page_type(page_type).map_err(AppError::Core)?;
    }
    if let Some(ref category) = input.category {
        validate_category(category).map_err(AppError::Core)?;
    }

    let page_slug = match &input.slug {
        Some(s) => {
            validate_slug(s).map_err(AppError::Core)?;
            s.clone()
        }
        None => generate_slug(&input.title),
    };

    let tenant = resolver::resolve_tenant(&state.pool, &slug).await?;
    let page = ClientPageRepo::create(&state.pool, tenant.id, &page_slug, &input).await?;

    tracing::info!(
        client = %tenant.slug,
        page_id = %page.id,
        slug = %page.slug,
        "Page created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: page.view(false),
        }),
    ))
}

/// GET /api/v1/clients/{slug}/pages/{page}
///
/// Fetch a page's effective view. Unpublished pages are visible only with
/// `?preview=true`, which also applies the draft overlay.
pub async fn get_page(
    State(state): State<AppState>,
    Path((slug, page)): Path<(String, String)>,
    Query(params): Query<PreviewParams>,
) -> AppResult<impl IntoResponse> {
    let tenant = resolver::resolve_tenant(&state.pool, &slug).await?;
    let view = resolver::resolve_page(&state.pool, &tenant, &page, None, params.preview).await?;
    Ok(Json(DataResponse { data: view }))
}

/* --------------------------------------------------------------------------
Draft lifecycle
-------------------------------------------------------------------------- */

/// PUT /api/v1/clients/{slug}/pages/{page}
///
/// Merge the allow-listed draft fields into the page. Unknown fields are
/// rejected at deserialization; an empty update is a validation error.
pub async fn update_draft(
    State(state): State<AppState>,
    Path((slug, page)): Path<(String, String)>,
    Json(input): Json<UpdatePageDraft>,
) -> AppResult<impl IntoResponse> {
    if input.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one draft field is required".into(),
        )));
    }

    let tenant = resolver::resolve_tenant(&state.pool, &slug).await?;
    let existing = ensure_page(&state.pool, tenant.id, &page).await?;

    let updated = ClientPageRepo::update_draft(&state.pool, existing.id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Page",
                key: page.clone(),
            })
        })?;

    tracing::info!(
        client = %tenant.slug,
        page_id = %updated.id,
        slug = %updated.slug,
        "Page draft updated"
    );

    // Return the draft-effective view so editors see what preview will show.
    Ok(Json(DataResponse {
        data: updated.view(true),
    }))
}

/// POST /api/v1/clients/{slug}/pages/{page}/publish
///
/// Promote the page's draft to published state. Refuses when the page has
/// no draft, so a pointless procedure call is never made.
pub async fn publish(
    State(state): State<AppState>,
    Path((slug, page)): Path<(String, String)>,
    body: Option<Json<PublishRequest>>,
) -> AppResult<impl IntoResponse> {
    let publisher = body.and_then(|Json(b)| b.publisher_id);

    let tenant = resolver::resolve_tenant(&state.pool, &slug).await?;
    let existing = ensure_page(&state.pool, tenant.id, &page).await?;

    if !existing.has_draft {
        return Err(AppError::Core(CoreError::Validation(
            "No draft changes to publish".into(),
        )));
    }

    let outcome = ClientPageRepo::publish(&state.pool, existing.id, publisher).await?;
    let view = outcome_to_view(&state.pool, tenant.id, &page, outcome).await?;

    tracing::info!(
        client = %tenant.slug,
        page_id = %existing.id,
        slug = %page,
        "Page draft published"
    );

    Ok(Json(DataResponse { data: view }))
}

/// POST /api/v1/clients/{slug}/pages/{page}/discard
///
/// Discard the page's draft, leaving published fields untouched.
pub async fn discard(
    State(state): State<AppState>,
    Path((slug, page)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let tenant = resolver::resolve_tenant(&state.pool, &slug).await?;
    let existing = ensure_page(&state.pool, tenant.id, &page).await?;

    if !existing.has_draft {
        return Err(AppError::Core(CoreError::Validation(
            "No draft changes to discard".into(),
        )));
    }

    let outcome = ClientPageRepo::discard(&state.pool, existing.id).await?;
    let view = outcome_to_view(&state.pool, tenant.id, &page, outcome).await?;

    tracing::info!(
        client = %tenant.slug,
        page_id = %existing.id,
        slug = %page,
        "Page draft discarded"
    );

    Ok(Json(DataResponse { data: view }))
}

/* --------------------------------------------------------------------------
Version history
-------------------------------------------------------------------------- */

/// GET /api/v1/clients/{slug}/pages/{page}/versions
///
/// List the page's version snapshots, newest first.
pub async fn list_versions(
    State(state): State<AppState>,
    Path((slug, page)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let tenant = resolver::resolve_tenant(&state.pool, &slug).await?;
    let existing = ensure_page(&state.pool, tenant.id, &page).await?;
    let versions = PageVersionRepo::list_by_page(&state.pool, existing.id).await?;
    Ok(Json(DataResponse { data: versions }))
}

/// POST /api/v1/clients/{slug}/pages/{page}/rollback/{version}
///
/// Restore a historical version snapshot into the published fields.
pub async fn rollback(
    State(state): State<AppState>,
    Path((slug, page, version)): Path<(String, String, i32)>,
) -> AppResult<impl IntoResponse> {
    let tenant = resolver::resolve_tenant(&state.pool, &slug).await?;
    let existing = ensure_page(&state.pool, tenant.id, &page).await?;

    let outcome = ClientPageRepo::rollback(&state.pool, existing.id, version).await?;
    let view = outcome_to_view(&state.pool, tenant.id, &page, outcome).await?;

    tracing::info!(
        client = %tenant.slug,
        page_id = %existing.id,
        slug = %page,
        version,
        "Page rolled back"
    );

    Ok(Json(DataResponse { data: view }))
}
