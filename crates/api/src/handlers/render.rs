//! Handlers for the server-rendered catch-all under `/c/{client}`.
//!
//! Unlike the JSON API, these routes answer NotFound with a small HTML
//! document (and `noindex`), since the caller is a browser.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};

use pagehost_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::render::{render_document, render_not_found, RenderContext};
use crate::resolver;
use crate::state::AppState;

#[derive(Debug, serde::Deserialize)]
pub struct PreviewParams {
    #[serde(default)]
    pub preview: bool,
}

/// Convert a resolution error into the HTML 404 page, passing through
/// everything that is not a NotFound.
fn html_not_found(err: AppError) -> AppResult<Response> {
    match err {
        AppError::Core(CoreError::NotFound { .. }) => {
            Ok((StatusCode::NOT_FOUND, Html(render_not_found())).into_response())
        }
        other => Err(other),
    }
}

/// GET /c/{client}
///
/// A bare tenant request redirects to the resolved home-page slug,
/// preserving preview mode.
pub async fn render_home(
    State(state): State<AppState>,
    Path(client): Path<String>,
    Query(params): Query<PreviewParams>,
) -> AppResult<Response> {
    let preview = params.preview;

    let tenant = match resolver::resolve_tenant(&state.pool, &client).await {
        Ok(tenant) => tenant,
        Err(err) => return html_not_found(err),
    };
    let home = match resolver::resolve_home_page(&state.pool, &tenant, preview).await {
        Ok(home) => home,
        Err(err) => return html_not_found(err),
    };

    let destination = if preview {
        format!("/c/{}/{}?preview=true", tenant.slug, home.slug)
    } else {
        format!("/c/{}/{}", tenant.slug, home.slug)
    };
    Ok(Redirect::temporary(&destination).into_response())
}

/// GET /c/{client}/{*slug}
///
/// Server-render a page. One path segment resolves by slug, two resolve by
/// category + slug, anything deeper is NotFound.
pub async fn render_page(
    State(state): State<AppState>,
    Path((client, slug)): Path<(String, String)>,
    Query(params): Query<PreviewParams>,
) -> AppResult<Response> {
    let preview = params.preview;

    let segments: Vec<&str> = slug.split('/').filter(|s| !s.is_empty()).collect();
    let (category, page_slug) = match segments.as_slice() {
        [page_slug] => (None, *page_slug),
        [category, page_slug] => (Some(*category), *page_slug),
        _ => {
            return Ok((StatusCode::NOT_FOUND, Html(render_not_found())).into_response());
        }
    };

    let tenant = match resolver::resolve_tenant(&state.pool, &client).await {
        Ok(tenant) => tenant,
        Err(err) => return html_not_found(err),
    };
    let page =
        match resolver::resolve_page(&state.pool, &tenant, page_slug, category, preview).await {
            Ok(page) => page,
            Err(err) => return html_not_found(err),
        };

    let components = resolver::resolve_components(&state.pool, &tenant, None, preview).await?;
    let related = resolver::resolve_listing(&state.pool, &tenant, &page).await?;

    let doc = render_document(&RenderContext {
        tenant: &tenant,
        page: &page,
        components: &components,
        related: &related,
        base_url: &state.config.public_base_url,
        preview,
    });

    Ok(Html(doc).into_response())
}
