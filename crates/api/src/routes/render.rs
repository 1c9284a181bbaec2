//! Route definitions for the server-rendered page surface.
//!
//! Registered under `/c` at the root level (not under `/api/v1`), matching
//! the public URLs pages are served from.

use axum::routing::get;
use axum::Router;

use crate::handlers::render;
use crate::state::AppState;

/// Server-rendered routes, registered as `/c`.
///
/// ```text
/// GET /{client}          render_home (redirects to the home-page slug)
/// GET /{client}/{*slug}  render_page (slug or category/slug)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{client}", get(render::render_home))
        .route("/{client}/{*slug}", get(render::render_page))
}
