//! Route definitions for the tenant-scoped JSON API.
//!
//! Registered under `/clients`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{clients, components, pages};
use crate::state::AppState;

/// Tenant routes, registered as `/clients`.
///
/// ```text
/// GET  /{slug}                                  get_client
/// GET  /{slug}/pages                            list_pages
/// POST /{slug}/pages                            create_page
/// GET  /{slug}/pages/{page}                     get_page
/// PUT  /{slug}/pages/{page}                     update_draft
/// POST /{slug}/pages/{page}/publish             publish
/// POST /{slug}/pages/{page}/discard             discard
/// GET  /{slug}/pages/{page}/versions            list_versions
/// POST /{slug}/pages/{page}/rollback/{version}  rollback
/// GET  /{slug}/components                       list_components
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{slug}", get(clients::get_client))
        .route(
            "/{slug}/pages",
            get(pages::list_pages).post(pages::create_page),
        )
        .route(
            "/{slug}/pages/{page}",
            get(pages::get_page).put(pages::update_draft),
        )
        .route("/{slug}/pages/{page}/publish", post(pages::publish))
        .route("/{slug}/pages/{page}/discard", post(pages::discard))
        .route("/{slug}/pages/{page}/versions", get(pages::list_versions))
        .route(
            "/{slug}/pages/{page}/rollback/{version}",
            post(pages::rollback),
        )
        .route("/{slug}/components", get(components::list_components))
}
