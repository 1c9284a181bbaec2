pub mod clients;
pub mod health;
pub mod render;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /clients/{slug}                                  tenant configuration
/// /clients/{slug}/pages                            list, create
/// /clients/{slug}/pages/{page}                     get, draft update
/// /clients/{slug}/pages/{page}/publish             promote draft (POST)
/// /clients/{slug}/pages/{page}/discard             discard draft (POST)
/// /clients/{slug}/pages/{page}/versions            version history (GET)
/// /clients/{slug}/pages/{page}/rollback/{version}  restore snapshot (POST)
/// /clients/{slug}/components                       active components (GET)
/// ```
///
/// The server-rendered routes live under `/c` at the root level, outside
/// this tree (see [`render::router`]).
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/clients", clients::router())
}
