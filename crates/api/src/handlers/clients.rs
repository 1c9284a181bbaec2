//! Handlers for the `/clients/{slug}` tenant resource.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::resolver;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/clients/{slug}
///
/// Fetch an active tenant's configuration. Inactive tenants are 404.
pub async fn get_client(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let tenant = resolver::resolve_tenant(&state.pool, &slug).await?;
    Ok(Json(DataResponse { data: tenant }))
}
