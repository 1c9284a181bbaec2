//! Handlers for the `/clients/{slug}/components` resource.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use pagehost_core::content::validate_component_type;

use crate::error::{AppError, AppResult};
use crate::resolver;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, serde::Deserialize)]
pub struct ListComponentsParams {
    pub component_type: Option<String>,
    #[serde(default)]
    pub preview: bool,
}

/// GET /api/v1/clients/{slug}/components
///
/// List a tenant's active components as effective views, optionally
/// filtered by type. Preview mode applies the per-component draft overlay.
pub async fn list_components(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<ListComponentsParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref component_type) = params.component_type {
        validate_component_type(component_type).map_err(AppError::Core)?;
    }

    let tenant = resolver::resolve_tenant(&state.pool, &slug).await?;
    let components = resolver::resolve_components(
        &state.pool,
        &tenant,
        params.component_type.as_deref(),
        params.preview,
    )
    .await?;

    Ok(Json(DataResponse { data: components }))
}
