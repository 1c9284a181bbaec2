//! Repository for the `client_components` table.

use pagehost_core::types::DbId;
use sqlx::PgPool;

use crate::models::client_component::{ClientComponent, CreateClientComponent};

/// Column list for client_components queries.
const COLUMNS: &str = "id, client_id, component_type, html_content, css_content, \
    html_content_draft, css_content_draft, has_draft, is_active, created_at, updated_at";

/// Provides lookups for header/footer components.
pub struct ClientComponentRepo;

impl ClientComponentRepo {
    /// Insert a new component, returning the created row.
    pub async fn create(
        pool: &PgPool,
        client_id: DbId,
        input: &CreateClientComponent,
    ) -> Result<ClientComponent, sqlx::Error> {
        let query = format!(
            "INSERT INTO client_components
                (client_id, component_type, html_content, css_content, is_active)
             VALUES ($1, $2, $3, $4, COALESCE($5, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClientComponent>(&query)
            .bind(client_id)
            .bind(&input.component_type)
            .bind(&input.html_content)
            .bind(&input.css_content)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// List active components for a tenant, optionally filtered by type.
    /// Ordered so the renderer's first-match-per-type pick is stable.
    pub async fn list_active(
        pool: &PgPool,
        client_id: DbId,
        component_type: Option<&str>,
    ) -> Result<Vec<ClientComponent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM client_components
             WHERE client_id = $1
               AND is_active = TRUE
               AND ($2::TEXT IS NULL OR component_type = $2)
             ORDER BY component_type ASC, created_at ASC"
        );
        sqlx::query_as::<_, ClientComponent>(&query)
            .bind(client_id)
            .bind(component_type)
            .fetch_all(pool)
            .await
    }
}
