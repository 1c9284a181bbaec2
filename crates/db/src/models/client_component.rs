//! Header/footer component model and its draft-resolved view.

use pagehost_core::content;
use pagehost_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `client_components` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClientComponent {
    pub id: DbId,
    pub client_id: DbId,
    pub component_type: String,
    pub html_content: Option<String>,
    pub css_content: Option<String>,
    pub html_content_draft: Option<String>,
    pub css_content_draft: Option<String>,
    pub has_draft: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ClientComponent {
    /// Effective view: draft HTML/CSS overlay in preview mode, per field.
    pub fn view(&self, preview: bool) -> ComponentView {
        let overlay = preview && self.has_draft;
        let pick = |published: &Option<String>, draft: &Option<String>| {
            if overlay {
                content::override_field(published, draft)
            } else {
                published.clone()
            }
        };

        ComponentView {
            id: self.id,
            component_type: self.component_type.clone(),
            html_content: pick(&self.html_content, &self.html_content_draft),
            css_content: pick(&self.css_content, &self.css_content_draft),
            has_draft: self.has_draft,
            is_preview: overlay,
        }
    }
}

/// DTO for creating a new component.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClientComponent {
    pub component_type: String,
    pub html_content: Option<String>,
    pub css_content: Option<String>,
    /// Defaults to `true` if omitted.
    pub is_active: Option<bool>,
}

/// Effective view of a component, draft columns resolved away.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentView {
    pub id: DbId,
    pub component_type: String,
    pub html_content: Option<String>,
    pub css_content: Option<String>,
    pub has_draft: bool,
    pub is_preview: bool,
}
