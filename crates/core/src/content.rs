//! Page/component content rules: draft override semantics, slug handling,
//! and the valid page/component type sets.
//!
//! This module lives in `core` (zero internal deps) so it can be used by both
//! the API/repository layer and any future CLI tooling.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Page type constants
// ---------------------------------------------------------------------------

pub const PAGE_TYPE_NORMAL: &str = "normal";
pub const PAGE_TYPE_LISTING: &str = "listing";
pub const PAGE_TYPE_BLOG: &str = "blog";

/// All valid page types.
pub const VALID_PAGE_TYPES: &[&str] = &[PAGE_TYPE_NORMAL, PAGE_TYPE_LISTING, PAGE_TYPE_BLOG];

// ---------------------------------------------------------------------------
// Component type constants
// ---------------------------------------------------------------------------

pub const COMPONENT_TYPE_HEADER: &str = "header";
pub const COMPONENT_TYPE_FOOTER: &str = "footer";

/// All valid component types.
pub const VALID_COMPONENT_TYPES: &[&str] = &[COMPONENT_TYPE_HEADER, COMPONENT_TYPE_FOOTER];

// ---------------------------------------------------------------------------
// Draft override rule
// ---------------------------------------------------------------------------

/// Apply the field-level draft override rule.
///
/// The draft value wins only when it is present and non-empty; otherwise the
/// published value is kept. Fields override individually, never as a record.
pub fn override_field(published: &Option<String>, draft: &Option<String>) -> Option<String> {
    match draft {
        Some(d) if !d.is_empty() => Some(d.clone()),
        _ => published.clone(),
    }
}

// ---------------------------------------------------------------------------
// Slug generation
// ---------------------------------------------------------------------------

/// Generate a URL-safe slug from a page title.
///
/// Converts to lowercase, replaces spaces and special characters with hyphens,
/// collapses consecutive hyphens, and trims leading/trailing hyphens.
pub fn generate_slug(title: &str) -> String {
    let slug: String = title
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c
            } else {
                '-'
            }
        })
        .collect();

    // Collapse consecutive hyphens.
    let mut result = String::with_capacity(slug.len());
    let mut prev_hyphen = false;
    for c in slug.chars() {
        if c == '-' {
            if !prev_hyphen {
                result.push('-');
            }
            prev_hyphen = true;
        } else {
            result.push(c);
            prev_hyphen = false;
        }
    }

    // Trim leading/trailing hyphens.
    result.trim_matches('-').to_string()
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a page title (non-empty, <= 200 chars).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.len() > 200 {
        return Err(CoreError::Validation(
            "Title must be at most 200 characters".into(),
        ));
    }
    Ok(())
}

/// Validate a slug (non-empty, only lowercase alphanumeric + hyphens).
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".into()));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::Validation(
            "Slug must contain only lowercase alphanumeric characters and hyphens".into(),
        ));
    }
    Ok(())
}

/// Validate a page category. Categories are caller-defined but must be
/// URL-safe since they appear as a path segment.
pub fn validate_category(category: &str) -> Result<(), CoreError> {
    validate_slug(category).map_err(|_| {
        CoreError::Validation(
            "Category must contain only lowercase alphanumeric characters and hyphens".into(),
        )
    })
}

/// Validate a page type against the known set.
pub fn validate_page_type(page_type: &str) -> Result<(), CoreError> {
    if !VALID_PAGE_TYPES.contains(&page_type) {
        return Err(CoreError::Validation(format!(
            "Invalid page type '{}'. Valid types: {}",
            page_type,
            VALID_PAGE_TYPES.join(", ")
        )));
    }
    Ok(())
}

/// Validate a component type against the known set.
pub fn validate_component_type(component_type: &str) -> Result<(), CoreError> {
    if !VALID_COMPONENT_TYPES.contains(&component_type) {
        return Err(CoreError::Validation(format!(
            "Invalid component type '{}'. Valid types: {}",
            component_type,
            VALID_COMPONENT_TYPES.join(", ")
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
