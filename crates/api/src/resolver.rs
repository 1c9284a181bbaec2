//! Content resolution: tenant lookup, draft-aware page resolution,
//! home-page probing, listing aggregation, and component collection.
//!
//! Shared between the JSON API handlers and the server-rendered routes so
//! both surfaces apply identical visibility and draft-override rules.

use pagehost_core::content::PAGE_TYPE_LISTING;
use pagehost_core::error::CoreError;
use sqlx::PgPool;

use pagehost_db::models::client_component::ComponentView;
use pagehost_db::models::client_page::PageView;
use pagehost_db::models::client_site::ClientSite;
use pagehost_db::repositories::{ClientComponentRepo, ClientPageRepo, ClientSiteRepo};

use crate::error::{AppError, AppResult};

/// Slugs probed, in order, when no page carries the `is_home_page` flag.
const HOME_SLUG_CANDIDATES: &[&str] = &["home", "index"];

fn page_not_found(slug: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Page",
        key: slug.to_string(),
    })
}

/// Look up an active tenant by slug. Inactive or unknown tenants resolve to
/// NotFound regardless of page state or preview mode.
pub async fn resolve_tenant(pool: &PgPool, slug: &str) -> AppResult<ClientSite> {
    ClientSiteRepo::find_active_by_slug(pool, slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Client site",
                key: slug.to_string(),
            })
        })
}

/// Resolve a page to its effective view.
///
/// Visibility: an unpublished page is NotFound outside preview mode. In
/// preview mode with a draft present the returned view carries the
/// field-level draft overlay and is tagged `is_preview`.
pub async fn resolve_page(
    pool: &PgPool,
    tenant: &ClientSite,
    slug: &str,
    category: Option<&str>,
    preview: bool,
) -> AppResult<PageView> {
    let page = match category {
        Some(cat) => {
            ClientPageRepo::find_by_category_and_slug(pool, tenant.id, cat, slug).await?
        }
        None => ClientPageRepo::find_by_slug(pool, tenant.id, slug).await?,
    };

    let Some(page) = page else {
        return Err(page_not_found(slug));
    };
    if !page.is_published && !preview {
        return Err(page_not_found(slug));
    }

    Ok(page.view(preview))
}

/// Resolve the tenant's home page.
///
/// Prefers the page flagged `is_home_page`; when a flagged page exists its
/// resolution outcome is final (an unpublished flagged home page is NotFound
/// outside preview, without falling through to slug probing). With no
/// flagged page, the slugs `home` and `index` are probed in order.
pub async fn resolve_home_page(
    pool: &PgPool,
    tenant: &ClientSite,
    preview: bool,
) -> AppResult<PageView> {
    if let Some(flagged) = ClientPageRepo::find_home_flagged(pool, tenant.id).await? {
        return resolve_page(pool, tenant, &flagged.slug, None, preview).await;
    }

    for slug in HOME_SLUG_CANDIDATES {
        match resolve_page(pool, tenant, slug, None, preview).await {
            Ok(page) => return Ok(page),
            Err(AppError::Core(CoreError::NotFound { .. })) => continue,
            Err(other) => return Err(other),
        }
    }

    Err(AppError::Core(CoreError::NotFound {
        entity: "Home page",
        key: tenant.slug.clone(),
    }))
}

/// Collect the related pages a listing page aggregates: published pages in
/// the listing's category, excluding the listing itself and other
/// listing-type pages, ordered by `sort_order`.
///
/// Returns an empty list for non-listing pages or listings without a
/// category.
pub async fn resolve_listing(
    pool: &PgPool,
    tenant: &ClientSite,
    page: &PageView,
) -> AppResult<Vec<PageView>> {
    if page.page_type != PAGE_TYPE_LISTING {
        return Ok(Vec::new());
    }
    let Some(category) = page.category.as_deref() else {
        return Ok(Vec::new());
    };

    let pages = ClientPageRepo::list(pool, tenant.id, false, Some(category)).await?;
    Ok(pages
        .into_iter()
        .filter(|p| p.id != page.id && p.page_type != PAGE_TYPE_LISTING)
        .map(|p| p.view(false))
        .collect())
}

/// Collect the tenant's active components as effective views, optionally
/// filtered by type.
pub async fn resolve_components(
    pool: &PgPool,
    tenant: &ClientSite,
    component_type: Option<&str>,
    preview: bool,
) -> AppResult<Vec<ComponentView>> {
    let components = ClientComponentRepo::list_active(pool, tenant.id, component_type).await?;
    Ok(components.iter().map(|c| c.view(preview)).collect())
}
