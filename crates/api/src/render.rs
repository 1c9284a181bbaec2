//! HTML document composition for the server-rendered page routes.
//!
//! Takes a resolved page view plus tenant chrome (global stylesheet,
//! header/footer components) and produces a complete document. Stored page
//! HTML/CSS/JS is embedded verbatim -- whoever can write to the datastore is
//! trusted -- but every value interpolated into head tags is escaped.

use std::fmt::Write;

use pagehost_core::content::{
    COMPONENT_TYPE_FOOTER, COMPONENT_TYPE_HEADER, PAGE_TYPE_BLOG, PAGE_TYPE_LISTING,
};
use pagehost_core::seo::{escape_html, extract_meta_description, extract_title};

use pagehost_db::models::client_component::ComponentView;
use pagehost_db::models::client_page::PageView;
use pagehost_db::models::client_site::ClientSite;

/// Everything the renderer needs for one document.
pub struct RenderContext<'a> {
    pub tenant: &'a ClientSite,
    pub page: &'a PageView,
    pub components: &'a [ComponentView],
    /// Pages aggregated by a listing page; empty otherwise.
    pub related: &'a [PageView],
    /// External base URL for canonical links (no trailing slash).
    pub base_url: &'a str,
    pub preview: bool,
}

/// Public path of a page under the render routes.
pub fn page_path(tenant_slug: &str, page: &PageView) -> String {
    match page.category.as_deref() {
        Some(category) => format!("/c/{}/{}/{}", tenant_slug, category, page.slug),
        None => format!("/c/{}/{}", tenant_slug, page.slug),
    }
}

/// Compose the full HTML document for a resolved page.
pub fn render_document(ctx: &RenderContext) -> String {
    let page = ctx.page;
    let tenant = ctx.tenant;

    let title = resolved_title(ctx);
    let description = resolved_description(ctx);
    let og_image = resolved_og_image(ctx);
    let canonical = resolved_canonical(ctx);
    let favicon = tenant.favicon.as_deref().unwrap_or("/favicon.ico");
    let og_type = if page.page_type == PAGE_TYPE_BLOG {
        "article"
    } else {
        "website"
    };

    let header = find_component(ctx.components, COMPONENT_TYPE_HEADER);
    let footer = find_component(ctx.components, COMPONENT_TYPE_FOOTER);
    let css = combined_css(tenant, header, footer, page);

    let mut doc = String::with_capacity(4096);
    doc.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    doc.push_str("<meta charset=\"utf-8\">\n");
    let _ = writeln!(doc, "<title>{}</title>", escape_html(&title));
    let _ = writeln!(
        doc,
        "<meta name=\"description\" content=\"{}\">",
        escape_html(&description)
    );
    if let Some(keywords) = non_empty(page.meta_keywords.as_deref()) {
        let _ = writeln!(
            doc,
            "<meta name=\"keywords\" content=\"{}\">",
            escape_html(keywords)
        );
    }
    doc.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1, maximum-scale=5\">\n",
    );
    let _ = writeln!(doc, "<link rel=\"icon\" href=\"{}\">", escape_html(favicon));
    let _ = writeln!(
        doc,
        "<link rel=\"apple-touch-icon\" href=\"{}\">",
        escape_html(favicon)
    );
    if ctx.preview {
        doc.push_str("<meta name=\"robots\" content=\"noindex, nofollow\">\n");
    }

    let _ = writeln!(
        doc,
        "<meta property=\"og:title\" content=\"{}\">",
        escape_html(&title)
    );
    let _ = writeln!(
        doc,
        "<meta property=\"og:description\" content=\"{}\">",
        escape_html(&description)
    );
    let _ = writeln!(doc, "<meta property=\"og:type\" content=\"{og_type}\">");
    let _ = writeln!(
        doc,
        "<meta property=\"og:url\" content=\"{}\">",
        escape_html(&canonical)
    );
    if let Some(image) = &og_image {
        let _ = writeln!(
            doc,
            "<meta property=\"og:image\" content=\"{}\">",
            escape_html(image)
        );
    }

    doc.push_str("<meta name=\"twitter:card\" content=\"summary_large_image\">\n");
    let _ = writeln!(
        doc,
        "<meta name=\"twitter:title\" content=\"{}\">",
        escape_html(&title)
    );
    let _ = writeln!(
        doc,
        "<meta name=\"twitter:description\" content=\"{}\">",
        escape_html(&description)
    );
    if let Some(image) = &og_image {
        let _ = writeln!(
            doc,
            "<meta name=\"twitter:image\" content=\"{}\">",
            escape_html(image)
        );
    }

    if !ctx.preview {
        let _ = writeln!(
            doc,
            "<link rel=\"canonical\" href=\"{}\">",
            escape_html(&canonical)
        );
    }
    if let Some(css) = &css {
        let _ = writeln!(doc, "<style>\n{css}\n</style>");
    }
    doc.push_str("</head>\n<body>\n");

    if page.is_preview {
        push_preview_banner(&mut doc, tenant, page);
    }
    if page.use_client_header {
        if let Some(html) = header.and_then(|c| non_empty(c.html_content.as_deref())) {
            doc.push_str(html);
            doc.push('\n');
        }
    }
    if let Some(html) = non_empty(page.html_content.as_deref()) {
        doc.push_str(html);
        doc.push('\n');
    }
    if !ctx.related.is_empty() {
        push_listing_section(&mut doc, &tenant.slug, ctx.related);
    }
    if page.use_client_footer {
        if let Some(html) = footer.and_then(|c| non_empty(c.html_content.as_deref())) {
            doc.push_str(html);
            doc.push('\n');
        }
    }
    if let Some(js) = non_empty(page.js_content.as_deref()) {
        let _ = writeln!(doc, "<script>\n{js}\n</script>");
    }

    doc.push_str("</body>\n</html>\n");
    doc
}

/// Minimal standalone 404 document served by the render routes.
pub fn render_not_found() -> String {
    "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
     <meta charset=\"utf-8\">\n\
     <title>Page Not Found</title>\n\
     <meta name=\"robots\" content=\"noindex\">\n\
     </head>\n<body>\n\
     <h1>Page Not Found</h1>\n\
     <p>The requested page could not be found.</p>\n\
     </body>\n</html>\n"
        .to_string()
}

// ---------------------------------------------------------------------------
// SEO value resolution
// ---------------------------------------------------------------------------

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Title: effective `meta_title`, else `<title>` extracted from the stored
/// markup, else the page title (suffixed with the tenant name for listing
/// pages), else the tenant name.
fn resolved_title(ctx: &RenderContext) -> String {
    if let Some(meta) = non_empty(ctx.page.meta_title.as_deref()) {
        return meta.to_string();
    }
    if let Some(extracted) = ctx
        .page
        .html_content
        .as_deref()
        .and_then(extract_title)
    {
        return extracted;
    }
    if !ctx.page.title.trim().is_empty() {
        if ctx.page.page_type == PAGE_TYPE_LISTING {
            return format!("{} | {}", ctx.page.title, ctx.tenant.name);
        }
        return ctx.page.title.clone();
    }
    ctx.tenant.name.clone()
}

/// Description: effective `meta_description`, else the description meta tag
/// extracted from the stored markup, else the page excerpt, else the tenant
/// default, else empty.
fn resolved_description(ctx: &RenderContext) -> String {
    non_empty(ctx.page.meta_description.as_deref())
        .map(str::to_string)
        .or_else(|| {
            ctx.page
                .html_content
                .as_deref()
                .and_then(extract_meta_description)
        })
        .or_else(|| non_empty(ctx.page.excerpt.as_deref()).map(str::to_string))
        .or_else(|| ctx.tenant.default_description().map(str::to_string))
        .unwrap_or_default()
}

fn resolved_og_image(ctx: &RenderContext) -> Option<String> {
    non_empty(ctx.page.og_image.as_deref())
        .or_else(|| non_empty(ctx.page.featured_image.as_deref()))
        .or_else(|| ctx.tenant.default_og_image())
        .map(str::to_string)
}

fn resolved_canonical(ctx: &RenderContext) -> String {
    if let Some(canonical) = non_empty(ctx.page.canonical_url.as_deref()) {
        return canonical.to_string();
    }
    format!("{}{}", ctx.base_url, page_path(&ctx.tenant.slug, ctx.page))
}

// ---------------------------------------------------------------------------
// Document fragments
// ---------------------------------------------------------------------------

fn find_component<'a>(
    components: &'a [ComponentView],
    component_type: &str,
) -> Option<&'a ComponentView> {
    components.iter().find(|c| c.component_type == component_type)
}

/// Stylesheets concatenate in a fixed order: tenant global CSS, header CSS,
/// footer CSS, page CSS. Component CSS is included even when the matching
/// markup is gated off, so the cascade is stable across page flags.
fn combined_css(
    tenant: &ClientSite,
    header: Option<&ComponentView>,
    footer: Option<&ComponentView>,
    page: &PageView,
) -> Option<String> {
    let parts: Vec<&str> = [
        non_empty(tenant.global_css.as_deref()),
        header.and_then(|c| non_empty(c.css_content.as_deref())),
        footer.and_then(|c| non_empty(c.css_content.as_deref())),
        non_empty(page.css_content.as_deref()),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n\n"))
    }
}

fn push_preview_banner(doc: &mut String, tenant: &ClientSite, page: &PageView) {
    let live_url = page_path(&tenant.slug, page);
    let _ = writeln!(
        doc,
        "<div class=\"preview-banner\" style=\"position:sticky;top:0;z-index:10000;\
         background:#f57c00;color:#fff;padding:12px 20px;\">\
         <span>Preview mode &mdash; viewing unpublished changes</span> \
         <a href=\"{}\" style=\"color:#fff;font-weight:600;\">View live version</a></div>",
        escape_html(&live_url)
    );
}

fn push_listing_section(doc: &mut String, tenant_slug: &str, related: &[PageView]) {
    doc.push_str("<section class=\"page-listing\">\n<div class=\"page-listing-grid\">\n");
    for page in related {
        let href = page_path(tenant_slug, page);
        let _ = writeln!(
            doc,
            "<a class=\"page-listing-card\" href=\"{}\">",
            escape_html(&href)
        );
        if let Some(image) = non_empty(page.featured_image.as_deref()) {
            let _ = writeln!(
                doc,
                "<img src=\"{}\" alt=\"{}\">",
                escape_html(image),
                escape_html(&page.title)
            );
        }
        let _ = writeln!(doc, "<h3>{}</h3>", escape_html(&page.title));
        if let Some(excerpt) = non_empty(page.excerpt.as_deref()) {
            let _ = writeln!(doc, "<p class=\"excerpt\">{}</p>", escape_html(excerpt));
        }
        if let Some(author) = non_empty(page.author.as_deref()) {
            let _ = writeln!(doc, "<p class=\"byline\">By {}</p>", escape_html(author));
        }
        if let Some(date) = page.published_date {
            let _ = writeln!(
                doc,
                "<p class=\"date\">{}</p>",
                date.format("%B %d, %Y")
            );
        }
        doc.push_str("</a>\n");
    }
    doc.push_str("</div>\n</section>\n");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pagehost_core::types::DbId;
    use uuid::Uuid;

    fn tenant() -> ClientSite {
        ClientSite {
            id: Uuid::new_v4(),
            slug: "acme".to_string(),
            name: "Acme Health".to_string(),
            global_css: Some("body { margin: 0; }".to_string()),
            favicon: None,
            meta_defaults: Some(sqlx::types::Json(
                pagehost_db::models::client_site::MetaDefaults {
                    default_description: Some("Acme default description".to_string()),
                    default_og_image: None,
                },
            )),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn page(client_id: DbId) -> PageView {
        PageView {
            id: Uuid::new_v4(),
            client_id,
            slug: "about".to_string(),
            title: "About Us".to_string(),
            category: None,
            page_type: "normal".to_string(),
            html_content: Some("<h1>About</h1>".to_string()),
            css_content: Some(".about { color: teal; }".to_string()),
            js_content: None,
            meta_title: None,
            meta_description: None,
            meta_keywords: None,
            og_image: None,
            canonical_url: None,
            is_published: true,
            has_draft: false,
            is_home_page: false,
            use_client_header: true,
            use_client_footer: true,
            sort_order: 0,
            excerpt: None,
            featured_image: None,
            author: None,
            published_date: None,
            published_at: None,
            is_preview: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn header(html: &str, css: &str) -> ComponentView {
        ComponentView {
            id: Uuid::new_v4(),
            component_type: "header".to_string(),
            html_content: Some(html.to_string()),
            css_content: Some(css.to_string()),
            has_draft: false,
            is_preview: false,
        }
    }

    fn ctx<'a>(
        tenant: &'a ClientSite,
        page: &'a PageView,
        components: &'a [ComponentView],
        related: &'a [PageView],
        preview: bool,
    ) -> RenderContext<'a> {
        RenderContext {
            tenant,
            page,
            components,
            related,
            base_url: "https://pages.example.com",
            preview,
        }
    }

    #[test]
    fn document_contains_title_body_and_canonical() {
        let tenant = tenant();
        let page = page(tenant.id);
        let doc = render_document(&ctx(&tenant, &page, &[], &[], false));

        assert!(doc.contains("<title>About Us</title>"));
        assert!(doc.contains("<h1>About</h1>"));
        assert!(doc.contains(
            "<link rel=\"canonical\" href=\"https://pages.example.com/c/acme/about\">"
        ));
        assert!(!doc.contains("noindex"));
    }

    #[test]
    fn meta_title_beats_page_title() {
        let tenant = tenant();
        let mut page = page(tenant.id);
        page.meta_title = Some("Custom Meta".to_string());
        let doc = render_document(&ctx(&tenant, &page, &[], &[], false));
        assert!(doc.contains("<title>Custom Meta</title>"));
    }

    #[test]
    fn title_extracted_from_markup_when_no_meta() {
        let tenant = tenant();
        let mut page = page(tenant.id);
        page.html_content = Some("<title>Embedded Title</title><h1>x</h1>".to_string());
        let doc = render_document(&ctx(&tenant, &page, &[], &[], false));
        assert!(doc.contains("<title>Embedded Title</title>"));
    }

    #[test]
    fn description_falls_back_to_tenant_default() {
        let tenant = tenant();
        let page = page(tenant.id);
        let doc = render_document(&ctx(&tenant, &page, &[], &[], false));
        assert!(doc.contains("content=\"Acme default description\""));
    }

    #[test]
    fn preview_sets_noindex_and_drops_canonical() {
        let tenant = tenant();
        let mut page = page(tenant.id);
        page.is_preview = true;
        let doc = render_document(&ctx(&tenant, &page, &[], &[], true));

        assert!(doc.contains("noindex, nofollow"));
        assert!(!doc.contains("rel=\"canonical\""));
        assert!(doc.contains("preview-banner"));
    }

    #[test]
    fn header_markup_gated_by_flag_but_css_still_included() {
        let tenant = tenant();
        let mut page = page(tenant.id);
        page.use_client_header = false;
        let components = vec![header("<nav>Menu</nav>", "nav { display: flex; }")];
        let doc = render_document(&ctx(&tenant, &page, &components, &[], false));

        assert!(!doc.contains("<nav>Menu</nav>"));
        assert!(doc.contains("nav { display: flex; }"));
    }

    #[test]
    fn css_concatenates_in_fixed_order() {
        let tenant = tenant();
        let page = page(tenant.id);
        let components = vec![header("<nav>Menu</nav>", "nav { display: flex; }")];
        let doc = render_document(&ctx(&tenant, &page, &components, &[], false));

        let global = doc.find("body { margin: 0; }").unwrap();
        let header_css = doc.find("nav { display: flex; }").unwrap();
        let page_css = doc.find(".about { color: teal; }").unwrap();
        assert!(global < header_css && header_css < page_css);
    }

    #[test]
    fn listing_section_links_related_pages() {
        let tenant = tenant();
        let mut listing = page(tenant.id);
        listing.page_type = "listing".to_string();
        listing.category = Some("education".to_string());

        let mut related = page(tenant.id);
        related.slug = "gut-health".to_string();
        related.title = "Gut Health".to_string();
        related.category = Some("education".to_string());
        related.excerpt = Some("The basics.".to_string());

        let doc = render_document(&ctx(&tenant, &listing, &[], &[related], false));
        assert!(doc.contains("href=\"/c/acme/education/gut-health\""));
        assert!(doc.contains("<h3>Gut Health</h3>"));
        assert!(doc.contains("The basics."));
    }

    #[test]
    fn head_values_are_escaped() {
        let tenant = tenant();
        let mut page = page(tenant.id);
        page.meta_title = Some(r#"Fish & "Chips""#.to_string());
        let doc = render_document(&ctx(&tenant, &page, &[], &[], false));
        assert!(doc.contains("Fish &amp; &quot;Chips&quot;"));
        assert!(!doc.contains(r#"<title>Fish & "Chips"</title>"#));
    }

    #[test]
    fn script_emitted_verbatim_when_present() {
        let tenant = tenant();
        let mut page = page(tenant.id);
        page.js_content = Some("console.log('hi');".to_string());
        let doc = render_document(&ctx(&tenant, &page, &[], &[], false));
        assert!(doc.contains("<script>\nconsole.log('hi');\n</script>"));
    }
}
