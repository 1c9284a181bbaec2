//! HTTP-level integration tests for the publish/discard/rollback lifecycle,
//! including the full editorial flow: draft a title change, see it only
//! in preview, publish it, and see it live with the draft gone.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_empty, post_json, put_json};
use sqlx::PgPool;

async fn create_about_page(pool: &PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/clients/acme/pages",
        serde_json::json!({
            "slug": "about",
            "title": "About",
            "meta_title": "About Us.",
            "html_content": "<h1>About</h1>",
            "is_published": true
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn publish_without_draft_returns_400(pool: PgPool) {
    common::seed_site(&pool, "acme").await;
    create_about_page(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_empty(app, "/api/v1/clients/acme/pages/about/publish").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn discard_without_draft_returns_400(pool: PgPool) {
    common::seed_site(&pool, "acme").await;
    create_about_page(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_empty(app, "/api/v1/clients/acme/pages/about/discard").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn publish_missing_page_returns_404(pool: PgPool) {
    common::seed_site(&pool, "acme").await;

    let app = common::build_test_app(pool);
    let response = post_empty(app, "/api/v1/clients/acme/pages/nope/publish").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn draft_preview_publish_flow(pool: PgPool) {
    common::seed_site(&pool, "acme").await;
    create_about_page(&pool).await;

    // Draft a title change.
    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        "/api/v1/clients/acme/pages/about",
        serde_json::json!({"meta_title_draft": "About Our Company."}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Preview shows the draft title; live fetch still shows the published one.
    let app = common::build_test_app(pool.clone());
    let previewed = body_json(get(app, "/api/v1/clients/acme/pages/about?preview=true").await).await;
    assert_eq!(previewed["data"]["meta_title"], "About Our Company.");
    assert_eq!(previewed["data"]["is_preview"], true);

    let app = common::build_test_app(pool.clone());
    let live = body_json(get(app, "/api/v1/clients/acme/pages/about").await).await;
    assert_eq!(live["data"]["meta_title"], "About Us.");

    // Publish, optionally attributing a publisher.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/clients/acme/pages/about/publish",
        serde_json::json!({"publisher_id": "8e7b64a8-1f9e-4f29-a9b2-52c44e14f3a1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let published = body_json(response).await;
    assert_eq!(published["data"]["meta_title"], "About Our Company.");
    assert_eq!(published["data"]["has_draft"], false);

    // The former draft is now the live content, and preview agrees.
    let app = common::build_test_app(pool.clone());
    let live = body_json(get(app, "/api/v1/clients/acme/pages/about").await).await;
    assert_eq!(live["data"]["meta_title"], "About Our Company.");

    let app = common::build_test_app(pool);
    let previewed = body_json(get(app, "/api/v1/clients/acme/pages/about?preview=true").await).await;
    assert_eq!(previewed["data"]["has_draft"], false);
    assert_eq!(previewed["data"]["is_preview"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn discard_flow_keeps_published_content(pool: PgPool) {
    common::seed_site(&pool, "acme").await;
    create_about_page(&pool).await;

    let app = common::build_test_app(pool.clone());
    put_json(
        app,
        "/api/v1/clients/acme/pages/about",
        serde_json::json!({"html_content_draft": "<h1>Scrapped</h1>"}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = post_empty(app, "/api/v1/clients/acme/pages/about/discard").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["has_draft"], false);
    assert_eq!(json["data"]["html_content"], "<h1>About</h1>");

    // Preview now matches live.
    let app = common::build_test_app(pool);
    let previewed = body_json(get(app, "/api/v1/clients/acme/pages/about?preview=true").await).await;
    assert_eq!(previewed["data"]["html_content"], "<h1>About</h1>");
}

/* --------------------------------------------------------------------------
Versions & rollback
-------------------------------------------------------------------------- */

#[sqlx::test(migrations = "../db/migrations")]
async fn versions_accumulate_and_rollback_restores(pool: PgPool) {
    common::seed_site(&pool, "acme").await;
    create_about_page(&pool).await;

    for content in ["<h1>First</h1>", "<h1>Second</h1>"] {
        let app = common::build_test_app(pool.clone());
        put_json(
            app,
            "/api/v1/clients/acme/pages/about",
            serde_json::json!({"html_content_draft": content}),
        )
        .await;
        let app = common::build_test_app(pool.clone());
        let response = post_empty(app, "/api/v1/clients/acme/pages/about/publish").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let app = common::build_test_app(pool.clone());
    let versions = body_json(get(app, "/api/v1/clients/acme/pages/about/versions").await).await;
    let list = versions["data"].as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["version_number"], 2);
    assert_eq!(list[1]["version_number"], 1);

    let app = common::build_test_app(pool.clone());
    let response = post_empty(app, "/api/v1/clients/acme/pages/about/rollback/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["html_content"], "<h1>First</h1>");

    let app = common::build_test_app(pool);
    let response = post_empty(app, "/api/v1/clients/acme/pages/about/rollback/9").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
