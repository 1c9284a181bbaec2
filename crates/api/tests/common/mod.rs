#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use pagehost_api::config::ServerConfig;
use pagehost_api::routes;
use pagehost_api::state::AppState;

use pagehost_core::types::DbId;
use pagehost_db::models::client_component::CreateClientComponent;
use pagehost_db::models::client_site::{ClientSite, CreateClientSite, MetaDefaults};
use pagehost_db::repositories::{ClientComponentRepo, ClientSiteRepo};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        public_base_url: "http://pages.test".to_string(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/c", routes::render::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/* --------------------------------------------------------------------------
Request helpers
-------------------------------------------------------------------------- */

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::PUT)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// POST with no body at all (e.g. publish/discard from a plain client).
pub async fn post_empty(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/* --------------------------------------------------------------------------
Seed helpers
-------------------------------------------------------------------------- */

/// Seed an active tenant. Tenants have no HTTP create endpoint (they are
/// provisioned out of band), so tests insert them through the repository.
pub async fn seed_site(pool: &PgPool, slug: &str) -> ClientSite {
    ClientSiteRepo::create(
        pool,
        &CreateClientSite {
            slug: slug.to_string(),
            name: format!("{slug} site"),
            global_css: Some("body { margin: 0; }".to_string()),
            favicon: None,
            meta_defaults: Some(MetaDefaults {
                default_description: Some(format!("{slug} default description")),
                default_og_image: None,
            }),
            is_active: Some(true),
        },
    )
    .await
    .unwrap()
}

pub async fn seed_inactive_site(pool: &PgPool, slug: &str) -> ClientSite {
    ClientSiteRepo::create(
        pool,
        &CreateClientSite {
            slug: slug.to_string(),
            name: format!("{slug} site"),
            global_css: None,
            favicon: None,
            meta_defaults: None,
            is_active: Some(false),
        },
    )
    .await
    .unwrap()
}

pub async fn seed_component(pool: &PgPool, client_id: DbId, component_type: &str, html: &str) {
    ClientComponentRepo::create(
        pool,
        client_id,
        &CreateClientComponent {
            component_type: component_type.to_string(),
            html_content: Some(html.to_string()),
            css_content: None,
            is_active: Some(true),
        },
    )
    .await
    .unwrap();
}
