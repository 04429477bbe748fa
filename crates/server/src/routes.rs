use std::path::Path;

use axum::{http::StatusCode, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::{observability, types::Health};

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod leads;
pub mod users;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics() -> (StatusCode, String) {
    observability::encode_metrics()
}

/// Build the full application router: health/metrics, the record API, API
/// docs, and the static frontend as fallback for everything else.
pub fn build_router(state: ServerState, cors: CorsLayer, frontend_dir: &str) -> Router {
    let static_dir = ServeDir::new(frontend_dir)
        .fallback(ServeFile::new(Path::new(frontend_dir).join("index.html")));

    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics));

    // `/api/responses` is the path the landing page posts to
    let api = Router::new()
        .route("/api/leads", get(leads::list_leads).post(leads::create_lead))
        .route("/api/responses", get(leads::list_leads).post(leads::create_lead))
        .route("/api/users", get(users::list_users).post(users::create_user))
        .route(
            "/api/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        );

    public
        .merge(api)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(static_dir)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
