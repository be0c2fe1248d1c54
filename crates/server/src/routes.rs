pub mod auth;
pub mod contact;
pub mod resources;

use axum::{
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;
use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// `/api` routes. Unmatched `/api/...` paths answer a JSON 404 instead of
/// falling through to the static pages.
fn api_router() -> Router<ServerState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/contact", post(contact::submit))
        .route(
            "/:resource",
            get(resources::list).post(resources::create).put(resources::update_singleton),
        )
        .route("/:resource/:id", put(resources::update).delete(resources::delete))
        .fallback(resources::api_not_found)
}

/// Build the full application router: API, health, docs and static pages.
pub fn build_router(state: ServerState, cors: CorsLayer, static_dir: &str) -> Router {
    let index = format!("{}/index.html", static_dir.trim_end_matches('/'));
    let pages = ServeDir::new(static_dir).fallback(ServeFile::new(index));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_router())
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(pages)
        .layer(cors)
        .layer(request_tracing())
}

/// One INFO span per request with method and URI; the response event
/// carries status and latency, server errors are logged at ERROR.
fn request_tracing() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::INFO).latency_unit(LatencyUnit::Millis))
        .on_failure(DefaultOnFailure::new().level(Level::ERROR))
}
