//! HTTP API for the GrantFlow server.

mod error;
mod projects;

pub use error::ApiError;

use axum::routing::get;
use axum::Router;
use grantflow_core::Database;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(db: Database) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/projects/{id}",
            get(projects::get_project)
                .put(projects::replace_project)
                .patch(projects::update_project),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(db)
}

async fn health() -> &'static str {
    "ok"
}
