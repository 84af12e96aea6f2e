// src/lib.rs

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod ui;

use crate::config::AppState;

/// Todas as rotas da aplicação, já com o estado aplicado.
pub fn build_router(app_state: AppState) -> Router {
    let booking_routes = Router::new()
        .route("/", post(handlers::dashboard::create_booking))
        .route("/{id}/status", patch(handlers::dashboard::update_booking_status));

    let router = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/admin/metrics", get(handlers::dashboard::get_metrics))
        .nest("/api/bookings", booking_routes)
        // Swagger UI em /swagger-ui, servindo o JSON em /api-docs/openapi.json
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .route("/admin", get(handlers::admin::admin_page));

    with_layers(router).with_state(app_state)
}

/// Camadas comuns a todas as rotas.
pub fn with_layers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        // Um handler que entra em panic vira 500; o processo segue de pé.
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
}
