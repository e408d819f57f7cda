//! Route configuration.

use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::dispatcher::{dispatch_get, dispatch_post};
use crate::handlers::{health_routes, user_routes};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Front dispatcher (HTML pages selected by `action`)
        .route("/", get(dispatch_get).post(dispatch_post))
        .route("/index", get(dispatch_get).post(dispatch_post))
        // Health check
        .nest("/health", health_routes())
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // JSON API
        .nest("/api/users", user_routes())
        .with_state(state)
}
