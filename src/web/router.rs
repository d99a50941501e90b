//! Router configuration for Web API.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{fetch_user, login, logout, root, signup, AppState};
use super::middleware::create_cors_layer;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origin: &str) -> Router {
    let auth_routes = Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/fetch-user", get(fetch_user))
        .route("/logout", post(logout));

    let api_routes = Router::new().nest("/auth", auth_routes);

    Router::new()
        .route("/", get(root))
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origin)),
        )
        .with_state(app_state)
}
