pub mod error;
pub(crate) mod rides;
pub(crate) mod users;
pub mod validation;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Rides
        .route("/post-ride", post(rides::post_ride))
        .route("/search", get(rides::search_rides))
        // Admin user directory
        .route("/admin/users", get(users::list_users))
        .route(
            "/admin/users/:email",
            get(users::get_user).delete(users::delete_user),
        )
        // HTML pages
        .merge(crate::ui::create_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
