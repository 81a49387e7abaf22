pub mod handlers;
pub mod routes;

use axum::Router;

pub use routes::{create_router, AppState};

/// Create the application router
pub fn create_application() -> Router {
    routes::create_app()
}
