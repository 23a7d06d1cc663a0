//! API routes for the scoring server.

pub mod chat;
pub mod error;
pub mod predict;
pub mod request_id;
mod routes;

use axum::Router;

pub fn routes() -> Router<std::sync::Arc<crate::state::AppState>> {
    routes::create_router()
}
