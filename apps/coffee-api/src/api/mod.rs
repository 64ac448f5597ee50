//! API routes module

pub mod coffees;
pub mod health;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Creates all domain routes. Each sub-router has its state applied.
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/coffees", coffees::router(state))
}

/// Creates a router with the /ready endpoint that checks the database.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
