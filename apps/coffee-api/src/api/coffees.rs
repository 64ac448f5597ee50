//! Coffees API routes

use axum::Router;
use domain_coffees::{CoffeeService, PgCoffeeRepository, handlers};

use crate::state::AppState;

/// Create coffees router backed by PostgreSQL
pub fn router(state: &AppState) -> Router {
    let repository = PgCoffeeRepository::new(state.db.clone());
    let service = CoffeeService::new(repository);
    handlers::router(service)
}
