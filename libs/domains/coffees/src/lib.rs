//! Coffees Domain
//!
//! A catalog of coffees and the flavor tags they share.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, not-found semantics
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory and PostgreSQL)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Entity    │  ← coffee, flavor, coffee_flavors_flavor
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_coffees::{handlers, InMemoryCoffeeRepository, CoffeeService};
//!
//! let service = CoffeeService::new(InMemoryCoffeeRepository::new());
//! let router = axum::Router::new().nest("/coffees", handlers::router(service));
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{CoffeeError, CoffeeResult};
pub use handlers::ApiDoc;
pub use models::{Coffee, CreateCoffee, Flavor, PaginationQuery, UpdateCoffee};
pub use postgres::PgCoffeeRepository;
pub use repository::{CoffeeRepository, InMemoryCoffeeRepository};
pub use service::CoffeeService;
