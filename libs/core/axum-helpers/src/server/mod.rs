//! Server infrastructure module.
//!
//! - Application setup with OpenAPI documentation
//! - Health endpoint and readiness check aggregation
//! - Graceful shutdown coordination
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::app_info;
//!
//! let router = create_router::<ApiDoc>(api_routes, &environment).await?;
//! let app = router.merge(health_router(app_info!()));
//!
//! create_production_app(app, &server_config, Duration::from_secs(30), cleanup).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{
    OPENAPI_JSON_PATH, SWAGGER_PATH, create_production_app, create_router,
    create_router_with_cors,
};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::ShutdownCoordinator;
