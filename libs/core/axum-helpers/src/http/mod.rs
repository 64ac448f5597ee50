//! HTTP middleware module.
//!
//! - CORS configuration
//! - Security headers
//! - Per-request access logging
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::{cors_layer_from_env, request_logger, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(request_logger))
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(cors_layer_from_env(&environment)?);
//! ```

pub mod cors;
pub mod logging;
pub mod security;

pub use cors::{cors_layer_from_env, create_cors_layer, create_permissive_cors_layer};
pub use logging::request_logger;
pub use security::security_headers;
