//! HTTP front for the products API.
//!
//! # Overview
//! Exposes `/api/product` and forwards every request to a `CrudApi`
//! implementation, translating the downstream `ApiResponse` into an HTTP
//! status. The gateway owns no data of its own.
//!
//! # Design
//! - `controller` holds the status-mapping rules and is generic over the
//!   resource type; `routes` binds it to the product paths.
//! - The client is injected as `Arc<dyn CrudApi<_, str>>`, so tests can swap
//!   in a stub and the binary plugs in `RestClient`.
//! - Downstream failures that produce no usable response become 502.

pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod routes;

pub use config::{Config, ConfigError, LogFormat};
pub use controller::ResourceController;
pub use error::GatewayError;
pub use routes::{router, PRODUCT_PATH};
