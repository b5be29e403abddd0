//! Typed REST client core for the products API.
//!
//! # Overview
//! Declares the generic resource client contract (`CrudApi`) and ships one
//! implementation of it, `RestClient`, that talks JSON over HTTP.
//!
//! # Design
//! - Non-success statuses are data, not errors: every operation returns an
//!   `ApiResponse` whose `content` is `None` when the server said no.
//!   `ClientError` is reserved for transport and codec failures.
//! - `RestClient` splits each operation into `build_*` (produces request)
//!   and `parse_*` (consumes response) around a single `execute` step, so
//!   the I/O boundary is explicit and the pure halves are unit-testable.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod error;
pub mod http;
pub mod response;
pub mod types;

pub use api::CrudApi;
pub use client::RestClient;
pub use error::ClientError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use response::ApiResponse;
pub use types::{Product, Resource};
