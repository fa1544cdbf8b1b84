//! HTTP API layer for vidplan.
//!
//! Every operation is a `POST` with a JSON body, mounted under `/api` by the
//! server binary. Successful responses are wrapped as `{"data": ...}`.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::{health, not_found, router};
pub use middleware::{AppState, auth_middleware};
