//! HTTP API surface.

mod files;
mod handlers;
mod routes;
mod search;

pub use routes::create_router;

use serde::Serialize;

/// Error body shared by all handlers.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
