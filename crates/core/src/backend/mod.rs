//! Index backend abstraction.
//!
//! This module provides a `SearchBackend` trait for querying a torrent
//! index, with a GraphQL implementation for bitmagnet.

mod bitmagnet;
mod types;

pub use bitmagnet::{synthesize_magnet, BitmagnetClient};
pub use types::*;
