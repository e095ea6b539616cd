//! The single active search session: its state and the controller that
//! drives the reconciliation pipeline over it.

mod controller;
mod state;

pub use controller::{PageView, SearchError, SessionController};
pub use state::SearchState;
