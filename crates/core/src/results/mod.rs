//! Result reconciliation: domain types, client-side re-filtering and
//! ordering of index result pages.

mod filter;
mod sort;
mod types;

pub use filter::{filter_by_category, filter_by_terms};
pub use sort::{sorted, SortKey};
pub use types::{Category, ContentType, SearchHit, TorrentFile};
