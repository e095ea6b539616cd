pub mod backend;
pub mod config;
pub mod files;
pub mod metrics;
pub mod query;
pub mod results;
pub mod session;
pub mod testing;

pub use backend::{
    synthesize_magnet, BackendError, BitmagnetClient, SearchBackend, SearchPage, SearchRequest,
};
pub use config::{
    load_config, load_config_from_str, validate_config, BackendConfig, Config, ConfigError,
    MetadataConfig, SanitizedConfig, ServerConfig,
};
pub use files::{
    FileResolution, FileResolver, MagnetMetadataFetcher, MetadataError, MetadataFetcher,
    ResolutionTier,
};
pub use query::{broaden, normalize, page_offset, PAGE_SIZE};
pub use results::{
    filter_by_category, filter_by_terms, sorted, Category, ContentType, SearchHit, SortKey,
    TorrentFile,
};
pub use session::{PageView, SearchError, SearchState, SessionController};
