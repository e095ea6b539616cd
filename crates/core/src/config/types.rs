use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub backend: BackendConfig,
    #[serde(default)]
    pub metadata: MetadataConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Index backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Bitmagnet server URL (e.g., "http://localhost:3333")
    pub url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

/// Peer-network metadata fallback configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetadataConfig {
    /// Whether the peer-network fallback is enabled.
    #[serde(default = "default_metadata_enabled")]
    pub enabled: bool,
    /// How long to wait for peers before giving up (default: 15)
    #[serde(default = "default_metadata_timeout")]
    pub timeout_secs: u64,
    /// Where the embedded session keeps its scratch state.
    #[serde(default = "default_session_dir")]
    pub session_dir: PathBuf,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            enabled: default_metadata_enabled(),
            timeout_secs: default_metadata_timeout(),
            session_dir: default_session_dir(),
        }
    }
}

fn default_metadata_enabled() -> bool {
    true
}

fn default_metadata_timeout() -> u64 {
    15
}

fn default_session_dir() -> PathBuf {
    std::env::temp_dir().join("maglens-session")
}

/// Sanitized config for API responses
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub backend: SanitizedBackendConfig,
    pub metadata: SanitizedMetadataConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedBackendConfig {
    pub url: String,
    pub timeout_secs: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedMetadataConfig {
    pub enabled: bool,
    pub timeout_secs: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            backend: SanitizedBackendConfig {
                url: config.backend.url.clone(),
                timeout_secs: config.backend.timeout_secs,
            },
            metadata: SanitizedMetadataConfig {
                enabled: config.metadata.enabled,
                timeout_secs: config.metadata.timeout_secs,
            },
        }
    }
}
