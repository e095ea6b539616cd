use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Backend section exists (enforced by serde)
/// - Backend URL looks like an HTTP endpoint
/// - Server port is not 0
/// - Timeouts are not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Backend validation
    if !config.backend.url.starts_with("http://") && !config.backend.url.starts_with("https://") {
        return Err(ConfigError::ValidationError(format!(
            "backend.url must be an http(s) URL, got '{}'",
            config.backend.url
        )));
    }
    if config.backend.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "backend.timeout_secs cannot be 0".to_string(),
        ));
    }

    // Metadata fallback validation
    if config.metadata.enabled && config.metadata.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "metadata.timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
