use maglens_core::{Config, FileResolver, SanitizedConfig, SessionController};

/// Shared application state
pub struct AppState {
    config: Config,
    session: SessionController,
    resolver: FileResolver,
}

impl AppState {
    pub fn new(config: Config, session: SessionController, resolver: FileResolver) -> Self {
        Self {
            config,
            session,
            resolver,
        }
    }

    pub fn session(&self) -> &SessionController {
        &self.session
    }

    pub fn resolver(&self) -> &FileResolver {
        &self.resolver
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }
}
