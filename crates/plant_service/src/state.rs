use std::sync::Arc;

use plant_client::{ClientError, MockGenerator, Normalizer, PlantIdClient, PlantIdentifier};

use crate::config::AppConfig;

/// Shared, read-only per-process state. Nothing here changes after startup.
pub struct AppState {
    /// `None` when no credential is configured; requests get demo data.
    pub identifier: Option<Arc<dyn PlantIdentifier>>,
    pub mock: MockGenerator,
    pub normalizer: Normalizer,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        let identifier = PlantIdClient::from_config(&config.provider)?
            .map(|client| Arc::new(client) as Arc<dyn PlantIdentifier>);
        Ok(Self::with_identifier(config, identifier))
    }

    /// Same as [`AppState::new`] with an explicit provider implementation.
    pub fn with_identifier(
        config: &AppConfig,
        identifier: Option<Arc<dyn PlantIdentifier>>,
    ) -> Self {
        Self {
            identifier,
            mock: MockGenerator::new(config.mock_source),
            normalizer: Normalizer::for_language(&config.provider.plant_language)
                .with_limit(config.suggestion_limit),
            max_upload_bytes: config.max_upload_bytes,
        }
    }

    pub fn is_live(&self) -> bool {
        self.identifier.is_some()
    }
}
