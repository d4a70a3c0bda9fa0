//! Service configuration.
//!
//! Built once at startup from command-line flags, falling back to environment
//! variables (a `.env` file is loaded first by the binary). Request handlers
//! only ever see the resulting [`AppConfig`] through `AppState`.

use std::time::Duration;

use clap::{Parser, ValueEnum};
use plant_client::{MockSource, ProviderConfig, Secret};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid provider URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Suggestion limit must be at least 1")]
    ZeroSuggestionLimit,

    #[error("Provider timeout must be greater than zero")]
    ZeroTimeout,

    #[error("Upload size limit must be greater than zero")]
    ZeroUploadLimit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "plant-service")]
#[command(about = "Plant identification backend proxy")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value = "text")]
    pub log_format: LogFormat,

    /// Bind address
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Server port
    #[arg(long, env = "PORT", default_value = "3001")]
    pub port: u16,

    /// Browser origin allowed to call the API
    #[arg(long, env = "CORS_ORIGIN", default_value = "http://localhost:3000")]
    pub cors_origin: String,

    /// plant.id API key. Without it the service serves demo data.
    #[arg(long, env = "PLANT_ID_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// plant.id identification endpoint
    #[arg(long, env = "PLANT_ID_API_URL", default_value = plant_client::config::DEFAULT_API_URL)]
    pub api_url: String,

    /// Timeout for one provider call, in seconds
    #[arg(long, env = "PLANT_ID_TIMEOUT_SECS", default_value = "30")]
    pub timeout_secs: u64,

    /// Language tag sent as `plant_language`
    #[arg(long, env = "PLANT_LANGUAGE", default_value = plant_client::config::DEFAULT_PLANT_LANGUAGE)]
    pub plant_language: String,

    /// Detail fields requested from the provider
    #[arg(long, env = "PLANT_DETAILS", default_value = plant_client::config::DEFAULT_DETAILS)]
    pub details: String,

    /// Provider modifiers
    #[arg(long, env = "PLANT_MODIFIERS", default_value = plant_client::config::DEFAULT_MODIFIERS)]
    pub modifiers: String,

    /// Default number of suggestions returned
    #[arg(long, env = "SUGGESTION_LIMIT", default_value = "3")]
    pub suggestion_limit: usize,

    /// Largest accepted upload, in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value = "10485760")]
    pub max_upload_bytes: usize,

    /// Seed for demo data selection
    #[arg(long, env = "MOCK_SEED")]
    pub mock_seed: Option<u64>,
}

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    pub provider: ProviderConfig,
    pub suggestion_limit: usize,
    pub max_upload_bytes: usize,
    pub mock_source: MockSource,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            cors_origin: "http://localhost:3000".to_string(),
            provider: ProviderConfig::default(),
            suggestion_limit: plant_client::normalize::DEFAULT_SUGGESTION_LIMIT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            mock_source: MockSource::Random,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.suggestion_limit == 0 {
            return Err(ConfigError::ZeroSuggestionLimit);
        }
        if self.provider.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::ZeroUploadLimit);
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl TryFrom<Cli> for AppConfig {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let api_url = Url::parse(&cli.api_url).map_err(|source| ConfigError::InvalidUrl {
            url: cli.api_url.clone(),
            source,
        })?;

        let provider = ProviderConfig {
            api_key: cli.api_key.and_then(Secret::new),
            api_url,
            timeout: Duration::from_secs(cli.timeout_secs),
            plant_language: cli.plant_language,
            details: cli.details,
            modifiers: cli.modifiers,
            similar_images: true,
        };

        let config = AppConfig {
            host: cli.host,
            port: cli.port,
            cors_origin: cli.cors_origin,
            provider,
            suggestion_limit: cli.suggestion_limit,
            max_upload_bytes: cli.max_upload_bytes,
            mock_source: cli
                .mock_seed
                .map(MockSource::Seeded)
                .unwrap_or(MockSource::Random),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<AppConfig, ConfigError> {
        let mut argv = vec!["plant-service"];
        argv.extend_from_slice(args);
        AppConfig::try_from(Cli::parse_from(argv))
    }

    #[test]
    fn flags_build_provider_config() {
        let config = parse(&[
            "--api-key",
            "abc",
            "--api-url",
            "http://localhost:9999/identify",
            "--timeout-secs",
            "5",
            "--plant-language",
            "en",
            "--mock-seed",
            "11",
        ])
        .unwrap();

        assert!(config.provider.has_credential());
        assert_eq!(config.provider.api_url.as_str(), "http://localhost:9999/identify");
        assert_eq!(config.provider.timeout, Duration::from_secs(5));
        assert_eq!(config.provider.plant_language, "en");
        assert_eq!(config.mock_source, MockSource::Seeded(11));
    }

    #[test]
    fn blank_api_key_means_no_credential() {
        let config = parse(&["--api-key", "  "]).unwrap();
        assert!(!config.provider.has_credential());
    }

    #[test]
    fn invalid_url_is_rejected() {
        let err = parse(&["--api-url", "not a url"]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }), "got {err:?}");
    }

    #[test]
    fn zero_values_are_rejected() {
        assert!(matches!(
            parse(&["--suggestion-limit", "0"]).unwrap_err(),
            ConfigError::ZeroSuggestionLimit
        ));
        assert!(matches!(
            parse(&["--timeout-secs", "0"]).unwrap_err(),
            ConfigError::ZeroTimeout
        ));
        assert!(matches!(
            parse(&["--max-upload-bytes", "0"]).unwrap_err(),
            ConfigError::ZeroUploadLimit
        ));
    }

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_address(), "127.0.0.1:3001");
    }
}
