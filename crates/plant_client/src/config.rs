use std::fmt;
use std::time::Duration;

use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.plant.id/v2/identify";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_PLANT_LANGUAGE: &str = "ru";
pub const DEFAULT_DETAILS: &str = "common_names,url,wiki_description";
pub const DEFAULT_MODIFIERS: &str = "crops_fast";

/// Provider credential. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Returns `None` for a blank value so an empty env var reads as "not configured".
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Everything the identification client needs to talk to the provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: Option<Secret>,
    pub api_url: Url,
    pub timeout: Duration,
    pub plant_language: String,
    pub details: String,
    pub modifiers: String,
    pub similar_images: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: Url::parse(DEFAULT_API_URL).expect("default provider url is valid"),
            timeout: DEFAULT_TIMEOUT,
            plant_language: DEFAULT_PLANT_LANGUAGE.to_string(),
            details: DEFAULT_DETAILS.to_string(),
            modifiers: DEFAULT_MODIFIERS.to_string(),
            similar_images: true,
        }
    }
}

impl ProviderConfig {
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Secret::new(key);
        self
    }

    pub fn with_api_url(mut self, url: Url) -> Self {
        self.api_url = url;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Text fields sent next to the image, blank values skipped.
    pub fn form_flags(&self) -> Vec<(&'static str, String)> {
        let mut flags = vec![("similar_images", self.similar_images.to_string())];
        for (name, value) in [
            ("plant_language", &self.plant_language),
            ("details", &self.details),
            ("modifiers", &self.modifiers),
        ] {
            if !value.trim().is_empty() {
                flags.push((name, value.clone()));
            }
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_secret_is_not_configured() {
        for value in ["", "   ", "\n"] {
            assert!(Secret::new(value).is_none(), "value {value:?} should be blank");
        }
        assert_eq!(Secret::new(" key ").unwrap().expose(), "key");
    }

    #[test]
    fn secret_debug_is_redacted() {
        let config = ProviderConfig::default().with_api_key("super-secret-key");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret-key"));
        assert!(rendered.contains("Secret(***)"));
    }

    #[test]
    fn form_flags_skip_blank_values() {
        let mut config = ProviderConfig::default();
        config.modifiers = String::new();

        let flags = config.form_flags();
        let names: Vec<_> = flags.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["similar_images", "plant_language", "details"]);
        assert_eq!(flags[0].1, "true");
    }
}
