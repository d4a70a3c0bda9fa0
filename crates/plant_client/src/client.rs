use async_trait::async_trait;
use log::{debug, error, info, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::client_trait::PlantIdentifier;
use crate::config::{ProviderConfig, Secret};
use crate::error::{ClientError, Result};
use crate::models::UploadedImage;

const API_KEY_HEADER: &str = "Api-Key";

/// Live client for the plant.id identification endpoint.
#[derive(Debug, Clone)]
pub struct PlantIdClient {
    client: Client,
    config: ProviderConfig,
    api_key: Secret,
}

impl PlantIdClient {
    /// Returns `Ok(None)` when no credential is configured; callers treat
    /// that as "serve demo data".
    pub fn from_config(config: &ProviderConfig) -> Result<Option<Self>> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Setup(format!("Failed to build HTTP client: {e}")))?;
        Ok(Some(Self {
            client,
            config: config.clone(),
            api_key,
        }))
    }

    fn build_form(&self, image: &UploadedImage) -> Result<Form> {
        let part = Part::bytes(image.data.to_vec())
            .file_name(image.filename.clone())
            .mime_str(&image.mime_type)
            .map_err(|e| ClientError::Setup(format!("invalid MIME type: {e}")))?;

        let mut form = Form::new().part("images", part);
        for (name, value) in self.config.form_flags() {
            form = form.text(name, value);
        }
        Ok(form)
    }
}

/// Pulls a human-readable message out of an error body, falling back to the
/// status reason phrase.
fn upstream_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            ["message", "error"]
                .iter()
                .find_map(|key| json.get(*key).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        })
}

#[async_trait]
impl PlantIdentifier for PlantIdClient {
    async fn identify(&self, image: &UploadedImage) -> Result<Value> {
        let form = self.build_form(image)?;

        info!(
            "Sending identification request: {} ({} bytes, {})",
            image.filename,
            image.len(),
            image.mime_type
        );

        let response = self
            .client
            .post(self.config.api_url.clone())
            .header(API_KEY_HEADER, self.api_key.expose())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Identification request failed: {}", e);
                ClientError::from_transport(e)
            })?;

        let status = response.status();
        debug!("Provider responded with status {}", status);

        if status.is_success() {
            let body = response.bytes().await.map_err(ClientError::from_transport)?;
            return serde_json::from_slice(&body).map_err(|e| {
                warn!("Provider returned a non-JSON success body: {}", e);
                ClientError::Protocol {
                    status: status.as_u16(),
                    message: "response body is not valid JSON".to_string(),
                }
            });
        }

        match status {
            StatusCode::UNAUTHORIZED => {
                warn!("Provider rejected the configured credential");
                Err(ClientError::Auth)
            }
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("Provider rate limit exceeded");
                Err(ClientError::RateLimited)
            }
            _ => {
                let body = response.text().await.unwrap_or_default();
                let message = upstream_message(status, &body);
                warn!("Provider error {}: {}", status, message);
                Err(ClientError::Protocol {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_credential_means_no_client() {
        let client = PlantIdClient::from_config(&ProviderConfig::default()).unwrap();
        assert!(client.is_none());
    }

    #[test]
    fn upstream_message_prefers_json_message() {
        let message = upstream_message(
            StatusCode::BAD_REQUEST,
            r#"{"message": "images must be base64 or file"}"#,
        );
        assert_eq!(message, "images must be base64 or file");

        let message = upstream_message(StatusCode::NOT_FOUND, r#"{"error": "no such route"}"#);
        assert_eq!(message, "no such route");
    }

    #[test]
    fn upstream_message_falls_back_to_reason() {
        assert_eq!(
            upstream_message(StatusCode::SERVICE_UNAVAILABLE, "<html>down</html>"),
            "Service Unavailable"
        );
    }
}
