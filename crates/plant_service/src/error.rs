use actix_multipart::MultipartError;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use plant_client::ClientError;
use thiserror::Error;

use crate::envelope::IdentificationEnvelope;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

/// Display strings are what the browser sees. Upstream detail stays in the
/// logs.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid API credential for the identification service")]
    UpstreamAuth,

    #[error("Request limit exceeded, try again later or check your credit balance")]
    UpstreamRateLimit,

    #[error("The identification service rejected the request (status {status})")]
    UpstreamProtocol { status: u16, message: String },

    #[error("No response from the identification service, check your connection")]
    UpstreamUnreachable(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Auth => AppError::UpstreamAuth,
            ClientError::RateLimited => AppError::UpstreamRateLimit,
            ClientError::Protocol { status, message } => {
                AppError::UpstreamProtocol { status, message }
            }
            ClientError::Unreachable(detail) => AppError::UpstreamUnreachable(detail),
            ClientError::Setup(detail) => AppError::Internal(anyhow::anyhow!(detail)),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        tracing::debug!("Rejected multipart body: {}", err);
        AppError::Validation("Malformed upload, expected a multipart/form-data body".to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamAuth => StatusCode::UNAUTHORIZED,
            AppError::UpstreamRateLimit => StatusCode::TOO_MANY_REQUESTS,
            AppError::UpstreamProtocol { .. } => StatusCode::BAD_GATEWAY,
            AppError::UpstreamUnreachable(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(message) => tracing::info!("Validation failed: {}", message),
            AppError::UpstreamProtocol { status, message } => {
                tracing::warn!("Provider error {}: {}", status, message)
            }
            AppError::UpstreamUnreachable(detail) => {
                tracing::error!("Provider unreachable: {}", detail)
            }
            AppError::Internal(err) => tracing::error!("Internal error: {:?}", err),
            AppError::UpstreamAuth | AppError::UpstreamRateLimit => {
                tracing::warn!("Provider refused the request: {}", self)
            }
        }
        HttpResponse::build(self.status_code()).json(IdentificationEnvelope::failure(self.to_string()))
    }
}
