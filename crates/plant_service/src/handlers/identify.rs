use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use bytes::BytesMut;
use futures_util::StreamExt;
use plant_client::UploadedImage;
use serde::Deserialize;

use crate::envelope::IdentificationEnvelope;
use crate::error::{AppError, Result};
use crate::state::AppState;

pub const IMAGE_FIELD: &str = "image";
const NO_IMAGE: &str = "No image provided";

#[derive(Debug, Default, Deserialize)]
pub struct IdentifyQuery {
    /// Overrides the configured number of suggestions.
    pub limit: Option<usize>,
}

pub async fn handler(
    state: web::Data<AppState>,
    query: web::Query<IdentifyQuery>,
    payload: Multipart,
) -> Result<HttpResponse> {
    let limit = match query.limit {
        Some(0) => return Err(AppError::Validation("limit must be at least 1".to_string())),
        Some(limit) => limit,
        None => state.normalizer.limit(),
    };

    let image = read_image(payload, state.max_upload_bytes).await?;
    tracing::info!(
        filename = %image.filename,
        size = image.len(),
        mime_type = %image.mime_type,
        "Received plant identification request"
    );

    let (response, is_mock) = match &state.identifier {
        Some(identifier) => (identifier.identify(&image).await?, false),
        None => {
            tracing::info!("No provider credential configured, serving demo data");
            (state.mock.generate(), true)
        }
    };

    let suggestions = state.normalizer.normalize_with_limit(&response, limit);
    tracing::info!(
        count = suggestions.len(),
        is_mock,
        "Identification finished"
    );

    Ok(HttpResponse::Ok().json(IdentificationEnvelope::success(suggestions, is_mock)))
}

/// Pulls the single `image` part out of the form. Other fields are skipped.
async fn read_image(mut payload: Multipart, max_bytes: usize) -> Result<UploadedImage> {
    let mut image: Option<UploadedImage> = None;

    while let Some(field) = payload.next().await {
        let mut field = field?;
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        if image.is_some() {
            return Err(AppError::Validation(
                "Only one image can be uploaded per request".to_string(),
            ));
        }

        // A text part named `image` is not an upload.
        let Some(filename) = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string)
        else {
            return Err(AppError::Validation(NO_IMAGE.to_string()));
        };
        let mime_type = field.content_type().map(|mime| mime.to_string());

        let mut data = BytesMut::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            if data.len() + chunk.len() > max_bytes {
                return Err(AppError::Validation(format!(
                    "Image is too large, the limit is {max_bytes} bytes"
                )));
            }
            data.extend_from_slice(&chunk);
        }

        image = Some(UploadedImage::new(data.freeze(), mime_type, Some(filename)));
    }

    image
        .filter(|image| !image.is_empty())
        .ok_or_else(|| AppError::Validation(NO_IMAGE.to_string()))
}
