use bytes::Bytes;
use serde::{Deserialize, Serialize};

pub const DEFAULT_FILENAME: &str = "plant.jpg";
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// An image received from the browser, alive for one request only.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub data: Bytes,
    pub mime_type: String,
    pub filename: String,
}

impl UploadedImage {
    pub fn new(
        data: impl Into<Bytes>,
        mime_type: Option<String>,
        filename: Option<String>,
    ) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
            filename: filename
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FILENAME.to_string()),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SimilarImage {
    pub id: String,
    pub url: String,
}

/// One candidate species, already normalised from whatever the provider sent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlantSuggestion {
    pub id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latin_name: Option<String>,
    /// Always within `[0, 1]`.
    pub probability: f64,
    pub confirmed: bool,
    pub common_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_url: Option<String>,
    pub similar_images: Vec<SimilarImage>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn uploaded_image_fills_missing_metadata() {
        let image = UploadedImage::new(vec![1u8, 2, 3], None, Some("  ".to_string()));
        assert_eq!(image.mime_type, DEFAULT_MIME_TYPE);
        assert_eq!(image.filename, DEFAULT_FILENAME);
        assert_eq!(image.len(), 3);
    }

    #[test]
    fn suggestion_serializes_camel_case() {
        let suggestion = PlantSuggestion {
            id: "x".to_string(),
            display_name: "A".to_string(),
            latin_name: None,
            probability: 0.456,
            confirmed: false,
            common_names: vec!["A".to_string()],
            description: None,
            reference_url: None,
            similar_images: vec![],
        };

        let value = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "x",
                "displayName": "A",
                "probability": 0.456,
                "confirmed": false,
                "commonNames": ["A"],
                "similarImages": []
            })
        );
    }
}
