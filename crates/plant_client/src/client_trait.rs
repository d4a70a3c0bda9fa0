use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::models::UploadedImage;

#[async_trait]
pub trait PlantIdentifier: Send + Sync {
    /// One provider call for one image. Returns the raw JSON body on 2xx.
    async fn identify(&self, image: &UploadedImage) -> Result<Value>;
}
