pub mod client;
pub mod client_trait;
pub mod config;
pub mod error;
pub mod mock;
pub mod models;
pub mod normalize;

pub use client::PlantIdClient;
pub use client_trait::PlantIdentifier;
pub use config::{ProviderConfig, Secret};
pub use error::ClientError;
pub use mock::{MockGenerator, MockSource};
pub use models::{PlantSuggestion, SimilarImage, UploadedImage};
pub use normalize::{extract_suggestions, NameTranslations, Normalizer, ResponseShape};
