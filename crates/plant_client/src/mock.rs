//! Demo data served when no provider credential is configured.

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

/// How the demo entry is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MockSource {
    #[default]
    Random,
    /// A fresh RNG seeded per call: same seed, same entry.
    Seeded(u64),
    /// Always the entry at this index, wrapping around the catalogue.
    Fixed(usize),
}

/// Picks one canned, provider-shaped response. Never fails.
#[derive(Debug, Clone, Default)]
pub struct MockGenerator {
    source: MockSource,
}

impl MockGenerator {
    pub fn new(source: MockSource) -> Self {
        Self { source }
    }

    pub fn catalogue_len() -> usize {
        catalogue().len()
    }

    pub fn generate(&self) -> Value {
        match self.source {
            MockSource::Random => self.generate_with(&mut rand::thread_rng()),
            MockSource::Seeded(seed) => self.generate_with(&mut StdRng::seed_from_u64(seed)),
            MockSource::Fixed(index) => entry(index),
        }
    }

    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> Value {
        entry(rng.gen_range(0..Self::catalogue_len()))
    }
}

fn entry(index: usize) -> Value {
    let mut entries = catalogue();
    let index = index % entries.len();
    let plant = entries.swap_remove(index);
    info!(
        "Serving demo identification: {}",
        plant["plant_name"].as_str().unwrap_or_default()
    );
    json!({
        "is_mock": true,
        "suggestions": [plant],
    })
}

fn catalogue() -> Vec<Value> {
    vec![
        json!({
            "id": "mock-monstera",
            "plant_name": "Monstera deliciosa",
            "probability": 0.92,
            "confirmed": false,
            "plant_details": {
                "common_names": ["Swiss cheese plant", "Monstera"],
                "url": "https://en.wikipedia.org/wiki/Monstera_deliciosa",
                "wiki_description": {
                    "value": "Monstera deliciosa is a species of flowering plant native to tropical forests of southern Mexico."
                }
            },
            "similar_images": [
                {"id": "mock-monstera-1", "url": "https://example.com/demo/monstera-1.jpg"},
                {"id": "mock-monstera-2", "url": "https://example.com/demo/monstera-2.jpg"}
            ]
        }),
        json!({
            "id": "mock-ficus",
            "plant_name": "Ficus lyrata",
            "probability": 0.81,
            "confirmed": false,
            "plant_details": {
                "common_names": ["Fiddle-leaf fig"],
                "url": "https://en.wikipedia.org/wiki/Ficus_lyrata",
                "wiki_description": {
                    "value": "Ficus lyrata is a species of flowering plant in the mulberry and fig family Moraceae."
                }
            },
            "similar_images": [
                {"id": "mock-ficus-1", "url": "https://example.com/demo/ficus-1.jpg"}
            ]
        }),
        json!({
            "id": "mock-sansevieria",
            "plant_name": "Sansevieria trifasciata",
            "probability": 0.64,
            "confirmed": false,
            "plant_details": {
                "common_names": ["Snake plant", "Mother-in-law's tongue"],
                "url": "https://en.wikipedia.org/wiki/Dracaena_trifasciata"
            },
            "similar_images": []
        }),
        json!({
            "id": "mock-daisy",
            "plant_name": "Leucanthemum vulgare",
            "probability": 0.37,
            "confirmed": false,
            "plant_details": {
                "common_names": ["Oxeye daisy"],
                "url": "https://en.wikipedia.org/wiki/Leucanthemum_vulgare"
            },
            "similar_images": [
                {"id": "mock-daisy-1", "url": "https://example.com/demo/daisy-1.jpg"}
            ]
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{extract_suggestions, Normalizer};

    #[test]
    fn catalogue_spans_confidence_range() {
        let probabilities: Vec<f64> = (0..MockGenerator::catalogue_len())
            .map(|i| extract_suggestions(&entry(i))[0].probability)
            .collect();

        assert!(probabilities.len() >= 3);
        assert!(probabilities.iter().any(|p| *p > 0.9));
        assert!(probabilities.iter().any(|p| *p < 0.5));
    }

    #[test]
    fn catalogue_has_entry_without_similar_images() {
        let without_images = (0..MockGenerator::catalogue_len())
            .filter(|i| extract_suggestions(&entry(*i))[0].similar_images.is_empty())
            .count();
        assert!(without_images >= 1);
    }

    #[test]
    fn fixed_source_wraps_around() {
        let generator = MockGenerator::new(MockSource::Fixed(2 + MockGenerator::catalogue_len()));
        let suggestions = extract_suggestions(&generator.generate());
        assert_eq!(suggestions[0].id, "mock-sansevieria");
    }

    #[test]
    fn seeded_source_is_reproducible() {
        let first = MockGenerator::new(MockSource::Seeded(42)).generate();
        let second = MockGenerator::new(MockSource::Seeded(42)).generate();
        assert_eq!(first, second);
    }

    #[test]
    fn generate_with_uses_injected_rng() {
        let generator = MockGenerator::default();
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        assert_eq!(generator.generate_with(&mut a), generator.generate_with(&mut b));
    }

    #[test]
    fn mock_output_is_marked_and_normalizable() {
        let response = MockGenerator::default().generate();
        assert_eq!(response["is_mock"], true);

        let suggestions = Normalizer::for_language("ru").normalize(&response);
        assert_eq!(suggestions.len(), 1);
        assert!(suggestions[0].id.starts_with("mock-"));
        assert!((0.0..=1.0).contains(&suggestions[0].probability));
    }
}
