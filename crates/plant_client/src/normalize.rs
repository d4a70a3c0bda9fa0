//! Turns provider (or demo) JSON into [`PlantSuggestion`]s.
//!
//! The provider's response layout has drifted between API versions, so the
//! known layouts are matched in a fixed priority order. Anything that matches
//! none of them is "nothing recognised", which is a valid empty result rather
//! than an error.

use std::collections::HashMap;

use log::debug;
use rand::Rng;
use serde_json::Value;

use crate::models::{PlantSuggestion, SimilarImage};

pub const DEFAULT_SUGGESTION_LIMIT: usize = 3;
pub const UNKNOWN_PLANT: &str = "Unknown plant";

const RUSSIAN_NAMES: &[(&str, &str)] = &[
    ("Leucanthemum vulgare", "Ромашка луговая"),
    ("Leucanthemum maximum", "Нивяник наибольший"),
    ("Syringa vulgaris", "Сирень"),
    ("Rosa", "Роза"),
    ("Monstera deliciosa", "Монстера"),
    ("Sansevieria trifasciata", "Сансевиерия"),
    ("Ficus lyrata", "Фикус лировидный"),
    ("Tulipa", "Тюльпан"),
    ("Orchidaceae", "Орхидея"),
    ("Cactaceae", "Кактус"),
];

/// The response layouts we know how to read, in probing order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResponseShape<'a> {
    /// `{ data: { suggestions: [...] } }`, the proxy envelope around a v2 response.
    DataSuggestions(&'a [Value]),
    /// `{ suggestions: [...] }`, a bare v2 response or demo data.
    Suggestions(&'a [Value]),
    /// `{ result: { classification: { suggestions: [...] } } }`, the v3 layout.
    Classification(&'a [Value]),
    /// `{ data: { result: { classification: { suggestions: [...] } } } }`.
    DataClassification(&'a [Value]),
    /// `{ data: [...] }`
    DataArray(&'a [Value]),
    Unrecognized,
}

impl<'a> ResponseShape<'a> {
    pub fn detect(response: &'a Value) -> Self {
        if let Some(items) = array_at(response, "/data/suggestions") {
            ResponseShape::DataSuggestions(items)
        } else if let Some(items) = array_at(response, "/suggestions") {
            ResponseShape::Suggestions(items)
        } else if let Some(items) = array_at(response, "/result/classification/suggestions") {
            ResponseShape::Classification(items)
        } else if let Some(items) = array_at(response, "/data/result/classification/suggestions") {
            ResponseShape::DataClassification(items)
        } else if let Some(items) = array_at(response, "/data") {
            ResponseShape::DataArray(items)
        } else {
            ResponseShape::Unrecognized
        }
    }

    pub fn items(&self) -> &'a [Value] {
        match *self {
            ResponseShape::DataSuggestions(items)
            | ResponseShape::Suggestions(items)
            | ResponseShape::Classification(items)
            | ResponseShape::DataClassification(items)
            | ResponseShape::DataArray(items) => items,
            ResponseShape::Unrecognized => &[],
        }
    }
}

fn array_at<'a>(response: &'a Value, pointer: &str) -> Option<&'a [Value]> {
    response
        .pointer(pointer)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
}

/// Scientific name to local display name lookup.
#[derive(Debug, Clone, Default)]
pub struct NameTranslations {
    names: HashMap<String, String>,
}

impl NameTranslations {
    /// Built-in table for a provider language tag. Unknown languages get an
    /// empty table, so names pass through unchanged.
    pub fn for_language(language: &str) -> Self {
        let table: &[(&str, &str)] = match language.trim().to_ascii_lowercase().as_str() {
            "ru" => RUSSIAN_NAMES,
            _ => &[],
        };
        Self {
            names: table
                .iter()
                .map(|(latin, local)| (latin.to_string(), local.to_string()))
                .collect(),
        }
    }

    pub fn translate<'a>(&'a self, name: &'a str) -> &'a str {
        self.names.get(name).map(String::as_str).unwrap_or(name)
    }
}

/// Synthesises ids for suggestions the provider sent without one. Unique
/// within one normalisation pass.
struct SuggestionIds {
    salt: u32,
    next: usize,
}

impl SuggestionIds {
    fn new() -> Self {
        Self {
            salt: rand::thread_rng().gen(),
            next: 0,
        }
    }

    fn next_id(&mut self) -> String {
        let id = format!("plant-{:08x}-{}", self.salt, self.next);
        self.next += 1;
        id
    }
}

#[derive(Debug, Clone)]
pub struct Normalizer {
    limit: usize,
    translations: NameTranslations,
    reference_base: Option<String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SUGGESTION_LIMIT,
            translations: NameTranslations::default(),
            reference_base: None,
        }
    }
}

impl Normalizer {
    /// Normaliser with the local-name table and Wikipedia links for `language`.
    pub fn for_language(language: &str) -> Self {
        let language = language.trim().to_ascii_lowercase();
        let reference_base = if language.is_empty() {
            None
        } else {
            Some(format!("https://{language}.wikipedia.org/wiki/"))
        };
        Self {
            translations: NameTranslations::for_language(&language),
            reference_base,
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Source order is kept; only the first `limit` entries survive.
    pub fn normalize(&self, response: &Value) -> Vec<PlantSuggestion> {
        self.normalize_with_limit(response, self.limit)
    }

    /// [`Normalizer::normalize`] with a per-call cap instead of the configured one.
    pub fn normalize_with_limit(&self, response: &Value, limit: usize) -> Vec<PlantSuggestion> {
        let shape = ResponseShape::detect(response);
        let items = shape.items();
        debug!(
            "Normalizing {} raw suggestions (shape: {})",
            items.len(),
            shape_name(&shape)
        );

        let mut ids = SuggestionIds::new();
        items
            .iter()
            .take(limit)
            .map(|raw| self.suggestion(raw, &mut ids))
            .collect()
    }

    fn suggestion(&self, raw: &Value, ids: &mut SuggestionIds) -> PlantSuggestion {
        let details = ["details", "plant_details"]
            .into_iter()
            .find_map(|key| raw.get(key).filter(|d| d.is_object()));
        let field = |key: &str| raw.get(key).or_else(|| details.and_then(|d| d.get(key)));

        let latin_name = ["plant_name", "scientific_name"]
            .into_iter()
            .find_map(|key| field(key).and_then(non_empty_str))
            .map(str::to_string);

        let base_name = raw
            .get("name")
            .and_then(non_empty_str)
            .or(latin_name.as_deref())
            .unwrap_or(UNKNOWN_PLANT);
        let display_name = self.translations.translate(base_name).to_string();

        let id = raw
            .get("id")
            .and_then(id_string)
            .unwrap_or_else(|| ids.next_id());

        let probability = raw
            .get("probability")
            .and_then(Value::as_f64)
            .map(clamp_probability)
            .unwrap_or(0.0);

        let confirmed = raw
            .get("confirmed")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let common_names: Vec<String> = match field("common_names").and_then(Value::as_array) {
            Some(names) => names
                .iter()
                .filter_map(non_empty_str)
                .map(str::to_string)
                .collect(),
            None => vec![display_name.clone()],
        };

        let description = raw
            .get("description")
            .and_then(non_empty_str)
            .or_else(|| {
                let wiki = details?.get("wiki_description")?;
                wiki.get("value")
                    .and_then(non_empty_str)
                    .or_else(|| non_empty_str(wiki))
            })
            .map(str::to_string);

        let reference_url = field("url")
            .and_then(non_empty_str)
            .map(str::to_string)
            .or_else(|| {
                let base = self.reference_base.as_ref()?;
                let latin = latin_name.as_ref()?;
                Some(format!("{base}{}", urlencoding::encode(latin)))
            });

        let similar_images = raw
            .get("similar_images")
            .or_else(|| details.and_then(|d| d.get("similar_images")))
            .and_then(Value::as_array)
            .map(|images| similar_images(&id, images))
            .unwrap_or_default();

        PlantSuggestion {
            id,
            display_name,
            latin_name,
            probability,
            confirmed,
            common_names,
            description,
            reference_url,
            similar_images,
        }
    }
}

/// Default-configured normaliser: top 3, no local names.
pub fn extract_suggestions(response: &Value) -> Vec<PlantSuggestion> {
    Normalizer::default().normalize(response)
}

fn shape_name(shape: &ResponseShape<'_>) -> &'static str {
    match shape {
        ResponseShape::DataSuggestions(_) => "data.suggestions",
        ResponseShape::Suggestions(_) => "suggestions",
        ResponseShape::Classification(_) => "result.classification.suggestions",
        ResponseShape::DataClassification(_) => "data.result.classification.suggestions",
        ResponseShape::DataArray(_) => "data[]",
        ResponseShape::Unrecognized => "unrecognized",
    }
}

fn clamp_probability(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn similar_images(suggestion_id: &str, images: &[Value]) -> Vec<SimilarImage> {
    images
        .iter()
        .enumerate()
        .filter_map(|(index, image)| {
            let url = image
                .get("url")
                .and_then(non_empty_str)
                .or_else(|| image.get("url_small").and_then(non_empty_str))?;
            let id = image
                .get("id")
                .and_then(id_string)
                .unwrap_or_else(|| format!("{suggestion_id}-img-{index}"));
            Some(SimilarImage {
                id,
                url: url.to_string(),
            })
        })
        .collect()
}
