//! In-memory place source, loadable from JSON search dumps.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ProviderError;
use crate::place::{Category, Place, PlaceId, estimate_visit_minutes};
use crate::traits::{PlaceQuery, PlaceSource};

/// A raw search result as a provider reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    /// Provider type tags, e.g. "museum" or "park".
    #[serde(default)]
    pub types: Vec<String>,
    pub visit_minutes: Option<f64>,
    pub lat: f64,
    pub lng: f64,
}

impl From<PlaceRecord> for Place {
    fn from(record: PlaceRecord) -> Self {
        let visit_minutes = record
            .visit_minutes
            .unwrap_or_else(|| estimate_visit_minutes(&record.types, record.rating));
        Place {
            id: PlaceId(record.id),
            name: record.name,
            address: record.address,
            rating: record.rating,
            review_count: record.review_count,
            categories: Category::from_provider_types(&record.types),
            visit_minutes,
            location: (record.lat, record.lng),
        }
    }
}

/// Places grouped by location name (matched case-insensitively).
#[derive(Debug, Clone, Default)]
pub struct PlaceCatalog {
    by_location: HashMap<String, Vec<Place>>,
}

impl PlaceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, location: &str, place: Place) {
        self.by_location
            .entry(location.to_lowercase())
            .or_default()
            .push(place);
    }

    /// Parse `{"<location>": [PlaceRecord, ...], ...}`.
    ///
    /// Locations that differ only by case are merged in key order, so the
    /// resulting candidate order does not depend on hashing.
    pub fn from_json_str(json: &str) -> Result<Self, ProviderError> {
        let raw: BTreeMap<String, Vec<PlaceRecord>> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for (location, records) in raw {
            for record in records {
                catalog.insert(&location, Place::from(record));
            }
        }
        Ok(catalog)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

impl PlaceSource for PlaceCatalog {
    fn search(&self, query: &PlaceQuery) -> Result<Vec<Place>, ProviderError> {
        let Some(places) = self.by_location.get(&query.location.to_lowercase()) else {
            return Ok(Vec::new());
        };

        Ok(places
            .iter()
            .filter(|place| query.category.is_none_or(|category| place.has_category(category)))
            .take(query.max_results)
            .cloned()
            .collect())
    }
}
