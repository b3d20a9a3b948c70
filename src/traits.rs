//! Collaborator interfaces.
//!
//! The planning core never performs I/O. Candidate places and travel times
//! come from implementations of these traits, run before planning starts.

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::matrix::TravelTimeMatrix;
use crate::place::{Category, Place};

/// Parameters for a place search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceQuery {
    /// Free-form location, e.g. a city name.
    pub location: String,
    /// Restrict results to one category.
    pub category: Option<Category>,
    pub max_results: usize,
}

impl PlaceQuery {
    pub fn new(location: impl Into<String>, max_results: usize) -> Self {
        Self {
            location: location.into(),
            category: None,
            max_results,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }
}

/// Finds candidate places for a query.
///
/// Implementations fill in visit times (see
/// [`estimate_visit_minutes`](crate::place::estimate_visit_minutes)) when the
/// underlying data has none.
pub trait PlaceSource {
    fn search(&self, query: &PlaceQuery) -> Result<Vec<Place>, ProviderError>;
}

/// Provides travel times between places.
///
/// The returned matrix must cover every ordered pair of `places`; a pair the
/// provider cannot route is reported as [`ProviderError::Unavailable`] rather
/// than left out.
pub trait TravelTimeProvider {
    fn travel_times(&self, places: &[Place]) -> Result<TravelTimeMatrix, ProviderError>;
}
