//! Candidate points of interest.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Shortest visit a provider estimate may produce (minutes).
pub const MIN_ESTIMATED_VISIT_MINUTES: f64 = 15.0;

/// Longest visit a provider estimate may produce (minutes).
pub const MAX_ESTIMATED_VISIT_MINUTES: f64 = 180.0;

/// Highest rating a place can carry.
pub const MAX_RATING: f64 = 5.0;

/// Stable identifier of a place, usually the search provider's place id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(pub String);

impl PlaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlaceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Interest category used for preference weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Art,
    Food,
    Nature,
    Shopping,
    Culture,
    Entertainment,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Art,
        Category::Food,
        Category::Nature,
        Category::Shopping,
        Category::Culture,
        Category::Entertainment,
    ];

    /// Map a single provider type tag (e.g. "museum") to a category.
    pub fn from_provider_type(tag: &str) -> Option<Self> {
        let category = match tag {
            "art_gallery" | "museum" => Category::Art,
            "cultural_center" | "historical_site" | "church" | "synagogue" | "mosque" => {
                Category::Culture
            }
            "restaurant" | "food" | "cafe" | "bakery" | "meal_takeaway" => Category::Food,
            "park" | "natural_feature" | "zoo" | "aquarium" | "beach" => Category::Nature,
            "shopping_mall" | "store" | "clothing_store" => Category::Shopping,
            "amusement_park" | "movie_theater" | "night_club" | "casino" => {
                Category::Entertainment
            }
            _ => return None,
        };
        Some(category)
    }

    /// Map provider type tags to categories, deduplicated in first-seen order.
    ///
    /// Places with no recognised tag fall back to [`Category::Culture`].
    pub fn from_provider_types<S: AsRef<str>>(tags: &[S]) -> Vec<Self> {
        let mut categories = Vec::new();
        for category in tags.iter().filter_map(|tag| Self::from_provider_type(tag.as_ref())) {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        if categories.is_empty() {
            categories.push(Category::Culture);
        }
        categories
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Art => "art",
            Category::Food => "food",
            Category::Nature => "nature",
            Category::Shopping => "shopping",
            Category::Culture => "culture",
            Category::Entertainment => "entertainment",
        };
        f.write_str(name)
    }
}

/// A candidate point of interest.
///
/// Immutable once built from search data; scores derived from it live in the
/// selection result, not on the place itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
    #[serde(default)]
    pub address: String,
    /// Review rating on a 0-5 scale.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Estimated visit duration in minutes.
    pub visit_minutes: f64,
    /// Location (lat, lng).
    #[serde(default)]
    pub location: (f64, f64),
}

impl Place {
    pub fn new(id: impl Into<String>, name: impl Into<String>, visit_minutes: f64) -> Self {
        Self {
            id: PlaceId::new(id),
            name: name.into(),
            address: String::new(),
            rating: 0.0,
            review_count: 0,
            categories: Vec::new(),
            visit_minutes,
            location: (0.0, 0.0),
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_review_count(mut self, count: u32) -> Self {
        self.review_count = count;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        if !self.categories.contains(&category) {
            self.categories.push(category);
        }
        self
    }

    pub fn with_location(mut self, lat: f64, lng: f64) -> Self {
        self.location = (lat, lng);
        self
    }

    pub fn has_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    /// First listed category, if any.
    pub fn primary_category(&self) -> Option<Category> {
        self.categories.first().copied()
    }

    /// Check the record's own invariants: finite, positive visit time and a
    /// rating within 0-5.
    pub(crate) fn validation_issue(&self) -> Option<String> {
        if !self.visit_minutes.is_finite() || self.visit_minutes <= 0.0 {
            return Some(format!("visit time must be positive, got {}", self.visit_minutes));
        }
        if !self.rating.is_finite() || !(0.0..=MAX_RATING).contains(&self.rating) {
            return Some(format!("rating must be within 0-5, got {}", self.rating));
        }
        None
    }
}

/// Heuristic visit-time estimate for sources that do not provide one.
pub fn estimate_visit_minutes<S: AsRef<str>>(provider_types: &[S], rating: f64) -> f64 {
    let has_any = |wanted: &[&str]| {
        provider_types
            .iter()
            .any(|tag| wanted.contains(&tag.as_ref()))
    };

    let mut minutes: f64 = if has_any(&["museum", "art_gallery"]) {
        60.0
    } else if has_any(&["park", "zoo", "amusement_park"]) {
        90.0
    } else if has_any(&["restaurant", "cafe"]) {
        45.0
    } else if has_any(&["shopping_mall", "store"]) {
        60.0
    } else {
        30.0
    };

    if rating >= 4.5 {
        minutes *= 1.2;
    } else if rating >= 4.0 {
        minutes *= 1.1;
    } else if rating < 3.0 {
        minutes *= 0.8;
    }

    minutes
        .floor()
        .clamp(MIN_ESTIMATED_VISIT_MINUTES, MAX_ESTIMATED_VISIT_MINUTES)
}
