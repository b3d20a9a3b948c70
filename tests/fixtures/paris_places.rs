//! Real Paris points of interest for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap. Ratings and visit times are
//! representative values, not live data.

use tour_planner::{Category, Place};

/// A named point of interest with coordinates.
#[derive(Debug, Clone)]
pub struct Poi {
    pub id: &'static str,
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub rating: f64,
    pub visit_minutes: f64,
    pub category: Category,
}

impl Poi {
    pub const fn new(
        id: &'static str,
        name: &'static str,
        lat: f64,
        lng: f64,
        rating: f64,
        visit_minutes: f64,
        category: Category,
    ) -> Self {
        Self {
            id,
            name,
            lat,
            lng,
            rating,
            visit_minutes,
            category,
        }
    }

    pub fn place(&self) -> Place {
        Place::new(self.id, self.name, self.visit_minutes)
            .with_rating(self.rating)
            .with_category(self.category)
            .with_location(self.lat, self.lng)
    }
}

// ============================================================================
// Museums and galleries
// ============================================================================

pub const MUSEUMS: &[Poi] = &[
    Poi::new("louvre", "Musée du Louvre", 48.8606, 2.3376, 4.7, 150.0, Category::Art),
    Poi::new("orsay", "Musée d'Orsay", 48.8600, 2.3266, 4.8, 120.0, Category::Art),
    Poi::new("orangerie", "Musée de l'Orangerie", 48.8638, 2.3226, 4.7, 60.0, Category::Art),
    Poi::new("pompidou", "Centre Pompidou", 48.8607, 2.3522, 4.4, 90.0, Category::Art),
    Poi::new("rodin", "Musée Rodin", 48.8553, 2.3159, 4.6, 75.0, Category::Art),
];

// ============================================================================
// Landmarks and culture
// ============================================================================

pub const LANDMARKS: &[Poi] = &[
    Poi::new("notre-dame", "Notre-Dame de Paris", 48.8530, 2.3499, 4.7, 45.0, Category::Culture),
    Poi::new("sainte-chapelle", "Sainte-Chapelle", 48.8554, 2.3450, 4.7, 40.0, Category::Culture),
    Poi::new("pantheon", "Panthéon", 48.8462, 2.3464, 4.6, 50.0, Category::Culture),
    Poi::new("eiffel", "Tour Eiffel", 48.8584, 2.2945, 4.7, 90.0, Category::Culture),
];

// ============================================================================
// Parks and food
// ============================================================================

pub const PARKS_AND_FOOD: &[Poi] = &[
    Poi::new("luxembourg", "Jardin du Luxembourg", 48.8462, 2.3372, 4.8, 60.0, Category::Nature),
    Poi::new("tuileries", "Jardin des Tuileries", 48.8635, 2.3275, 4.6, 45.0, Category::Nature),
    Poi::new("marche-enfants-rouges", "Marché des Enfants Rouges", 48.8629, 2.3618, 4.4, 45.0, Category::Food),
];

/// Every fixture place, in a fixed order.
pub fn all_places() -> Vec<Place> {
    MUSEUMS
        .iter()
        .chain(LANDMARKS)
        .chain(PARKS_AND_FOOD)
        .map(Poi::place)
        .collect()
}
