//! Test fixtures for tour-planner.
//!
//! Provides:
//! - Real Paris points of interest (coordinates from OpenStreetMap)
//! - Helpers for building places and explicit travel-time matrices

#![allow(dead_code)]

pub mod paris_places;

pub use paris_places::*;

use tour_planner::{Category, Place, PlaceId, TravelTimeMatrix};

pub fn id(name: &str) -> PlaceId {
    PlaceId::new(name)
}

/// A place with the given rating, visit time and category.
pub fn place(name: &str, rating: f64, visit_minutes: f64, category: Category) -> Place {
    Place::new(name, name.to_uppercase(), visit_minutes)
        .with_rating(rating)
        .with_category(category)
}

/// Matrix over `names` from dense rows; `None` leaves an entry missing.
pub fn matrix(names: &[&str], rows: Vec<Vec<Option<f64>>>) -> TravelTimeMatrix {
    let ids = names.iter().map(|name| id(name)).collect();
    TravelTimeMatrix::from_rows(ids, rows).expect("valid matrix")
}

/// Complete matrix over `names` from dense rows.
pub fn full_matrix(names: &[&str], rows: &[&[f64]]) -> TravelTimeMatrix {
    let rows = rows
        .iter()
        .map(|row| row.iter().map(|minutes| Some(*minutes)).collect())
        .collect();
    matrix(names, rows)
}

/// Matrix with the same travel time between every pair of distinct places.
pub fn uniform_matrix(places: &[Place], minutes: f64) -> TravelTimeMatrix {
    let mut matrix =
        TravelTimeMatrix::new(places.iter().map(|p| p.id.clone())).expect("unique ids");
    for from in places {
        for to in places {
            if from.id != to.id {
                matrix.set(&from.id, &to.id, minutes).expect("valid entry");
            }
        }
    }
    matrix
}

/// Matrix from 1-D positions: travel time is the distance between them.
pub fn line_matrix(places: &[(Place, f64)]) -> TravelTimeMatrix {
    let mut matrix =
        TravelTimeMatrix::new(places.iter().map(|(p, _)| p.id.clone())).expect("unique ids");
    for (from, x1) in places {
        for (to, x2) in places {
            if from.id != to.id {
                matrix.set(&from.id, &to.id, (x1 - x2).abs()).expect("valid entry");
            }
        }
    }
    matrix
}

pub fn ids_of(places: &[Place]) -> Vec<&str> {
    places.iter().map(|p| p.id.as_str()).collect()
}
