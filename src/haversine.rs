//! Haversine travel-time provider (fallback when no routing service is available).
//!
//! Uses great-circle distance to estimate travel time.
//! Less accurate than OSRM (ignores streets) but always complete.

use crate::error::ProviderError;
use crate::matrix::TravelTimeMatrix;
use crate::place::Place;
use crate::traits::TravelTimeProvider;

/// Average walking speed assumption for time estimation.
const DEFAULT_SPEED_KMH: f64 = 5.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine-based travel-time provider.
///
/// Estimates travel time using straight-line distance and an assumed speed.
#[derive(Debug, Clone)]
pub struct HaversineMatrix {
    /// Assumed average travel speed in km/h.
    pub speed_kmh: f64,
}

impl Default for HaversineMatrix {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl HaversineMatrix {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Calculate haversine distance between two points in kilometers.
    fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
        let (lat1, lng1) = from;
        let (lat2, lng2) = to;

        let lat1_rad = lat1.to_radians();
        let lat2_rad = lat2.to_radians();
        let delta_lat = (lat2 - lat1).to_radians();
        let delta_lng = (lng2 - lng1).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }

    /// Convert distance in km to travel time in minutes.
    fn km_to_minutes(&self, km: f64) -> f64 {
        km / self.speed_kmh * 60.0
    }
}

impl TravelTimeProvider for HaversineMatrix {
    fn travel_times(&self, places: &[Place]) -> Result<TravelTimeMatrix, ProviderError> {
        if !self.speed_kmh.is_finite() || self.speed_kmh <= 0.0 {
            return Err(ProviderError::MalformedResponse(format!(
                "speed must be positive, got {} km/h",
                self.speed_kmh
            )));
        }

        let mut matrix = TravelTimeMatrix::new(places.iter().map(|place| place.id.clone()))?;
        for from in places {
            for to in places {
                if from.id != to.id {
                    let km = Self::haversine_km(from.location, to.location);
                    matrix.set(&from.id, &to.id, self.km_to_minutes(km))?;
                }
            }
        }

        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn places() -> Vec<Place> {
        vec![
            Place::new("louvre", "Louvre", 120.0).with_location(48.8606, 2.3376),
            Place::new("orsay", "Musée d'Orsay", 90.0).with_location(48.8600, 2.3266),
            Place::new("eiffel", "Eiffel Tower", 60.0).with_location(48.8584, 2.2945),
        ]
    }

    #[test]
    fn test_haversine_same_point() {
        let dist = HaversineMatrix::haversine_km((48.86, 2.33), (48.86, 2.33));
        assert!(dist < 0.001, "Same point should have ~0 distance");
    }

    #[test]
    fn test_haversine_known_distance() {
        // Paris (48.8566, 2.3522) to London (51.5074, -0.1278)
        // Actual distance ~344 km
        let dist = HaversineMatrix::haversine_km((48.8566, 2.3522), (51.5074, -0.1278));
        assert!(dist > 330.0 && dist < 360.0, "Paris to London should be ~344km, got {}", dist);
    }

    #[test]
    fn test_matrix_is_complete_with_zero_diagonal() {
        let places = places();
        let matrix = HaversineMatrix::default().travel_times(&places).unwrap();

        for from in &places {
            for to in &places {
                let minutes = matrix.get(&from.id, &to.id).expect("entry present");
                if from.id == to.id {
                    assert_eq!(minutes, 0.0, "Diagonal should be zero");
                } else {
                    assert!(minutes > 0.0);
                }
            }
        }
    }

    #[test]
    fn test_matrix_symmetric() {
        let places = places();
        let matrix = HaversineMatrix::default().travel_times(&places).unwrap();
        assert_eq!(
            matrix.get(&places[0].id, &places[2].id),
            matrix.get(&places[2].id, &places[0].id),
            "Matrix should be symmetric"
        );
    }

    #[test]
    fn test_reasonable_travel_time() {
        let provider = HaversineMatrix::new(5.0); // 5 km/h
        // 1 km at 5 km/h = 12 minutes
        assert!((provider.km_to_minutes(1.0) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        assert!(HaversineMatrix::new(0.0).travel_times(&places()).is_err());
    }
}
