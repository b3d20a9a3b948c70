//! OSRM HTTP adapter for travel-time matrices.

use serde::Deserialize;
use tracing::trace;

use crate::error::ProviderError;
use crate::matrix::TravelTimeMatrix;
use crate::place::Place;
use crate::traits::TravelTimeProvider;

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "foot".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn table_url(&self, places: &[Place]) -> String {
        let coords = places
            .iter()
            .map(|place| format!("{:.6},{:.6}", place.location.1, place.location.0))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/table/v1/{}/{}?annotations=duration",
            self.config.base_url, self.config.profile, coords
        )
    }
}

impl TravelTimeProvider for OsrmClient {
    fn travel_times(&self, places: &[Place]) -> Result<TravelTimeMatrix, ProviderError> {
        if places.is_empty() {
            return Ok(TravelTimeMatrix::default());
        }

        let url = self.table_url(places);
        trace!(%url, "requesting OSRM table");

        let body = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .json::<OsrmTableResponse>()?;

        matrix_from_table(places, body)
    }
}

#[derive(Debug, Deserialize)]
struct OsrmTableResponse {
    code: String,
    message: Option<String>,
    durations: Option<Vec<Vec<Option<f64>>>>,
}

/// Convert an OSRM table response (seconds) into a matrix in minutes.
fn matrix_from_table(
    places: &[Place],
    body: OsrmTableResponse,
) -> Result<TravelTimeMatrix, ProviderError> {
    if body.code != "Ok" {
        return Err(ProviderError::MalformedResponse(format!(
            "OSRM returned {}: {}",
            body.code,
            body.message.unwrap_or_default()
        )));
    }

    let durations = body
        .durations
        .ok_or_else(|| ProviderError::MalformedResponse("missing durations".to_string()))?;
    let n = places.len();
    if durations.len() != n || durations.iter().any(|row| row.len() != n) {
        return Err(ProviderError::MalformedResponse(format!(
            "expected a {n}x{n} duration table"
        )));
    }

    let mut matrix = TravelTimeMatrix::new(places.iter().map(|place| place.id.clone()))?;
    for (i, row) in durations.into_iter().enumerate() {
        for (j, cell) in row.into_iter().enumerate() {
            if i == j {
                continue;
            }
            let (from, to) = (&places[i].id, &places[j].id);
            let seconds = cell.ok_or_else(|| ProviderError::Unavailable {
                from: from.clone(),
                to: to.clone(),
            })?;
            matrix.set(from, to, seconds / 60.0)?;
        }
    }

    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn places() -> Vec<Place> {
        vec![
            Place::new("a", "A", 30.0).with_location(48.8606, 2.3376),
            Place::new("b", "B", 30.0).with_location(48.8600, 2.3266),
        ]
    }

    fn parse(json: &str) -> OsrmTableResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_table_url_uses_lng_lat_order() {
        let client = OsrmClient::new(OsrmConfig::default()).unwrap();
        let url = client.table_url(&places());
        assert_eq!(
            url,
            "http://localhost:5000/table/v1/foot/2.337600,48.860600;2.326600,48.860000?annotations=duration"
        );
    }

    #[test]
    fn test_durations_converted_to_minutes() {
        let places = places();
        let body = parse(r#"{"code":"Ok","durations":[[0,600],[720,0]]}"#);
        let matrix = matrix_from_table(&places, body).unwrap();
        assert_eq!(matrix.get(&places[0].id, &places[1].id), Some(10.0));
        assert_eq!(matrix.get(&places[1].id, &places[0].id), Some(12.0));
    }

    #[test]
    fn test_null_duration_is_unavailable() {
        let places = places();
        let body = parse(r#"{"code":"Ok","durations":[[0,null],[720,0]]}"#);
        match matrix_from_table(&places, body) {
            Err(ProviderError::Unavailable { from, to }) => {
                assert_eq!(from, places[0].id);
                assert_eq!(to, places[1].id);
            }
            other => panic!("expected Unavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_error_code_is_reported() {
        let body = parse(r#"{"code":"InvalidQuery","message":"bad coordinates"}"#);
        assert!(matches!(
            matrix_from_table(&places(), body),
            Err(ProviderError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        let body = parse(r#"{"code":"Ok","durations":[[0,600]]}"#);
        assert!(matches!(
            matrix_from_table(&places(), body),
            Err(ProviderError::MalformedResponse(_))
        ));
    }
}
