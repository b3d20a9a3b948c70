//! Minute-by-minute timeline for a route.

use serde::Serialize;

use crate::place::PlaceId;
use crate::route::Route;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItineraryEntry {
    Visit {
        place: PlaceId,
        name: String,
        start_minute: f64,
        end_minute: f64,
    },
    Travel {
        from: PlaceId,
        to: PlaceId,
        start_minute: f64,
        end_minute: f64,
    },
}

impl ItineraryEntry {
    pub fn start_minute(&self) -> f64 {
        match self {
            ItineraryEntry::Visit { start_minute, .. } | ItineraryEntry::Travel { start_minute, .. } => {
                *start_minute
            }
        }
    }

    pub fn end_minute(&self) -> f64 {
        match self {
            ItineraryEntry::Visit { end_minute, .. } | ItineraryEntry::Travel { end_minute, .. } => {
                *end_minute
            }
        }
    }
}

/// Alternating visit and travel entries, offset from the start of the day.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Itinerary {
    pub entries: Vec<ItineraryEntry>,
}

impl Itinerary {
    pub fn from_route(route: &Route) -> Self {
        let mut entries = Vec::with_capacity(route.stops.len() + route.legs.len());
        let mut clock = 0.0;

        for (index, stop) in route.stops.iter().enumerate() {
            let end = clock + stop.visit_minutes;
            entries.push(ItineraryEntry::Visit {
                place: stop.id.clone(),
                name: stop.name.clone(),
                start_minute: clock,
                end_minute: end,
            });
            clock = end;

            if let Some(leg) = route.legs.get(index) {
                let end = clock + leg.minutes;
                entries.push(ItineraryEntry::Travel {
                    from: leg.from.clone(),
                    to: leg.to.clone(),
                    start_minute: clock,
                    end_minute: end,
                });
                clock = end;
            }
        }

        Self { entries }
    }

    /// Minute at which the last entry ends.
    pub fn finish_minute(&self) -> f64 {
        self.entries.last().map_or(0.0, ItineraryEntry::end_minute)
    }
}
