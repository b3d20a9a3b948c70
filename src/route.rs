//! Route construction and refinement over the selected places.
//!
//! Phase 1 builds an open tour by nearest neighbour. Phase 2 runs 2-opt with
//! first-improvement moves in canonical (i, j) order until a full pass finds
//! nothing or the move cap is hit.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::PlanError;
use crate::matrix::TravelTimeMatrix;
use crate::options::PlanOptions;
use crate::place::{Place, PlaceId};

/// Minimum gain for a 2-opt move to count as an improvement.
const IMPROVEMENT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct RouteOptions {
    /// Place to start the tour from, if it is among the routed places.
    pub start: Option<PlaceId>,
    /// Move cap = factor * k² (at least 1).
    pub two_opt_cap_factor: usize,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            start: None,
            two_opt_cap_factor: 4,
        }
    }
}

impl From<&PlanOptions> for RouteOptions {
    fn from(options: &PlanOptions) -> Self {
        Self {
            start: options.start.clone(),
            two_opt_cap_factor: options.two_opt_cap_factor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leg {
    pub from: PlaceId,
    pub to: PlaceId,
    pub minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Route {
    /// Places in visiting order.
    pub stops: Vec<Place>,
    pub legs: Vec<Leg>,
    pub travel_minutes: f64,
    pub visit_minutes: f64,
    pub total_minutes: f64,
    /// Travel time of the nearest-neighbour tour before 2-opt.
    pub nearest_neighbor_travel_minutes: f64,
    /// Number of 2-opt moves applied.
    pub improvement_moves: usize,
}

impl Route {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn place_ids(&self) -> Vec<PlaceId> {
        self.stops.iter().map(|place| place.id.clone()).collect()
    }

    /// Travel-time reduction achieved by 2-opt, as a percentage.
    pub fn improvement_percent(&self) -> f64 {
        if self.nearest_neighbor_travel_minutes > 0.0 {
            (self.nearest_neighbor_travel_minutes - self.travel_minutes)
                / self.nearest_neighbor_travel_minutes
                * 100.0
        } else {
            0.0
        }
    }
}

/// Dense travel times between the routed places, by local index.
struct CostTable {
    costs: Vec<Vec<f64>>,
}

impl CostTable {
    /// Fails with `IncompleteMatrix` on the first missing ordered pair.
    fn build(places: &[Place], matrix: &TravelTimeMatrix) -> Result<Self, PlanError> {
        let mut costs = vec![vec![0.0; places.len()]; places.len()];
        for (i, from) in places.iter().enumerate() {
            for (j, to) in places.iter().enumerate() {
                costs[i][j] = matrix.require(&from.id, &to.id)?;
            }
        }
        Ok(Self { costs })
    }

    fn cost(&self, from: usize, to: usize) -> f64 {
        self.costs[from][to]
    }

    fn path_cost(&self, tour: &[usize]) -> f64 {
        tour.windows(2).map(|pair| self.cost(pair[0], pair[1])).sum()
    }
}

/// Order `places` into a short open tour.
///
/// Every ordered pair among `places` must have a travel time; otherwise this
/// fails with [`PlanError::IncompleteMatrix`] before any routing work.
pub fn optimize(
    places: &[Place],
    matrix: &TravelTimeMatrix,
    options: &RouteOptions,
) -> Result<Route, PlanError> {
    let mut seen = HashSet::new();
    for place in places {
        if !seen.insert(&place.id) {
            return Err(PlanError::DuplicatePlace(place.id.clone()));
        }
    }
    let table = CostTable::build(places, matrix)?;

    if places.is_empty() {
        return Ok(Route::empty());
    }

    let start = options
        .start
        .as_ref()
        .and_then(|start| places.iter().position(|place| &place.id == start))
        .unwrap_or(0);

    let mut tour = nearest_neighbor(&table, start);
    let nearest_neighbor_travel_minutes = table.path_cost(&tour);

    let k = tour.len();
    let max_moves = options.two_opt_cap_factor.saturating_mul(k * k).max(1);
    let improvement_moves = two_opt(&mut tour, &table, max_moves);

    let route = assemble(places, &tour, &table, nearest_neighbor_travel_minutes, improvement_moves);

    info!(
        places = route.len(),
        nearest_neighbor_minutes = nearest_neighbor_travel_minutes,
        travel_minutes = route.travel_minutes,
        moves = improvement_moves,
        "route optimized"
    );

    Ok(route)
}

/// Greedy tour from `start`: always extend to the closest unvisited place,
/// earliest index on ties.
fn nearest_neighbor(table: &CostTable, start: usize) -> Vec<usize> {
    let n = table.costs.len();
    let mut visited = vec![false; n];
    let mut tour = Vec::with_capacity(n);

    let mut current = start;
    visited[current] = true;
    tour.push(current);

    while tour.len() < n {
        let mut next: Option<(usize, f64)> = None;
        for candidate in 0..n {
            if visited[candidate] {
                continue;
            }
            let cost = table.cost(current, candidate);
            if next.is_none_or(|(_, best)| cost < best) {
                next = Some((candidate, cost));
            }
        }
        let Some((candidate, _)) = next else {
            break;
        };
        visited[candidate] = true;
        tour.push(candidate);
        current = candidate;
    }

    tour
}

/// Apply first-improving 2-opt moves until none is left or `max_moves` is hit.
/// Returns the number of moves applied.
fn two_opt(tour: &mut [usize], table: &CostTable, max_moves: usize) -> usize {
    if tour.len() < 4 {
        return 0;
    }

    let mut moves = 0;
    while moves < max_moves {
        let Some((i, j, gain)) = first_improving_move(tour, table) else {
            return moves;
        };
        tour[i + 1..=j].reverse();
        moves += 1;
        debug!(i, j, gain, "applied 2-opt move");
    }

    if first_improving_move(tour, table).is_some() {
        warn!(max_moves, "2-opt stopped at the move cap before converging");
    }
    moves
}

/// Scan edge pairs (i, i+1), (j, j+1) with j >= i + 2 and return the first
/// whose segment reversal strictly shortens the tour.
///
/// Travel times may be asymmetric, so the reversed interior is priced with
/// backward prefix sums rather than assumed unchanged.
fn first_improving_move(tour: &[usize], table: &CostTable) -> Option<(usize, usize, f64)> {
    let k = tour.len();
    let mut forward = vec![0.0; k];
    let mut backward = vec![0.0; k];
    for p in 1..k {
        forward[p] = forward[p - 1] + table.cost(tour[p - 1], tour[p]);
        backward[p] = backward[p - 1] + table.cost(tour[p], tour[p - 1]);
    }

    for i in 0..k.saturating_sub(3) {
        for j in i + 2..k - 1 {
            let (a, b, c, d) = (tour[i], tour[i + 1], tour[j], tour[j + 1]);
            let before = table.cost(a, b) + table.cost(c, d) + (forward[j] - forward[i + 1]);
            let after = table.cost(a, c) + table.cost(b, d) + (backward[j] - backward[i + 1]);
            if after < before - IMPROVEMENT_EPSILON {
                return Some((i, j, before - after));
            }
        }
    }
    None
}

fn assemble(
    places: &[Place],
    tour: &[usize],
    table: &CostTable,
    nearest_neighbor_travel_minutes: f64,
    improvement_moves: usize,
) -> Route {
    let stops: Vec<Place> = tour.iter().map(|&index| places[index].clone()).collect();
    let legs: Vec<Leg> = tour
        .windows(2)
        .map(|pair| Leg {
            from: places[pair[0]].id.clone(),
            to: places[pair[1]].id.clone(),
            minutes: table.cost(pair[0], pair[1]),
        })
        .collect();

    let travel_minutes = legs.iter().map(|leg| leg.minutes).sum::<f64>();
    let visit_minutes = stops.iter().map(|place| place.visit_minutes).sum::<f64>();

    Route {
        stops,
        legs,
        travel_minutes,
        visit_minutes,
        total_minutes: travel_minutes + visit_minutes,
        nearest_neighbor_travel_minutes,
        improvement_moves,
    }
}
