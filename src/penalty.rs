//! Travel penalty estimation.
//!
//! Two strategies are available and selectable per run:
//! - current position: travel time from the most recently chosen place (or the
//!   designated start) to the candidate;
//! - top-N cluster: mean travel time from the candidate to its N nearest
//!   already-selected places.
//!
//! Both return 0 when there is nothing to measure against and
//! [`UNREACHABLE_PENALTY`] when a needed matrix entry is missing.
//!
//! Raw penalties are minutes. [`PenaltyScale::Normalized`] maps each round's
//! reachable penalties onto 0-10 so they weigh like the rating and preference
//! terms.

use serde::{Deserialize, Serialize};

use crate::matrix::TravelTimeMatrix;
use crate::place::PlaceId;

/// Penalty assigned when a required travel time is missing.
pub const UNREACHABLE_PENALTY: f64 = 1.0e6;

/// Default N for the top-N cluster penalty.
pub const DEFAULT_TOP_N: usize = 3;

/// Upper end of the normalized penalty range.
pub const MAX_NORMALIZED_PENALTY: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyStrategy {
    #[default]
    CurrentPosition,
    TopNCluster,
}

/// Units the penalty enters the composite score in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyScale {
    /// Travel minutes as measured.
    #[default]
    Raw,
    /// Min-max scaled to 0-10 across the candidates compared together.
    Normalized,
}

/// What a penalty is measured against.
#[derive(Debug, Clone, Copy)]
pub struct PenaltyContext<'a> {
    /// Most recently chosen place, or the start point.
    pub current: Option<&'a PlaceId>,
    /// Places chosen so far, in selection order.
    pub selected: &'a [PlaceId],
}

pub fn is_unreachable(penalty: f64) -> bool {
    penalty >= UNREACHABLE_PENALTY
}

/// Penalty for `candidate` under `strategy`.
pub fn penalty(
    strategy: PenaltyStrategy,
    top_n: usize,
    candidate: &PlaceId,
    context: PenaltyContext<'_>,
    matrix: &TravelTimeMatrix,
) -> f64 {
    match strategy {
        PenaltyStrategy::CurrentPosition => position_penalty(candidate, context.current, matrix),
        PenaltyStrategy::TopNCluster => cluster_penalty(candidate, context.selected, top_n, matrix),
    }
}

/// Travel time from `current` to `candidate`.
pub fn position_penalty(
    candidate: &PlaceId,
    current: Option<&PlaceId>,
    matrix: &TravelTimeMatrix,
) -> f64 {
    match current {
        None => 0.0,
        Some(from) => matrix.get(from, candidate).unwrap_or(UNREACHABLE_PENALTY),
    }
}

/// Mean travel time from `candidate` to its `n` nearest members of `selected`.
pub fn cluster_penalty(
    candidate: &PlaceId,
    selected: &[PlaceId],
    n: usize,
    matrix: &TravelTimeMatrix,
) -> f64 {
    let mut times = Vec::with_capacity(selected.len());
    for other in selected.iter().filter(|other| *other != candidate) {
        match matrix.get(candidate, other) {
            Some(minutes) => times.push(minutes),
            None => return UNREACHABLE_PENALTY,
        }
    }
    if times.is_empty() {
        return 0.0;
    }

    times.sort_by(f64::total_cmp);
    let nearest = &times[..n.max(1).min(times.len())];
    nearest.iter().sum::<f64>() / nearest.len() as f64
}

/// Rescale one round of penalties in place.
///
/// Under [`PenaltyScale::Normalized`] the smallest reachable penalty maps to 0
/// and the largest to [`MAX_NORMALIZED_PENALTY`]. When they are all equal
/// there is nothing to tell apart and every one maps to 0. Unreachable
/// penalties are left as they are.
pub fn rescale(scale: PenaltyScale, penalties: &mut [f64]) {
    if scale == PenaltyScale::Raw {
        return;
    }

    let Some((min, max)) = penalties
        .iter()
        .copied()
        .filter(|penalty| !is_unreachable(*penalty))
        .fold(None, |bounds: Option<(f64, f64)>, penalty| {
            Some(bounds.map_or((penalty, penalty), |(min, max)| {
                (min.min(penalty), max.max(penalty))
            }))
        })
    else {
        return;
    };

    let spread = max - min;
    for penalty in penalties.iter_mut().filter(|penalty| !is_unreachable(**penalty)) {
        *penalty = if spread > 0.0 {
            (*penalty - min) / spread * MAX_NORMALIZED_PENALTY
        } else {
            0.0
        };
    }
}
