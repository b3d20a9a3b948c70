//! Budgeted place selection (position-aware greedy knapsack).
//!
//! A candidate's effective cost depends on what was picked before it, so a
//! fixed-weight knapsack table does not apply. Each iteration re-scores every
//! remaining candidate against the current position and takes the one with
//! the best score per minute.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::PlanError;
use crate::matrix::TravelTimeMatrix;
use crate::options::{BudgetAccounting, PlanOptions};
use crate::penalty::{self, PenaltyContext, is_unreachable};
use crate::place::{Place, PlaceId};
use crate::preferences::UserPreferences;
use crate::scoring::composite_score;

/// Floor applied to durations before dividing by them.
pub const MIN_DURATION_MINUTES: f64 = 1.0;

/// A place chosen by the selector, with the figures it was chosen on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedPlace {
    pub place: Place,
    /// Composite score at the time of selection, never negative. Not revised
    /// by later picks.
    pub score: f64,
    /// Penalty in the configured scale.
    pub travel_penalty: f64,
    pub efficiency: f64,
    /// Minutes charged against the budget for this pick.
    pub charged_minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectionReason {
    /// The candidate needs more time than remained when selection stopped.
    ExceedsRemainingBudget {
        required_minutes: f64,
        remaining_minutes: f64,
    },
    /// A travel time needed to evaluate the candidate is missing.
    Unreachable,
    /// Selection stopped at the configured maximum before reaching it.
    ListExhausted,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    pub place_id: PlaceId,
    pub reason: RejectionReason,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionResult {
    /// Selected places in the order they were picked.
    pub selected: Vec<SelectedPlace>,
    pub total_score: f64,
    pub total_visit_minutes: f64,
    pub budget_minutes: f64,
    pub remaining_minutes: f64,
    /// Unselected candidates, in input order.
    pub rejected: Vec<Rejection>,
    pub iterations: usize,
}

impl SelectionResult {
    fn empty(budget_minutes: f64) -> Self {
        Self {
            selected: Vec::new(),
            total_score: 0.0,
            total_visit_minutes: 0.0,
            budget_minutes,
            remaining_minutes: budget_minutes,
            rejected: Vec::new(),
            iterations: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn places(&self) -> Vec<Place> {
        self.selected.iter().map(|s| s.place.clone()).collect()
    }

    pub fn place_ids(&self) -> Vec<PlaceId> {
        self.selected.iter().map(|s| s.place.id.clone()).collect()
    }

    /// Total score per visited minute; zero for an empty selection.
    pub fn efficiency(&self) -> f64 {
        if self.total_visit_minutes > 0.0 {
            self.total_score / self.total_visit_minutes
        } else {
            0.0
        }
    }
}

/// A candidate that fits the remaining budget in the current iteration.
#[derive(Debug, Clone, Copy)]
struct Contender {
    index: usize,
    score: f64,
    travel_penalty: f64,
    efficiency: f64,
    charged_minutes: f64,
    visit_minutes: f64,
}

impl Contender {
    /// Higher efficiency, then higher score, then shorter visit.
    /// Full ties keep the earlier candidate.
    fn beats(&self, other: &Contender) -> bool {
        self.efficiency
            .total_cmp(&other.efficiency)
            .then(self.score.total_cmp(&other.score))
            .then(other.visit_minutes.total_cmp(&self.visit_minutes))
            == Ordering::Greater
    }
}

enum Evaluation {
    Fits(Contender),
    TooLong(f64),
    Unreachable,
}

struct Selector<'a> {
    preferences: &'a UserPreferences,
    matrix: &'a TravelTimeMatrix,
    options: &'a PlanOptions,
}

impl Selector<'_> {
    /// Penalties for the candidates at `indices`, rescaled together.
    fn round_penalties(
        &self,
        candidates: &[Place],
        indices: &[usize],
        current: Option<&PlaceId>,
        selected: &[PlaceId],
    ) -> Vec<f64> {
        let context = PenaltyContext { current, selected };
        let mut penalties: Vec<f64> = indices
            .iter()
            .map(|&index| {
                penalty::penalty(
                    self.options.penalty,
                    self.options.top_n,
                    &candidates[index].id,
                    context,
                    self.matrix,
                )
            })
            .collect();
        penalty::rescale(self.options.penalty_scale, &mut penalties);
        penalties
    }

    fn evaluate(
        &self,
        index: usize,
        place: &Place,
        travel_penalty: f64,
        current: Option<&PlaceId>,
        remaining: f64,
    ) -> Evaluation {
        if is_unreachable(travel_penalty) {
            return Evaluation::Unreachable;
        }

        let charged_minutes = match self.options.budget_accounting {
            BudgetAccounting::VisitOnly => place.visit_minutes,
            BudgetAccounting::VisitAndTravel => {
                let hop = penalty::position_penalty(&place.id, current, self.matrix);
                if is_unreachable(hop) {
                    return Evaluation::Unreachable;
                }
                place.visit_minutes + hop
            }
        };
        if charged_minutes > remaining {
            return Evaluation::TooLong(charged_minutes);
        }

        let score = composite_score(place, self.preferences, travel_penalty);
        Evaluation::Fits(Contender {
            index,
            score,
            travel_penalty,
            efficiency: score / charged_minutes.max(MIN_DURATION_MINUTES),
            charged_minutes,
            visit_minutes: place.visit_minutes,
        })
    }
}

/// Choose the subset of `candidates` to visit within `budget_minutes`.
///
/// Inputs are validated before any selection work. An empty candidate list
/// or a zero budget yields an empty selection.
pub fn select(
    candidates: &[Place],
    preferences: &UserPreferences,
    matrix: &TravelTimeMatrix,
    budget_minutes: f64,
    options: &PlanOptions,
) -> Result<SelectionResult, PlanError> {
    validate_inputs(candidates, preferences, matrix, budget_minutes, options)?;

    if candidates.is_empty() {
        debug!("no candidates to select from");
        return Ok(SelectionResult::empty(budget_minutes));
    }

    let selector = Selector {
        preferences,
        matrix,
        options,
    };

    let mut result = SelectionResult::empty(budget_minutes);
    let mut taken = vec![false; candidates.len()];
    let mut selected_ids: Vec<PlaceId> = Vec::new();
    let mut current: Option<PlaceId> = options.start.clone();
    let mut capped = false;

    loop {
        if options
            .max_selections
            .is_some_and(|cap| result.selected.len() >= cap)
        {
            capped = true;
            break;
        }
        result.iterations += 1;

        let pending: Vec<usize> = (0..candidates.len()).filter(|&i| !taken[i]).collect();
        let penalties =
            selector.round_penalties(candidates, &pending, current.as_ref(), &selected_ids);

        let mut best: Option<Contender> = None;
        for (&index, &travel_penalty) in pending.iter().zip(&penalties) {
            let evaluation = selector.evaluate(
                index,
                &candidates[index],
                travel_penalty,
                current.as_ref(),
                result.remaining_minutes,
            );
            if let Evaluation::Fits(contender) = evaluation {
                if best.is_none_or(|b| contender.beats(&b)) {
                    best = Some(contender);
                }
            }
        }

        let Some(winner) = best else {
            break;
        };

        let place = &candidates[winner.index];
        taken[winner.index] = true;
        result.remaining_minutes -= winner.charged_minutes;
        result.total_score += winner.score;
        result.total_visit_minutes += place.visit_minutes;

        debug!(
            iteration = result.iterations,
            place = %place.id,
            score = winner.score,
            efficiency = winner.efficiency,
            travel_penalty = winner.travel_penalty,
            remaining_minutes = result.remaining_minutes,
            "selected place"
        );

        selected_ids.push(place.id.clone());
        current = Some(place.id.clone());
        result.selected.push(SelectedPlace {
            place: place.clone(),
            score: winner.score,
            travel_penalty: winner.travel_penalty,
            efficiency: winner.efficiency,
            charged_minutes: winner.charged_minutes,
        });
    }

    let leftover: Vec<usize> = (0..candidates.len()).filter(|&i| !taken[i]).collect();
    let penalties = selector.round_penalties(candidates, &leftover, current.as_ref(), &selected_ids);
    for (&index, &travel_penalty) in leftover.iter().zip(&penalties) {
        let place = &candidates[index];
        let reason = if capped {
            RejectionReason::ListExhausted
        } else {
            match selector.evaluate(
                index,
                place,
                travel_penalty,
                current.as_ref(),
                result.remaining_minutes,
            ) {
                Evaluation::Unreachable => {
                    warn!(place = %place.id, "candidate unreachable from the current position");
                    RejectionReason::Unreachable
                }
                Evaluation::TooLong(required_minutes) | Evaluation::Fits(Contender {
                    charged_minutes: required_minutes,
                    ..
                }) => RejectionReason::ExceedsRemainingBudget {
                    required_minutes,
                    remaining_minutes: result.remaining_minutes,
                },
            }
        };
        result.rejected.push(Rejection {
            place_id: place.id.clone(),
            reason,
        });
    }

    info!(
        candidates = candidates.len(),
        selected = result.selected.len(),
        rejected = result.rejected.len(),
        total_score = result.total_score,
        remaining_minutes = result.remaining_minutes,
        "selection complete"
    );

    Ok(result)
}

/// Reject malformed input before any algorithmic work.
pub(crate) fn validate_inputs(
    candidates: &[Place],
    preferences: &UserPreferences,
    matrix: &TravelTimeMatrix,
    budget_minutes: f64,
    options: &PlanOptions,
) -> Result<(), PlanError> {
    if !budget_minutes.is_finite() || budget_minutes < 0.0 {
        return Err(PlanError::InvalidBudget(budget_minutes));
    }
    preferences.validate()?;
    options
        .validate()
        .map_err(|err| PlanError::InvalidOptions(err.to_string()))?;

    let mut seen = HashSet::new();
    for place in candidates {
        if !seen.insert(&place.id) {
            return Err(PlanError::DuplicatePlace(place.id.clone()));
        }
        if let Some(reason) = place.validation_issue() {
            return Err(PlanError::InvalidPlace {
                id: place.id.clone(),
                reason,
            });
        }
        if !matrix.contains(&place.id) {
            return Err(PlanError::InvalidMatrix(format!(
                "place {} is not part of the matrix",
                place.id
            )));
        }
    }

    if let Some(start) = &options.start {
        if !matrix.contains(start) {
            return Err(PlanError::InvalidMatrix(format!(
                "start place {start} is not part of the matrix"
            )));
        }
    }

    Ok(())
}
