//! Planning entry points: selection followed by routing.

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::error::{PlanError, ProviderError};
use crate::matrix::TravelTimeMatrix;
use crate::options::PlanOptions;
use crate::place::Place;
use crate::preferences::{TravelStyle, UserPreferences};
use crate::route::{self, Route, RouteOptions};
use crate::selector::{self, SelectionResult};
use crate::traits::{PlaceQuery, PlaceSource, TravelTimeProvider};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummary {
    pub candidates: usize,
    pub selected: usize,
    pub total_score: f64,
    pub visit_minutes: f64,
    pub travel_minutes: f64,
    pub total_minutes: f64,
    /// Total composite score per visited minute.
    pub selection_efficiency: f64,
    pub nearest_neighbor_travel_minutes: f64,
    pub improvement_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub selection: SelectionResult,
    pub route: Route,
    pub summary: PlanSummary,
}

/// Select places within `budget_minutes` and order them into a route.
///
/// Inputs are validated up front; on error nothing is computed. An empty
/// selection skips routing and returns an empty route.
pub fn plan(
    candidates: &[Place],
    preferences: &UserPreferences,
    matrix: &TravelTimeMatrix,
    budget_minutes: f64,
    options: &PlanOptions,
) -> Result<Plan, PlanError> {
    let selection = selector::select(candidates, preferences, matrix, budget_minutes, options)?;

    let route = if selection.is_empty() {
        Route::empty()
    } else {
        route::optimize(&selection.places(), matrix, &RouteOptions::from(options))?
    };

    let summary = PlanSummary {
        candidates: candidates.len(),
        selected: selection.len(),
        total_score: selection.total_score,
        visit_minutes: route.visit_minutes,
        travel_minutes: route.travel_minutes,
        total_minutes: route.total_minutes,
        selection_efficiency: selection.efficiency(),
        nearest_neighbor_travel_minutes: route.nearest_neighbor_travel_minutes,
        improvement_percent: route.improvement_percent(),
    };

    info!(
        candidates = summary.candidates,
        selected = summary.selected,
        total_minutes = summary.total_minutes,
        efficiency = summary.selection_efficiency,
        "plan complete"
    );

    Ok(Plan {
        selection,
        route,
        summary,
    })
}

/// Fetch candidates and travel times from collaborators, then plan.
pub fn plan_from_sources<S, T>(
    source: &S,
    provider: &T,
    query: &PlaceQuery,
    preferences: &UserPreferences,
    budget_minutes: f64,
    options: &PlanOptions,
) -> Result<Plan, ProviderError>
where
    S: PlaceSource + ?Sized,
    T: TravelTimeProvider + ?Sized,
{
    let candidates = source.search(query)?;
    info!(
        location = %query.location,
        found = candidates.len(),
        "fetched candidate places"
    );
    let matrix = provider.travel_times(&candidates)?;
    Ok(plan(&candidates, preferences, &matrix, budget_minutes, options)?)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleOutcome {
    pub style: TravelStyle,
    pub summary: PlanSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleComparison {
    /// One outcome per preset style, in [`TravelStyle::PRESETS`] order.
    pub outcomes: Vec<StyleOutcome>,
    /// Preset with the best selection efficiency; earliest preset on ties.
    pub recommended: Option<TravelStyle>,
}

/// Plan the same inputs under every preset travel style, in parallel.
///
/// Category weights are taken from `base`; scalar weights come from each
/// preset.
pub fn compare_styles(
    candidates: &[Place],
    base: &UserPreferences,
    matrix: &TravelTimeMatrix,
    budget_minutes: f64,
    options: &PlanOptions,
) -> Result<StyleComparison, PlanError> {
    let outcomes = TravelStyle::PRESETS[..]
        .par_iter()
        .map(|style| {
            let preferences = base.clone().with_style(*style);
            plan(candidates, &preferences, matrix, budget_minutes, options).map(|plan| {
                StyleOutcome {
                    style: *style,
                    summary: plan.summary,
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut recommended: Option<&StyleOutcome> = None;
    for outcome in &outcomes {
        if outcome.summary.selected == 0 {
            continue;
        }
        if recommended.is_none_or(|best| {
            outcome.summary.selection_efficiency > best.summary.selection_efficiency
        }) {
            recommended = Some(outcome);
        }
    }
    let recommended = recommended.map(|outcome| outcome.style);

    Ok(StyleComparison {
        outcomes,
        recommended,
    })
}
