//! Error types for the planning core and its collaborators.

use thiserror::Error;

use crate::place::PlaceId;

/// Errors raised by the planning core.
///
/// All of these are detected during input validation, before any selection
/// or routing work begins.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("invalid time budget: {0} minutes (must be finite and non-negative)")]
    InvalidBudget(f64),

    #[error("travel time missing for {from} -> {to}")]
    IncompleteMatrix { from: PlaceId, to: PlaceId },

    #[error("inconsistent preferences: {0}")]
    InconsistentPreferences(String),

    #[error("invalid place {id}: {reason}")]
    InvalidPlace { id: PlaceId, reason: String },

    #[error("duplicate place id {0}")]
    DuplicatePlace(PlaceId),

    #[error("invalid travel time matrix: {0}")]
    InvalidMatrix(String),

    #[error("invalid planner options: {0}")]
    InvalidOptions(String),
}

/// Errors raised by place-search and travel-time collaborators.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("no travel time available for {from} -> {to}")]
    Unavailable { from: PlaceId, to: PlaceId },

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    #[error(transparent)]
    Plan(#[from] PlanError),
}

/// Errors raised while loading planner configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
