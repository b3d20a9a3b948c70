//! tour-planner core
//!
//! Picks the points of interest worth visiting within a time budget and
//! orders them into a short walking route.

pub mod error;
pub mod place;
pub mod preferences;
pub mod matrix;
pub mod scoring;
pub mod penalty;
pub mod options;
pub mod selector;
pub mod route;
pub mod planner;
pub mod itinerary;
pub mod traits;
pub mod catalog;
pub mod haversine;
pub mod osrm;

pub use error::{ConfigError, PlanError, ProviderError};
pub use matrix::TravelTimeMatrix;
pub use options::{BudgetAccounting, PlanConfig, PlanOptions};
pub use place::{Category, Place, PlaceId};
pub use planner::{Plan, PlanSummary, compare_styles, plan, plan_from_sources};
pub use preferences::{CategoryWeights, TravelStyle, UserPreferences};
pub use route::{Route, RouteOptions};
pub use selector::{SelectionResult, select};
