//! Planner options and TOML configuration loading.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::penalty::{DEFAULT_TOP_N, PenaltyScale, PenaltyStrategy};
use crate::place::PlaceId;
use crate::preferences::UserPreferences;

/// What counts against the time budget during selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetAccounting {
    /// Only visit durations are charged.
    #[default]
    VisitOnly,
    /// Visit durations plus the hop from the current position.
    VisitAndTravel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanOptions {
    /// Travel penalty strategy used while selecting.
    pub penalty: PenaltyStrategy,
    /// N for the top-N cluster penalty.
    pub top_n: usize,
    /// Raw travel minutes, or penalties normalized to 0-10 per round.
    pub penalty_scale: PenaltyScale,
    pub budget_accounting: BudgetAccounting,
    /// Stop selecting after this many places.
    pub max_selections: Option<usize>,
    /// Designated start place. Seeds the current position during selection
    /// and heads the route when it is selected.
    pub start: Option<PlaceId>,
    /// 2-opt improvement cap as a multiple of k² for k routed places.
    pub two_opt_cap_factor: usize,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            penalty: PenaltyStrategy::CurrentPosition,
            top_n: DEFAULT_TOP_N,
            penalty_scale: PenaltyScale::Raw,
            budget_accounting: BudgetAccounting::VisitOnly,
            max_selections: None,
            start: None,
            two_opt_cap_factor: 4,
        }
    }
}

impl PlanOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be at least 1".to_string()));
        }
        if self.two_opt_cap_factor == 0 {
            return Err(ConfigError::Invalid(
                "two_opt_cap_factor must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// A full planning configuration: options plus preferences.
///
/// ```toml
/// [options]
/// penalty = "top_n_cluster"
/// top_n = 2
/// penalty_scale = "normalized"
///
/// [preferences]
/// travel_style = "quality_explorer"
/// rating_weight = 0.6
/// preference_weight = 0.3
/// travel_weight = 0.1
///
/// [preferences.category_weights]
/// art = 1.5
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    pub options: PlanOptions,
    pub preferences: UserPreferences,
}

impl PlanConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: PlanConfig = toml::from_str(source)?;
        config.options.validate()?;
        config
            .preferences
            .validate()
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        Ok(config)
    }
}
