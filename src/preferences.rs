//! User preference weighting.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::place::Category;

/// Weight returned for categories the user did not list.
pub const DEFAULT_CATEGORY_WEIGHT: f64 = 1.0;

/// Preset travel styles. Every preset except [`TravelStyle::Custom`] fixes the
/// three scalar weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelStyle {
    /// Favour highly rated places.
    QualityExplorer,
    /// Favour short hops between places.
    EfficientTourist,
    BalancedTraveler,
    Custom,
}

impl TravelStyle {
    pub const PRESETS: [TravelStyle; 3] = [
        TravelStyle::QualityExplorer,
        TravelStyle::EfficientTourist,
        TravelStyle::BalancedTraveler,
    ];

    /// (rating, preference, travel) weights for a preset style.
    pub fn preset_weights(self) -> Option<(f64, f64, f64)> {
        match self {
            TravelStyle::QualityExplorer => Some((0.6, 0.3, 0.1)),
            TravelStyle::EfficientTourist => Some((0.2, 0.3, 0.5)),
            TravelStyle::BalancedTraveler => Some((0.4, 0.4, 0.2)),
            TravelStyle::Custom => None,
        }
    }
}

/// Per-category weights with an explicit default for unlisted categories.
///
/// Weights are unbounded above, but the preference match saturates: every
/// weight at or above
/// [`SATURATING_CATEGORY_WEIGHT`](crate::scoring::SATURATING_CATEGORY_WEIGHT)
/// scores the maximum match.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryWeights(BTreeMap<Category, f64>);

impl CategoryWeights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, category: Category, weight: f64) -> Self {
        self.set(category, weight);
        self
    }

    pub fn set(&mut self, category: Category, weight: f64) {
        self.0.insert(category, weight);
    }

    /// Weight for `category`, or [`DEFAULT_CATEGORY_WEIGHT`] if unlisted.
    pub fn get(&self, category: Category) -> f64 {
        self.0
            .get(&category)
            .copied()
            .unwrap_or(DEFAULT_CATEGORY_WEIGHT)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.0.iter().map(|(category, weight)| (*category, *weight))
    }
}

/// Scoring configuration supplied by the user for one planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub travel_style: TravelStyle,
    pub category_weights: CategoryWeights,
    pub rating_weight: f64,
    pub preference_weight: f64,
    pub travel_weight: f64,
    /// Scale the preference match by each place's review quality (rating,
    /// review count, category reliability).
    pub quality_adjusted: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self::for_style(TravelStyle::BalancedTraveler)
    }
}

impl UserPreferences {
    /// Preferences for a preset style with no category overrides.
    ///
    /// [`TravelStyle::Custom`] starts from equal weights of 1.0.
    pub fn for_style(style: TravelStyle) -> Self {
        let (rating_weight, preference_weight, travel_weight) =
            style.preset_weights().unwrap_or((1.0, 1.0, 1.0));
        Self {
            travel_style: style,
            category_weights: CategoryWeights::new(),
            rating_weight,
            preference_weight,
            travel_weight,
            quality_adjusted: false,
        }
    }

    /// Caller-chosen scalar weights.
    pub fn custom(rating_weight: f64, preference_weight: f64, travel_weight: f64) -> Self {
        Self {
            travel_style: TravelStyle::Custom,
            category_weights: CategoryWeights::new(),
            rating_weight,
            preference_weight,
            travel_weight,
            quality_adjusted: false,
        }
    }

    pub fn with_quality_adjustment(mut self, enabled: bool) -> Self {
        self.quality_adjusted = enabled;
        self
    }

    pub fn with_category_weight(mut self, category: Category, weight: f64) -> Self {
        self.category_weights.set(category, weight);
        self
    }

    /// Switch to another style, keeping category weights. Preset styles
    /// overwrite the scalar weights; `Custom` keeps the current ones.
    pub fn with_style(mut self, style: TravelStyle) -> Self {
        self.travel_style = style;
        if let Some((rating, preference, travel)) = style.preset_weights() {
            self.rating_weight = rating;
            self.preference_weight = preference;
            self.travel_weight = travel;
        }
        self
    }

    pub fn category_weight(&self, category: Category) -> f64 {
        self.category_weights.get(category)
    }

    pub fn validate(&self) -> Result<(), PlanError> {
        let scalars = [
            ("rating_weight", self.rating_weight),
            ("preference_weight", self.preference_weight),
            ("travel_weight", self.travel_weight),
        ];
        for (name, weight) in scalars {
            if !weight.is_finite() || weight < 0.0 {
                return Err(PlanError::InconsistentPreferences(format!(
                    "{name} must be a non-negative number, got {weight}"
                )));
            }
        }

        if self.rating_weight == 0.0 && self.preference_weight == 0.0 {
            return Err(PlanError::InconsistentPreferences(
                "rating_weight and preference_weight are both zero".to_string(),
            ));
        }

        for (category, weight) in self.category_weights.iter() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(PlanError::InconsistentPreferences(format!(
                    "weight for {category} must be a non-negative number, got {weight}"
                )));
            }
        }

        Ok(())
    }
}
