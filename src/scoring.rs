//! Composite attractiveness scoring.
//!
//! `score = max(0, rating * w_rating + preference_match * w_preference - penalty * w_travel)`
//!
//! The preference match is bounded to 0-10 so it stays commensurable with the
//! 0-5 rating term.

use crate::place::{Category, Place};
use crate::preferences::{DEFAULT_CATEGORY_WEIGHT, UserPreferences};

/// Upper bound of the preference-match term.
pub const MAX_PREFERENCE_MATCH: f64 = 10.0;

/// Category weight that maps to [`MAX_PREFERENCE_MATCH`]. The default weight
/// of 1.0 maps to the midpoint; heavier weights all saturate at the maximum.
pub const SATURATING_CATEGORY_WEIGHT: f64 = 2.0;

/// Bounds of the review-quality multiplier.
pub const MIN_QUALITY_MULTIPLIER: f64 = 0.5;
pub const MAX_QUALITY_MULTIPLIER: f64 = 1.5;

/// How well a place matches the user's category weights, in 0-10.
///
/// Uses the best-weighted of the place's categories; an uncategorised place
/// is matched against the default weight. With
/// [`UserPreferences::quality_adjusted`] set, each category's match is scaled
/// by [`quality_multiplier`] before the best one is taken.
pub fn preference_match(place: &Place, preferences: &UserPreferences) -> f64 {
    let raw = |weight: f64| weight / SATURATING_CATEGORY_WEIGHT * MAX_PREFERENCE_MATCH;

    let best = place
        .categories
        .iter()
        .map(|category| {
            let matched = raw(preferences.category_weight(*category));
            if preferences.quality_adjusted {
                matched * quality_multiplier(place, *category)
            } else {
                matched
            }
        })
        .fold(None, |best: Option<f64>, matched| {
            Some(best.map_or(matched, |best| best.max(matched)))
        })
        .unwrap_or_else(|| raw(DEFAULT_CATEGORY_WEIGHT));

    best.clamp(0.0, MAX_PREFERENCE_MATCH)
}

/// Confidence in a place's standing within `category`, in 0.5-1.5.
///
/// Blends the rating (70%) with review volume (30%, saturating at 1000
/// reviews), then applies a per-category reliability factor.
pub fn quality_multiplier(place: &Place, category: Category) -> f64 {
    let rating_factor = place.rating / 5.0;
    let popularity_factor = if place.review_count > 0 {
        (f64::from(place.review_count).log10() / 3.0).min(1.0)
    } else {
        0.5
    };
    let reliability = match category {
        Category::Art | Category::Culture => 1.0,
        Category::Food => 1.1,
        Category::Nature => 0.9,
        Category::Shopping => 0.8,
        Category::Entertainment => 1.2,
    };

    ((rating_factor * 0.7 + popularity_factor * 0.3) * reliability)
        .clamp(MIN_QUALITY_MULTIPLIER, MAX_QUALITY_MULTIPLIER)
}

/// Composite score of `place` under `preferences`, given a travel penalty.
///
/// Floored at zero: a place the penalty outweighs is worth nothing, never
/// less than nothing.
pub fn composite_score(place: &Place, preferences: &UserPreferences, travel_penalty: f64) -> f64 {
    let score = place.rating * preferences.rating_weight
        + preference_match(place, preferences) * preferences.preference_weight
        - travel_penalty * preferences.travel_weight;
    score.max(0.0)
}
