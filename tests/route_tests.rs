//! Route optimizer tests
//!
//! Nearest-neighbour construction, 2-opt refinement, and route totals.

mod fixtures;

use tour_planner::route::optimize;
use tour_planner::{Category, Place, PlanError, PlanOptions, RouteOptions, UserPreferences, plan};

use fixtures::{full_matrix, id, ids_of, matrix, place};

fn corners() -> Vec<Place> {
    vec![
        place("p0", 4.0, 30.0, Category::Art),
        place("p1", 4.0, 20.0, Category::Art),
        place("p2", 4.0, 25.0, Category::Art),
        place("p3", 4.0, 15.0, Category::Art),
    ]
}

/// Nearest neighbour zig-zags p0 -> p1 -> p2 -> p3 (44 min); 2-opt finds
/// p0 -> p2 -> p1 -> p3 (38 min).
fn zig_zag() -> tour_planner::TravelTimeMatrix {
    full_matrix(
        &["p0", "p1", "p2", "p3"],
        &[
            &[0.0, 10.0, 10.0, 22.0],
            &[10.0, 0.0, 14.0, 14.0],
            &[10.0, 14.0, 0.0, 20.0],
            &[22.0, 14.0, 20.0, 0.0],
        ],
    )
}

#[test]
fn test_two_opt_removes_zig_zag() {
    let route = optimize(&corners(), &zig_zag(), &RouteOptions::default()).unwrap();

    assert_eq!(ids_of(&route.stops), vec!["p0", "p2", "p1", "p3"]);
    assert_eq!(route.nearest_neighbor_travel_minutes, 44.0);
    assert_eq!(route.travel_minutes, 38.0);
    assert_eq!(route.improvement_moves, 1);
    assert!(route.improvement_percent() > 13.0);
}

#[test]
fn test_route_totals_add_up() {
    let route = optimize(&corners(), &zig_zag(), &RouteOptions::default()).unwrap();

    assert_eq!(route.legs.len(), route.stops.len() - 1);
    let leg_sum: f64 = route.legs.iter().map(|leg| leg.minutes).sum();
    assert_eq!(leg_sum, route.travel_minutes);
    assert_eq!(route.visit_minutes, 90.0);
    assert_eq!(route.total_minutes, route.travel_minutes + route.visit_minutes);

    for (leg, pair) in route.legs.iter().zip(route.stops.windows(2)) {
        assert_eq!(leg.from, pair[0].id);
        assert_eq!(leg.to, pair[1].id);
    }
}

#[test]
fn test_designated_start_is_kept_first() {
    let options = RouteOptions {
        start: Some(id("p3")),
        ..RouteOptions::default()
    };
    let route = optimize(&corners(), &zig_zag(), &options).unwrap();

    assert_eq!(ids_of(&route.stops), vec!["p3", "p1", "p0", "p2"]);
    assert_eq!(route.travel_minutes, 34.0);
    assert_eq!(route.improvement_moves, 0);
}

#[test]
fn test_start_outside_route_falls_back_to_first_place() {
    let options = RouteOptions {
        start: Some(id("elsewhere")),
        ..RouteOptions::default()
    };
    let route = optimize(&corners(), &zig_zag(), &options).unwrap();
    assert_eq!(route.stops[0].id, id("p0"));
}

#[test]
fn test_small_routes() {
    let travel = zig_zag();

    let empty = optimize(&[], &travel, &RouteOptions::default()).unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.total_minutes, 0.0);

    let single = optimize(&corners()[..1], &travel, &RouteOptions::default()).unwrap();
    assert_eq!(ids_of(&single.stops), vec!["p0"]);
    assert!(single.legs.is_empty());
    assert_eq!(single.travel_minutes, 0.0);
    assert_eq!(single.total_minutes, 30.0);

    let pair = optimize(&corners()[2..], &travel, &RouteOptions::default()).unwrap();
    assert_eq!(ids_of(&pair.stops), vec!["p2", "p3"]);
    assert_eq!(pair.travel_minutes, 20.0);
    assert_eq!(pair.total_minutes, 60.0);
}

#[test]
fn test_missing_pair_fails_fast() {
    let places = corners()[..3].to_vec();
    let travel = matrix(
        &["p0", "p1", "p2"],
        vec![
            vec![Some(0.0), Some(5.0), Some(6.0)],
            vec![Some(5.0), Some(0.0), None],
            vec![Some(6.0), Some(7.0), Some(0.0)],
        ],
    );

    let err = optimize(&places, &travel, &RouteOptions::default()).unwrap_err();
    assert_eq!(
        err,
        PlanError::IncompleteMatrix {
            from: id("p1"),
            to: id("p2"),
        }
    );
}

#[test]
fn test_duplicate_places_rejected() {
    let places = vec![corners()[0].clone(), corners()[0].clone()];
    assert!(matches!(
        optimize(&places, &zig_zag(), &RouteOptions::default()),
        Err(PlanError::DuplicatePlace(_))
    ));
}

#[test]
fn test_route_is_a_permutation_of_input() {
    let route = optimize(&corners(), &zig_zag(), &RouteOptions::default()).unwrap();
    let mut routed = ids_of(&route.stops);
    routed.sort();
    assert_eq!(routed, vec!["p0", "p1", "p2", "p3"]);
}

#[test]
fn test_plan_options_carry_into_routing() {
    let options = PlanOptions {
        start: Some(id("p3")),
        two_opt_cap_factor: 1,
        ..PlanOptions::default()
    };
    assert_eq!(
        RouteOptions::from(&options),
        RouteOptions {
            start: Some(id("p3")),
            two_opt_cap_factor: 1,
        }
    );
    assert_eq!(RouteOptions::from(&PlanOptions::default()), RouteOptions::default());

    // Travel carries no weight, so everything is selected and the start
    // decides where the route begins.
    let prefs = UserPreferences::custom(1.0, 1.0, 0.0);
    let planned = plan(&corners(), &prefs, &zig_zag(), 1000.0, &options).unwrap();

    assert_eq!(planned.selection.len(), 4);
    assert_eq!(ids_of(&planned.route.stops), vec!["p3", "p1", "p0", "p2"]);
    assert_eq!(planned.route.travel_minutes, 34.0);
}

#[test]
fn test_zero_cap_factor_is_rejected_before_routing() {
    let options = PlanOptions {
        two_opt_cap_factor: 0,
        ..PlanOptions::default()
    };
    let prefs = UserPreferences::custom(1.0, 1.0, 0.0);
    assert!(matches!(
        plan(&corners(), &prefs, &zig_zag(), 1000.0, &options),
        Err(PlanError::InvalidOptions(_))
    ));
}
