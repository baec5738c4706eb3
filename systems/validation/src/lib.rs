#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spatial queries that decide whether a character may stand at a position.
//!
//! A position is valid when it lies near a path point and a character disk
//! centered on it touches neither a building nor a tree. Maps without path
//! points treat every position as on-path so that a degenerate map does not
//! freeze movement entirely.

use wayfield_core::{Building, Map, PathPoint, Tree, ValidationTuning};

/// Validates `(x, y)` against `map` using the default tolerance and radius.
#[must_use]
pub fn is_valid_position(map: &Map, x: f64, y: f64) -> bool {
    is_valid_position_with(&ValidationTuning::default(), map, x, y)
}

/// Validates `(x, y)` against `map` using the provided thresholds.
#[must_use]
pub fn is_valid_position_with(tuning: &ValidationTuning, map: &Map, x: f64, y: f64) -> bool {
    is_on_path(&map.paths.points, x, y, tuning.tolerance)
        && !collides_with_buildings(&map.buildings, x, y, tuning.character_radius)
        && !collides_with_trees(&map.trees, x, y, tuning.character_radius)
}

/// Reports whether some point lies within `tolerance` of `(x, y)`.
///
/// Returns `true` when `points` is empty.
#[must_use]
pub fn is_on_path(points: &[PathPoint], x: f64, y: f64, tolerance: f64) -> bool {
    points.is_empty() || points.iter().any(|point| point.distance_to(x, y) <= tolerance)
}

/// Reports whether the square of half-width `radius` around `(x, y)` overlaps a building.
#[must_use]
pub fn collides_with_buildings(buildings: &[Building], x: f64, y: f64, radius: f64) -> bool {
    buildings
        .iter()
        .any(|building| building.overlaps_box(x - radius, y - radius, x + radius, y + radius))
}

/// Reports whether a disk of `radius` at `(x, y)` intersects a tree.
#[must_use]
pub fn collides_with_trees(trees: &[Tree], x: f64, y: f64, radius: f64) -> bool {
    trees.iter().any(|tree| {
        let center = PathPoint::new(f64::from(tree.x), f64::from(tree.y));
        center.distance_to(x, y) < f64::from(tree.size) + radius
    })
}

/// Returns the path point closest to `(x, y)`, or `(x, y)` itself if the map has none.
///
/// Ties resolve to the point listed first.
#[must_use]
pub fn find_nearest_path_point(map: &Map, x: f64, y: f64) -> PathPoint {
    let mut nearest = PathPoint::new(x, y);
    let mut best = f64::INFINITY;

    for point in &map.paths.points {
        let distance = point.distance_to(x, y);
        if distance < best {
            best = distance;
            nearest = *point;
        }
    }

    nearest
}
