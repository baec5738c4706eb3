#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bounded-retry map generation.
//!
//! Each attempt places obstacles, extracts the path network, and checks the
//! result against [`GenerationTuning`]. A rejected attempt is discarded and
//! redrawn rather than repaired. When every attempt is rejected the canonical
//! empty map is returned instead of an error.

use rand::Rng;
use tracing::{debug, info, warn};
use wayfield_core::{GenerationTuning, Map, PathLine};
use wayfield_system_paths::build_network;
use wayfield_system_placement::place;

/// Generates a map using the default acceptance rules.
pub fn generate_map<R>(width: u32, height: u32, rng: &mut R) -> Map
where
    R: Rng + ?Sized,
{
    generate_map_with(&GenerationTuning::default(), width, height, rng)
}

/// Generates a map, retrying up to `tuning.max_attempts` times.
pub fn generate_map_with<R>(
    tuning: &GenerationTuning,
    width: u32,
    height: u32,
    rng: &mut R,
) -> Map
where
    R: Rng + ?Sized,
{
    let required = required_coverage(tuning, width, height);

    for attempt in 1..=tuning.max_attempts {
        let candidate = attempt_map(width, height, rng);
        let coverage = path_coverage_area(&candidate.paths.lines, tuning.line_thickness);

        if is_acceptable(tuning, &candidate) {
            info!(
                attempt,
                width,
                height,
                buildings = candidate.buildings.len(),
                trees = candidate.trees.len(),
                points = candidate.paths.points.len(),
                coverage,
                "map generated"
            );
            return candidate;
        }

        debug!(
            attempt,
            buildings = candidate.buildings.len(),
            trees = candidate.trees.len(),
            lines = candidate.paths.lines.len(),
            coverage,
            required,
            "rejected map attempt"
        );
    }

    warn!(
        attempts = tuning.max_attempts,
        width, height, "map generation exhausted its attempts, returning the empty map"
    );
    Map::empty(width, height)
}

/// Runs a single placement and extraction pass without judging the result.
pub fn attempt_map<R>(width: u32, height: u32, rng: &mut R) -> Map
where
    R: Rng + ?Sized,
{
    let placement = place(width, height, rng);
    let paths = build_network(width, height, &placement.buildings, &placement.trees);
    Map {
        width,
        height,
        buildings: placement.buildings,
        trees: placement.trees,
        paths,
    }
}

/// Approximates the area covered by `lines` as total length times `thickness`.
#[must_use]
pub fn path_coverage_area(lines: &[PathLine], thickness: f64) -> f64 {
    lines.iter().map(|line| line.length() * thickness).sum()
}

/// Reports whether a candidate map satisfies every acceptance rule.
#[must_use]
pub fn is_acceptable(tuning: &GenerationTuning, map: &Map) -> bool {
    map.buildings.len() >= tuning.min_buildings
        && map.trees.len() >= tuning.min_trees
        && path_coverage_area(&map.paths.lines, tuning.line_thickness)
            >= required_coverage(tuning, map.width, map.height)
}

fn required_coverage(tuning: &GenerationTuning, width: u32, height: u32) -> f64 {
    tuning.coverage_ratio * f64::from(width) * f64::from(height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfield_core::{Building, PathNetwork, Tree};

    fn map_with_lines(lines: Vec<PathLine>) -> Map {
        Map {
            width: 100,
            height: 100,
            buildings: vec![Building::new(0, 0, 40, 40), Building::new(50, 50, 40, 40)],
            trees: vec![Tree::new(80, 20, 15)],
            paths: PathNetwork {
                lines,
                points: Vec::new(),
            },
        }
    }

    #[test]
    fn coverage_sums_length_times_thickness() {
        let lines = [PathLine::new(0, 0, 30, 40), PathLine::new(0, 0, 0, 10)];
        assert!((path_coverage_area(&lines, 10.0) - 600.0).abs() < 1e-9);
    }

    #[test]
    fn coverage_at_exact_threshold_is_accepted() {
        let map = map_with_lines(vec![PathLine::new(0, 10, 200, 10)]);
        assert!(is_acceptable(&GenerationTuning::default(), &map));
    }

    #[test]
    fn coverage_below_threshold_is_rejected() {
        let map = map_with_lines(vec![PathLine::new(0, 10, 199, 10)]);
        assert!(!is_acceptable(&GenerationTuning::default(), &map));
    }

    #[test]
    fn single_building_is_rejected() {
        let mut map = map_with_lines(vec![PathLine::new(0, 10, 400, 10)]);
        let _ = map.buildings.pop();
        assert!(!is_acceptable(&GenerationTuning::default(), &map));
    }

    #[test]
    fn treeless_map_is_rejected() {
        let mut map = map_with_lines(vec![PathLine::new(0, 10, 400, 10)]);
        map.trees.clear();
        assert!(!is_acceptable(&GenerationTuning::default(), &map));
    }
}
