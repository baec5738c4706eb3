#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Path network extraction for generated maps.
//!
//! Obstacles are rasterized onto a coarse [`OccupancyGrid`], fixed rows and
//! columns of that grid are scanned for runs of walkable cells, and each run
//! becomes a straight [`PathLine`](wayfield_core::PathLine). The lines are then
//! sampled into deduplicated walk-to points.

pub mod extraction;
pub mod grid;
pub mod sampling;

pub use extraction::extract_lines;
pub use grid::{OccupancyGrid, CELL_SIZE};
pub use sampling::sample_points;

use wayfield_core::{Building, PathNetwork, Tree};

/// Runs rasterization, extraction, and sampling for one set of obstacles.
#[must_use]
pub fn build_network(
    width: u32,
    height: u32,
    buildings: &[Building],
    trees: &[Tree],
) -> PathNetwork {
    let grid = OccupancyGrid::rasterize(width, height, buildings, trees);
    let lines = extract_lines(&grid);
    let points = sample_points(&lines);
    PathNetwork { lines, points }
}
