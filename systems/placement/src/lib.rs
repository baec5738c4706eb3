#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Rejection-sampling placement of buildings and trees.
//!
//! Candidates are drawn uniformly and discarded when they violate an overlap
//! rule. Discarded candidates are not redrawn, so a pass may legitimately
//! yield fewer entities than it attempted; the map generator judges whether
//! the result is good enough.

use std::ops::RangeInclusive;

use rand::Rng;
use wayfield_core::{Building, Tree};

/// Number of building candidates drawn per placement pass.
pub const BUILDING_CANDIDATES: RangeInclusive<u32> = 8..=15;
/// Range of building widths and heights in world units.
pub const BUILDING_EXTENT: RangeInclusive<u32> = 40..=80;
/// Number of tree candidates drawn per placement pass.
pub const TREE_CANDIDATES: RangeInclusive<u32> = 15..=25;
/// Range of tree radii in world units.
pub const TREE_SIZE: RangeInclusive<u32> = 15..=30;

/// Buildings and trees produced by a single placement pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Placement {
    /// Accepted buildings, none of which overlap each other.
    pub buildings: Vec<Building>,
    /// Accepted trees, none of which overlap a building.
    pub trees: Vec<Tree>,
}

/// Places buildings and then trees inside a `width` by `height` world.
pub fn place<R>(width: u32, height: u32, rng: &mut R) -> Placement
where
    R: Rng + ?Sized,
{
    let buildings = place_buildings(width, height, rng);
    let trees = place_trees(width, height, &buildings, rng);
    Placement { buildings, trees }
}

/// Draws building candidates and keeps those clear of previously kept ones.
pub fn place_buildings<R>(width: u32, height: u32, rng: &mut R) -> Vec<Building>
where
    R: Rng + ?Sized,
{
    let candidates = rng.gen_range(BUILDING_CANDIDATES);
    place_buildings_counted(width, height, candidates, rng)
}

/// Draws exactly `candidates` buildings, keeping those clear of earlier ones.
pub(crate) fn place_buildings_counted<R>(
    width: u32,
    height: u32,
    candidates: u32,
    rng: &mut R,
) -> Vec<Building>
where
    R: Rng + ?Sized,
{
    let mut buildings: Vec<Building> = Vec::with_capacity(candidates as usize);

    for _ in 0..candidates {
        let Some(candidate) = draw_building(width, height, rng) else {
            continue;
        };

        if buildings.iter().any(|placed| candidate.overlaps(placed)) {
            continue;
        }

        buildings.push(candidate);
    }

    buildings
}

/// Draws tree candidates and keeps those clear of every building.
///
/// Trees are never tested against each other and may overlap.
pub fn place_trees<R>(width: u32, height: u32, buildings: &[Building], rng: &mut R) -> Vec<Tree>
where
    R: Rng + ?Sized,
{
    let candidates = rng.gen_range(TREE_CANDIDATES);
    place_trees_counted(width, height, buildings, candidates, rng)
}

/// Draws exactly `candidates` trees, keeping those clear of every building.
pub(crate) fn place_trees_counted<R>(
    width: u32,
    height: u32,
    buildings: &[Building],
    candidates: u32,
    rng: &mut R,
) -> Vec<Tree>
where
    R: Rng + ?Sized,
{
    let mut trees = Vec::with_capacity(candidates as usize);

    for _ in 0..candidates {
        let Some(candidate) = draw_tree(width, height, rng) else {
            continue;
        };

        if buildings
            .iter()
            .any(|building| candidate.overlaps_building(building))
        {
            continue;
        }

        trees.push(candidate);
    }

    trees
}

fn draw_building<R>(width: u32, height: u32, rng: &mut R) -> Option<Building>
where
    R: Rng + ?Sized,
{
    let building_width = rng.gen_range(BUILDING_EXTENT);
    let building_height = rng.gen_range(BUILDING_EXTENT);
    let max_x = width.checked_sub(building_width)?;
    let max_y = height.checked_sub(building_height)?;
    let x = rng.gen_range(0..=max_x);
    let y = rng.gen_range(0..=max_y);
    Some(Building::new(x, y, building_width, building_height))
}

fn draw_tree<R>(width: u32, height: u32, rng: &mut R) -> Option<Tree>
where
    R: Rng + ?Sized,
{
    let size = rng.gen_range(TREE_SIZE);
    let max_x = width.checked_sub(size).filter(|max| *max >= size)?;
    let max_y = height.checked_sub(size).filter(|max| *max >= size)?;
    let x = rng.gen_range(size..=max_x);
    let y = rng.gen_range(size..=max_y);
    Some(Tree::new(x, y, size))
}
