use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wayfield_core::{Building, CellCoord, PathLine};
use wayfield_system_paths::{
    build_network, extract_lines, sample_points, sampling::is_near_duplicate, OccupancyGrid,
    CELL_SIZE,
};
use wayfield_system_placement::place;

fn cell_of(x: u32, y: u32) -> CellCoord {
    CellCoord::new(x / CELL_SIZE, y / CELL_SIZE)
}

#[test]
fn obstacle_free_world_matches_open_grid_extraction() {
    let network = build_network(800, 600, &[], &[]);
    assert_eq!(network.lines, extract_lines(&OccupancyGrid::open(40, 30)));
    assert_eq!(network.points, sample_points(&network.lines));
    let total: f64 = network.lines.iter().map(PathLine::length).sum();
    assert!((total - (7.0 * 780.0 + 9.0 * 580.0)).abs() < 1e-9);
}

#[test]
fn building_across_a_scanned_row_splits_the_corridor() {
    let network = build_network(800, 600, &[Building::new(300, 30, 40, 40)], &[]);
    assert_eq!(network.lines[0], PathLine::new(10, 50, 290, 50));
    assert_eq!(network.lines[1], PathLine::new(370, 50, 790, 50));
}

#[test]
fn tiny_world_has_no_corridors() {
    let network = build_network(60, 60, &[], &[]);
    assert!(network.lines.is_empty());
    assert!(network.points.is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn retained_points_are_pairwise_distinct(seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let placement = place(800, 600, &mut rng);
        let network = build_network(800, 600, &placement.buildings, &placement.trees);
        for (index, first) in network.points.iter().enumerate() {
            for second in &network.points[index + 1..] {
                prop_assert!(!is_near_duplicate(first, second), "{first:?} ~ {second:?}");
            }
        }
    }

    #[test]
    fn line_endpoints_sit_on_walkable_cells(seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let placement = place(800, 600, &mut rng);
        let grid = OccupancyGrid::rasterize(800, 600, &placement.buildings, &placement.trees);
        for line in extract_lines(&grid) {
            prop_assert!(grid.is_walkable(cell_of(line.x1, line.y1)));
            prop_assert!(grid.is_walkable(cell_of(line.x2, line.y2)));
            prop_assert!(line.x1 == line.x2 || line.y1 == line.y2, "lines are axis aligned");
            prop_assert!(line.length() >= 60.0, "kept runs span at least four cells");
        }
    }
}
