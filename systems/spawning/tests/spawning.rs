use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wayfield_core::{Color, GenerationTuning};
use wayfield_system_generation::generate_map_with;
use wayfield_system_spawning::{random_color, SpawnRequest, Spawning};

fn generated_map(seed: u64) -> wayfield_core::Map {
    let tuning = GenerationTuning {
        coverage_ratio: 0.0,
        min_buildings: 0,
        min_trees: 0,
        ..GenerationTuning::default()
    };
    generate_map_with(&tuning, 800, 600, &mut ChaCha8Rng::seed_from_u64(seed))
}

#[test]
fn characters_spawn_on_generated_path_points() {
    let map = generated_map(17);
    let mut spawning = Spawning::default();
    let mut rng = ChaCha8Rng::seed_from_u64(17);

    for _ in 0..10 {
        let character = spawning.spawn(&map, SpawnRequest::default(), &mut rng);
        assert!(map
            .paths
            .points
            .iter()
            .any(|point| point.x == character.x && point.y == character.y));
        assert_eq!(character.target(), character.position());
    }
}

#[test]
fn spawning_replays_for_equal_seeds() {
    let map = generated_map(2);
    let run = || {
        let mut spawning = Spawning::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        (0..5)
            .map(|_| spawning.spawn(&map, SpawnRequest::default(), &mut rng))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn random_colors_vary_across_draws() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let colors: Vec<Color> = (0..16).map(|_| random_color(&mut rng)).collect();
    assert!(colors.iter().any(|color| *color != colors[0]));
}

#[test]
fn random_colors_render_as_upper_hex() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    for _ in 0..64 {
        let color = random_color(&mut rng);
        let rendered = color.to_string();
        assert_eq!(rendered.len(), 7);
        assert!(rendered.starts_with('#'));
        assert_eq!(rendered, rendered.to_ascii_uppercase());
        assert_eq!(rendered.parse::<Color>(), Ok(color));
    }
}
