use wayfield_core::{CharacterId, Command, Event, GenerationTuning, MoveError, Tuning};
use wayfield_world::{apply, query, World};

fn permissive_tuning() -> Tuning {
    Tuning {
        generation: GenerationTuning {
            coverage_ratio: 0.0,
            min_buildings: 0,
            min_trees: 0,
            ..GenerationTuning::default()
        },
        ..Tuning::default()
    }
}

fn spawn(name: &str) -> Command {
    Command::SpawnCharacter {
        name: Some(name.to_owned()),
        role: None,
        color: None,
    }
}

fn run_script(seed: u64) -> (Vec<Event>, World) {
    let mut world = World::with_tuning(seed, permissive_tuning());
    let mut events = Vec::new();
    let mut script = vec![
        Command::GenerateMap {
            width: 800,
            height: 600,
        },
        spawn("Ada"),
        spawn("Bo"),
        spawn("Cy"),
    ];
    script.extend(std::iter::repeat(Command::Tick).take(40));

    for command in script {
        apply(&mut world, command, &mut events);
    }
    (events, world)
}

#[test]
fn generating_a_map_reports_its_contents() {
    let mut world = World::with_tuning(3, permissive_tuning());
    let mut events = Vec::new();

    apply(
        &mut world,
        Command::GenerateMap {
            width: 800,
            height: 600,
        },
        &mut events,
    );

    let map = query::map(&world);
    assert_eq!(
        events,
        vec![Event::MapGenerated {
            width: 800,
            height: 600,
            buildings: map.buildings.len(),
            trees: map.trees.len(),
            lines: map.paths.lines.len(),
            points: map.paths.points.len(),
        }]
    );
    assert!(!map.paths.points.is_empty());
}

#[test]
fn unreachable_coverage_installs_the_empty_map() {
    let tuning = Tuning {
        generation: GenerationTuning {
            coverage_ratio: 50.0,
            ..GenerationTuning::default()
        },
        ..Tuning::default()
    };
    let mut world = World::with_tuning(3, tuning);
    let mut events = Vec::new();

    apply(
        &mut world,
        Command::GenerateMap {
            width: 640,
            height: 480,
        },
        &mut events,
    );

    assert_eq!(
        events,
        vec![Event::MapGenerationExhausted {
            width: 640,
            height: 480,
        }]
    );
    assert!(query::map(&world).is_empty());
    assert_eq!(query::map(&world).width, 640);
}

#[test]
fn ensure_map_keeps_a_playable_map() {
    let mut world = World::with_tuning(11, permissive_tuning());
    let mut events = Vec::new();
    let ensure = Command::EnsureMap {
        width: 800,
        height: 600,
    };

    apply(&mut world, ensure.clone(), &mut events);
    let first = query::map(&world).clone();
    assert_eq!(events.len(), 1);

    if first.is_playable() {
        events.clear();
        apply(&mut world, ensure, &mut events);
        assert!(events.is_empty());
        assert_eq!(query::map(&world), &first);
    }
}

#[test]
fn characters_spawn_on_path_points() {
    let mut world = World::with_tuning(5, permissive_tuning());
    let mut events = Vec::new();
    apply(
        &mut world,
        Command::GenerateMap {
            width: 800,
            height: 600,
        },
        &mut events,
    );
    apply(&mut world, spawn("Ada"), &mut events);

    let points = &query::map(&world).paths.points;
    let character = query::character(&world, CharacterId::new(1)).expect("spawned");
    assert!(points
        .iter()
        .any(|point| point.x == character.x && point.y == character.y));
    assert_eq!(character.target(), character.position());
}

#[test]
fn off_path_move_requests_are_rejected() {
    let mut world = World::with_tuning(5, permissive_tuning());
    let mut events = Vec::new();
    apply(
        &mut world,
        Command::GenerateMap {
            width: 800,
            height: 600,
        },
        &mut events,
    );
    apply(&mut world, spawn("Ada"), &mut events);
    events.clear();

    apply(
        &mut world,
        Command::RequestMove {
            character: CharacterId::new(1),
            target_x: -5_000.0,
            target_y: -5_000.0,
        },
        &mut events,
    );

    assert_eq!(
        events,
        vec![Event::MoveRejected {
            character: CharacterId::new(1),
            reason: MoveError::InvalidPosition,
        }]
    );
}

#[test]
fn valid_move_requests_assign_the_target() {
    let mut world = World::with_tuning(5, permissive_tuning());
    let mut events = Vec::new();
    apply(
        &mut world,
        Command::GenerateMap {
            width: 800,
            height: 600,
        },
        &mut events,
    );
    apply(&mut world, spawn("Ada"), &mut events);
    events.clear();

    let valid_point = query::map(&world)
        .paths
        .points
        .iter()
        .copied()
        .find(|point| query::is_valid_position(&world, point.x, point.y));

    if let Some(point) = valid_point {
        apply(
            &mut world,
            Command::RequestMove {
                character: CharacterId::new(1),
                target_x: point.x,
                target_y: point.y,
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::TargetAssigned {
                character: CharacterId::new(1),
                target_x: point.x,
                target_y: point.y,
            }]
        );
        let character = query::character(&world, CharacterId::new(1)).expect("spawned");
        assert_eq!(character.target(), (point.x, point.y));
    }
}

#[test]
fn ticks_move_characters_by_at_most_their_speed() {
    let (events, world) = run_script(21);
    let speed = query::tuning(&world).default_speed;

    for event in &events {
        if let Event::CharacterAdvanced { from, to, .. } = event {
            let dx = to.0 - from.0;
            let dy = to.1 - from.1;
            assert!((dx * dx + dy * dy).sqrt() <= speed + 1e-9);
        }
    }
    assert_eq!(query::characters(&world).len(), 3);
    assert_eq!(query::tick_index(&world), 40);
}

#[test]
fn identical_scripts_replay_identically() {
    let (first_events, first_world) = run_script(99);
    let (second_events, second_world) = run_script(99);

    assert_eq!(first_events, second_events);
    assert_eq!(query::map(&first_world), query::map(&second_world));
    assert_eq!(
        query::characters(&first_world),
        query::characters(&second_world)
    );
}

#[test]
fn nearest_path_point_on_the_empty_map_is_the_query_itself() {
    let world = World::new(1);
    let nearest = query::nearest_path_point(&world, 12.5, 40.0);
    assert_eq!((nearest.x, nearest.y), (12.5, 40.0));
    assert!(query::is_valid_position(&world, 12.5, 40.0));
}
