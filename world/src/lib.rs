#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Wayfield.
//!
//! The world owns the current map, every spawned character and the seeded
//! random source shared by all stochastic systems. Commands are applied one
//! at a time, so characters are never stepped concurrently.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;
use wayfield_core::{Character, CharacterId, Command, Event, Map, MoveError, Tuning};
use wayfield_system_generation::generate_map_with;
use wayfield_system_movement::advance_all;
use wayfield_system_spawning::{Config as SpawnConfig, SpawnRequest, Spawning};
use wayfield_system_validation::is_valid_position_with;

/// Width of the placeholder map a fresh world starts with.
pub const DEFAULT_WORLD_WIDTH: u32 = 800;

/// Height of the placeholder map a fresh world starts with.
pub const DEFAULT_WORLD_HEIGHT: u32 = 600;

/// Represents the authoritative Wayfield world state.
#[derive(Debug)]
pub struct World {
    tuning: Tuning,
    rng: ChaCha8Rng,
    map: Map,
    characters: Vec<Character>,
    spawning: Spawning,
    tick_index: u64,
}

impl World {
    /// Creates a world with default tuning whose randomness replays from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Creates a world using the provided tuning.
    ///
    /// The world starts on the empty map until a map is generated.
    #[must_use]
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            map: Map::empty(DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT),
            characters: Vec::new(),
            spawning: Spawning::new(SpawnConfig::new(tuning.default_speed, 1)),
            tick_index: 0,
            tuning,
        }
    }

    fn regenerate(&mut self, width: u32, height: u32, out_events: &mut Vec<Event>) {
        self.map = generate_map_with(&self.tuning.generation, width, height, &mut self.rng);

        if self.map.is_empty() {
            out_events.push(Event::MapGenerationExhausted { width, height });
        } else {
            out_events.push(Event::MapGenerated {
                width,
                height,
                buildings: self.map.buildings.len(),
                trees: self.map.trees.len(),
                lines: self.map.paths.lines.len(),
                points: self.map.paths.points.len(),
            });
        }
    }

    fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters
            .binary_search_by_key(&id, |character| character.id)
            .ok()
            .map(|index| &mut self.characters[index])
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::GenerateMap { width, height } => {
            world.regenerate(width, height, out_events);
        }
        Command::EnsureMap { width, height } => {
            if !world.map.is_playable() {
                world.regenerate(width, height, out_events);
            }
        }
        Command::SpawnCharacter { name, role, color } => {
            let request = SpawnRequest { name, role, color };
            let character = world.spawning.spawn(&world.map, request, &mut world.rng);
            debug!(
                character = %character.id,
                name = %character.name,
                x = character.x,
                y = character.y,
                "spawned character"
            );
            out_events.push(Event::CharacterSpawned {
                character: character.id,
                x: character.x,
                y: character.y,
            });
            world.characters.push(character);
        }
        Command::RequestMove {
            character,
            target_x,
            target_y,
        } => {
            let valid =
                is_valid_position_with(&world.tuning.validation, &world.map, target_x, target_y);
            let Some(record) = world.character_mut(character) else {
                debug!(%character, "move requested for unknown character");
                out_events.push(Event::MoveRejected {
                    character,
                    reason: MoveError::MissingCharacter,
                });
                return;
            };

            if !valid {
                debug!(%character, target_x, target_y, "rejected move to invalid position");
                out_events.push(Event::MoveRejected {
                    character,
                    reason: MoveError::InvalidPosition,
                });
                return;
            }

            record.target_x = target_x;
            record.target_y = target_y;
            out_events.push(Event::TargetAssigned {
                character,
                target_x,
                target_y,
            });
        }
        Command::Tick => {
            world.tick_index = world.tick_index.saturating_add(1);
            let first_new = out_events.len();
            advance_all(&mut world.characters, &world.map, &mut world.rng, out_events);

            for event in &out_events[first_new..] {
                if let Event::CharacterRetargeted {
                    character,
                    target_x,
                    target_y,
                } = event
                {
                    debug!(
                        %character,
                        target_x = *target_x,
                        target_y = *target_y,
                        tick = world.tick_index,
                        "character retargeted"
                    );
                }
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use wayfield_core::{Character, CharacterId, Map, PathPoint, Tuning};
    use wayfield_system_validation::{find_nearest_path_point, is_valid_position_with};

    /// Provides read-only access to the current map.
    #[must_use]
    pub fn map(world: &World) -> &Map {
        &world.map
    }

    /// Lists every character in identifier order.
    #[must_use]
    pub fn characters(world: &World) -> &[Character] {
        &world.characters
    }

    /// Looks up a single character by identifier.
    #[must_use]
    pub fn character(world: &World, id: CharacterId) -> Option<&Character> {
        world
            .characters
            .binary_search_by_key(&id, |character| character.id)
            .ok()
            .map(|index| &world.characters[index])
    }

    /// Reports whether a character may stand at `(x, y)` on the current map.
    #[must_use]
    pub fn is_valid_position(world: &World, x: f64, y: f64) -> bool {
        is_valid_position_with(&world.tuning.validation, &world.map, x, y)
    }

    /// Returns the path point on the current map closest to `(x, y)`.
    #[must_use]
    pub fn nearest_path_point(world: &World, x: f64, y: f64) -> PathPoint {
        find_nearest_path_point(&world.map, x, y)
    }

    /// Tuning the world was created with.
    #[must_use]
    pub fn tuning(world: &World) -> &Tuning {
        &world.tuning
    }

    /// Number of ticks applied since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}

#[cfg(test)]
mod tests {
    use super::{apply, query, World};
    use wayfield_core::{CharacterId, Color, Command, Event, MoveError};

    #[test]
    fn fresh_world_starts_on_the_empty_map() {
        let world = World::new(7);
        assert!(query::map(&world).is_empty());
        assert!(query::characters(&world).is_empty());
        assert_eq!(query::tick_index(&world), 0);
    }

    #[test]
    fn spawning_on_the_empty_map_uses_the_default_position() {
        let mut world = World::new(7);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::SpawnCharacter {
                name: Some("Ada".to_owned()),
                role: Some("Scout".to_owned()),
                color: Some(Color::CHARACTER),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::CharacterSpawned {
                character: CharacterId::new(1),
                x: 100.0,
                y: 100.0,
            }]
        );
        let character = query::character(&world, CharacterId::new(1)).expect("spawned");
        assert_eq!(character.role, "Scout");
        assert_eq!(character.target(), (100.0, 100.0));
    }

    #[test]
    fn moving_an_unknown_character_is_rejected() {
        let mut world = World::new(7);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::RequestMove {
                character: CharacterId::new(42),
                target_x: 100.0,
                target_y: 100.0,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::MoveRejected {
                character: CharacterId::new(42),
                reason: MoveError::MissingCharacter,
            }]
        );
    }

    #[test]
    fn tick_without_characters_emits_nothing() {
        let mut world = World::new(7);
        let mut events = Vec::new();
        apply(&mut world, Command::Tick, &mut events);
        assert!(events.is_empty());
        assert_eq!(query::tick_index(&world), 1);
    }
}
