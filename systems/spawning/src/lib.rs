#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spawning system responsible for creating characters on a map.

use rand::{seq::SliceRandom, Rng};
use wayfield_core::{
    Character, CharacterId, Color, Map, PathPoint, DEFAULT_CHARACTER_ROLE,
    DEFAULT_CHARACTER_SPEED, DEFAULT_SPAWN_POSITION,
};

const MAX_PLACEHOLDER_NUMBER: u32 = 1_000;
const MAX_PACKED_COLOR: u32 = 0xff_ffff;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    default_speed: f64,
    first_id: u32,
}

impl Config {
    /// Creates a new configuration using the provided speed and first identifier.
    #[must_use]
    pub const fn new(default_speed: f64, first_id: u32) -> Self {
        Self {
            default_speed,
            first_id,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_CHARACTER_SPEED, 1)
    }
}

/// Optional attributes supplied by whoever requests a character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpawnRequest {
    /// Display name; a numbered placeholder is drawn when absent.
    pub name: Option<String>,
    /// Role label; the default role is used when absent.
    pub role: Option<String>,
    /// Appearance; a random color is drawn when absent.
    pub color: Option<Color>,
}

/// Allocates identifiers and builds idle characters at spawn points.
#[derive(Debug)]
pub struct Spawning {
    default_speed: f64,
    next_id: u32,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            default_speed: config.default_speed,
            next_id: config.first_id,
        }
    }

    /// Creates a character standing idle at a spawn point on `map`.
    pub fn spawn<R>(&mut self, map: &Map, request: SpawnRequest, rng: &mut R) -> Character
    where
        R: Rng + ?Sized,
    {
        let spawn = select_spawn_point(map, rng);
        let name = request.name.unwrap_or_else(|| {
            format!("Character{}", rng.gen_range(1..=MAX_PLACEHOLDER_NUMBER))
        });
        let color = request.color.unwrap_or_else(|| random_color(rng));

        let mut character = Character::new(self.allocate_id(), name, spawn.x, spawn.y);
        character.role = request
            .role
            .unwrap_or_else(|| DEFAULT_CHARACTER_ROLE.to_owned());
        character.color = color;
        character.speed = self.default_speed;
        character
    }

    fn allocate_id(&mut self) -> CharacterId {
        let id = CharacterId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }
}

impl Default for Spawning {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Draws a uniformly random path point, or the default position if the map has none.
pub fn select_spawn_point<R>(map: &Map, rng: &mut R) -> PathPoint
where
    R: Rng + ?Sized,
{
    map.paths.points.choose(rng).copied().unwrap_or_else(|| {
        let (x, y) = DEFAULT_SPAWN_POSITION;
        PathPoint::new(x, y)
    })
}

/// Draws a uniformly random 24-bit color.
pub fn random_color<R>(rng: &mut R) -> Color
where
    R: Rng + ?Sized,
{
    Color::from_packed(rng.gen_range(0..=MAX_PACKED_COLOR))
}
