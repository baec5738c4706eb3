#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Wayfield map engine.
//!
//! This crate defines the data model produced by map generation and the
//! message surface that connects adapters, the authoritative world, and pure
//! systems. Systems build [`Map`] values and advance [`Character`] records;
//! adapters submit [`Command`] values to the world, which executes them via
//! its `apply` entry point and broadcasts [`Event`] values describing what
//! happened.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Position assigned to spawned characters when a map has no path points.
pub const DEFAULT_SPAWN_POSITION: (f64, f64) = (100.0, 100.0);

/// Distance a character covers per movement step unless configured otherwise.
pub const DEFAULT_CHARACTER_SPEED: f64 = 2.0;

/// Maximum distance from a path point at which a position still counts as on-path.
pub const ON_PATH_TOLERANCE: f64 = 30.0;

/// Radius of the disk a character occupies for collision queries.
pub const CHARACTER_RADIUS: f64 = 15.0;

/// Number of generation attempts made before falling back to the empty map.
pub const MAX_GENERATION_ATTEMPTS: u32 = 10;

/// Fraction of the world area that path lines must cover.
pub const PATH_COVERAGE_RATIO: f64 = 0.2;

/// Approximate thickness of a path line used when estimating covered area.
pub const PATH_LINE_THICKNESS: f64 = 10.0;

/// Role assigned to characters created without an explicit role.
pub const DEFAULT_CHARACTER_ROLE: &str = "Worker";

/// RGB color rendered as a `#RRGGBB` hex string on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

impl Color {
    /// Saddle brown applied to every generated building.
    pub const BUILDING: Self = Self::from_rgb(0x8b, 0x45, 0x13);
    /// Forest green applied to every generated tree.
    pub const TREE: Self = Self::from_rgb(0x22, 0x8b, 0x22);
    /// Gold applied to every extracted path line.
    pub const PATH: Self = Self::from_rgb(0xff, 0xd7, 0x00);
    /// Blue used for characters created without an explicit color.
    pub const CHARACTER: Self = Self::from_rgb(0x34, 0x98, 0xdb);

    /// Creates a new color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Creates a color from the low 24 bits of `value`, laid out as `0xRRGGBB`.
    #[must_use]
    pub const fn from_packed(value: u32) -> Self {
        Self {
            red: ((value >> 16) & 0xff) as u8,
            green: ((value >> 8) & 0xff) as u8,
            blue: (value & 0xff) as u8,
        }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let digits = value
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(value.to_owned()))?;
        if digits.len() != 6 {
            return Err(ColorParseError::InvalidLength(value.to_owned()));
        }
        if !digits.chars().all(|digit| digit.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(value.to_owned()));
        }

        let packed = u32::from_str_radix(digits, 16)
            .map_err(|_| ColorParseError::InvalidDigit(value.to_owned()))?;
        Ok(Self::from_packed(packed))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Reasons a `#RRGGBB` string could not be parsed into a [`Color`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// The string did not begin with `#`.
    #[error("color `{0}` must start with `#`")]
    MissingHash(String),
    /// The string did not contain exactly six digits after the `#`.
    #[error("color `{0}` must contain exactly six hex digits")]
    InvalidLength(String),
    /// The string contained a character outside `0-9a-fA-F`.
    #[error("color `{0}` contains a non-hex digit")]
    InvalidDigit(String),
}

/// Location of a single occupancy grid cell expressed as column and row indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Axis-aligned rectangular obstacle placed during generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Building {
    /// Left edge in world units.
    pub x: u32,
    /// Top edge in world units.
    pub y: u32,
    /// Horizontal extent in world units.
    pub width: u32,
    /// Vertical extent in world units.
    pub height: u32,
    /// Display color.
    pub color: Color,
}

impl Building {
    /// Creates a building with the canonical building color.
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            color: Color::BUILDING,
        }
    }

    /// Reports whether two buildings overlap.
    ///
    /// Intervals are open, so buildings sharing an edge do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Building) -> bool {
        self.overlaps_box(
            f64::from(other.x),
            f64::from(other.y),
            f64::from(other.x) + f64::from(other.width),
            f64::from(other.y) + f64::from(other.height),
        )
    }

    /// Reports whether the open box `(left, top)..(right, bottom)` overlaps the building.
    #[must_use]
    pub fn overlaps_box(&self, left: f64, top: f64, right: f64, bottom: f64) -> bool {
        let x = f64::from(self.x);
        let y = f64::from(self.y);
        left < x + f64::from(self.width)
            && right > x
            && top < y + f64::from(self.height)
            && bottom > y
    }
}

/// Round obstacle placed during generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tree {
    /// Horizontal center in world units.
    pub x: u32,
    /// Vertical center in world units.
    pub y: u32,
    /// Radius in world units.
    pub size: u32,
    /// Display color.
    pub color: Color,
}

impl Tree {
    /// Creates a tree with the canonical tree color.
    #[must_use]
    pub const fn new(x: u32, y: u32, size: u32) -> Self {
        Self {
            x,
            y,
            size,
            color: Color::TREE,
        }
    }

    /// Reports whether the tree's bounding box overlaps the building.
    #[must_use]
    pub fn overlaps_building(&self, building: &Building) -> bool {
        let x = f64::from(self.x);
        let y = f64::from(self.y);
        let size = f64::from(self.size);
        building.overlaps_box(x - size, y - size, x + size, y + size)
    }
}

/// Straight walkable corridor centerline produced by path extraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathLine {
    /// Horizontal coordinate of the first endpoint.
    pub x1: u32,
    /// Vertical coordinate of the first endpoint.
    pub y1: u32,
    /// Horizontal coordinate of the second endpoint.
    pub x2: u32,
    /// Vertical coordinate of the second endpoint.
    pub y2: u32,
    /// Display color.
    pub color: Color,
}

impl PathLine {
    /// Creates a path line with the canonical path color.
    #[must_use]
    pub const fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            color: Color::PATH,
        }
    }

    /// Signed horizontal and vertical extents from the first to the second endpoint.
    #[must_use]
    pub fn delta(&self) -> (f64, f64) {
        (
            f64::from(self.x2) - f64::from(self.x1),
            f64::from(self.y2) - f64::from(self.y1),
        )
    }

    /// Euclidean length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        let (dx, dy) = self.delta();
        (dx * dx + dy * dy).sqrt()
    }
}

/// Discrete walkable coordinate that characters spawn at and walk toward.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    /// Horizontal coordinate in world units.
    pub x: f64,
    /// Vertical coordinate in world units.
    pub y: f64,
}

impl PathPoint {
    /// Creates a new path point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance from the point to `(x, y)`.
    #[must_use]
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.x;
        let dy = y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Walkable corridors and the discrete points sampled along them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathNetwork {
    /// Corridor centerlines.
    pub lines: Vec<PathLine>,
    /// Deduplicated walk-to points.
    pub points: Vec<PathPoint>,
}

/// Generated world layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Map {
    /// Horizontal extent of the world in units.
    pub width: u32,
    /// Vertical extent of the world in units.
    pub height: u32,
    /// Non-overlapping rectangular obstacles.
    pub buildings: Vec<Building>,
    /// Round obstacles kept clear of buildings.
    pub trees: Vec<Tree>,
    /// Walkable corridors.
    pub paths: PathNetwork,
}

impl Map {
    /// Canonical map returned when generation exhausts its retry budget.
    #[must_use]
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            buildings: Vec::new(),
            trees: Vec::new(),
            paths: PathNetwork::default(),
        }
    }

    /// Reports whether the map carries no geometry at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
            && self.trees.is_empty()
            && self.paths.lines.is_empty()
            && self.paths.points.is_empty()
    }

    /// Reports whether every geometry collection is populated.
    ///
    /// Maps failing this check are worth regenerating before characters are
    /// placed on them.
    #[must_use]
    pub fn is_playable(&self) -> bool {
        !self.buildings.is_empty()
            && !self.trees.is_empty()
            && !self.paths.lines.is_empty()
            && !self.paths.points.is_empty()
    }
}

/// Unique identifier assigned to a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterId(u32);

impl CharacterId {
    /// Creates a new character identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Entity that walks between path points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Identifier assigned by the world.
    pub id: CharacterId,
    /// Display name.
    pub name: String,
    /// Free-form role label.
    pub role: String,
    /// Current horizontal position.
    pub x: f64,
    /// Current vertical position.
    pub y: f64,
    /// Horizontal coordinate the character walks toward.
    pub target_x: f64,
    /// Vertical coordinate the character walks toward.
    pub target_y: f64,
    /// Distance covered per movement step.
    pub speed: f64,
    /// Display color.
    pub color: Color,
}

impl Character {
    /// Creates an idle character standing at `(x, y)` with the default speed.
    #[must_use]
    pub fn new(id: CharacterId, name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id,
            name: name.into(),
            role: DEFAULT_CHARACTER_ROLE.to_owned(),
            x,
            y,
            target_x: x,
            target_y: y,
            speed: DEFAULT_CHARACTER_SPEED,
            color: Color::CHARACTER,
        }
    }

    /// Current position as an `(x, y)` pair.
    #[must_use]
    pub const fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Current target as an `(x, y)` pair.
    #[must_use]
    pub const fn target(&self) -> (f64, f64) {
        (self.target_x, self.target_y)
    }
}

/// Tunable thresholds used by the spatial validator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationTuning {
    /// Maximum distance to the nearest path point for a position to count as on-path.
    pub tolerance: f64,
    /// Radius of the disk a character occupies for collision tests.
    pub character_radius: f64,
}

impl Default for ValidationTuning {
    fn default() -> Self {
        Self {
            tolerance: ON_PATH_TOLERANCE,
            character_radius: CHARACTER_RADIUS,
        }
    }
}

/// Tunable acceptance rules for the map generator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationTuning {
    /// Number of full placement and extraction attempts before giving up.
    pub max_attempts: u32,
    /// Fraction of `width * height` that path lines must cover.
    pub coverage_ratio: f64,
    /// Thickness multiplied by line length to approximate covered area.
    pub line_thickness: f64,
    /// Minimum number of buildings an accepted map carries.
    pub min_buildings: usize,
    /// Minimum number of trees an accepted map carries.
    pub min_trees: usize,
}

impl Default for GenerationTuning {
    fn default() -> Self {
        Self {
            max_attempts: MAX_GENERATION_ATTEMPTS,
            coverage_ratio: PATH_COVERAGE_RATIO,
            line_thickness: PATH_LINE_THICKNESS,
            min_buildings: 2,
            min_trees: 1,
        }
    }
}

/// Aggregated tuning surface shared by the world and adapters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Acceptance rules for generated maps.
    pub generation: GenerationTuning,
    /// Thresholds for position validation.
    pub validation: ValidationTuning,
    /// Speed assigned to newly spawned characters.
    pub default_speed: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            generation: GenerationTuning::default(),
            validation: ValidationTuning::default(),
            default_speed: DEFAULT_CHARACTER_SPEED,
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the current map with a freshly generated one.
    GenerateMap {
        /// Horizontal extent of the new world.
        width: u32,
        /// Vertical extent of the new world.
        height: u32,
    },
    /// Generates a new map only if the current one is not playable.
    EnsureMap {
        /// Horizontal extent used if a new world is generated.
        width: u32,
        /// Vertical extent used if a new world is generated.
        height: u32,
    },
    /// Creates a character at a spawn point on the current map.
    SpawnCharacter {
        /// Display name; a numbered placeholder is drawn when absent.
        name: Option<String>,
        /// Role label; [`DEFAULT_CHARACTER_ROLE`] is used when absent.
        role: Option<String>,
        /// Appearance; a random color is drawn when absent.
        color: Option<Color>,
    },
    /// Requests that a character walk toward the provided coordinate.
    RequestMove {
        /// Character that should move.
        character: CharacterId,
        /// Requested horizontal target.
        target_x: f64,
        /// Requested vertical target.
        target_y: f64,
    },
    /// Advances every character by one movement step.
    Tick,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that a playable map was generated and installed.
    MapGenerated {
        /// Horizontal extent of the world.
        width: u32,
        /// Vertical extent of the world.
        height: u32,
        /// Number of buildings placed.
        buildings: usize,
        /// Number of trees placed.
        trees: usize,
        /// Number of path lines extracted.
        lines: usize,
        /// Number of path points sampled.
        points: usize,
    },
    /// Reports that generation ran out of attempts and installed the empty map.
    MapGenerationExhausted {
        /// Horizontal extent of the world.
        width: u32,
        /// Vertical extent of the world.
        height: u32,
    },
    /// Confirms that a character was created.
    CharacterSpawned {
        /// Identifier assigned to the new character.
        character: CharacterId,
        /// Horizontal spawn coordinate.
        x: f64,
        /// Vertical spawn coordinate.
        y: f64,
    },
    /// Confirms that a requested move target was accepted.
    TargetAssigned {
        /// Character whose target changed.
        character: CharacterId,
        /// New horizontal target.
        target_x: f64,
        /// New vertical target.
        target_y: f64,
    },
    /// Reports that a move request was refused.
    MoveRejected {
        /// Character named in the request.
        character: CharacterId,
        /// Specific reason the request failed.
        reason: MoveError,
    },
    /// Confirms that a character changed position during a tick.
    CharacterAdvanced {
        /// Character that moved.
        character: CharacterId,
        /// Position before the step.
        from: (f64, f64),
        /// Position after the step.
        to: (f64, f64),
    },
    /// Reports that a character reached its target and drew a new one.
    CharacterRetargeted {
        /// Character that acquired a new target.
        character: CharacterId,
        /// New horizontal target.
        target_x: f64,
        /// New vertical target.
        target_y: f64,
    },
}

/// Reasons a move request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum MoveError {
    /// The target is off-path or collides with a building or tree.
    #[error("invalid position")]
    InvalidPosition,
    /// No character with the provided identifier exists.
    #[error("character not found")]
    MissingCharacter,
}
