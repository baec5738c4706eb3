#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-speed movement toward a target with random re-targeting on arrival.
//!
//! There is no internal clock: every call advances a character by one step.
//! Callers must serialize steps for a given character. [`advance_all`] does so
//! by visiting characters one at a time in identifier order.

use glam::DVec2;
use rand::{seq::SliceRandom, Rng};
use wayfield_core::{Character, Event, Map};

/// Result of a single movement step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepOutcome {
    /// The character moved `speed` units toward its target.
    Advanced,
    /// The character reached its target and drew a new one from the map's path points.
    Retargeted,
    /// The character reached its target and the map offered no points to walk to next.
    Idle,
}

/// Advances `character` one step toward its target.
///
/// When the target lies within `speed`, the character snaps exactly onto it and
/// then draws a uniformly random path point as its next target. The new target
/// is not validated.
pub fn step_toward_target<R>(character: &mut Character, map: &Map, rng: &mut R) -> StepOutcome
where
    R: Rng + ?Sized,
{
    let position = DVec2::new(character.x, character.y);
    let target = DVec2::new(character.target_x, character.target_y);
    let delta = target - position;
    let distance = delta.length();

    if distance > character.speed {
        let next = position + delta / distance * character.speed;
        character.x = next.x;
        character.y = next.y;
        return StepOutcome::Advanced;
    }

    character.x = character.target_x;
    character.y = character.target_y;

    match map.paths.points.choose(rng) {
        Some(point) => {
            character.target_x = point.x;
            character.target_y = point.y;
            StepOutcome::Retargeted
        }
        None => StepOutcome::Idle,
    }
}

/// Steps every character once, in identifier order, and reports what changed.
pub fn advance_all<R>(
    characters: &mut [Character],
    map: &Map,
    rng: &mut R,
    out: &mut Vec<Event>,
) where
    R: Rng + ?Sized,
{
    characters.sort_by_key(|character| character.id);

    for character in characters.iter_mut() {
        let from = character.position();
        let outcome = step_toward_target(character, map, rng);
        let to = character.position();

        if from != to {
            out.push(Event::CharacterAdvanced {
                character: character.id,
                from,
                to,
            });
        }

        if outcome == StepOutcome::Retargeted {
            out.push(Event::CharacterRetargeted {
                character: character.id,
                target_x: character.target_x,
                target_y: character.target_y,
            });
        }
    }
}
