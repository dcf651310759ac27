//! Object generation
//!
//! All randomness comes from the RNG passed in, so a seeded generator
//! reproduces the same population and fragments.

use glam::Vec2;
use rand::Rng;

use super::state::{ObjectKind, SimulationState};
use crate::consts::*;

/// Generate the initial population, uniformly spread over the canvas
pub fn generate_population<R: Rng + ?Sized>(
    state: &mut SimulationState,
    rng: &mut R,
    count: usize,
    bounds: Vec2,
) {
    for _ in 0..count {
        let pos = Vec2::new(
            rng.random_range(0.0..=bounds.x),
            rng.random_range(0.0..=bounds.y),
        );
        let vel = Vec2::new(
            rng.random_range(-INITIAL_SPEED_RANGE..=INITIAL_SPEED_RANGE),
            rng.random_range(-INITIAL_SPEED_RANGE..=INITIAL_SPEED_RANGE),
        );
        let radius = rng.random_range(INITIAL_RADIUS_MIN..INITIAL_RADIUS_MAX);
        let kind = if rng.random_bool(DEBRIS_PROBABILITY) {
            ObjectKind::Debris
        } else {
            ObjectKind::Satellite
        };
        state.spawn(kind, pos, vel, radius);
    }
}

/// Roll how many fragments a collision produces
pub fn roll_fragment_count<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.random_range(FRAGMENTS_MIN..=FRAGMENTS_MAX)
}

/// Spawn `count` debris fragments at `origin`. Returns their IDs.
pub fn spawn_fragments<R: Rng + ?Sized>(
    state: &mut SimulationState,
    rng: &mut R,
    origin: Vec2,
    count: u32,
) -> Vec<u32> {
    (0..count)
        .map(|_| {
            let vel = Vec2::new(
                rng.random_range(-FRAGMENT_SPEED_RANGE..=FRAGMENT_SPEED_RANGE),
                rng.random_range(-FRAGMENT_SPEED_RANGE..=FRAGMENT_SPEED_RANGE),
            );
            let radius = rng.random_range(FRAGMENT_RADIUS_MIN..=FRAGMENT_RADIUS_MAX);
            state.spawn(ObjectKind::Debris, origin, vel, radius)
        })
        .collect()
}
