//! Fixed-step simulation tick
//!
//! Advances a run by one tick: integrate, bounce, resolve collisions,
//! count close approaches. Pure apart from the RNG it is handed.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Proximity, bounce_off_walls, classify_pair};
use super::spawn::{roll_fragment_count, spawn_fragments};
use super::state::{ObjectKind, SimObject, SimulationState};
use crate::midpoint;
use crate::settings::SimConfig;

/// Per-tick parameters, captured from the config when the tick starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickParams {
    pub bounds: Vec2,
    /// Simulated seconds added this tick (time step * speed)
    pub sim_seconds: u64,
    pub close_approach_threshold: f32,
    pub max_active_objects: usize,
}

impl TickParams {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            bounds: Vec2::new(config.canvas_width, config.canvas_height),
            sim_seconds: config.sim_seconds_per_tick(),
            close_approach_threshold: config.close_approach_threshold,
            max_active_objects: config.max_active_objects,
        }
    }
}

/// Identity of an object as reported in events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub id: u32,
    pub kind: ObjectKind,
}

impl From<&SimObject> for ObjectRef {
    fn from(obj: &SimObject) -> Self {
        Self {
            id: obj.id,
            kind: obj.kind,
        }
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} #{}", self.kind, self.id)
    }
}

/// Discrete events produced by a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    Collision {
        first: ObjectRef,
        second: ObjectRef,
        at: Vec2,
        /// IDs of the debris spawned at `at`
        fragments: Vec<u32>,
    },
    CloseApproach {
        first: ObjectRef,
        second: ObjectRef,
        distance: f32,
    },
}

/// Advance the run by one tick
pub fn tick<R: Rng + ?Sized>(
    state: &mut SimulationState,
    params: &TickParams,
    rng: &mut R,
) -> Vec<SimEvent> {
    state.time_ticks += 1;
    state.stats.elapsed_sim_seconds += params.sim_seconds;

    // Velocity is per tick; the time step only scales the sim clock
    for obj in state.objects.iter_mut().filter(|o| o.active) {
        obj.pos += obj.vel;
        bounce_off_walls(obj, params.bounds);
    }

    let mut events = resolve_collisions(state, params, rng);
    events.extend(detect_close_approaches(state, params));

    let pruned = state.prune_inactive();
    if pruned > 0 {
        log::debug!("Pruned {} inactive objects", pruned);
    }

    log::trace!(
        "Tick {}: {} active, {} events",
        state.time_ticks,
        state.active_count(),
        events.len()
    );

    events
}

/// Pairwise collision pass over the objects active when the pass starts.
/// Fragments spawned here sit out until the next tick.
fn resolve_collisions<R: Rng + ?Sized>(
    state: &mut SimulationState,
    params: &TickParams,
    rng: &mut R,
) -> Vec<SimEvent> {
    let mut events = Vec::new();
    let candidates = active_indices(state);
    let mut active_now = candidates.len();

    for (n, &i) in candidates.iter().enumerate() {
        for &j in &candidates[n + 1..] {
            if !state.objects[i].active {
                break;
            }
            if !state.objects[j].active {
                continue;
            }

            let (a, b) = (&state.objects[i], &state.objects[j]);
            if !matches!(
                classify_pair(a, b, params.close_approach_threshold),
                Proximity::Overlap { .. }
            ) {
                continue;
            }

            let first = ObjectRef::from(a);
            let second = ObjectRef::from(b);
            let at = midpoint(a.pos, b.pos);

            state.objects[i].active = false;
            state.objects[j].active = false;
            active_now -= 2;

            let rolled = roll_fragment_count(rng);
            let headroom = params.max_active_objects.saturating_sub(active_now);
            let count = rolled.min(headroom as u32);
            if count < rolled {
                log::debug!(
                    "Population cap {} reached, spawning {} of {} fragments",
                    params.max_active_objects,
                    count,
                    rolled
                );
            }
            let fragments = spawn_fragments(state, rng, at, count);
            active_now += fragments.len();

            state.stats.collision_count += 1;
            state.stats.debris_generated_count += fragments.len() as u64;

            log::debug!(
                "Collision {} <-> {} at ({:.1}, {:.1}), {} fragments",
                first,
                second,
                at.x,
                at.y,
                fragments.len()
            );
            events.push(SimEvent::Collision {
                first,
                second,
                at,
                fragments,
            });
        }
    }

    events
}

/// Near-miss pass over everything active after collisions resolved
fn detect_close_approaches(state: &mut SimulationState, params: &TickParams) -> Vec<SimEvent> {
    let mut events = Vec::new();
    let active: Vec<&SimObject> = state.active_objects().collect();

    for (n, a) in active.iter().enumerate() {
        for b in &active[n + 1..] {
            if let Proximity::CloseApproach { distance } =
                classify_pair(a, b, params.close_approach_threshold)
            {
                events.push(SimEvent::CloseApproach {
                    first: ObjectRef::from(*a),
                    second: ObjectRef::from(*b),
                    distance,
                });
            }
        }
    }

    state.stats.close_approach_count += events.len() as u64;
    events
}

fn active_indices(state: &SimulationState) -> Vec<usize> {
    state
        .objects
        .iter()
        .enumerate()
        .filter(|(_, o)| o.active)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::spawn::generate_population;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn params() -> TickParams {
        TickParams::from_config(&SimConfig::default())
    }

    fn place(state: &mut SimulationState, x: f32, vx: f32, radius: f32) -> u32 {
        state.spawn(
            ObjectKind::Satellite,
            Vec2::new(x, 200.0),
            Vec2::new(vx, 0.0),
            radius,
        )
    }

    #[test]
    fn test_head_on_collision_on_fifth_tick() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut state = SimulationState::new(0.0);
        let a = place(&mut state, 100.0, 1.0, 5.0);
        let b = place(&mut state, 118.0, -1.0, 5.0);

        // Gap closes by 2 per tick: 16, 14, 12 are near misses, 10 is touching
        for _ in 0..4 {
            let events = tick(&mut state, &params(), &mut rng);
            assert!(events.iter().all(|e| matches!(e, SimEvent::CloseApproach { .. })));
        }
        assert_eq!(state.stats.close_approach_count, 3);
        assert_eq!(state.stats.collision_count, 0);

        // Tick 5: distance 8 < 5 + 5
        let events = tick(&mut state, &params(), &mut rng);
        assert_eq!(state.stats.collision_count, 1);
        // The colliding pair is not also a close approach
        assert_eq!(state.stats.close_approach_count, 3);
        assert!(events.iter().all(|e| !matches!(e, SimEvent::CloseApproach { .. })));
        assert!(!state.object(a).unwrap().active);
        assert!(!state.object(b).unwrap().active);

        let fragments: Vec<&SimObject> = state.objects.iter().skip(2).collect();
        assert!((3..=7).contains(&fragments.len()));
        assert_eq!(state.stats.debris_generated_count, fragments.len() as u64);
        for frag in &fragments {
            assert_eq!(frag.kind, ObjectKind::Debris);
            assert!(frag.active);
            assert_eq!(frag.pos, Vec2::new(109.0, 200.0));
        }

        match &events[0] {
            SimEvent::Collision {
                first,
                second,
                fragments: ids,
                at,
            } => {
                assert_eq!((first.id, second.id), (a, b));
                assert_eq!(ids.len(), fragments.len());
                assert_eq!(*at, Vec2::new(109.0, 200.0));
            }
            other => panic!("expected collision, got {other:?}"),
        }
    }

    #[test]
    fn test_object_collides_at_most_once_per_tick() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut state = SimulationState::new(0.0);
        // Three mutually overlapping objects
        place(&mut state, 100.0, 0.0, 5.0);
        place(&mut state, 104.0, 0.0, 5.0);
        place(&mut state, 108.0, 0.0, 5.0);

        tick(&mut state, &params(), &mut rng);

        // 0 and 1 collide first; 2 survives this tick
        assert_eq!(state.stats.collision_count, 1);
        assert!(!state.objects[0].active);
        assert!(!state.objects[1].active);
        assert!(state.objects[2].active);
    }

    #[test]
    fn test_fresh_fragments_do_not_collide_same_tick() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut state = SimulationState::new(0.0);
        place(&mut state, 300.0, 0.0, 5.0);
        place(&mut state, 303.0, 0.0, 5.0);

        tick(&mut state, &params(), &mut rng);
        assert_eq!(state.stats.collision_count, 1);
        // Stacked fragments overlap each other but wait for the next tick
        assert!(state.active_count() >= 3);
    }

    #[test]
    fn test_population_cap_limits_fragments() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut state = SimulationState::new(0.0);
        place(&mut state, 100.0, 0.0, 5.0);
        place(&mut state, 104.0, 0.0, 5.0);
        place(&mut state, 500.0, 0.0, 5.0);

        let capped = TickParams {
            max_active_objects: 2,
            ..params()
        };
        let events = tick(&mut state, &capped, &mut rng);

        // One survivor, so only one fragment fits under the cap
        assert_eq!(state.stats.collision_count, 1);
        assert_eq!(state.stats.debris_generated_count, 1);
        assert_eq!(state.active_count(), 2);
        assert!(matches!(&events[0], SimEvent::Collision { fragments, .. } if fragments.len() == 1));
    }

    #[test]
    fn test_sim_clock_ignores_velocity_scaling() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = SimulationState::new(0.0);
        let id = place(&mut state, 100.0, 1.5, 3.0);
        let hourly = TickParams {
            sim_seconds: 3600,
            ..params()
        };

        tick(&mut state, &hourly, &mut rng);
        tick(&mut state, &hourly, &mut rng);

        assert_eq!(state.stats.elapsed_sim_seconds, 7200);
        assert_eq!(state.object(id).unwrap().pos.x, 103.0);
    }

    #[test]
    fn test_inactive_objects_are_frozen() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = SimulationState::new(0.0);
        place(&mut state, 100.0, 1.0, 3.0);
        state.objects[0].active = false;

        tick(&mut state, &params(), &mut rng);
        assert_eq!(state.objects[0].pos.x, 100.0);
    }

    #[test]
    fn test_determinism() {
        let run = |seed: u64| {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut state = SimulationState::new(0.0);
            let p = params();
            generate_population(&mut state, &mut rng, INITIAL_POPULATION, p.bounds);
            for _ in 0..300 {
                tick(&mut state, &p, &mut rng);
            }
            state
        };

        let a = run(2024);
        let b = run(2024);
        assert_eq!(a.objects, b.objects);
        assert_eq!(a.stats, b.stats);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn active_objects_stay_in_bounds(seed in any::<u64>(), ticks in 1usize..100) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut state = SimulationState::new(0.0);
            let p = params();
            generate_population(&mut state, &mut rng, INITIAL_POPULATION, p.bounds);

            for _ in 0..ticks {
                tick(&mut state, &p, &mut rng);
                for obj in state.active_objects() {
                    prop_assert!(obj.pos.x >= 0.0 && obj.pos.x <= p.bounds.x);
                    prop_assert!(obj.pos.y >= 0.0 && obj.pos.y <= p.bounds.y);
                    prop_assert!(obj.radius > 0.0);
                }
            }
        }

        #[test]
        fn collisions_account_for_fragments(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut state = SimulationState::new(0.0);
            let p = params();
            generate_population(&mut state, &mut rng, INITIAL_POPULATION, p.bounds);

            for _ in 0..100 {
                let before = state.stats;
                let events = tick(&mut state, &p, &mut rng);

                let mut collisions = 0;
                let mut spawned = 0;
                for event in &events {
                    if let SimEvent::Collision { first, second, fragments, .. } = event {
                        collisions += 1;
                        spawned += fragments.len() as u64;
                        // Fewer than three only when the population cap bites
                        prop_assert!(fragments.len() <= FRAGMENTS_MAX as usize);
                        prop_assert!(!state.object(first.id).map_or(false, |o| o.active));
                        prop_assert!(!state.object(second.id).map_or(false, |o| o.active));
                    }
                }
                prop_assert_eq!(state.stats.collision_count, before.collision_count + collisions);
                prop_assert_eq!(state.stats.debris_generated_count, before.debris_generated_count + spawned);
                prop_assert!(state.stats.close_approach_count >= before.close_approach_count);
                prop_assert!(state.active_count() <= p.max_active_objects);
            }
        }
    }
}
