//! Deterministic simulation module
//!
//! All physics lives here. This module must stay pure and deterministic:
//! - Seeded RNG only (handed in by the caller)
//! - Stable iteration order (creation order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Proximity, bounce_off_walls, classify_pair, pair_distance, reflect_velocity};
pub use spawn::{generate_population, roll_fragment_count, spawn_fragments};
pub use state::{ObjectKind, SimObject, SimStats, SimulationState};
pub use tick::{ObjectRef, SimEvent, TickParams, tick};
