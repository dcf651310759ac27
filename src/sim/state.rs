//! Simulation state and core object types
//!
//! One `SimulationState` per run; discarded on pause/reset.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::PRUNE_THRESHOLD;

/// Object kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Satellite,
    Debris,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Satellite => "satellite",
            ObjectKind::Debris => "debris",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point-mass object in the bounded 2D plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimObject {
    pub id: u32,
    pub pos: Vec2,
    /// Canvas units per tick
    pub vel: Vec2,
    pub radius: f32,
    pub kind: ObjectKind,
    /// Inactive objects are skipped by physics and rendering
    pub active: bool,
}

/// Counters shown on the stats panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimStats {
    pub elapsed_sim_seconds: u64,
    pub collision_count: u64,
    pub close_approach_count: u64,
    pub debris_generated_count: u64,
}

impl SimStats {
    /// Elapsed simulated time as `{h}h {m}m`
    pub fn elapsed_label(&self) -> String {
        let hours = self.elapsed_sim_seconds / 3600;
        let minutes = (self.elapsed_sim_seconds % 3600) / 60;
        format!("{}h {}m", hours, minutes)
    }
}

/// State of one simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    /// Host clock (ms) when the run started
    pub started_at_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub stats: SimStats,
    /// Objects in creation order
    pub objects: Vec<SimObject>,
    /// Next object ID
    next_id: u32,
}

impl SimulationState {
    /// Create an empty run
    pub fn new(started_at_ms: f64) -> Self {
        Self {
            started_at_ms,
            time_ticks: 0,
            stats: SimStats::default(),
            objects: Vec::new(),
            next_id: 0,
        }
    }

    /// Allocate a new object ID (never reused within a run)
    pub fn next_object_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a new active object and return its ID
    pub fn spawn(&mut self, kind: ObjectKind, pos: Vec2, vel: Vec2, radius: f32) -> u32 {
        let id = self.next_object_id();
        self.objects.push(SimObject {
            id,
            pos,
            vel,
            radius,
            kind,
            active: true,
        });
        id
    }

    pub fn active_objects(&self) -> impl Iterator<Item = &SimObject> {
        self.objects.iter().filter(|o| o.active)
    }

    pub fn active_count(&self) -> usize {
        self.active_objects().count()
    }

    pub fn object(&self, id: u32) -> Option<&SimObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Drop inactive objects once enough have piled up.
    /// Returns how many were removed.
    pub fn prune_inactive(&mut self) -> usize {
        let inactive = self.objects.len() - self.active_count();
        if inactive < PRUNE_THRESHOLD {
            return 0;
        }
        self.objects.retain(|o| o.active);
        inactive
    }
}
