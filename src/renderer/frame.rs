//! Frame generation for the 2D simulator view
//!
//! Turns a simulation snapshot into an ordered list of draw commands.
//! Nothing here touches the canvas, so frames can be checked natively.

use glam::Vec2;

use crate::sim::{ObjectKind, SimObject, SimulationState};

pub const BACKGROUND_COLOR: &str = "rgba(10, 10, 15, 0.95)";
pub const GRID_COLOR: &str = "rgba(255, 255, 255, 0.05)";
pub const GRID_SPACING: f32 = 50.0;
pub const SATELLITE_COLOR: &str = "#00ff88";
pub const DEBRIS_COLOR: &str = "#ff4444";
pub const VELOCITY_COLOR: &str = "rgba(255, 255, 255, 0.3)";
/// Velocity line length per unit of speed
pub const VELOCITY_SCALE: f32 = 10.0;
pub const PLACEHOLDER_COLOR: &str = "#b0b0b0";
pub const PLACEHOLDER_FONT: &str = "20px Arial";
pub const PLACEHOLDER_TEXT: &str = "Click Run to start simulation";

/// One drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        origin: Vec2,
        size: Vec2,
        color: &'static str,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: &'static str,
        width: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: &'static str,
        /// Shadow blur radius (0 = none)
        glow: f32,
    },
    /// Centered text
    Text {
        text: &'static str,
        pos: Vec2,
        color: &'static str,
        font: &'static str,
    },
}

/// Draw commands for one frame, in paint order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub size: Vec2,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    /// Number of object circles in the frame
    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }
}

/// Fill color and glow per object kind
pub fn kind_style(kind: ObjectKind) -> (&'static str, f32) {
    match kind {
        ObjectKind::Satellite => (SATELLITE_COLOR, 10.0),
        ObjectKind::Debris => (DEBRIS_COLOR, 5.0),
    }
}

/// Renders simulation snapshots for a fixed canvas size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderAdapter {
    pub width: f32,
    pub height: f32,
}

impl RenderAdapter {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Build the frame for a snapshot; `None` draws the idle placeholder
    pub fn render(&self, state: Option<&SimulationState>) -> Frame {
        let size = Vec2::new(self.width, self.height);
        let mut commands = vec![DrawCommand::FillRect {
            origin: Vec2::ZERO,
            size,
            color: BACKGROUND_COLOR,
        }];
        self.push_grid(&mut commands);

        match state {
            Some(state) => {
                for obj in state.active_objects() {
                    push_object(&mut commands, obj);
                }
            }
            None => commands.push(DrawCommand::Text {
                text: PLACEHOLDER_TEXT,
                pos: size * 0.5,
                color: PLACEHOLDER_COLOR,
                font: PLACEHOLDER_FONT,
            }),
        }

        Frame { size, commands }
    }

    fn push_grid(&self, commands: &mut Vec<DrawCommand>) {
        let grid_line = |from: Vec2, to: Vec2| DrawCommand::Line {
            from,
            to,
            color: GRID_COLOR,
            width: 1.0,
        };

        let mut x = 0.0;
        while x < self.width {
            commands.push(grid_line(Vec2::new(x, 0.0), Vec2::new(x, self.height)));
            x += GRID_SPACING;
        }
        let mut y = 0.0;
        while y < self.height {
            commands.push(grid_line(Vec2::new(0.0, y), Vec2::new(self.width, y)));
            y += GRID_SPACING;
        }
    }
}

fn push_object(commands: &mut Vec<DrawCommand>, obj: &SimObject) {
    let (color, glow) = kind_style(obj.kind);
    commands.push(DrawCommand::Circle {
        center: obj.pos,
        radius: obj.radius,
        color,
        glow,
    });
    commands.push(DrawCommand::Line {
        from: obj.pos,
        to: obj.pos + obj.vel * VELOCITY_SCALE,
        color: VELOCITY_COLOR,
        width: 1.0,
    });
}
