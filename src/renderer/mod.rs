//! 2D rendering module
//!
//! `frame` builds draw commands from a snapshot; `canvas` paints them.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod frame;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use frame::{DrawCommand, Frame, RenderAdapter};
