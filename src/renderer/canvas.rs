//! Canvas 2D backend
//!
//! Executes a `Frame` on a `CanvasRenderingContext2d`.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::frame::{DrawCommand, Frame};

/// Canvas element plus its 2D context
pub struct CanvasSurface {
    pub canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look up a canvas by element ID; `None` if missing or not 2D-capable
    pub fn from_element_id(id: &str) -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let canvas: HtmlCanvasElement = document.get_element_by_id(id)?.dyn_into().ok()?;
        let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;
        Some(Self { canvas, ctx })
    }

    /// Match the canvas width to its container, with a fixed height
    pub fn fit_to_container(&self, height: u32) -> (f32, f32) {
        let width = self
            .canvas
            .parent_element()
            .map(|p| p.client_width().max(1) as u32)
            .unwrap_or(self.canvas.width());
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        (width as f32, height as f32)
    }

    pub fn draw(&self, frame: &Frame) {
        let ctx = &self.ctx;
        for command in &frame.commands {
            match command {
                DrawCommand::FillRect {
                    origin,
                    size,
                    color,
                } => {
                    ctx.set_fill_style_str(color);
                    ctx.fill_rect(
                        origin.x as f64,
                        origin.y as f64,
                        size.x as f64,
                        size.y as f64,
                    );
                }
                DrawCommand::Line {
                    from,
                    to,
                    color,
                    width,
                } => {
                    ctx.begin_path();
                    ctx.move_to(from.x as f64, from.y as f64);
                    ctx.line_to(to.x as f64, to.y as f64);
                    ctx.set_stroke_style_str(color);
                    ctx.set_line_width(*width as f64);
                    ctx.stroke();
                }
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                    glow,
                } => {
                    ctx.begin_path();
                    if ctx
                        .arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)
                        .is_err()
                    {
                        continue;
                    }
                    ctx.set_fill_style_str(color);
                    ctx.set_shadow_blur(*glow as f64);
                    ctx.set_shadow_color(color);
                    ctx.fill();
                    ctx.set_shadow_blur(0.0);
                }
                DrawCommand::Text {
                    text,
                    pos,
                    color,
                    font,
                } => {
                    ctx.set_fill_style_str(color);
                    ctx.set_font(font);
                    ctx.set_text_align("center");
                    let _ = ctx.fill_text(text, pos.x as f64, pos.y as f64);
                }
            }
        }
    }
}
