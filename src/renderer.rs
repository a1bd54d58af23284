// Renderer that draws the particle field onto a 2D canvas context.
// Owns the context and keeps the canvas backing store matched to the
// device pixel ratio, so the field works in CSS pixels throughout.

use crate::color::Hsla;
use crate::surface::{Bounds, Surface};
use std::f64::consts::PI;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasRenderer {
    pub context: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    // None when the canvas cannot hand out a 2D context; callers stay inert
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(CanvasRenderer { context })
    }

    // Sizes the backing store to the element's layout size times the pixel
    // ratio and rescales the context so drawing stays in CSS pixels
    pub fn fit_to(&self, canvas: &HtmlCanvasElement, pixel_ratio: f64) -> Result<Bounds, JsValue> {
        let width = canvas.offset_width() as f64;
        let height = canvas.offset_height() as f64;
        canvas.set_width((width * pixel_ratio) as u32);
        canvas.set_height((height * pixel_ratio) as u32);
        self.context.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        self.context.scale(pixel_ratio, pixel_ratio)?;
        Ok(Bounds::new(width, height))
    }
}

impl Surface for CanvasRenderer {
    type Error = JsValue;

    fn clear(&mut self, bounds: Bounds) -> Result<(), JsValue> {
        self.context.clear_rect(0.0, 0.0, bounds.width, bounds.height);
        Ok(())
    }

    #[allow(deprecated)]
    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Hsla) -> Result<(), JsValue> {
        self.context.set_fill_style(&JsValue::from_str(&color.to_css()));
        self.context.begin_path();
        self.context.arc(center[0], center[1], radius, 0.0, PI * 2.0)?;
        self.context.fill();
        Ok(())
    }

    #[allow(deprecated)]
    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], width: f64, color: Hsla) -> Result<(), JsValue> {
        self.context.begin_path();
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.set_stroke_style(&JsValue::from_str(&color.to_css()));
        self.context.set_line_width(width);
        self.context.stroke();
        Ok(())
    }

    #[allow(deprecated)]
    fn stroke_fading_line(
        &mut self,
        head: [f64; 2],
        tail: [f64; 2],
        width: f64,
        color: Hsla,
    ) -> Result<(), JsValue> {
        let gradient = self
            .context
            .create_linear_gradient(head[0], head[1], tail[0], tail[1]);
        gradient.add_color_stop(0.0, &color.to_css())?;
        gradient.add_color_stop(1.0, &color.with_alpha(0.0).to_css())?;
        self.context.set_stroke_style(&gradient);
        self.context.set_line_width(width);
        self.context.begin_path();
        self.context.move_to(head[0], head[1]);
        self.context.line_to(tail[0], tail[1]);
        self.context.stroke();
        Ok(())
    }
}
