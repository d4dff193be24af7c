use constellation::{Rgba, Surface, Viewport};
use foundation::math::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

fn ctx_set_fill_style(ctx: &CanvasRenderingContext2d, value: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("fillStyle"),
        &JsValue::from_str(value),
    );
}

fn ctx_set_stroke_style(ctx: &CanvasRenderingContext2d, value: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("strokeStyle"),
        &JsValue::from_str(value),
    );
}

/// Full-viewport 2D canvas the constellation graph is drawn on.
#[derive(Debug)]
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Looks up the canvas by id. `Ok(None)` when the page has no such element.
    pub fn from_document(document: &Document, id: &str) -> Result<Option<Self>, JsValue> {
        let Some(element) = document.get_element_by_id(id) else {
            return Ok(None);
        };
        let canvas = element.dyn_into::<HtmlCanvasElement>()?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Some(Self { canvas, ctx }))
    }

    fn match_viewport(&self, viewport: Viewport) {
        let w = viewport.width.round() as u32;
        let h = viewport.height.round() as u32;
        if self.canvas.width() != w {
            self.canvas.set_width(w);
        }
        if self.canvas.height() != h {
            self.canvas.set_height(h);
        }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, viewport: Viewport) {
        self.match_viewport(viewport);
        self.ctx.set_global_alpha(1.0);
        self.ctx.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f64) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        ctx_set_stroke_style(&self.ctx, &color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Rgba) {
        self.ctx.begin_path();
        if self.ctx.arc(center.x, center.y, radius, 0.0, TAU).is_err() {
            return;
        }
        ctx_set_fill_style(&self.ctx, &color.to_css());
        self.ctx.fill();
    }
}
