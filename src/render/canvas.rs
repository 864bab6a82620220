use super::surface::{Composite, PathOp, Surface};
use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsValue;
use web_sys as web;

/// `Surface` backed by a browser 2D context.
pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
    size: Vec2,
}

impl CanvasSurface {
    pub fn new(ctx: web::CanvasRenderingContext2d, size: Vec2) -> Self {
        ctx.set_line_cap("round");
        ctx.set_line_join("round");
        Self { ctx, size }
    }

    /// Track the backing-store size after a resize.
    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
        // Resizing a canvas resets its state.
        self.ctx.set_line_cap("round");
        self.ctx.set_line_join("round");
    }

    fn trace(&self, ops: &[PathOp]) {
        for op in ops {
            match *op {
                PathOp::MoveTo(p) => self.ctx.move_to(p.x as f64, p.y as f64),
                PathOp::LineTo(p) => self.ctx.line_to(p.x as f64, p.y as f64),
                PathOp::QuadTo(c, p) => {
                    self.ctx
                        .quadratic_curve_to(c.x as f64, c.y as f64, p.x as f64, p.y as f64)
                }
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_composite(&mut self, mode: Composite) {
        _ = self.ctx.set_global_composite_operation(mode.css());
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
    }

    fn set_fill(&mut self, css: &str) {
        #[allow(deprecated)]
        self.ctx.set_fill_style(&JsValue::from_str(css));
    }

    fn set_stroke(&mut self, css: &str, width: f32) {
        #[allow(deprecated)]
        self.ctx.set_stroke_style(&JsValue::from_str(css));
        self.ctx.set_line_width(width as f64);
    }

    fn set_shadow(&mut self, blur: f32, css: &str) {
        self.ctx.set_shadow_blur(blur as f64);
        self.ctx.set_shadow_color(css);
    }

    fn translate_rotate(&mut self, origin: Vec2, radians: f32) {
        _ = self.ctx.translate(origin.x as f64, origin.y as f64);
        _ = self.ctx.rotate(radians as f64);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        if radius <= 0.0 {
            return;
        }
        self.ctx.begin_path();
        _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        self.ctx.fill();
    }

    fn fill_polygon(&mut self, points: &[Vec2]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn stroke_path(&mut self, ops: &[PathOp]) {
        if ops.is_empty() {
            return;
        }
        self.ctx.begin_path();
        self.trace(ops);
        self.ctx.stroke();
    }

    fn stroke_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32) {
        self.ctx.begin_path();
        _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            start as f64,
            end as f64,
        );
        self.ctx.stroke();
    }

    fn fill_radial_glow(
        &mut self,
        center: Vec2,
        radius: f32,
        inner: f32,
        outer: f32,
        inner_css: &str,
        outer_css: &str,
    ) {
        let (cx, cy) = (center.x as f64, center.y as f64);
        let gradient = match self
            .ctx
            .create_radial_gradient(cx, cy, inner as f64, cx, cy, outer as f64)
        {
            Ok(g) => g,
            Err(e) => {
                log::warn!("[render] radial gradient error: {:?}", e);
                return;
            }
        };
        _ = gradient.add_color_stop(0.0, inner_css);
        _ = gradient.add_color_stop(1.0, outer_css);
        #[allow(deprecated)]
        self.ctx.set_fill_style(&gradient);
        self.fill_circle(center, radius);
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, centered: bool) {
        self.ctx.set_font(font);
        if centered {
            self.ctx.set_text_align("center");
            self.ctx.set_text_baseline("middle");
        } else {
            self.ctx.set_text_align("start");
            self.ctx.set_text_baseline("alphabetic");
        }
        _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
    }
}
