use glam::Vec2;

/// Canvas composite operation used by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Composite {
    /// Normal painting; used for the fade pass and the clock overlay.
    SourceOver,
    /// Additive; overlapping particles brighten.
    Lighter,
}

impl Composite {
    pub fn css(self) -> &'static str {
        match self {
            Composite::SourceOver => "source-over",
            Composite::Lighter => "lighter",
        }
    }
}

/// One segment of a stroked path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathOp {
    MoveTo(Vec2),
    LineTo(Vec2),
    /// Quadratic curve through control point `.0` ending at `.1`.
    QuadTo(Vec2, Vec2),
}

/// The 2D drawing operations the renderer needs.
///
/// The browser implementation forwards to `CanvasRenderingContext2d`;
/// tests record the calls.
pub trait Surface {
    fn size(&self) -> Vec2;

    fn save(&mut self);
    fn restore(&mut self);

    fn set_composite(&mut self, mode: Composite);
    fn set_global_alpha(&mut self, alpha: f32);
    fn set_fill(&mut self, css: &str);
    /// Stroke colour and width; caps and joins are round.
    fn set_stroke(&mut self, css: &str, width: f32);
    fn set_shadow(&mut self, blur: f32, css: &str);
    /// Move the origin to `origin` and rotate by `radians`.
    fn translate_rotate(&mut self, origin: Vec2, radians: f32);

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32);
    fn fill_polygon(&mut self, points: &[Vec2]);
    fn stroke_path(&mut self, ops: &[PathOp]);
    fn stroke_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32);
    /// Fill a disc of `radius` with a radial gradient running from
    /// `inner_css` at `inner` to `outer_css` at `outer`.
    fn fill_radial_glow(
        &mut self,
        center: Vec2,
        radius: f32,
        inner: f32,
        outer: f32,
        inner_css: &str,
        outer_css: &str,
    );
    /// Draw `text` with a CSS `font`; `centered` centres it on `pos`
    /// both ways, otherwise `pos` is the start of the baseline.
    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, centered: bool);
}
