// Host-side tests for the renderer, driven through a recording surface.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use vfx_studio::core::{AppSettings, ClockReading, EffectType, ParticleSystem, Physics};
use vfx_studio::render::{smooth_trail, Composite, PathOp, Renderer, Surface};

#[derive(Clone, Debug, PartialEq)]
enum Op {
    Save,
    Restore,
    Composite(Composite),
    Alpha(f32),
    Fill(String),
    Stroke(String, f32),
    Shadow(f32),
    Transform,
    Rect(f32, f32, f32, f32),
    Circle(Vec2, f32),
    Polygon(usize),
    Path(Vec<PathOp>),
    Arc,
    Glow,
    Text(String),
}

struct RecordingSurface {
    size: Vec2,
    ops: Vec<Op>,
}

impl RecordingSurface {
    fn new() -> Self {
        Self {
            size: Vec2::new(800.0, 600.0),
            ops: Vec::new(),
        }
    }

    fn count(&self, f: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| f(op)).count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }
    fn save(&mut self) {
        self.ops.push(Op::Save);
    }
    fn restore(&mut self) {
        self.ops.push(Op::Restore);
    }
    fn set_composite(&mut self, mode: Composite) {
        self.ops.push(Op::Composite(mode));
    }
    fn set_global_alpha(&mut self, alpha: f32) {
        self.ops.push(Op::Alpha(alpha));
    }
    fn set_fill(&mut self, css: &str) {
        self.ops.push(Op::Fill(css.to_string()));
    }
    fn set_stroke(&mut self, css: &str, width: f32) {
        self.ops.push(Op::Stroke(css.to_string(), width));
    }
    fn set_shadow(&mut self, blur: f32, _css: &str) {
        self.ops.push(Op::Shadow(blur));
    }
    fn translate_rotate(&mut self, _origin: Vec2, _radians: f32) {
        self.ops.push(Op::Transform);
    }
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ops.push(Op::Rect(x, y, w, h));
    }
    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.ops.push(Op::Circle(center, radius));
    }
    fn fill_polygon(&mut self, points: &[Vec2]) {
        self.ops.push(Op::Polygon(points.len()));
    }
    fn stroke_path(&mut self, ops: &[PathOp]) {
        self.ops.push(Op::Path(ops.to_vec()));
    }
    fn stroke_arc(&mut self, _center: Vec2, _radius: f32, _start: f32, _end: f32) {
        self.ops.push(Op::Arc);
    }
    fn fill_radial_glow(
        &mut self,
        _center: Vec2,
        _radius: f32,
        _inner: f32,
        _outer: f32,
        _inner_css: &str,
        _outer_css: &str,
    ) {
        self.ops.push(Op::Glow);
    }
    fn fill_text(&mut self, text: &str, _pos: Vec2, _font: &str, _centered: bool) {
        self.ops.push(Op::Text(text.to_string()));
    }
}

fn renderer() -> Renderer<SmallRng> {
    Renderer::with_rng(SmallRng::seed_from_u64(1))
}

fn settings(effect: EffectType, bloom: f32) -> AppSettings {
    AppSettings {
        effect,
        bloom,
        ..AppSettings::default()
    }
}

/// A handful of particles advanced a few frames so trails exist.
fn particles(effect: EffectType) -> ParticleSystem<SmallRng> {
    let mut sys = ParticleSystem::with_rng(1000, SmallRng::seed_from_u64(2));
    sys.emit(Vec2::new(400.0, 300.0), 4, effect, 90.0);
    for i in 0..6 {
        sys.advance(0.001, Physics::NEUTRAL, Vec2::new(800.0, 600.0), i as f64);
    }
    sys
}

const NOON: ClockReading = ClockReading {
    hours: 12,
    minutes: 5,
    seconds: 30,
    millis: 0,
    weekday: 5,
    month: 9,
    day: 16,
};

#[test]
fn frame_starts_with_an_opaque_fade_pass() {
    let mut s = RecordingSurface::new();
    let sys = particles(EffectType::FireTrail);
    renderer().draw(&mut s, sys.particles(), &settings(EffectType::FireTrail, 1.5), 0.0, None);
    assert_eq!(
        &s.ops[..4],
        &[
            Op::Composite(Composite::SourceOver),
            Op::Alpha(1.0),
            Op::Fill("rgba(0, 0, 0, 0.25)".into()),
            Op::Rect(0.0, 0.0, 800.0, 600.0),
        ]
    );
}

#[test]
fn particles_are_drawn_additively_and_state_is_reset() {
    for effect in EffectType::ALL {
        let mut s = RecordingSurface::new();
        let sys = particles(effect);
        renderer().draw(&mut s, sys.particles(), &settings(effect, 2.0), 0.0, None);

        let lighter = s
            .ops
            .iter()
            .position(|op| *op == Op::Composite(Composite::Lighter))
            .expect("lighter");
        assert_eq!(lighter, 4, "{effect}");
        let n = s.ops.len();
        assert_eq!(s.ops[n - 2], Op::Alpha(1.0), "{effect}");
        assert_eq!(s.ops[n - 1], Op::Composite(Composite::SourceOver), "{effect}");
        assert_eq!(
            s.count(|op| *op == Op::Save),
            s.count(|op| *op == Op::Restore),
            "{effect}"
        );
    }
}

#[test]
fn bloom_only_adds_glow_passes() {
    let sys = particles(EffectType::FireTrail);
    let mut dim = RecordingSurface::new();
    renderer().draw(&mut dim, sys.particles(), &settings(EffectType::FireTrail, 0.0), 0.0, None);
    let mut bright = RecordingSurface::new();
    renderer().draw(&mut bright, sys.particles(), &settings(EffectType::FireTrail, 3.0), 0.0, None);

    let circles = |s: &RecordingSurface| s.count(|op| matches!(op, Op::Circle(..)));
    assert_eq!(circles(&dim), sys.len());
    assert_eq!(circles(&bright), 2 * sys.len());
}

#[test]
fn drawing_does_not_touch_the_particles() {
    let sys = particles(EffectType::PrismRays);
    let before: Vec<(Vec2, f32, f32)> = sys
        .particles()
        .iter()
        .map(|p| (p.pos, p.size, p.rotation))
        .collect();
    let mut s = RecordingSurface::new();
    renderer().draw(&mut s, sys.particles(), &settings(EffectType::PrismRays, 3.0), 0.0, None);
    let after: Vec<(Vec2, f32, f32)> = sys
        .particles()
        .iter()
        .map(|p| (p.pos, p.size, p.rotation))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn clock_is_drawn_only_when_enabled() {
    let sys = particles(EffectType::NeonSpark);
    let texts = |s: &RecordingSurface| s.count(|op| matches!(op, Op::Text(_)));

    let mut off = RecordingSurface::new();
    let without_clock = settings(EffectType::NeonSpark, 1.0);
    renderer().draw(&mut off, sys.particles(), &without_clock, 0.0, Some(&NOON));
    assert_eq!(texts(&off), 0);

    let mut on = RecordingSurface::new();
    let mut with_clock = settings(EffectType::NeonSpark, 1.0);
    with_clock.show_clock = true;
    renderer().draw(&mut on, sys.particles(), &with_clock, 0.0, Some(&NOON));
    assert!(on.ops.contains(&Op::Text("12:05".into())));
    assert!(on.ops.contains(&Op::Text("FRI, OCTOBER 16".into())));

    // The clock sits between the fade and the additive pass.
    let time_at = on.ops.iter().position(|op| *op == Op::Text("12:05".into()));
    let lighter_at = on
        .ops
        .iter()
        .position(|op| *op == Op::Composite(Composite::Lighter));
    assert!(time_at < lighter_at);
}

#[test]
fn data_stream_draws_binary_glyphs() {
    let sys = particles(EffectType::DataStream);
    let mut s = RecordingSurface::new();
    renderer().draw(&mut s, sys.particles(), &settings(EffectType::DataStream, 0.5), 0.0, None);
    let glyphs: Vec<&str> = s
        .ops
        .iter()
        .filter_map(|op| match op {
            Op::Text(t) => Some(t.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(glyphs.len(), sys.len());
    assert!(glyphs.iter().all(|g| *g == "0" || *g == "1"));
}

#[test]
fn crystal_shards_are_rhombi() {
    let sys = particles(EffectType::CrystalShard);
    let mut s = RecordingSurface::new();
    renderer().draw(&mut s, sys.particles(), &settings(EffectType::CrystalShard, 0.0), 0.0, None);
    assert_eq!(s.count(|op| *op == Op::Polygon(4)), sys.len());
}

#[test]
fn silk_needs_three_trail_points() {
    let mut sys = ParticleSystem::with_rng(10, SmallRng::seed_from_u64(3));
    sys.emit(Vec2::new(100.0, 100.0), 1, EffectType::SilkArt, 0.0);
    sys.advance(0.001, Physics::NEUTRAL, Vec2::new(800.0, 600.0), 0.0);
    let mut s = RecordingSurface::new();
    renderer().draw(&mut s, sys.particles(), &settings(EffectType::SilkArt, 1.0), 0.0, None);
    assert_eq!(s.count(|op| matches!(op, Op::Path(_))), 0);

    for i in 0..3 {
        sys.advance(0.001, Physics::NEUTRAL, Vec2::new(800.0, 600.0), i as f64);
    }
    let mut s = RecordingSurface::new();
    renderer().draw(&mut s, sys.particles(), &settings(EffectType::SilkArt, 1.0), 0.0, None);
    assert_eq!(s.count(|op| matches!(op, Op::Path(_))), 1);
}

#[test]
fn smooth_trail_curves_through_midpoints() {
    let mut sys = ParticleSystem::with_rng(10, SmallRng::seed_from_u64(4));
    sys.emit(Vec2::new(100.0, 100.0), 1, EffectType::GoldenAurora, 0.0);
    for i in 0..4 {
        sys.advance(0.001, Physics::NEUTRAL, Vec2::new(800.0, 600.0), i as f64);
    }
    let p = &sys.particles()[0];
    let h: Vec<Vec2> = p.history.iter().collect();
    let path = smooth_trail(&p.history, p.pos);

    assert_eq!(path.len(), h.len() + 1);
    assert_eq!(path[0], PathOp::MoveTo(h[0]));
    assert_eq!(path[1], PathOp::QuadTo(h[0], (h[0] + h[1]) * 0.5));
    assert_eq!(*path.last().expect("head"), PathOp::LineTo(p.pos));
}
