//! Canvas 2D renderer for the particle set.
//!
//! Each frame: fade the previous image with a translucent black rectangle,
//! draw the optional clock, then switch to additive composition and draw
//! every particle with its effect's routine. Bloom only scales glow passes.

use crate::core::factory::random_bit;
use crate::core::{AppSettings, ClockReading, EffectType, Particle, TrailHistory};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

#[cfg(target_arch = "wasm32")]
mod canvas;
mod clock;
mod surface;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use clock::draw_clock;
pub use surface::{Composite, PathOp, Surface};

type PathBuf = SmallVec<[PathOp; 32]>;

/// Chance per frame that a data-stream glyph flickers to a random bit.
const GLYPH_FLICKER_CHANCE: f64 = 0.05;
const DATA_STREAM_RGB: &str = "0, 255, 65";

pub struct Renderer<R: Rng = SmallRng> {
    rng: R,
}

impl Default for Renderer<SmallRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer<SmallRng> {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }
}

impl<R: Rng> Renderer<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Paint one frame. `clock` is drawn only when the overlay is enabled.
    pub fn draw<S: Surface + ?Sized>(
        &mut self,
        s: &mut S,
        particles: &[Particle],
        settings: &AppSettings,
        frame_time_ms: f64,
        clock: Option<&ClockReading>,
    ) {
        let size = s.size();
        s.set_composite(Composite::SourceOver);
        s.set_global_alpha(1.0);
        s.set_fill(&format!("rgba(0, 0, 0, {})", settings.effect.fade_alpha()));
        s.fill_rect(0.0, 0.0, size.x, size.y);

        if settings.show_clock {
            if let Some(reading) = clock {
                draw_clock(s, frame_time_ms, reading);
            }
        }

        s.set_composite(Composite::Lighter);
        let bloom = settings.bloom;
        for p in particles {
            self.draw_particle(s, p, bloom);
        }

        // The next fade pass must not inherit additive mode or a stray alpha.
        s.set_global_alpha(1.0);
        s.set_composite(Composite::SourceOver);
    }

    fn draw_particle<S: Surface + ?Sized>(&mut self, s: &mut S, p: &Particle, bloom: f32) {
        let alpha = p.alpha();
        match p.effect() {
            EffectType::QuantumFlux => draw_quantum(s, p, alpha, bloom),
            EffectType::GoldenAurora => draw_aurora(s, p, alpha, bloom),
            EffectType::PrismRays => draw_prism(s, p, alpha),
            EffectType::CosmicNova => draw_nova(s, p, bloom),
            EffectType::FireTrail => draw_fire(s, p, alpha, bloom),
            EffectType::DataStream => {
                let glyph = if self.rng.gen_bool(GLYPH_FLICKER_CHANCE) {
                    random_bit(&mut self.rng)
                } else {
                    p.glyph
                };
                draw_data_stream(s, p, glyph, alpha, bloom);
            }
            EffectType::CrystalShard => draw_crystal(s, p, alpha, bloom),
            EffectType::SilkArt => draw_silk(s, p, alpha),
            EffectType::NeonSpark => draw_neon(s, p, alpha, bloom),
            EffectType::CyberGrid
            | EffectType::ParticleStorm
            | EffectType::PlasmaWave
            | EffectType::VortexSpiral
            | EffectType::GalaxySwirl
            | EffectType::BloodMoon => draw_orb(s, p, alpha, bloom),
        }
    }
}

/// Curve through the midpoints of consecutive samples, ending at `head`.
pub fn smooth_trail(history: &TrailHistory, head: Vec2) -> SmallVec<[PathOp; 32]> {
    let mut ops = PathBuf::new();
    let mut prev = match history.get(0) {
        Some(first) => first,
        None => return ops,
    };
    ops.push(PathOp::MoveTo(prev));
    for cur in history.iter().skip(1) {
        ops.push(PathOp::QuadTo(prev, (prev + cur) * 0.5));
        prev = cur;
    }
    ops.push(PathOp::LineTo(head));
    ops
}

fn polyline_trail(history: &TrailHistory, head: Vec2) -> PathBuf {
    let mut ops = PathBuf::new();
    if let Some(first) = history.get(0) {
        ops.push(PathOp::MoveTo(first));
        ops.extend(history.iter().map(PathOp::LineTo));
        ops.push(PathOp::LineTo(head));
    }
    ops
}

fn rhombus(size: f32) -> [Vec2; 4] {
    [
        Vec2::new(0.0, -size),
        Vec2::new(size * 0.6, 0.0),
        Vec2::new(0.0, size),
        Vec2::new(-size * 0.6, 0.0),
    ]
}

fn white(alpha: f32) -> String {
    format!("rgba(255, 255, 255, {:.3})", alpha.clamp(0.0, 1.0))
}

fn draw_quantum<S: Surface + ?Sized>(s: &mut S, p: &Particle, alpha: f32, bloom: f32) {
    let (x, y, sz) = (p.pos.x, p.pos.y, p.size);
    s.set_fill(&p.color.css());
    s.fill_rect(x - sz, y - sz, sz * 2.0, sz * 2.0);
    if bloom > 0.5 {
        s.set_fill(&white(alpha * 0.5));
        s.fill_rect(x - sz + 4.0, y - sz + 4.0, sz, sz);
    }
}

fn draw_aurora<S: Surface + ?Sized>(s: &mut S, p: &Particle, alpha: f32, bloom: f32) {
    if p.history.len() <= 2 {
        return;
    }
    let width = (p.size * alpha * (1.0 + bloom * 0.5)).max(1.0);
    s.set_stroke(&p.color.css(), width);
    s.stroke_path(&smooth_trail(&p.history, p.pos));
    s.set_fill("#fff");
    s.fill_circle(p.pos, p.size * 0.5);
}

fn draw_prism<S: Surface + ?Sized>(s: &mut S, p: &Particle, alpha: f32) {
    let sz = p.size;
    s.save();
    s.translate_rotate(p.pos, p.rotation.to_radians());
    s.set_fill(&p.color.css());
    s.set_global_alpha(alpha);
    s.fill_rect(-sz / 4.0, -sz, sz / 2.0, sz * 2.0);
    s.fill_rect(-sz, -sz / 4.0, sz * 2.0, sz / 2.0);
    s.restore();
}

fn draw_nova<S: Surface + ?Sized>(s: &mut S, p: &Particle, bloom: f32) {
    s.set_fill(&p.color.css());
    s.fill_circle(p.pos, p.size * (2.0 + bloom));
    s.set_fill("#fff");
    s.fill_circle(p.pos, p.size * 0.3);
}

fn draw_fire<S: Surface + ?Sized>(s: &mut S, p: &Particle, alpha: f32, bloom: f32) {
    if bloom > 0.1 {
        s.set_fill(&p.color.css_with_alpha(alpha * 0.3 * bloom));
        s.fill_circle(p.pos, p.size * (1.0 + bloom * 0.5));
    }
    s.set_fill(&p.color.css_with_alpha(alpha));
    s.fill_circle(p.pos, p.size);
}

fn draw_data_stream<S: Surface + ?Sized>(
    s: &mut S,
    p: &Particle,
    glyph: char,
    alpha: f32,
    bloom: f32,
) {
    let font = format!("{:.0}px monospace", p.size);
    let mut buf = [0u8; 4];
    if bloom > 1.0 {
        s.set_fill(&format!(
            "rgba({DATA_STREAM_RGB}, {:.3})",
            (alpha * 0.3 * bloom).min(1.0)
        ));
        s.fill_text(p.glyph.encode_utf8(&mut buf), p.pos, &font, false);
    }
    s.set_fill(&format!("rgba({DATA_STREAM_RGB}, {:.3})", alpha));
    s.fill_text(glyph.encode_utf8(&mut buf), p.pos, &font, false);
}

fn draw_crystal<S: Surface + ?Sized>(s: &mut S, p: &Particle, alpha: f32, bloom: f32) {
    s.save();
    s.translate_rotate(p.pos, p.rotation.to_radians());
    if bloom > 0.5 {
        s.set_fill(&p.color.css_with_alpha(alpha * 0.4 * bloom));
        s.fill_polygon(&rhombus(p.size * (1.0 + bloom * 0.3)));
    }
    s.set_fill(&p.color.css_with_alpha(alpha));
    s.fill_polygon(&rhombus(p.size));
    s.restore();
}

fn draw_silk<S: Surface + ?Sized>(s: &mut S, p: &Particle, alpha: f32) {
    if p.history.len() <= 2 {
        return;
    }
    s.set_stroke(&p.color.css(), (p.size * alpha).max(0.5));
    s.stroke_path(&smooth_trail(&p.history, p.pos));
}

fn draw_neon<S: Surface + ?Sized>(s: &mut S, p: &Particle, alpha: f32, bloom: f32) {
    let flare = 1.0 + bloom;
    s.set_fill(&p.color.css());
    s.fill_circle(p.pos, p.size * 0.5 * flare);

    s.set_fill(&white(alpha * 0.8));
    let reach = p.size * 2.0 * flare;
    let thick = (p.size * 0.15).max(1.0);
    s.fill_rect(p.pos.x - reach, p.pos.y - thick / 2.0, reach * 2.0, thick);
    s.fill_rect(p.pos.x - thick / 2.0, p.pos.y - reach, thick, reach * 2.0);
}

/// Glow halo, optional polyline trail and a solid core.
fn draw_orb<S: Surface + ?Sized>(s: &mut S, p: &Particle, alpha: f32, bloom: f32) {
    let css = p.color.css();
    if bloom > 0.1 {
        s.set_fill(&css);
        s.set_global_alpha(alpha * 0.25 * bloom);
        s.fill_circle(p.pos, p.size * (1.0 + bloom));
    }
    s.set_fill(&css);
    s.set_global_alpha(alpha);
    if p.history.len() > 1 {
        s.set_stroke(&css, p.size * 0.5);
        s.stroke_path(&polyline_trail(&p.history, p.pos));
    }
    s.fill_circle(p.pos, p.size);
    s.set_global_alpha(1.0);
}
