//! Particle factory: per-effect initial kinematics and look.
//!
//! Each effect has its own branch; there is no shared formula beyond the
//! random base vector (angle in `[0, 2π)`, speed in `[1, 4)`).

use super::color::{Hsl, ParticleColor};
use super::effect::EffectType;
use super::particle::Particle;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, TAU};

/// Rotating base hue shared by the hue-cycling effects.
pub fn base_hue(now_ms: f64) -> f32 {
    ((now_ms / 20.0) % 360.0) as f32
}

/// Append `count` particles of `effect` at `pos` to `out`.
pub fn spawn_batch<R: Rng + ?Sized>(
    rng: &mut R,
    pos: Vec2,
    count: usize,
    effect: EffectType,
    base_hue: f32,
    out: &mut Vec<Particle>,
) {
    out.reserve(count);
    for i in 0..count {
        out.push(spawn_one(rng, pos, i, effect, base_hue));
    }
}

fn spawn_one<R: Rng + ?Sized>(
    rng: &mut R,
    pos: Vec2,
    index: usize,
    effect: EffectType,
    base_hue: f32,
) -> Particle {
    let angle = rng.gen_range(0.0..TAU);
    let speed = rng.gen_range(1.0..4.0);
    let dir = Vec2::from_angle(angle);

    let mut vel = dir * speed;
    let mut life = 1.0;
    let size: f32;
    let color: ParticleColor;
    let rotation = rng.gen_range(0.0..360.0);
    let mut rotation_speed = (rng.gen::<f32>() - 0.5) * 10.0;
    let mut glyph = ' ';

    match effect {
        EffectType::QuantumFlux => {
            vel *= 4.0;
            color = ParticleColor::Hex(if rng.gen_bool(0.5) { "#0ff" } else { "#f0f" });
            size = rng.gen_range(2.0..6.0);
            life = 0.6;
        }
        EffectType::GoldenAurora => {
            vel *= 0.5;
            let hsl = Hsl::new(
                45.0 + rng.gen_range(0.0..10.0),
                100.0,
                50.0 + rng.gen_range(0.0..20.0),
            );
            color = ParticleColor::Hsla(hsl, 0.8);
            size = rng.gen_range(2.0..7.0);
            life = 2.0;
        }
        EffectType::PrismRays => {
            vel *= 5.0;
            color = ParticleColor::Hsla(Hsl::new(rng.gen_range(0.0..360.0), 100.0, 70.0), 1.0);
            size = rng.gen_range(5.0..25.0);
            rotation_speed = (rng.gen::<f32>() - 0.5) * 40.0;
            life = 0.7;
        }
        EffectType::CosmicNova => {
            vel *= 0.8;
            let hue = 240.0 + rng.gen_range(0.0..60.0);
            color = ParticleColor::Hsla(Hsl::new(hue, 90.0, 60.0), 0.5);
            size = rng.gen_range(5.0..15.0);
            life = 2.0;
        }
        EffectType::NeonSpark => {
            vel *= 2.5;
            let hue = 170.0 + rng.gen_range(0.0..40.0);
            color = ParticleColor::Hsla(Hsl::new(hue, 100.0, 60.0), 1.0);
            life = rng.gen_range(0.4..1.0);
            size = rng.gen_range(1.0..4.0);
        }
        EffectType::FireTrail => {
            vel = Vec2::new(
                (rng.gen::<f32>() - 0.5) * 1.5,
                (rng.gen::<f32>() - 1.0) * 4.0 - 1.0,
            );
            let hue = 10.0 + rng.gen_range(0.0..30.0);
            color = ParticleColor::Deferred(Hsl::new(hue, 100.0, 50.0));
            size = rng.gen_range(8.0..28.0);
            life = rng.gen_range(0.5..1.3);
        }
        EffectType::CyberGrid => {
            vel *= 0.5;
            color = ParticleColor::Hsla(Hsl::new(120.0, 100.0, 50.0), 1.0);
            size = rng.gen_range(1.0..3.0);
        }
        EffectType::ParticleStorm => {
            vel += Vec2::new(
                (rng.gen::<f32>() - 0.5) * 5.0,
                (rng.gen::<f32>() - 0.5) * 5.0,
            );
            color = ParticleColor::Hsla(Hsl::new(base_hue + 20.0, 90.0, 60.0), 0.9);
            size = rng.gen_range(1.0..5.0);
        }
        EffectType::PlasmaWave => {
            vel *= 0.2;
            size = rng.gen_range(10.0..40.0);
            color = ParticleColor::Hsla(Hsl::new(base_hue, 80.0, 60.0), 0.4);
        }
        EffectType::VortexSpiral => {
            // Tangential launch: base direction turned a quarter circle.
            vel = Vec2::from_angle(angle + FRAC_PI_2) * (speed * 2.0);
            let hue = 260.0 + rng.gen_range(0.0..60.0);
            color = ParticleColor::Hsla(Hsl::new(hue, 90.0, 70.0), 1.0);
            size = rng.gen_range(0.5..2.5);
            life = 1.5;
        }
        EffectType::DataStream => {
            vel = Vec2::new(0.0, rng.gen_range(5.0..13.0));
            color = ParticleColor::Hex("#0f0");
            size = rng.gen_range(10.0..20.0);
            life = 1.0;
            glyph = random_bit(rng);
        }
        EffectType::GalaxySwirl => {
            vel *= 0.1;
            let hue = 220.0 + rng.gen_range(0.0..100.0);
            color = ParticleColor::Hsla(Hsl::new(hue, 80.0, 60.0), 0.8);
            size = rng.gen_range(1.0..5.0);
            life = 2.0;
        }
        EffectType::CrystalShard => {
            vel *= 3.0;
            color = ParticleColor::Deferred(Hsl::new(200.0, 80.0, 90.0));
            size = rng.gen_range(2.0..10.0);
            rotation_speed = (rng.gen::<f32>() - 0.5) * 20.0;
            life = 0.8;
        }
        EffectType::BloodMoon => {
            vel = Vec2::new(
                (rng.gen::<f32>() - 0.5) * 2.0,
                -rng.gen::<f32>() * 1.5 - 1.0,
            );
            let hue = 350.0 + rng.gen_range(0.0..10.0);
            color = ParticleColor::Hsla(Hsl::new(hue, 100.0, 45.0), 0.8);
            size = rng.gen_range(6.0..18.0);
            life = 2.0;
        }
        EffectType::SilkArt => {
            vel *= 0.5;
            let hue = (base_hue + index as f32 * 15.0) % 360.0;
            color = ParticleColor::Hsla(Hsl::new(hue, 100.0, 50.0), 0.8);
            size = rng.gen_range(1.0..3.0);
            life = 2.5;
        }
    }

    let mut p = Particle::new(effect, pos, vel, life, size, color);
    p.rotation = rotation;
    p.rotation_speed = rotation_speed;
    p.glyph = glyph;
    p
}

/// `'0'` or `'1'` with equal odds.
pub fn random_bit<R: Rng + ?Sized>(rng: &mut R) -> char {
    if rng.gen_bool(0.5) {
        '1'
    } else {
        '0'
    }
}
