//! Per-frame particle simulation.
//!
//! [`ParticleSystem`] owns the live set. Emission appends, `advance` mutates
//! in place and culls, and the renderer only ever sees `particles()`.

use super::effect::{EffectType, GravityResponse};
use super::factory::spawn_batch;
use super::particle::Particle;
use super::settings::Physics;
use crate::constants::*;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub struct ParticleSystem<R: Rng = SmallRng> {
    particles: Vec<Particle>,
    max_particles: usize,
    rng: R,
}

impl ParticleSystem<SmallRng> {
    pub fn new(max_particles: usize) -> Self {
        Self::with_rng(max_particles, SmallRng::from_entropy())
    }
}

impl<R: Rng> ParticleSystem<R> {
    pub fn with_rng(max_particles: usize, rng: R) -> Self {
        Self {
            particles: Vec::new(),
            max_particles: max_particles.max(1),
            rng,
        }
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn max_particles(&self) -> usize {
        self.max_particles
    }

    /// Change the live-set cap; shrinking evicts immediately.
    pub fn set_max_particles(&mut self, max: usize) {
        self.max_particles = max.max(1);
        self.evict_oldest();
    }

    /// Emit `count` particles of `effect` at `pos`.
    pub fn emit(&mut self, pos: Vec2, count: usize, effect: EffectType, base_hue: f32) {
        if count == 0 {
            return;
        }
        spawn_batch(&mut self.rng, pos, count, effect, base_hue, &mut self.particles);
        self.evict_oldest();
    }

    /// Emission appends at the back, so the front holds the oldest particles.
    fn evict_oldest(&mut self) {
        let excess = self.particles.len().saturating_sub(self.max_particles);
        if excess > 0 {
            self.particles.drain(..excess);
        }
    }

    /// Advance every live particle by one frame and drop the expired ones.
    ///
    /// `surface` is the drawing surface size (attraction centre is its
    /// middle); `time_ms` is the frame timestamp used by the flow field.
    pub fn advance(&mut self, dt_sec: f32, physics: Physics, surface: Vec2, time_ms: f64) {
        let dt = dt_sec.clamp(0.0, MAX_FRAME_DT_SEC);
        let center = surface * 0.5;
        let t = time_ms as f32;
        let rng = &mut self.rng;
        self.particles.retain_mut(|p| {
            step_particle(p, rng, dt, physics, center, t);
            p.is_alive()
        });
    }
}

fn step_particle<R: Rng + ?Sized>(
    p: &mut Particle,
    rng: &mut R,
    dt: f32,
    physics: Physics,
    center: Vec2,
    time_ms: f32,
) {
    p.vel.x += physics.wind * WIND_COEFF;
    if physics.turbulence > 0.0 {
        let k = physics.turbulence * TURBULENCE_COEFF;
        p.vel.x += (rng.gen::<f32>() - 0.5) * k;
        p.vel.y += (rng.gen::<f32>() - 0.5) * k;
    }

    special_motion(p, rng, center, time_ms);

    match p.effect().gravity_response() {
        GravityResponse::Full => {
            p.vel.y += physics.gravity;
            p.vel *= physics.friction;
        }
        GravityResponse::Half => p.vel.y += physics.gravity * DATA_STREAM_GRAVITY_SCALE,
        GravityResponse::Exempt => {}
    }

    p.pos += p.vel;
    p.life -= dt;
    if p.rotation_speed != 0.0 {
        p.rotation += p.rotation_speed;
    }

    let cap = p.effect().trail_len();
    if cap > 0 {
        p.history.push(p.pos, cap);
    }
}

fn special_motion<R: Rng + ?Sized>(p: &mut Particle, rng: &mut R, center: Vec2, time_ms: f32) {
    match p.effect() {
        EffectType::FireTrail => {
            p.vel.y -= FIRE_BUOYANCY;
            p.pos.x += (rng.gen::<f32>() - 0.5) * FIRE_JITTER_PX;
            p.size *= FIRE_SHRINK;
        }
        EffectType::VortexSpiral => {
            p.vel -= p.vel * VORTEX_DAMPING;
            p.rotation += VORTEX_SPIN_DEG;
        }
        EffectType::GalaxySwirl | EffectType::CosmicNova => {
            let d = p.pos - center;
            let force = ATTRACT_STRENGTH / (d.length_squared() + ATTRACT_EPSILON);
            p.vel -= d * force * ATTRACT_GAIN;
        }
        EffectType::SilkArt | EffectType::GoldenAurora => {
            p.vel *= FLOW_DAMPING;
            let phase = time_ms * FLOW_TIME_FREQ;
            p.vel.x += (p.pos.y * FLOW_SPATIAL_FREQ + phase).sin() * FLOW_GAIN;
            p.vel.y += (p.pos.x * FLOW_SPATIAL_FREQ + phase).cos() * FLOW_GAIN;
        }
        EffectType::QuantumFlux => {
            if rng.gen_bool(QUANTUM_TELEPORT_CHANCE) {
                p.pos.x += (rng.gen::<f32>() - 0.5) * QUANTUM_TELEPORT_PX;
                p.pos.y += (rng.gen::<f32>() - 0.5) * QUANTUM_TELEPORT_PX;
            }
            p.vel *= QUANTUM_DAMPING;
        }
        _ => {}
    }
}
