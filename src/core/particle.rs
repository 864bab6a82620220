use super::color::ParticleColor;
use super::effect::EffectType;
use crate::constants::MIN_PARTICLE_SIZE;
use glam::Vec2;

/// Storage bound for [`TrailHistory`]; per-effect caps never exceed it.
pub const TRAIL_CAPACITY: usize = 30;

/// Fixed-capacity ring of recent positions, oldest first.
///
/// Pushing past the cap overwrites the oldest sample, so per-frame updates
/// never allocate.
#[derive(Clone, Debug)]
pub struct TrailHistory {
    buf: [Vec2; TRAIL_CAPACITY],
    start: usize,
    len: usize,
}

impl Default for TrailHistory {
    fn default() -> Self {
        Self {
            buf: [Vec2::ZERO; TRAIL_CAPACITY],
            start: 0,
            len: 0,
        }
    }
}

impl TrailHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `p`, dropping the oldest sample once `cap` samples are held.
    pub fn push(&mut self, p: Vec2, cap: usize) {
        let cap = cap.clamp(1, TRAIL_CAPACITY);
        while self.len > cap {
            self.start = (self.start + 1) % TRAIL_CAPACITY;
            self.len -= 1;
        }
        let slot = (self.start + self.len) % TRAIL_CAPACITY;
        self.buf[slot] = p;
        if self.len == cap {
            self.start = (self.start + 1) % TRAIL_CAPACITY;
        } else {
            self.len += 1;
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, i: usize) -> Option<Vec2> {
        (i < self.len).then(|| self.buf[(self.start + i) % TRAIL_CAPACITY])
    }

    pub fn iter(&self) -> impl Iterator<Item = Vec2> + '_ {
        (0..self.len).map(move |i| self.buf[(self.start + i) % TRAIL_CAPACITY])
    }
}

/// One live particle. Owned by the simulation's particle set.
#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    /// Units per frame.
    pub vel: Vec2,
    /// Remaining seconds.
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub color: ParticleColor,
    pub history: TrailHistory,
    /// Degrees.
    pub rotation: f32,
    /// Degrees per frame.
    pub rotation_speed: f32,
    pub glyph: char,
    effect: EffectType,
}

impl Particle {
    pub fn new(
        effect: EffectType,
        pos: Vec2,
        vel: Vec2,
        life: f32,
        size: f32,
        color: ParticleColor,
    ) -> Self {
        Self {
            pos,
            vel,
            life,
            max_life: life,
            size,
            color,
            history: TrailHistory::new(),
            rotation: 0.0,
            rotation_speed: 0.0,
            glyph: ' ',
            effect,
        }
    }

    /// Fixed for the particle's whole life.
    #[inline]
    pub fn effect(&self) -> EffectType {
        self.effect
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0 && self.size >= MIN_PARTICLE_SIZE
    }

    /// Remaining life as a 0..1 fraction; drives draw alpha.
    #[inline]
    pub fn alpha(&self) -> f32 {
        if self.max_life > 0.0 {
            (self.life / self.max_life).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_drops_oldest_first() {
        let mut h = TrailHistory::new();
        for i in 0..8 {
            h.push(Vec2::new(i as f32, 0.0), 5);
        }
        assert_eq!(h.len(), 5);
        let xs: Vec<f32> = h.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn ring_wraps_at_full_capacity() {
        let mut h = TrailHistory::new();
        for i in 0..(TRAIL_CAPACITY * 2 + 3) {
            h.push(Vec2::splat(i as f32), TRAIL_CAPACITY);
        }
        assert_eq!(h.len(), TRAIL_CAPACITY);
        assert_eq!(h.get(0), Some(Vec2::splat((TRAIL_CAPACITY + 3) as f32)));
        assert_eq!(
            h.get(TRAIL_CAPACITY - 1),
            Some(Vec2::splat((TRAIL_CAPACITY * 2 + 2) as f32))
        );
        assert_eq!(h.get(TRAIL_CAPACITY), None);
    }

    #[test]
    fn alpha_tracks_remaining_life() {
        let mut p = Particle::new(
            EffectType::CyberGrid,
            Vec2::ZERO,
            Vec2::ZERO,
            2.0,
            1.0,
            ParticleColor::Hex("#fff"),
        );
        assert_eq!(p.alpha(), 1.0);
        p.life = 0.5;
        assert!((p.alpha() - 0.25).abs() < 1e-6);
        p.size = 0.1;
        assert!(!p.is_alive());
    }
}
