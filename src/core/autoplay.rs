use crate::constants::{
    AUTOPLAY_CORRECTION, AUTOPLAY_INITIAL_VEL, AUTOPLAY_MAX_SPEED, AUTOPLAY_SAFE_ZONE,
    AUTOPLAY_WANDER,
};
use glam::Vec2;
use rand::Rng;

/// Random-walk emitter used when nobody is interacting.
#[derive(Clone, Copy, Debug)]
pub struct AutoplayCursor {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Safe-zone rectangle centred on the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SafeZone {
    pub min: Vec2,
    pub max: Vec2,
}

impl SafeZone {
    pub fn for_surface(surface: Vec2) -> Self {
        let center = surface * 0.5;
        let half = surface * AUTOPLAY_SAFE_ZONE;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

impl AutoplayCursor {
    /// Start at the surface centre.
    pub fn new(surface: Vec2) -> Self {
        Self {
            pos: surface * 0.5,
            vel: Vec2::from(AUTOPLAY_INITIAL_VEL),
        }
    }

    /// Advance one frame inside `surface` and return the new position.
    ///
    /// Past a safe-zone edge the velocity is pushed back toward the centre;
    /// inside, it wanders randomly. The position is then clamped to the
    /// safe zone, so the cursor turns around at the edge.
    pub fn step<R: Rng + ?Sized>(&mut self, surface: Vec2, rng: &mut R) -> Vec2 {
        let zone = SafeZone::for_surface(surface);
        self.pos += self.vel;

        if self.pos.x > zone.max.x {
            self.vel.x -= AUTOPLAY_CORRECTION;
        } else if self.pos.x < zone.min.x {
            self.vel.x += AUTOPLAY_CORRECTION;
        } else {
            self.vel.x += (rng.gen::<f32>() - 0.5) * AUTOPLAY_WANDER;
            self.vel.y += (rng.gen::<f32>() - 0.5) * AUTOPLAY_WANDER;
        }
        if self.pos.y > zone.max.y {
            self.vel.y -= AUTOPLAY_CORRECTION;
        }
        if self.pos.y < zone.min.y {
            self.vel.y += AUTOPLAY_CORRECTION;
        }

        self.vel = self.vel.clamp_length_max(AUTOPLAY_MAX_SPEED);
        self.pos = self.pos.clamp(zone.min, zone.max);
        self.pos
    }
}
