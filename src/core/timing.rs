use crate::constants::{FPS_SMOOTHING, MAX_FRAME_DT_SEC};

/// Per-frame delta time and a smoothed fps estimate.
#[derive(Clone, Debug)]
pub struct FrameClock {
    last_ms: Option<f64>,
    fps: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            last_ms: None,
            fps: 60.0,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous tick, clamped to `[0, MAX_FRAME_DT_SEC]`.
    /// The first tick returns 0.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT_SEC),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        if dt > 0.0 {
            self.fps = self.fps * FPS_SMOOTHING + (1.0 / dt) * (1.0 - FPS_SMOOTHING);
        }
        dt
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stalls_are_clamped() {
        let mut c = FrameClock::new();
        assert_eq!(c.tick(1000.0), 0.0);
        assert!((c.tick(1016.0) - 0.016).abs() < 1e-6);
        assert_eq!(c.tick(31016.0), MAX_FRAME_DT_SEC);
    }

    #[test]
    fn backwards_time_yields_zero() {
        let mut c = FrameClock::new();
        c.tick(500.0);
        assert_eq!(c.tick(400.0), 0.0);
    }

    #[test]
    fn fps_converges() {
        let mut c = FrameClock::new();
        let mut t = 0.0;
        for _ in 0..200 {
            t += 1000.0 / 30.0;
            c.tick(t);
        }
        assert!((c.fps() - 30.0).abs() < 0.5);
    }
}
