//! Frame-difference motion tracking for webcam control.
//!
//! Frames arrive as tightly packed RGBA bytes at a small fixed resolution.
//! Every `MOTION_PIXEL_STRIDE`-th pixel is compared against the previous
//! frame; the centroid of the changed pixels, mirrored horizontally (the
//! camera faces the user), becomes the motion point on screen.

use crate::constants::{
    MOTION_DIFF_THRESHOLD, MOTION_MIN_ACTIVE, MOTION_PIXEL_STRIDE, MOTION_SMOOTHING,
};
use glam::Vec2;

#[derive(Debug)]
pub struct MotionDetector {
    width: u32,
    height: u32,
    prev: Option<Vec<u8>>,
    point: Option<Vec2>,
}

impl MotionDetector {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            prev: None,
            point: None,
        }
    }

    /// Smoothed motion point in screen space, once motion has been seen.
    #[inline]
    pub fn point(&self) -> Option<Vec2> {
        self.point
    }

    /// Forget the previous frame and the motion point.
    pub fn reset(&mut self) {
        self.prev = None;
        self.point = None;
    }

    /// Compare `frame` with the previous one and update the motion point.
    ///
    /// Frames of the wrong size are ignored. Returns the current point.
    pub fn sample(&mut self, frame: &[u8], screen: Vec2) -> Option<Vec2> {
        let expected = (self.width * self.height * 4) as usize;
        if frame.len() != expected {
            log::warn!(
                "[motion] frame of {} bytes, expected {}",
                frame.len(),
                expected
            );
            return self.point;
        }

        let detected = self
            .prev
            .as_deref()
            .and_then(|prev| self.active_centroid(prev, frame));

        match &mut self.prev {
            Some(prev) => prev.copy_from_slice(frame),
            None => self.prev = Some(frame.to_vec()),
        }

        if let Some(centroid) = detected {
            let target = self.to_screen(centroid, screen);
            self.point = Some(match self.point {
                Some(prev) => prev * MOTION_SMOOTHING + target * (1.0 - MOTION_SMOOTHING),
                None => target,
            });
        }
        self.point
    }

    /// Buffer-space centroid of changed pixels, if enough changed.
    fn active_centroid(&self, prev: &[u8], cur: &[u8]) -> Option<Vec2> {
        let mut sum_x = 0u64;
        let mut sum_y = 0u64;
        let mut count = 0u32;
        let step = MOTION_PIXEL_STRIDE * 4;
        for i in (0..cur.len()).step_by(step) {
            let diff = cur[i].abs_diff(prev[i]) as u32
                + cur[i + 1].abs_diff(prev[i + 1]) as u32
                + cur[i + 2].abs_diff(prev[i + 2]) as u32;
            if diff > MOTION_DIFF_THRESHOLD {
                let pixel = (i / 4) as u32;
                sum_x += (pixel % self.width) as u64;
                sum_y += (pixel / self.width) as u64;
                count += 1;
            }
        }
        (count >= MOTION_MIN_ACTIVE).then(|| {
            Vec2::new(
                sum_x as f32 / count as f32,
                sum_y as f32 / count as f32,
            )
        })
    }

    fn to_screen(&self, c: Vec2, screen: Vec2) -> Vec2 {
        Vec2::new(
            screen.x - (c.x / self.width as f32) * screen.x,
            (c.y / self.height as f32) * screen.y,
        )
    }
}
