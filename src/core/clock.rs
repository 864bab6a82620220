//! Geometry and text for the ambient clock overlay.
//!
//! The reading is taken from the wall clock by the caller; everything here is
//! derived from it so the overlay can be drawn and tested without a browser.

use crate::constants::{CLOCK_BREATH_AMPLITUDE, CLOCK_BREATH_RATE, CLOCK_RADIUS_FRACTION};
use std::f32::consts::{FRAC_PI_2, TAU};

const WEEKDAYS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];
const MONTHS: [&str; 12] = [
    "JANUARY",
    "FEBRUARY",
    "MARCH",
    "APRIL",
    "MAY",
    "JUNE",
    "JULY",
    "AUGUST",
    "SEPTEMBER",
    "OCTOBER",
    "NOVEMBER",
    "DECEMBER",
];

/// Local wall-clock time broken into fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockReading {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub millis: u32,
    /// 0 = Sunday.
    pub weekday: u32,
    /// 0 = January.
    pub month: u32,
    pub day: u32,
}

impl ClockReading {
    /// `HH:MM`, zero padded.
    pub fn time_text(&self) -> String {
        format!("{:02}:{:02}", self.hours, self.minutes)
    }

    /// e.g. `WED, OCTOBER 16`.
    pub fn date_text(&self) -> String {
        let wd = WEEKDAYS[(self.weekday % 7) as usize];
        let mo = MONTHS[(self.month % 12) as usize];
        format!("{}, {} {}", wd, mo, self.day)
    }

    /// Seconds including the sub-second part.
    pub fn smooth_seconds(&self) -> f32 {
        self.seconds as f32 + self.millis as f32 / 1000.0
    }

    /// End angle of the seconds arc in canvas radians, starting at 12 o'clock.
    pub fn seconds_angle(&self) -> f32 {
        self.smooth_seconds() / 60.0 * TAU - FRAC_PI_2
    }
}

/// Ring radius for a surface of `width` × `height`.
pub fn clock_radius(width: f32, height: f32) -> f32 {
    width.min(height) * CLOCK_RADIUS_FRACTION
}

/// Slow breathing scale applied to the backdrop glow.
pub fn breath(frame_time_ms: f64) -> f32 {
    (frame_time_ms as f32 * CLOCK_BREATH_RATE).sin() * CLOCK_BREATH_AMPLITUDE + 1.0
}
