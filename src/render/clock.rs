use super::surface::Surface;
use crate::core::clock::{breath, clock_radius, ClockReading};
use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, TAU};

const FONT_FAMILY: &str = "\"Helvetica Neue\", Arial, sans-serif";

/// Decorative clock centred on the surface. Reads nothing from the
/// particle state.
pub fn draw_clock<S: Surface + ?Sized>(
    s: &mut S,
    frame_time_ms: f64,
    reading: &ClockReading,
) {
    let size = s.size();
    let c = size * 0.5;
    let r = clock_radius(size.x, size.y);

    // Breathing backdrop
    s.save();
    s.fill_radial_glow(
        c,
        r * 1.1 * breath(frame_time_ms),
        r * 0.5,
        r * 1.5,
        "rgba(10, 20, 40, 0.4)",
        "rgba(0, 0, 0, 0)",
    );
    s.restore();

    // Ring, seconds arc and its glowing tip
    s.save();
    s.set_stroke("rgba(255, 255, 255, 0.05)", 2.0);
    s.stroke_arc(c, r, 0.0, TAU);
    let angle = reading.seconds_angle();
    s.set_stroke("rgba(100, 255, 255, 0.6)", 3.0);
    s.stroke_arc(c, r, -FRAC_PI_2, angle);
    let tip = c + Vec2::from_angle(angle) * r;
    s.set_shadow(10.0, "cyan");
    s.set_fill("#fff");
    s.fill_circle(tip, 4.0);
    s.set_shadow(0.0, "transparent");
    s.restore();

    // Digital time and date
    s.save();
    s.set_fill("rgba(255, 255, 255, 0.95)");
    s.fill_text(
        &reading.time_text(),
        c - Vec2::new(0.0, r * 0.1),
        &format!("300 {:.0}px {}", r * 0.5, FONT_FAMILY),
        true,
    );
    s.set_fill("rgba(255, 255, 255, 0.5)");
    s.fill_text(
        &reading.date_text(),
        c + Vec2::new(0.0, r * 0.35),
        &format!("200 {:.0}px {}", r * 0.15, FONT_FAMILY),
        true,
    );
    s.restore();
}
