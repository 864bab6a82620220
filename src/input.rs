use crate::constants::{
    AUTOPLAY_DIVISOR, BLOOM_STEP, DRAG_DIVISOR, HOLD_DIVISOR, MOTION_DIVISOR,
    PRESS_BURST_MULTIPLIER, VOLUME_STEP,
};
use crate::core::{AppSettings, EffectType};
use fnv::FnvHashMap;
use glam::Vec2;
use smallvec::SmallVec;

/// Active pointers by id. Each one emits continuously while held.
#[derive(Default, Debug)]
pub struct TouchRegistry {
    points: FnvHashMap<i32, Vec2>,
}

impl TouchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, id: i32, pos: Vec2) {
        self.points.insert(id, pos);
    }

    /// Update a held pointer. Returns `false` for pointers that are not down
    /// (hover moves), which must not emit.
    pub fn move_to(&mut self, id: i32, pos: Vec2) -> bool {
        match self.points.get_mut(&id) {
            Some(p) => {
                *p = pos;
                true
            }
            None => false,
        }
    }

    /// Release on up, cancel or leave.
    pub fn release(&mut self, id: i32) -> Option<Vec2> {
        self.points.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Copy of the current positions, so emission can run without holding
    /// a borrow of the registry.
    pub fn positions(&self) -> SmallVec<[Vec2; 8]> {
        self.points.values().copied().collect()
    }
}

// ---------------- Emission rates ----------------
#[inline]
fn div_ceil(intensity: u32, divisor: u32) -> usize {
    ((intensity + divisor - 1) / divisor) as usize
}

/// Burst on pointer down.
#[inline]
pub fn press_burst(intensity: u32) -> usize {
    (intensity * PRESS_BURST_MULTIPLIER) as usize
}

/// Per pointer move while held.
#[inline]
pub fn drag_burst(intensity: u32) -> usize {
    div_ceil(intensity, DRAG_DIVISOR)
}

/// Per frame for every held pointer.
#[inline]
pub fn hold_rate(intensity: u32) -> usize {
    div_ceil(intensity, HOLD_DIVISOR)
}

/// Per frame at the autoplay cursor.
#[inline]
pub fn autoplay_rate(intensity: u32) -> usize {
    div_ceil(intensity, AUTOPLAY_DIVISOR)
}

/// Per frame at the motion point.
#[inline]
pub fn motion_rate(intensity: u32) -> usize {
    div_ceil(intensity, MOTION_DIVISOR)
}

// ---------------- Keyboard shortcuts ----------------
/// Effect selected by a digit or letter key: `1`..`9`, `0`, then `q`..`t`.
pub fn effect_for_key(key: &str) -> Option<EffectType> {
    let slot = match key {
        "1" => 0,
        "2" => 1,
        "3" => 2,
        "4" => 3,
        "5" => 4,
        "6" => 5,
        "7" => 6,
        "8" => 7,
        "9" => 8,
        "0" => 9,
        "q" | "Q" => 10,
        "w" | "W" => 11,
        "e" | "E" => 12,
        "r" | "R" => 13,
        "t" | "T" => 14,
        _ => return None,
    };
    EffectType::ALL.get(slot).copied()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyAction {
    SelectEffect(EffectType),
    Bloom(f32),
    Intensity(i32),
    ToggleAutoplay,
    ToggleMotion,
    ToggleClock,
    ToggleUi,
    ToggleMute,
    Volume(f32),
    ToggleFullscreen,
    ExitFullscreen,
}

impl KeyAction {
    /// Apply to a settings draft. Fullscreen actions leave it untouched and
    /// return `false`.
    pub fn apply(self, s: &mut AppSettings) -> bool {
        match self {
            KeyAction::SelectEffect(effect) => s.effect = effect,
            KeyAction::Bloom(step) => s.bloom = ((s.bloom + step) * 10.0).round() / 10.0,
            KeyAction::Intensity(step) => {
                s.intensity = (s.intensity as i32 + step).max(0) as u32;
            }
            KeyAction::ToggleAutoplay => s.autoplay = !s.autoplay,
            KeyAction::ToggleMotion => s.motion_control = !s.motion_control,
            KeyAction::ToggleClock => s.show_clock = !s.show_clock,
            KeyAction::ToggleUi => s.show_ui = !s.show_ui,
            KeyAction::ToggleMute => s.muted = !s.muted,
            KeyAction::Volume(step) => s.volume = ((s.volume + step) * 100.0).round() / 100.0,
            KeyAction::ToggleFullscreen | KeyAction::ExitFullscreen => return false,
        }
        true
    }
}

pub fn key_action(key: &str) -> Option<KeyAction> {
    if let Some(effect) = effect_for_key(key) {
        return Some(KeyAction::SelectEffect(effect));
    }
    let action = match key {
        "[" => KeyAction::Bloom(-BLOOM_STEP),
        "]" => KeyAction::Bloom(BLOOM_STEP),
        "-" | "_" => KeyAction::Intensity(-1),
        "=" | "+" => KeyAction::Intensity(1),
        "a" | "A" => KeyAction::ToggleAutoplay,
        "m" | "M" => KeyAction::ToggleMotion,
        "k" | "K" => KeyAction::ToggleClock,
        "h" | "H" => KeyAction::ToggleUi,
        " " => KeyAction::ToggleMute,
        "ArrowUp" => KeyAction::Volume(VOLUME_STEP),
        "ArrowDown" => KeyAction::Volume(-VOLUME_STEP),
        "Enter" => KeyAction::ToggleFullscreen,
        "Escape" => KeyAction::ExitFullscreen,
        _ => return None,
    };
    Some(action)
}
