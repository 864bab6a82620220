//! Process-wide configuration published as immutable snapshots.
//!
//! The UI layer (keyboard shortcuts, the exported JS surface) is the single
//! writer: it builds a new [`AppSettings`] and publishes it whole through
//! [`SettingsStore`]. The frame loop takes one snapshot per frame and never
//! writes back.

use super::effect::EffectType;
use crate::constants::DEFAULT_MAX_PARTICLES;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::ops::RangeInclusive;
use std::rc::Rc;

pub const INTENSITY_RANGE: RangeInclusive<u32> = 1..=30;
pub const BLOOM_RANGE: RangeInclusive<f32> = 0.0..=3.0;
pub const GRAVITY_RANGE: RangeInclusive<f32> = -0.5..=1.0;
pub const FRICTION_RANGE: RangeInclusive<f32> = 0.85..=1.0;
pub const WIND_RANGE: RangeInclusive<f32> = -2.0..=2.0;
pub const TURBULENCE_RANGE: RangeInclusive<f32> = 0.0..=5.0;
pub const VOLUME_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const UI_OPACITY_RANGE: RangeInclusive<f32> = 0.2..=1.0;

/// Effect shown on first load, before the user has interacted.
pub const LANDING_EFFECT: EffectType = EffectType::GalaxySwirl;
/// Effect selected once the session begins.
pub const STARTER_EFFECT: EffectType = EffectType::NeonSpark;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("unknown effect type: {0}")]
    UnknownEffect(String),
    #[error("invalid settings patch: {0}")]
    InvalidPatch(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppSettings {
    pub effect: EffectType,
    /// Particles per emission event.
    pub intensity: u32,
    pub bloom: f32,
    pub autoplay: bool,
    pub motion_control: bool,
    pub show_clock: bool,
    pub show_ui: bool,
    pub ui_opacity: f32,
    pub gravity: f32,
    pub friction: f32,
    pub wind: f32,
    pub turbulence: f32,
    pub muted: bool,
    pub volume: f32,
    pub max_particles: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            effect: LANDING_EFFECT,
            intensity: 8,
            bloom: 1.5,
            autoplay: true,
            motion_control: false,
            show_clock: false,
            show_ui: false,
            ui_opacity: 0.9,
            gravity: 0.1,
            friction: 0.98,
            wind: 0.0,
            turbulence: 0.0,
            muted: false,
            volume: 0.5,
            max_particles: DEFAULT_MAX_PARTICLES,
        }
    }
}

/// Global force scalars read by the simulation step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Physics {
    pub gravity: f32,
    pub friction: f32,
    pub wind: f32,
    pub turbulence: f32,
}

impl Physics {
    /// No gravity, no friction loss, no wind, no turbulence.
    pub const NEUTRAL: Physics = Physics {
        gravity: 0.0,
        friction: 1.0,
        wind: 0.0,
        turbulence: 0.0,
    };
}

impl AppSettings {
    pub fn physics(&self) -> Physics {
        Physics {
            gravity: self.gravity,
            friction: self.friction,
            wind: self.wind,
            turbulence: self.turbulence,
        }
    }

    /// Volume actually sent to the master gain.
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    /// Autoplay only drives emission while motion control is off.
    pub fn autoplay_active(&self) -> bool {
        self.autoplay && !self.motion_control
    }

    /// Leave the landing state: starter effect, autoplay off, UI visible.
    pub fn begin_session(&mut self) {
        self.effect = STARTER_EFFECT;
        self.autoplay = false;
        self.show_ui = true;
    }

    /// Clamp every numeric field to its documented range.
    pub fn sanitized(mut self) -> Self {
        self.intensity = self
            .intensity
            .clamp(*INTENSITY_RANGE.start(), *INTENSITY_RANGE.end());
        self.bloom = clamp_range(self.bloom, &BLOOM_RANGE);
        self.gravity = clamp_range(self.gravity, &GRAVITY_RANGE);
        self.friction = clamp_range(self.friction, &FRICTION_RANGE);
        self.wind = clamp_range(self.wind, &WIND_RANGE);
        self.turbulence = clamp_range(self.turbulence, &TURBULENCE_RANGE);
        self.volume = clamp_range(self.volume, &VOLUME_RANGE);
        self.ui_opacity = clamp_range(self.ui_opacity, &UI_OPACITY_RANGE);
        self.max_particles = self.max_particles.max(1);
        self
    }

    /// Return a copy with `patch` merged in and ranges enforced.
    pub fn with_patch(&self, patch: &SettingsPatch) -> Result<Self, SettingsError> {
        let mut next = self.clone();
        if let Some(name) = &patch.effect {
            next.effect = name.parse()?;
        }
        macro_rules! merge {
            ($($field:ident),*) => {
                $(if let Some(v) = patch.$field { next.$field = v; })*
            };
        }
        merge!(
            intensity,
            bloom,
            autoplay,
            motion_control,
            show_clock,
            show_ui,
            ui_opacity,
            gravity,
            friction,
            wind,
            turbulence,
            muted,
            volume,
            max_particles
        );
        Ok(next.sanitized())
    }
}

fn clamp_range(v: f32, r: &RangeInclusive<f32>) -> f32 {
    if v.is_nan() {
        *r.start()
    } else {
        v.clamp(*r.start(), *r.end())
    }
}

/// Partial update accepted from the JS surface. Absent fields are kept.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsPatch {
    /// Effect name in any of the forms [`EffectType`]'s `FromStr` accepts.
    pub effect: Option<String>,
    pub intensity: Option<u32>,
    pub bloom: Option<f32>,
    pub autoplay: Option<bool>,
    pub motion_control: Option<bool>,
    pub show_clock: Option<bool>,
    pub show_ui: Option<bool>,
    pub ui_opacity: Option<f32>,
    pub gravity: Option<f32>,
    pub friction: Option<f32>,
    pub wind: Option<f32>,
    pub turbulence: Option<f32>,
    pub muted: Option<bool>,
    pub volume: Option<f32>,
    pub max_particles: Option<usize>,
}

impl SettingsPatch {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Single-writer publication point for settings snapshots.
#[derive(Debug, Default)]
pub struct SettingsStore {
    current: RefCell<Rc<AppSettings>>,
}

impl SettingsStore {
    pub fn new(initial: AppSettings) -> Self {
        Self {
            current: RefCell::new(Rc::new(initial.sanitized())),
        }
    }

    /// Latest published snapshot. Holding it does not block publishers.
    pub fn snapshot(&self) -> Rc<AppSettings> {
        self.current.borrow().clone()
    }

    pub fn publish(&self, next: AppSettings) {
        *self.current.borrow_mut() = Rc::new(next.sanitized());
    }

    /// Build the next snapshot from the current one and publish it.
    /// Returns the published snapshot.
    pub fn update(&self, f: impl FnOnce(&mut AppSettings)) -> Rc<AppSettings> {
        let mut next = (*self.snapshot()).clone();
        f(&mut next);
        self.publish(next);
        self.snapshot()
    }

    /// Merge a JSON patch; on error the current snapshot stays in force.
    pub fn apply_json(&self, json: &str) -> Result<Rc<AppSettings>, SettingsError> {
        let patch = SettingsPatch::from_json(json)?;
        let next = self.snapshot().with_patch(&patch)?;
        self.publish(next);
        Ok(self.snapshot())
    }
}
