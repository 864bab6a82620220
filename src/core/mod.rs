//! Platform-independent core: everything here builds and tests natively.
pub mod autoplay;
pub mod clock;
pub mod color;
pub mod effect;
pub mod factory;
pub mod motion;
pub mod music;
pub mod particle;
pub mod settings;
pub mod simulation;
pub mod timing;

pub use autoplay::{AutoplayCursor, SafeZone};
pub use clock::ClockReading;
pub use color::{Hsl, ParticleColor};
pub use effect::{EffectType, GravityResponse};
pub use motion::MotionDetector;
pub use music::{NoteScheduler, ScheduledNote, SchedulerState, Waveform};
pub use particle::{Particle, TrailHistory};
pub use settings::{AppSettings, Physics, SettingsError, SettingsPatch, SettingsStore};
pub use simulation::ParticleSystem;
pub use timing::FrameClock;
