//! The closed set of particle effect presets.
//!
//! Every component keys its behaviour on [`EffectType`] with one `match`:
//! the factory picks initial kinematics, the simulation applies special
//! motion and trail caps, and the renderer picks a draw routine.

use super::settings::SettingsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectType {
    QuantumFlux,
    GoldenAurora,
    PrismRays,
    CosmicNova,
    SilkArt,
    NeonSpark,
    FireTrail,
    CyberGrid,
    ParticleStorm,
    PlasmaWave,
    VortexSpiral,
    DataStream,
    GalaxySwirl,
    CrystalShard,
    BloodMoon,
}

/// How the global gravity/friction terms apply to an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GravityResponse {
    /// Gravity on the vertical axis, friction on both axes.
    Full,
    /// Half gravity, no friction.
    Half,
    /// Neither gravity nor friction.
    Exempt,
}

impl EffectType {
    pub const ALL: [EffectType; 15] = [
        EffectType::QuantumFlux,
        EffectType::GoldenAurora,
        EffectType::PrismRays,
        EffectType::CosmicNova,
        EffectType::SilkArt,
        EffectType::NeonSpark,
        EffectType::FireTrail,
        EffectType::CyberGrid,
        EffectType::ParticleStorm,
        EffectType::PlasmaWave,
        EffectType::VortexSpiral,
        EffectType::DataStream,
        EffectType::GalaxySwirl,
        EffectType::CrystalShard,
        EffectType::BloodMoon,
    ];

    /// Stable identifier used in settings JSON.
    pub fn name(self) -> &'static str {
        match self {
            EffectType::QuantumFlux => "QUANTUM_FLUX",
            EffectType::GoldenAurora => "GOLDEN_AURORA",
            EffectType::PrismRays => "PRISM_RAYS",
            EffectType::CosmicNova => "COSMIC_NOVA",
            EffectType::SilkArt => "SILK_ART",
            EffectType::NeonSpark => "NEON_SPARK",
            EffectType::FireTrail => "FIRE_TRAIL",
            EffectType::CyberGrid => "CYBER_GRID",
            EffectType::ParticleStorm => "PARTICLE_STORM",
            EffectType::PlasmaWave => "PLASMA_WAVE",
            EffectType::VortexSpiral => "VORTEX_SPIRAL",
            EffectType::DataStream => "DATA_STREAM",
            EffectType::GalaxySwirl => "GALAXY_SWIRL",
            EffectType::CrystalShard => "CRYSTAL_SHARD",
            EffectType::BloodMoon => "BLOOD_MOON",
        }
    }

    /// Human readable name for hints.
    pub fn label(self) -> &'static str {
        match self {
            EffectType::QuantumFlux => "Quantum Flux",
            EffectType::GoldenAurora => "Golden Aurora",
            EffectType::PrismRays => "Prism Rays",
            EffectType::CosmicNova => "Cosmic Nova",
            EffectType::SilkArt => "Silk Art",
            EffectType::NeonSpark => "Neon Spark",
            EffectType::FireTrail => "Fire Trail",
            EffectType::CyberGrid => "Cyber Grid",
            EffectType::ParticleStorm => "Particle Storm",
            EffectType::PlasmaWave => "Plasma Wave",
            EffectType::VortexSpiral => "Vortex Spiral",
            EffectType::DataStream => "Data Stream",
            EffectType::GalaxySwirl => "Galaxy Swirl",
            EffectType::CrystalShard => "Crystal Shard",
            EffectType::BloodMoon => "Blood Moon",
        }
    }

    /// Maximum number of trail samples kept per particle; 0 means no trail.
    pub fn trail_len(self) -> usize {
        match self {
            EffectType::VortexSpiral => 15,
            EffectType::BloodMoon => 20,
            EffectType::NeonSpark => 5,
            EffectType::SilkArt => 25,
            EffectType::GoldenAurora => 30,
            _ => 0,
        }
    }

    /// Alpha of the black rectangle painted over the previous frame.
    /// Lower values leave longer trails.
    pub fn fade_alpha(self) -> f32 {
        match self {
            EffectType::FireTrail => 0.25,
            EffectType::CrystalShard => 0.2,
            EffectType::BloodMoon => 0.08,
            EffectType::DataStream => 0.1,
            EffectType::SilkArt => 0.05,
            EffectType::GoldenAurora => 0.08,
            EffectType::CosmicNova => 0.1,
            _ => crate::constants::DEFAULT_FADE_ALPHA,
        }
    }

    pub fn gravity_response(self) -> GravityResponse {
        match self {
            EffectType::DataStream => GravityResponse::Half,
            EffectType::GalaxySwirl
            | EffectType::SilkArt
            | EffectType::GoldenAurora
            | EffectType::CosmicNova => GravityResponse::Exempt,
            _ => GravityResponse::Full,
        }
    }
}

impl fmt::Display for EffectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EffectType {
    type Err = SettingsError;

    /// Accepts `FIRE_TRAIL`, `fire_trail`, `fire-trail` and `Fire Trail`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();
        EffectType::ALL
            .iter()
            .copied()
            .find(|e| e.name() == wanted)
            .ok_or_else(|| SettingsError::UnknownEffect(s.to_string()))
    }
}
