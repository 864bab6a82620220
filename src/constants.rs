/// Simulation, input and rendering tuning constants.
///
/// The per-effect values are empirical calibration for a nominal ~60 fps
/// frame rate; they are kept as fixed numbers rather than derived.
// Frame timing
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp after a stall (tab backgrounded)
pub const FPS_SMOOTHING: f32 = 0.9; // fps = a*fps + (1-a)*instant

// Global field forces
pub const WIND_COEFF: f32 = 0.1;
pub const TURBULENCE_COEFF: f32 = 0.2;

// Special motion
pub const FIRE_BUOYANCY: f32 = 0.15;
pub const FIRE_JITTER_PX: f32 = 2.0;
pub const FIRE_SHRINK: f32 = 0.96;

pub const VORTEX_DAMPING: f32 = 0.02;
pub const VORTEX_SPIN_DEG: f32 = 5.0;

pub const ATTRACT_STRENGTH: f32 = 1000.0;
pub const ATTRACT_EPSILON: f32 = 100.0; // keeps the force finite at the centre
pub const ATTRACT_GAIN: f32 = 0.01;

pub const FLOW_DAMPING: f32 = 0.96;
pub const FLOW_SPATIAL_FREQ: f32 = 0.01;
pub const FLOW_TIME_FREQ: f32 = 0.002;
pub const FLOW_GAIN: f32 = 0.2;

pub const QUANTUM_TELEPORT_CHANCE: f64 = 0.1;
pub const QUANTUM_TELEPORT_PX: f32 = 10.0;
pub const QUANTUM_DAMPING: f32 = 0.9;

pub const DATA_STREAM_GRAVITY_SCALE: f32 = 0.5;

// Particle validity
pub const MIN_PARTICLE_SIZE: f32 = 0.2;
pub const DEFAULT_MAX_PARTICLES: usize = 6000;

// Emission rates (divisors of the intensity setting)
pub const PRESS_BURST_MULTIPLIER: u32 = 2;
pub const DRAG_DIVISOR: u32 = 2;
pub const HOLD_DIVISOR: u32 = 5;
pub const AUTOPLAY_DIVISOR: u32 = 3;
pub const MOTION_DIVISOR: u32 = 2;

// Autoplay cursor
pub const AUTOPLAY_SAFE_ZONE: f32 = 0.35; // half-extent as a fraction of the surface
pub const AUTOPLAY_CORRECTION: f32 = 0.5;
pub const AUTOPLAY_WANDER: f32 = 0.5;
pub const AUTOPLAY_MAX_SPEED: f32 = 15.0;
pub const AUTOPLAY_INITIAL_VEL: [f32; 2] = [5.0, 3.0];

// Motion detection
pub const MOTION_BUFFER_WIDTH: u32 = 160;
pub const MOTION_BUFFER_HEIGHT: u32 = 120;
pub const MOTION_PIXEL_STRIDE: usize = 4;
pub const MOTION_DIFF_THRESHOLD: u32 = 30;
pub const MOTION_MIN_ACTIVE: u32 = 20;
pub const MOTION_SMOOTHING: f32 = 0.8; // weight kept from the previous point

// Fade pass
pub const DEFAULT_FADE_ALPHA: f32 = 0.15;

// Clock overlay
pub const CLOCK_RADIUS_FRACTION: f32 = 0.18;
pub const CLOCK_BREATH_AMPLITUDE: f32 = 0.05;
pub const CLOCK_BREATH_RATE: f32 = 0.001;

// Keyboard steps
pub const BLOOM_STEP: f32 = 0.1;
pub const VOLUME_STEP: f32 = 0.05;

pub const PRESS_VIBRATE_MS: u32 = 10;
