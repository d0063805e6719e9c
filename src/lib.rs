//! Zen Garden - a deterministic sand garden simulation
//!
//! Core modules:
//! - `sim`: Ball physics (tilt force, grab/flick, wall bounces, trail)
//! - `garden`: Procedural rake patterns, sand grain and fading ball tracks
//! - `scene`: Convenience wiring of the above for a host render loop
//! - `settings`: Data-driven tuning and quality presets
//!
//! Nothing in here reads a clock or touches a platform. Hosts pass elapsed
//! time, pointer and tilt events in, and read plain geometry back out.

pub mod error;
pub mod garden;
pub mod scene;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use garden::{BallTrack, PatternGenerator, RakeLine, SandGrain, TrackRecorder, TrackStroke};
pub use scene::{BallDraw, Frame, Scene};
pub use settings::{QualityPreset, Settings};
pub use sim::{BallState, Bounds, Simulation, TrailPoint, TrailSegment};

use glam::Vec2;

/// Milliseconds supplied by the host. Must never go backwards.
pub type Millis = u64;

/// Default tuning constants
pub mod consts {
    /// Ball defaults
    pub const BALL_RADIUS: f32 = 15.0;
    pub const BALL_MASS: f32 = 1.0;
    /// Per-tick velocity multiplier (not time-scaled)
    pub const FRICTION: f32 = 0.98;
    /// Fraction of velocity kept after a wall bounce
    pub const RESTITUTION: f32 = 0.7;
    /// Tilt force to acceleration (units/s² per unit of tilt)
    pub const GRAVITY_SCALE: f32 = 200.0;
    /// Raw tilt reading to tilt force
    pub const TILT_SENSITIVITY: f32 = 0.5;

    /// Pointer presses within this many radii of the centre grab the ball
    pub const GRAB_RADIUS_FACTOR: f32 = 2.0;
    /// Velocity multiplier applied on grab
    pub const GRAB_DAMPING: f32 = 0.1;
    /// Hold milliseconds per unit of impulse strength
    pub const IMPULSE_MS_PER_UNIT: f32 = 100.0;
    pub const IMPULSE_MAX_STRENGTH: f32 = 10.0;
    pub const IMPULSE_SCALE: f32 = 50.0;

    /// Trail defaults
    pub const TRAIL_LENGTH: usize = 20;
    pub const TRAIL_MAX_AGE_MS: u64 = 1000;
    /// Alpha of the newest trail segment
    pub const TRAIL_MAX_ALPHA: u8 = 100;

    /// Track defaults
    pub const TRACK_MIN_DISTANCE: f32 = 10.0;
    pub const TRACK_GAP_MS: u64 = 1000;
    pub const TRACK_MAX_AGE_MS: u64 = 30_000;
    pub const MAX_TRACKS: usize = 5;

    /// Sand grain defaults
    pub const GRAIN_COUNT: usize = 300;
    pub const GRAIN_SEED: u64 = 42;
    pub const GRAIN_ALPHA: u8 = 30;
}

/// Convert polar (r, theta) around `center` to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(center: Vec2, r: f32, theta: f32) -> Vec2 {
    center + Vec2::new(r * theta.cos(), r * theta.sin())
}
