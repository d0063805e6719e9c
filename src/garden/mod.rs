//! The sand surface: static rake patterns, grain speckle and ball tracks
//!
//! Pattern and grain generation are pure functions of their configuration.
//! The track recorder only depends on the positions it is fed.

pub mod grain;
pub mod pattern;
pub mod tracks;

pub use grain::{SandGrain, generate_grain};
pub use pattern::{PatternGenerator, RakeLine};
pub use tracks::{BallTrack, SampleOutcome, TrackRecorder, TrackStroke};
