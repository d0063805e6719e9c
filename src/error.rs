//! Construction-time errors
//!
//! Only building or reconfiguring a component can fail. Runtime operations
//! (update, pointer, tilt, sampling) are total.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("ball radius must be positive, got {0}")]
    InvalidRadius(f32),

    #[error("ball mass must be positive, got {0}")]
    InvalidMass(f32),

    #[error("friction must be in (0, 1], got {0}")]
    InvalidFriction(f32),

    #[error("restitution must be in [0, 1], got {0}")]
    InvalidRestitution(f32),

    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    #[error("bounds are inverted or not finite: {0:?}")]
    InvalidBounds(crate::sim::Bounds),

    #[error("bounds {width}x{height} cannot contain a ball of radius {radius}")]
    BoundsTooSmall { width: f32, height: f32, radius: f32 },

    #[error("{field} must be greater than zero")]
    ZeroCapacity { field: &'static str },

    #[error("{field} would produce {samples} samples")]
    PatternTooDense { field: &'static str, samples: usize },

    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}
