//! Deterministic ball simulation
//!
//! This module must stay pure and deterministic:
//! - Time only advances through the elapsed milliseconds passed to `update`
//! - No clocks, no platform dependencies, no rendering
//! - Fixed resolution order (horizontal walls before vertical)

pub mod bounds;
pub mod collision;
pub mod state;
pub mod tick;

pub use bounds::Bounds;
pub use collision::{CollisionResult, Wall, bounce, resolve_wall_collisions};
pub use state::{BallState, Simulation, Trail, TrailPoint, TrailSegment};
