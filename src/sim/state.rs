//! Ball state, trail and the simulation that owns them

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use crate::Millis;
use crate::error::Result;
use crate::settings::{BallConfig, TrailConfig};

/// Kinematic and interaction state of the ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Latest tilt reading after sensitivity scaling, replaced on each reading
    pub tilt_force: Vec2,
    /// Ball is currently grabbed by the pointer
    pub is_held: bool,
    /// Clock time of the grab, only meaningful while `is_held`
    pub hold_start: Millis,
}

impl BallState {
    /// A ball at rest at `position`
    pub fn at_rest(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            tilt_force: Vec2::ZERO,
            is_held: false,
            hold_start: 0,
        }
    }
}

/// Trail point for ball rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub position: Vec2,
    pub timestamp: Millis,
}

/// One drawable trail segment, older segments are fainter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailSegment {
    pub start: Vec2,
    pub end: Vec2,
    pub alpha: u8,
}

/// Rolling window of recent positions, oldest first
#[derive(Debug, Clone, Default)]
pub struct Trail {
    points: VecDeque<TrailPoint>,
}

impl Trail {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity + 1),
        }
    }

    /// Append the newest point, then enforce the count and age caps
    pub fn record(&mut self, point: TrailPoint, config: &TrailConfig) {
        self.points.push_back(point);
        while self.points.len() > config.length {
            self.points.pop_front();
        }
        // Points are in timestamp order, so stale ones sit at the front
        let now = point.timestamp;
        while self
            .points
            .front()
            .is_some_and(|p| now.saturating_sub(p.timestamp) > config.max_age_ms)
        {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points, newest last
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TrailPoint> + '_ {
        self.points.iter()
    }

    /// Consecutive point pairs fading in toward the newest one
    pub fn segments(&self, max_alpha: u8) -> impl Iterator<Item = TrailSegment> + '_ {
        let n = self.points.len();
        (1..n).map(move |i| TrailSegment {
            start: self.points[i - 1].position,
            end: self.points[i].position,
            alpha: (i * max_alpha as usize / n) as u8,
        })
    }
}

/// The ball simulation
///
/// Owns the only mutable copy of the ball. Time advances solely through
/// [`Simulation::update`], so identical call sequences give identical states.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub(super) config: BallConfig,
    pub(super) trail_config: TrailConfig,
    pub(super) bounds: Bounds,
    pub(super) ball: BallState,
    pub(super) trail: Trail,
    /// Sum of every elapsed time passed to `update`
    pub(super) now: Millis,
}

impl Simulation {
    /// Create a ball at rest in the middle of `bounds`
    pub fn new(config: BallConfig, trail_config: TrailConfig, bounds: Bounds) -> Result<Self> {
        config.validate()?;
        bounds.validate_for(config.radius)?;
        if trail_config.length == 0 {
            return Err(crate::Error::ZeroCapacity {
                field: "trail.length",
            });
        }

        log::debug!(
            "Simulation created: radius {} in {}x{}",
            config.radius,
            bounds.width(),
            bounds.height()
        );

        Ok(Self {
            trail: Trail::with_capacity(trail_config.length),
            ball: BallState::at_rest(bounds.center()),
            config,
            trail_config,
            bounds,
            now: 0,
        })
    }

    /// Simulation with default tuning
    pub fn with_bounds(bounds: Bounds) -> Result<Self> {
        Self::new(BallConfig::default(), TrailConfig::default(), bounds)
    }

    /// Replace the surface bounds, keeping the ball inside them
    pub fn set_bounds(&mut self, bounds: Bounds) -> Result<()> {
        bounds.validate_for(self.config.radius)?;
        let inner = bounds.inset(self.config.radius);
        self.ball.position = self
            .ball
            .position
            .clamp(Vec2::new(inner.left, inner.top), Vec2::new(inner.right, inner.bottom));
        self.bounds = bounds;
        log::debug!("Bounds changed to {}x{}", bounds.width(), bounds.height());
        Ok(())
    }

    /// Grab or release the ball.
    ///
    /// A press within grab range stops the ball almost dead. Releasing flicks
    /// it toward the release point, harder the longer it was held.
    pub fn apply_pointer_event(&mut self, point: Vec2, pressed: bool) {
        let offset = point - self.ball.position;
        let distance = offset.length();

        if pressed && distance <= self.config.radius * self.config.grab_radius_factor {
            self.ball.is_held = true;
            self.ball.hold_start = self.now;
            self.ball.velocity *= self.config.grab_damping;
            log::debug!("Ball grabbed at t={}", self.now);
        } else if !pressed && self.ball.is_held {
            self.ball.is_held = false;

            let duration = self.now.saturating_sub(self.ball.hold_start) as f32;
            let strength =
                (duration / self.config.impulse_ms_per_unit).min(self.config.impulse_max_strength);

            // Releasing exactly on the centre has no direction to flick in
            let direction = if distance == 0.0 {
                Vec2::ZERO
            } else {
                offset / distance
            };
            self.ball.velocity += direction * strength * self.config.impulse_scale;
            log::debug!("Ball released: held {duration}ms, strength {strength}");
        }
    }

    /// Replace the continuous tilt force from a raw sensor reading.
    ///
    /// Sensor y points up, the surface's y points down.
    pub fn apply_tilt(&mut self, tilt: Vec2) {
        let s = self.config.tilt_sensitivity;
        self.ball.tilt_force = Vec2::new(tilt.x * s, -tilt.y * s);
    }

    pub fn position(&self) -> Vec2 {
        self.ball.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.ball.velocity
    }

    pub fn radius(&self) -> f32 {
        self.config.radius
    }

    pub fn mass(&self) -> f32 {
        self.config.mass
    }

    pub fn is_held(&self) -> bool {
        self.ball.is_held
    }

    pub fn tilt_force(&self) -> Vec2 {
        self.ball.tilt_force
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn config(&self) -> &BallConfig {
        &self.config
    }

    /// Read-only snapshot of the ball
    pub fn ball(&self) -> &BallState {
        &self.ball
    }

    /// Simulation clock (ms since creation)
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Recent positions, newest last
    pub fn trail(&self) -> impl ExactSizeIterator<Item = &TrailPoint> + '_ {
        self.trail.iter()
    }

    /// Trail as faded line segments
    pub fn trail_segments(&self) -> impl Iterator<Item = TrailSegment> + '_ {
        self.trail.segments(self.trail_config.max_alpha)
    }

    /// Test hook: place the ball with a given velocity
    #[cfg(test)]
    pub(crate) fn set_motion(&mut self, position: Vec2, velocity: Vec2) {
        self.ball.position = position;
        self.ball.velocity = velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn sim() -> Simulation {
        Simulation::with_bounds(Bounds::from_size(400.0, 400.0)).unwrap()
    }

    #[test]
    fn test_new_starts_centered_at_rest() {
        let sim = sim();
        assert_eq!(sim.position(), Vec2::new(200.0, 200.0));
        assert_eq!(sim.velocity(), Vec2::ZERO);
        assert_eq!(sim.radius(), 15.0);
        assert_eq!(sim.now(), 0);
        assert!(!sim.is_held());
        assert_eq!(sim.trail().len(), 0);
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let bounds = Bounds::from_size(100.0, 100.0);
        let config = BallConfig {
            radius: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            Simulation::new(config, TrailConfig::default(), bounds),
            Err(Error::InvalidRadius(_))
        ));

        let tiny = Bounds::from_size(20.0, 100.0);
        assert!(matches!(
            Simulation::with_bounds(tiny),
            Err(Error::BoundsTooSmall { .. })
        ));
    }

    #[test]
    fn test_set_bounds_clamps_ball() {
        let mut sim = sim();
        sim.set_bounds(Bounds::from_size(100.0, 100.0)).unwrap();
        assert_eq!(sim.position(), Vec2::new(85.0, 85.0));
        assert!(sim.set_bounds(Bounds::from_size(10.0, 10.0)).is_err());
        assert_eq!(sim.bounds(), &Bounds::from_size(100.0, 100.0));
    }

    #[test]
    fn test_grab_damps_velocity() {
        let mut sim = sim();
        sim.set_motion(Vec2::new(200.0, 200.0), Vec2::new(100.0, -50.0));

        sim.apply_pointer_event(Vec2::new(225.0, 200.0), true);
        assert!(sim.is_held());
        assert!((sim.velocity() - Vec2::new(10.0, -5.0)).length() < 1e-4);
    }

    #[test]
    fn test_press_out_of_reach_ignored() {
        let mut sim = sim();
        sim.set_motion(Vec2::new(200.0, 200.0), Vec2::new(100.0, 0.0));

        sim.apply_pointer_event(Vec2::new(231.0, 200.0), true);
        assert!(!sim.is_held());
        assert_eq!(sim.velocity(), Vec2::new(100.0, 0.0));

        // Release without a grab does nothing either
        sim.apply_pointer_event(Vec2::new(231.0, 200.0), false);
        assert_eq!(sim.velocity(), Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_release_flicks_toward_pointer() {
        let mut sim = sim();
        sim.apply_pointer_event(Vec2::new(200.0, 200.0), true);
        sim.now = 500;
        sim.apply_pointer_event(Vec2::new(230.0, 200.0), false);

        // 500ms -> strength 5 -> 250 units/s to the right
        assert!(!sim.is_held());
        assert!((sim.velocity() - Vec2::new(250.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_impulse_strength_capped() {
        let mut sim = sim();
        sim.apply_pointer_event(Vec2::new(200.0, 200.0), true);
        sim.now = 60_000;
        sim.apply_pointer_event(Vec2::new(200.0, 100.0), false);
        assert!((sim.velocity() - Vec2::new(0.0, -500.0)).length() < 1e-3);
    }

    #[test]
    fn test_release_on_center_applies_no_impulse() {
        let mut sim = sim();
        sim.set_motion(Vec2::new(200.0, 200.0), Vec2::new(40.0, 20.0));
        sim.apply_pointer_event(Vec2::new(200.0, 200.0), true);
        sim.now = 800;
        sim.apply_pointer_event(Vec2::new(200.0, 200.0), false);

        // Only the grab damping applies
        assert!((sim.velocity() - Vec2::new(4.0, 2.0)).length() < 1e-5);
        assert!(sim.velocity().is_finite());
        assert!(!sim.is_held());
    }

    #[test]
    fn test_tilt_scaling() {
        let mut sim = sim();
        sim.apply_tilt(Vec2::new(2.0, 4.0));
        assert_eq!(sim.tilt_force(), Vec2::new(1.0, -2.0));

        sim.apply_tilt(Vec2::new(-1.0, 0.0));
        assert_eq!(sim.tilt_force(), Vec2::new(-0.5, 0.0));
    }

    #[test]
    fn test_trail_segments_fade_in() {
        let mut trail = Trail::with_capacity(4);
        let config = TrailConfig {
            length: 4,
            ..Default::default()
        };
        for i in 0..4 {
            trail.record(
                TrailPoint {
                    position: Vec2::new(i as f32, 0.0),
                    timestamp: i * 10,
                },
                &config,
            );
        }
        let alphas: Vec<u8> = trail.segments(100).map(|s| s.alpha).collect();
        assert_eq!(alphas, vec![25, 50, 75]);
    }

    #[test]
    fn test_trail_drops_stale_points() {
        let mut trail = Trail::default();
        let config = TrailConfig::default();
        trail.record(
            TrailPoint {
                position: Vec2::ZERO,
                timestamp: 0,
            },
            &config,
        );
        trail.record(
            TrailPoint {
                position: Vec2::ONE,
                timestamp: 1000,
            },
            &config,
        );
        assert_eq!(trail.len(), 2);
        trail.record(
            TrailPoint {
                position: Vec2::ONE,
                timestamp: 1001,
            },
            &config,
        );
        assert_eq!(trail.len(), 2);
        assert_eq!(trail.iter().next().map(|p| p.timestamp), Some(1000));
    }
}
