//! Variable-step simulation tick
//!
//! Advances the ball by whatever elapsed time the host measured. Spikes are
//! not clamped here; wall clamping keeps the ball inside regardless.

use glam::Vec2;

use super::collision::resolve_wall_collisions;
use super::state::{Simulation, TrailPoint};
use crate::Millis;

impl Simulation {
    /// Advance the simulation by `elapsed_ms`.
    ///
    /// Semi-implicit Euler: tilt acceleration updates velocity, then velocity
    /// moves the ball. Friction is applied once per call regardless of
    /// `elapsed_ms`, so damping depends on how often the host calls this.
    /// A tilt force too large to integrate is ignored for the tick.
    pub fn update(&mut self, elapsed_ms: Millis) {
        let dt = elapsed_ms as f32 / 1000.0;
        let ball = &mut self.ball;

        if elapsed_ms > 0 {
            let accel = ball.tilt_force * self.config.gravity_scale * dt;
            if accel.is_finite() {
                ball.velocity += accel;
            }
        }
        if !ball.velocity.is_finite() {
            log::warn!("Discarding non-finite velocity {:?}", ball.velocity);
            ball.velocity = Vec2::ZERO;
        }
        ball.position += ball.velocity * dt;
        ball.velocity *= self.config.friction;

        let contact = resolve_wall_collisions(
            &mut ball.position,
            &mut ball.velocity,
            self.config.radius,
            self.config.restitution,
            &self.bounds,
        );
        if contact.hit() {
            log::trace!(
                "Wall contact {:?}/{:?} at t={}",
                contact.horizontal,
                contact.vertical,
                self.now
            );
        }

        self.now = self.now.saturating_add(elapsed_ms);
        self.trail.record(
            TrailPoint {
                position: ball.position,
                timestamp: self.now,
            },
            &self.trail_config,
        );
    }

    /// Run `steps` updates of `elapsed_ms` each
    pub fn run(&mut self, steps: usize, elapsed_ms: Millis) -> Vec2 {
        for _ in 0..steps {
            self.update(elapsed_ms);
        }
        self.position()
    }
}
