//! Ball vs. surface edge collisions
//!
//! Resolution clamps the ball back inside before reflecting, so even a huge
//! time step cannot tunnel through an edge. Axes are resolved independently,
//! horizontal first, then vertical.

use glam::Vec2;

use super::bounds::Bounds;

/// Which edge the ball touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
    Top,
    Bottom,
}

/// Result of a wall resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionResult {
    /// Left/right contact, if any
    pub horizontal: Option<Wall>,
    /// Top/bottom contact, if any
    pub vertical: Option<Wall>,
}

impl CollisionResult {
    #[inline]
    pub fn hit(&self) -> bool {
        self.horizontal.is_some() || self.vertical.is_some()
    }
}

/// Reflect one velocity component off a wall, keeping `restitution` of it
#[inline]
pub fn bounce(component: f32, restitution: f32) -> f32 {
    -component * restitution
}

/// Resolve one axis: `min`/`max` are the allowed centre range on that axis
fn resolve_axis(
    pos: &mut f32,
    vel: &mut f32,
    min: f32,
    max: f32,
    restitution: f32,
    walls: (Wall, Wall),
) -> Option<Wall> {
    if *pos < min {
        *pos = min;
        *vel = bounce(*vel, restitution);
        Some(walls.0)
    } else if *pos > max {
        *pos = max;
        *vel = bounce(*vel, restitution);
        Some(walls.1)
    } else {
        None
    }
}

/// Clamp a ball inside `bounds` and bounce its velocity off any crossed edge
pub fn resolve_wall_collisions(
    pos: &mut Vec2,
    vel: &mut Vec2,
    radius: f32,
    restitution: f32,
    bounds: &Bounds,
) -> CollisionResult {
    let inner = bounds.inset(radius);

    let horizontal = resolve_axis(
        &mut pos.x,
        &mut vel.x,
        inner.left,
        inner.right,
        restitution,
        (Wall::Left, Wall::Right),
    );
    let vertical = resolve_axis(
        &mut pos.y,
        &mut vel.y,
        inner.top,
        inner.bottom,
        restitution,
        (Wall::Top, Wall::Bottom),
    );

    CollisionResult {
        horizontal,
        vertical,
    }
}
