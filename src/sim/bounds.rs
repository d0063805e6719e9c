//! Axis-aligned playable surface
//!
//! Screen convention: y grows downward, so `top < bottom`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Bounds anchored at the origin
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Shrink every edge inward by `by`
    pub fn inset(&self, by: f32) -> Self {
        Self::new(
            self.left + by,
            self.top + by,
            self.right - by,
            self.bottom - by,
        )
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }

    /// Check these bounds can hold a ball of `radius`
    pub fn validate_for(&self, radius: f32) -> Result<()> {
        let finite = [self.left, self.top, self.right, self.bottom]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.left > self.right || self.top > self.bottom {
            return Err(Error::InvalidBounds(*self));
        }
        if self.width() < radius * 2.0 || self.height() < radius * 2.0 {
            return Err(Error::BoundsTooSmall {
                width: self.width(),
                height: self.height(),
                radius,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry() {
        let b = Bounds::new(10.0, 20.0, 110.0, 70.0);
        assert_eq!(b.width(), 100.0);
        assert_eq!(b.height(), 50.0);
        assert_eq!(b.center(), Vec2::new(60.0, 45.0));
        assert_eq!(b.inset(5.0), Bounds::new(15.0, 25.0, 105.0, 65.0));
        assert!(b.contains(Vec2::new(10.0, 70.0)));
        assert!(!b.contains(Vec2::new(9.9, 30.0)));
    }

    #[test]
    fn test_validate_for() {
        let b = Bounds::from_size(100.0, 40.0);
        assert!(b.validate_for(20.0).is_ok());
        assert!(matches!(
            b.validate_for(20.5),
            Err(Error::BoundsTooSmall { .. })
        ));
        assert!(matches!(
            Bounds::new(50.0, 0.0, 10.0, 10.0).validate_for(1.0),
            Err(Error::InvalidBounds(_))
        ));
        assert!(matches!(
            Bounds::new(0.0, 0.0, f32::INFINITY, 10.0).validate_for(1.0),
            Err(Error::InvalidBounds(_))
        ));
    }
}
