//! Procedural rake patterns
//!
//! Three motifs raked into the sand: concentric rings, wavy parallel strokes
//! and a spiral. Generation is a pure function of [`PatternConfig`]; calling
//! it twice yields equal output.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::polar_to_cartesian;
use crate::settings::{CircularMotif, MAX_MOTIF_SAMPLES, ParallelMotif, PatternConfig, SpiralMotif};

/// A raked line: straight when `curvature == 0`, otherwise a quadratic curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RakeLine {
    pub start: Vec2,
    pub end: Vec2,
    /// Perpendicular offset of the control point from the midpoint
    pub curvature: f32,
}

impl RakeLine {
    pub fn straight(start: Vec2, end: Vec2) -> Self {
        Self {
            start,
            end,
            curvature: 0.0,
        }
    }

    #[inline]
    pub fn is_straight(&self) -> bool {
        self.curvature == 0.0
    }

    /// Quadratic control point: the midpoint pushed along the left-hand
    /// normal of `end - start` (downward on screen for a left-to-right line)
    pub fn control_point(&self) -> Vec2 {
        let mid = (self.start + self.end) * 0.5;
        let normal = (self.end - self.start).perp().normalize_or_zero();
        mid + normal * self.curvature
    }

    /// Point at parameter `t` in [0, 1]
    pub fn point_at(&self, t: f32) -> Vec2 {
        if self.is_straight() {
            return self.start.lerp(self.end, t);
        }
        let c = self.control_point();
        let u = 1.0 - t;
        self.start * (u * u) + c * (2.0 * u * t) + self.end * (t * t)
    }

    /// Approximate the line by `segments` straight pieces (endpoints included)
    pub fn flatten(&self, segments: usize) -> Vec<Vec2> {
        if self.is_straight() || segments <= 1 {
            return vec![self.start, self.end];
        }
        (0..=segments)
            .map(|i| self.point_at(i as f32 / segments as f32))
            .collect()
    }
}

/// Generates the static rake pattern
#[derive(Debug, Clone, Default)]
pub struct PatternGenerator {
    config: PatternConfig,
}

impl PatternGenerator {
    pub fn new(config: PatternConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    /// All rake lines: rings, then parallel strokes, then the spiral
    pub fn generate(&self) -> Vec<RakeLine> {
        let mut lines = Vec::new();
        if let Some(motif) = &self.config.circular {
            circular(motif, &mut lines);
        }
        if let Some(motif) = &self.config.parallel {
            parallel(motif, &mut lines);
        }
        if let Some(motif) = &self.config.spiral {
            spiral(motif, &mut lines);
        }
        log::info!("Generated rake pattern: {} lines", lines.len());
        lines
    }
}

/// Closed polygonal rings every `radius_step` up to `max_radius`
fn circular(motif: &CircularMotif, out: &mut Vec<RakeLine>) {
    let rings = motif.ring_count();
    let segments = rings.saturating_mul(motif.ring_steps(motif.max_radius));
    if segments > MAX_MOTIF_SAMPLES {
        log::warn!("Skipping circular motif with {segments} segments");
        return;
    }

    for ring in 0..rings {
        let radius = motif.ring_radius(ring);
        let steps = motif.ring_steps(radius);
        let points: Vec<Vec2> = (0..steps)
            .map(|i| polar_to_cartesian(motif.center, radius, i as f32 / steps as f32 * TAU))
            .collect();

        for (i, &p) in points.iter().enumerate() {
            let next = points[(i + 1) % points.len()];
            out.push(RakeLine::straight(p, next));
        }
    }
}

/// Horizontal strokes whose curvature follows a sine wave
fn parallel(motif: &ParallelMotif, out: &mut Vec<RakeLine>) {
    if motif.count > MAX_MOTIF_SAMPLES {
        log::warn!("Skipping parallel motif with {} lines", motif.count);
        return;
    }

    out.extend((0..motif.count).map(|i| {
        let y = motif.start_y + i as f32 * motif.spacing;
        RakeLine {
            start: Vec2::new(motif.start_x, y),
            end: Vec2::new(motif.end_x, y),
            curvature: (i as f32 * motif.phase).sin() * motif.amplitude,
        }
    }));
}

/// Outward spiral joined point to point
fn spiral(motif: &SpiralMotif, out: &mut Vec<RakeLine>) {
    let count = motif.sample_count();
    if count > MAX_MOTIF_SAMPLES {
        log::warn!("Skipping spiral motif with {count} samples");
        return;
    }

    let points: Vec<Vec2> = (0..count)
        .map(|i| {
            let (radius, angle) = motif.sample(i);
            polar_to_cartesian(motif.center, radius, angle)
        })
        .collect();

    out.extend(points.windows(2).map(|w| RakeLine::straight(w[0], w[1])));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only_circular() -> PatternConfig {
        PatternConfig {
            parallel: None,
            spiral: None,
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_is_deterministic() {
        let generator = PatternGenerator::default();
        let a = generator.generate();
        let b = generator.generate();
        assert!(!a.is_empty());
        assert_eq!(a, b);
        // Bit-identical, not just approximately equal
        assert!(
            a.iter()
                .zip(&b)
                .all(|(x, y)| x.start.to_array().map(f32::to_bits)
                    == y.start.to_array().map(f32::to_bits))
        );
    }

    #[test]
    fn test_circular_ring_sizes() {
        let lines = PatternGenerator::new(only_circular()).generate();
        // Radii 15, 30, 45, 60, 75 -> steps 8 (floor 7.5 raised), 15, 22, 30, 37
        assert_eq!(lines.len(), 8 + 15 + 22 + 30 + 37);
        assert!(lines.iter().all(RakeLine::is_straight));
    }

    #[test]
    fn test_circular_rings_are_closed() {
        let lines = PatternGenerator::new(only_circular()).generate();
        let first_ring = &lines[..8];
        assert_eq!(first_ring[7].end, first_ring[0].start);
        for pair in first_ring.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        let center = Vec2::new(200.0, 150.0);
        assert!(
            first_ring
                .iter()
                .all(|l| (l.start.distance(center) - 15.0).abs() < 1e-3)
        );
    }

    #[test]
    fn test_parallel_curvature() {
        let config = PatternConfig {
            circular: None,
            spiral: None,
            ..Default::default()
        };
        let lines = PatternGenerator::new(config).generate();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].is_straight());
        for (i, line) in lines.iter().enumerate() {
            let y = 250.0 + i as f32 * 20.0;
            assert_eq!(line.start, Vec2::new(50.0, y));
            assert_eq!(line.end, Vec2::new(350.0, y));
            assert!((line.curvature - (i as f32 * 0.5).sin() * 10.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_spiral_is_connected_and_bounded() {
        let config = PatternConfig {
            circular: None,
            parallel: None,
            ..Default::default()
        };
        let lines = PatternGenerator::new(config).generate();
        assert!(lines.len() > 150);
        let center = Vec2::new(300.0, 300.0);
        assert!((lines[0].start - Vec2::new(305.0, 300.0)).length() < 1e-4);
        for pair in lines.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert!(lines.iter().all(|l| l.end.distance(center) < 60.0 + 1e-3));
    }

    #[test]
    fn test_reduced_pattern_has_three_rings() {
        let lines = PatternGenerator::new(PatternConfig::reduced()).generate();
        // Radii 60, 120, 180 -> 30, 60, 90 segments
        assert_eq!(lines.len(), 30 + 60 + 90);
    }

    #[test]
    fn test_control_point_offsets_perpendicular() {
        let line = RakeLine {
            start: Vec2::new(0.0, 10.0),
            end: Vec2::new(100.0, 10.0),
            curvature: 5.0,
        };
        assert_eq!(line.control_point(), Vec2::new(50.0, 15.0));

        let vertical = RakeLine {
            start: Vec2::new(0.0, 0.0),
            end: Vec2::new(0.0, 10.0),
            curvature: 2.0,
        };
        assert!((vertical.control_point() - Vec2::new(-2.0, 5.0)).length() < 1e-6);
    }

    #[test]
    fn test_flatten() {
        let straight = RakeLine::straight(Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert_eq!(straight.flatten(8), vec![Vec2::ZERO, Vec2::new(10.0, 0.0)]);

        let curved = RakeLine {
            start: Vec2::ZERO,
            end: Vec2::new(100.0, 0.0),
            curvature: 10.0,
        };
        let points = curved.flatten(4);
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], Vec2::ZERO);
        assert_eq!(points[4], Vec2::new(100.0, 0.0));
        // Quadratic peak is half the control offset
        assert!((points[2] - Vec2::new(50.0, 5.0)).length() < 1e-4);
    }

    #[test]
    fn test_dense_motifs_skipped_without_validation() {
        let config = PatternConfig {
            circular: Some(CircularMotif {
                radius_step: 1e-7,
                ..Default::default()
            }),
            parallel: Some(ParallelMotif {
                count: MAX_MOTIF_SAMPLES + 1,
                ..Default::default()
            }),
            spiral: Some(SpiralMotif {
                growth: 1e-7,
                ..Default::default()
            }),
        };
        assert!(PatternGenerator::new(config).generate().is_empty());
    }

    #[test]
    fn test_spiral_radius_by_index() {
        let motif = SpiralMotif::default();
        let config = PatternConfig {
            circular: None,
            parallel: None,
            spiral: Some(motif.clone()),
        };
        let lines = PatternGenerator::new(config).generate();
        assert_eq!(lines.len(), motif.sample_count() - 1);
        let last = lines[lines.len() - 1].end;
        let (radius, _) = motif.sample(motif.sample_count() - 1);
        assert!((last.distance(motif.center) - radius).abs() < 1e-3);
    }
}
