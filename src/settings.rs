//! Garden settings and tuning
//!
//! Every tunable the engine uses lives here with its default. Hosts can load
//! a partial JSON document; missing fields fall back to the defaults.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Most samples a single rake motif may produce
pub const MAX_MOTIF_SAMPLES: usize = 100_000;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    /// Low-power profile: short trail, no grain, plain rings
    Reduced,
    #[default]
    Full,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Reduced => "Reduced",
            QualityPreset::Full => "Full",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "reduced" | "low" => Some(QualityPreset::Reduced),
            "full" | "high" => Some(QualityPreset::Full),
            _ => None,
        }
    }

    /// Trail points kept for this preset
    pub fn trail_length(&self) -> usize {
        match self {
            QualityPreset::Reduced => 8,
            QualityPreset::Full => TRAIL_LENGTH,
        }
    }

    /// Sand grains generated for this preset
    pub fn grain_count(&self) -> usize {
        match self {
            QualityPreset::Reduced => 0,
            QualityPreset::Full => GRAIN_COUNT,
        }
    }

    /// Rake pattern for this preset
    pub fn pattern(&self) -> PatternConfig {
        match self {
            QualityPreset::Reduced => PatternConfig::reduced(),
            QualityPreset::Full => PatternConfig::default(),
        }
    }
}

/// Ball physics tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub radius: f32,
    pub mass: f32,
    /// Per-tick velocity multiplier, in (0, 1]
    pub friction: f32,
    /// Bounce energy kept, in [0, 1]
    pub restitution: f32,
    pub gravity_scale: f32,
    pub tilt_sensitivity: f32,
    pub grab_radius_factor: f32,
    pub grab_damping: f32,
    pub impulse_ms_per_unit: f32,
    pub impulse_max_strength: f32,
    pub impulse_scale: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: BALL_RADIUS,
            mass: BALL_MASS,
            friction: FRICTION,
            restitution: RESTITUTION,
            gravity_scale: GRAVITY_SCALE,
            tilt_sensitivity: TILT_SENSITIVITY,
            grab_radius_factor: GRAB_RADIUS_FACTOR,
            grab_damping: GRAB_DAMPING,
            impulse_ms_per_unit: IMPULSE_MS_PER_UNIT,
            impulse_max_strength: IMPULSE_MAX_STRENGTH,
            impulse_scale: IMPULSE_SCALE,
        }
    }
}

impl BallConfig {
    /// Reject configurations the integrator cannot honour
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("radius", self.radius),
            ("mass", self.mass),
            ("friction", self.friction),
            ("restitution", self.restitution),
            ("gravity_scale", self.gravity_scale),
            ("tilt_sensitivity", self.tilt_sensitivity),
            ("grab_radius_factor", self.grab_radius_factor),
            ("grab_damping", self.grab_damping),
            ("impulse_ms_per_unit", self.impulse_ms_per_unit),
            ("impulse_max_strength", self.impulse_max_strength),
            ("impulse_scale", self.impulse_scale),
        ];
        if let Some((field, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::NonFinite { field: *field });
        }

        if self.radius <= 0.0 {
            return Err(Error::InvalidRadius(self.radius));
        }
        if self.mass <= 0.0 {
            return Err(Error::InvalidMass(self.mass));
        }
        if self.friction <= 0.0 || self.friction > 1.0 {
            return Err(Error::InvalidFriction(self.friction));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(Error::InvalidRestitution(self.restitution));
        }
        if self.impulse_ms_per_unit <= 0.0 {
            return Err(Error::ZeroCapacity {
                field: "impulse_ms_per_unit",
            });
        }
        Ok(())
    }
}

/// Rolling trail behind the ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    pub length: usize,
    pub max_age_ms: u64,
    pub max_alpha: u8,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            length: TRAIL_LENGTH,
            max_age_ms: TRAIL_MAX_AGE_MS,
            max_alpha: TRAIL_MAX_ALPHA,
        }
    }
}

/// Fading tracks pressed into the sand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Whether the scene samples the ball into tracks at all
    pub enabled: bool,
    /// Samples closer than this to the last point are dropped
    pub min_distance: f32,
    /// A track older than this stops accepting points
    pub gap_ms: u64,
    pub max_age_ms: u64,
    pub max_tracks: usize,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_distance: TRACK_MIN_DISTANCE,
            gap_ms: TRACK_GAP_MS,
            max_age_ms: TRACK_MAX_AGE_MS,
            max_tracks: MAX_TRACKS,
        }
    }
}

impl TrackConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.min_distance.is_finite() {
            return Err(Error::NonFinite {
                field: "tracks.min_distance",
            });
        }
        if self.max_tracks == 0 {
            return Err(Error::ZeroCapacity {
                field: "tracks.max_tracks",
            });
        }
        Ok(())
    }
}

/// Concentric rings around a centre
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircularMotif {
    pub center: Vec2,
    pub radius_step: f32,
    /// Largest ring radius (inclusive)
    pub max_radius: f32,
    pub min_steps: usize,
    /// Ring samples per unit of radius
    pub steps_per_unit: f32,
}

impl Default for CircularMotif {
    fn default() -> Self {
        Self {
            center: Vec2::new(200.0, 150.0),
            radius_step: 15.0,
            max_radius: 80.0,
            min_steps: 8,
            steps_per_unit: 0.5,
        }
    }
}

impl CircularMotif {
    /// Rings at `radius_step`, `2 * radius_step`, ... up to `max_radius`
    pub fn ring_count(&self) -> usize {
        if !(self.radius_step > 0.0) || !(self.max_radius >= self.radius_step) {
            return 0;
        }
        // Float to int casts saturate, so a huge ratio cannot wrap
        (self.max_radius / self.radius_step).floor() as usize
    }

    /// Radius of ring `index` (0-based)
    #[inline]
    pub fn ring_radius(&self, index: usize) -> f32 {
        self.radius_step * (index + 1) as f32
    }

    /// Samples taken around a ring of `radius`
    pub fn ring_steps(&self, radius: f32) -> usize {
        ((radius * self.steps_per_unit) as usize).max(self.min_steps)
    }
}

/// Horizontal rake strokes with a gentle wave
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelMotif {
    pub start_x: f32,
    pub end_x: f32,
    pub start_y: f32,
    pub spacing: f32,
    pub count: usize,
    /// Curvature phase advance per line (radians)
    pub phase: f32,
    pub amplitude: f32,
}

impl Default for ParallelMotif {
    fn default() -> Self {
        Self {
            start_x: 50.0,
            end_x: 350.0,
            start_y: 250.0,
            spacing: 20.0,
            count: 6,
            phase: 0.5,
            amplitude: 10.0,
        }
    }
}

/// Archimedean spiral
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralMotif {
    pub center: Vec2,
    pub start_radius: f32,
    /// Sampling stops once the radius reaches this (exclusive)
    pub max_radius: f32,
    pub angle_step: f32,
    pub growth: f32,
}

impl Default for SpiralMotif {
    fn default() -> Self {
        Self {
            center: Vec2::new(300.0, 300.0),
            start_radius: 5.0,
            max_radius: 60.0,
            angle_step: 0.3,
            growth: 0.3,
        }
    }
}

impl SpiralMotif {
    /// Samples with a radius below `max_radius`
    pub fn sample_count(&self) -> usize {
        if !(self.growth > 0.0) || !(self.max_radius > self.start_radius) {
            return 0;
        }
        ((self.max_radius - self.start_radius) / self.growth).ceil() as usize
    }

    /// Radius and angle of sample `index`
    #[inline]
    pub fn sample(&self, index: usize) -> (f32, f32) {
        let i = index as f32;
        (self.start_radius + i * self.growth, i * self.angle_step)
    }
}

/// Rake pattern parameters; a missing motif is skipped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub circular: Option<CircularMotif>,
    pub parallel: Option<ParallelMotif>,
    pub spiral: Option<SpiralMotif>,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            circular: Some(CircularMotif::default()),
            parallel: Some(ParallelMotif::default()),
            spiral: Some(SpiralMotif::default()),
        }
    }
}

impl PatternConfig {
    /// Three plain rings, 60 units apart
    pub fn reduced() -> Self {
        Self {
            circular: Some(CircularMotif {
                center: Vec2::new(200.0, 200.0),
                radius_step: 60.0,
                max_radius: 180.0,
                ..CircularMotif::default()
            }),
            parallel: None,
            spiral: None,
        }
    }

    /// Reject motifs that would produce no end of samples
    pub fn validate(&self) -> Result<()> {
        if let Some(c) = &self.circular {
            if !(c.radius_step > 0.0) || !c.max_radius.is_finite() {
                return Err(Error::ZeroCapacity {
                    field: "pattern.circular.radius_step",
                });
            }
            let segments = c.ring_count().saturating_mul(c.ring_steps(c.max_radius));
            if segments > MAX_MOTIF_SAMPLES {
                return Err(Error::PatternTooDense {
                    field: "pattern.circular",
                    samples: segments,
                });
            }
        }
        if let Some(p) = &self.parallel {
            if p.count > MAX_MOTIF_SAMPLES {
                return Err(Error::PatternTooDense {
                    field: "pattern.parallel",
                    samples: p.count,
                });
            }
        }
        if let Some(s) = &self.spiral {
            if !(s.growth > 0.0) || !s.max_radius.is_finite() || !s.start_radius.is_finite() {
                return Err(Error::ZeroCapacity {
                    field: "pattern.spiral.growth",
                });
            }
            if s.sample_count() > MAX_MOTIF_SAMPLES {
                return Err(Error::PatternTooDense {
                    field: "pattern.spiral",
                    samples: s.sample_count(),
                });
            }
        }
        Ok(())
    }
}

/// Fixed-seed sand speckle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrainConfig {
    pub count: usize,
    pub seed: u64,
    pub alpha: u8,
}

impl Default for GrainConfig {
    fn default() -> Self {
        Self {
            count: GRAIN_COUNT,
            seed: GRAIN_SEED,
            alpha: GRAIN_ALPHA,
        }
    }
}

/// Complete engine settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub quality: QualityPreset,
    pub ball: BallConfig,
    pub trail: TrailConfig,
    pub tracks: TrackConfig,
    pub pattern: PatternConfig,
    pub grain: GrainConfig,
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;
        self.trail.length = preset.trail_length();
        self.grain.count = preset.grain_count();
        self.pattern = preset.pattern();
    }

    /// Parse and validate a JSON settings document
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!("Loaded settings ({} quality)", settings.quality.as_str());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every constraint the engine relies on
    pub fn validate(&self) -> Result<()> {
        self.ball.validate()?;
        self.pattern.validate()?;
        if self.trail.length == 0 {
            return Err(Error::ZeroCapacity {
                field: "trail.length",
            });
        }
        self.tracks.validate()
    }
}
