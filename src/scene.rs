//! Scene wiring for a host render loop
//!
//! Ties the simulation, track recorder and cached pattern together in the
//! order a frame needs them. The host still decides when to advance, when
//! to regenerate the pattern and when to draw.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Millis;
use crate::error::Result;
use crate::garden::{PatternGenerator, RakeLine, SandGrain, TrackRecorder, TrackStroke, generate_grain};
use crate::settings::Settings;
use crate::sim::{Bounds, Simulation, TrailSegment};

/// Ball draw data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallDraw {
    pub position: Vec2,
    pub radius: f32,
    /// Hosts typically ring the ball while it is grabbed
    pub held: bool,
}

/// Everything needed to draw one frame, back to front
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub time: Millis,
    pub grains: Vec<SandGrain>,
    pub rake_lines: Vec<RakeLine>,
    pub tracks: Vec<TrackStroke>,
    pub trail: Vec<TrailSegment>,
    pub ball: BallDraw,
}

/// A complete garden
#[derive(Debug, Clone)]
pub struct Scene {
    settings: Settings,
    simulation: Simulation,
    tracks: TrackRecorder,
    pattern: PatternGenerator,
    rake_lines: Vec<RakeLine>,
    grains: Vec<SandGrain>,
}

impl Scene {
    pub fn new(settings: Settings, bounds: Bounds) -> Result<Self> {
        settings.validate()?;
        let simulation = Simulation::new(settings.ball.clone(), settings.trail.clone(), bounds)?;
        let pattern = PatternGenerator::new(settings.pattern.clone());
        let rake_lines = pattern.generate();
        let grains = generate_grain(&bounds, &settings.grain);

        log::info!(
            "Scene ready: {} quality, {} rake lines, {} grains",
            settings.quality.as_str(),
            rake_lines.len(),
            grains.len()
        );

        Ok(Self {
            tracks: TrackRecorder::new(settings.tracks.clone())?,
            settings,
            simulation,
            pattern,
            rake_lines,
            grains,
        })
    }

    /// Resize the surface; the grain is re-scattered over the new area
    pub fn set_bounds(&mut self, bounds: Bounds) -> Result<()> {
        self.simulation.set_bounds(bounds)?;
        self.grains = generate_grain(&bounds, &self.settings.grain);
        Ok(())
    }

    /// Step the ball, then record where it ended up
    pub fn advance(&mut self, elapsed_ms: Millis) {
        self.simulation.update(elapsed_ms);
        if self.settings.tracks.enabled {
            self.tracks
                .sample(self.simulation.position(), self.simulation.now());
        }
    }

    pub fn pointer(&mut self, point: Vec2, pressed: bool) {
        self.simulation.apply_pointer_event(point, pressed);
    }

    pub fn tilt(&mut self, tilt: Vec2) {
        self.simulation.apply_tilt(tilt);
    }

    /// Re-run the pattern generator (for hosts that refresh it periodically)
    pub fn regenerate_pattern(&mut self) {
        self.rake_lines = self.pattern.generate();
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn tracks(&self) -> &TrackRecorder {
        &self.tracks
    }

    pub fn rake_lines(&self) -> &[RakeLine] {
        &self.rake_lines
    }

    pub fn grains(&self) -> &[SandGrain] {
        &self.grains
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Snapshot of all draw data at the simulation's current time
    pub fn frame(&self) -> Frame {
        let now = self.simulation.now();
        Frame {
            time: now,
            grains: self.grains.clone(),
            rake_lines: self.rake_lines.clone(),
            tracks: self.tracks.tracks_for_draw(now),
            trail: self.simulation.trail_segments().collect(),
            ball: BallDraw {
                position: self.simulation.position(),
                radius: self.simulation.radius(),
                held: self.simulation.is_held(),
            },
        }
    }
}
