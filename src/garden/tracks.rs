//! Ball tracks pressed into the sand
//!
//! Sampled ball positions are grouped into strokes. A stroke keeps growing
//! while samples arrive soon after it started and far enough from its last
//! point; every stroke fades out over `max_age_ms` and only the newest
//! `max_tracks` survive.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Millis;
use crate::error::Result;
use crate::settings::TrackConfig;

/// One continuous stroke of recorded positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallTrack {
    points: Vec<Vec2>,
    created_at: Millis,
}

impl BallTrack {
    fn new(start: Vec2, now: Millis) -> Self {
        Self {
            points: vec![start],
            created_at: now,
        }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn created_at(&self) -> Millis {
        self.created_at
    }

    #[inline]
    pub fn age(&self, now: Millis) -> Millis {
        now.saturating_sub(self.created_at)
    }

    pub fn last_point(&self) -> Option<Vec2> {
        self.points.last().copied()
    }
}

/// A drawable track polyline with its fade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackStroke {
    pub points: Vec<Vec2>,
    pub alpha: u8,
}

/// What a call to [`TrackRecorder::sample`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOutcome {
    /// Started a new track
    Started,
    /// Extended the newest track
    Appended,
    /// Too close to the last point
    Skipped,
}

/// Records ball positions into a bounded set of fading tracks
#[derive(Debug, Clone, Default)]
pub struct TrackRecorder {
    config: TrackConfig,
    /// Oldest first
    tracks: VecDeque<BallTrack>,
}

impl TrackRecorder {
    pub fn new(config: TrackConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tracks: VecDeque::with_capacity(config.max_tracks + 1),
            config,
        })
    }

    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    /// Feed one ball position observed at `now`
    pub fn sample(&mut self, position: Vec2, now: Millis) -> SampleOutcome {
        let outcome = match self.tracks.back_mut() {
            Some(track) if track.age(now) <= self.config.gap_ms => {
                // Every track starts with one point
                let far = track
                    .last_point()
                    .is_none_or(|last| position.distance(last) > self.config.min_distance);
                if far {
                    track.points.push(position);
                    SampleOutcome::Appended
                } else {
                    SampleOutcome::Skipped
                }
            }
            _ => SampleOutcome::Started,
        };

        if outcome == SampleOutcome::Started {
            log::debug!("New ball track at ({:.1}, {:.1}) t={now}", position.x, position.y);
            self.tracks.push_back(BallTrack::new(position, now));
        }

        self.prune(now);
        outcome
    }

    /// Drop expired tracks, then the oldest ones beyond the cap
    pub fn prune(&mut self, now: Millis) {
        let max_age = self.config.max_age_ms;
        self.tracks.retain(|t| t.age(now) <= max_age);
        while self.tracks.len() > self.config.max_tracks {
            self.tracks.pop_front();
        }
    }

    /// Drawable tracks with an alpha fading from 255 to 0 over their lifetime.
    ///
    /// Tracks with a single point have nothing to draw; expired tracks are
    /// left out even if no sample has pruned them yet.
    pub fn tracks_for_draw(&self, now: Millis) -> Vec<TrackStroke> {
        let max_age = self.config.max_age_ms;
        self.tracks
            .iter()
            .filter(|t| t.points.len() >= 2 && t.age(now) <= max_age)
            .map(|t| TrackStroke {
                points: t.points.clone(),
                alpha: fade_alpha(t.age(now), max_age),
            })
            .collect()
    }

    /// Tracks oldest first
    pub fn tracks(&self) -> impl ExactSizeIterator<Item = &BallTrack> + '_ {
        self.tracks.iter()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}

/// Linear fade: 255 when fresh, 0 at `max_age`
fn fade_alpha(age: Millis, max_age: Millis) -> u8 {
    if max_age == 0 {
        return 0;
    }
    (255.0 * (1.0 - age as f32 / max_age as f32)).clamp(0.0, 255.0) as u8
}
