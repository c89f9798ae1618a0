//! # Overlay Scenes
//!
//! A scene bundles everything needed to render a clip offline: frame size,
//! frame count, the detector's events, and the tracking table.
//!
//! ```json
//! {
//!   "width": 1280, "height": 720, "frame_count": 90,
//!   "events": [ { "kind": "pass", "start_frame": 10, "end_frame": 20, ... } ],
//!   "tracks": { "frames": { "10": { "7": { "position": [320.0, 400.0] } } } }
//! }
//! ```

use std::path::Path;

use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::Result;
use crate::events::{Event, PlayerId};
use crate::tracks::TrackTable;

/// Background used when no source frame is supplied.
pub const PITCH_GREEN: Rgb<u8> = Rgb([34, 139, 34]);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverlayScene {
    pub width: u32,
    pub height: u32,
    pub frame_count: u32,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub tracks: TrackTable,
}

/// Problem found by [`OverlayScene::validate`]. `event` is the index into
/// `events`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SceneIssue {
    #[error("event {event}: window starts at {start} after it ends at {end}")]
    InvertedWindow { event: usize, start: u32, end: u32 },

    #[error("event {event}: pressure intensity {value} outside [0, 1]")]
    IntensityOutOfRange { event: usize, value: f32 },

    #[error("event {event}: player {player} untracked on frame {frame}")]
    MissingTrack { event: usize, frame: u32, player: PlayerId },

    #[error("event {event}: starts on frame {start}, scene has {frame_count} frames")]
    OutsideScene { event: usize, start: u32, frame_count: u32 },
}

impl OverlayScene {
    pub fn new(width: u32, height: u32, frame_count: u32) -> Self {
        Self { width, height, frame_count, events: Vec::new(), tracks: TrackTable::new() }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let scene = Self::from_json(&text)?;
        debug!(
            path = %path.display(),
            events = scene.events.len(),
            frames = scene.frame_count,
            "loaded scene"
        );
        Ok(scene)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Events the detector emits on `frame`: those whose window opens there.
    pub fn events_starting_at(&self, frame: u32) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.start_frame() == frame)
    }

    pub fn blank_frame(&self) -> RgbImage {
        RgbImage::from_pixel(self.width, self.height, PITCH_GREEN)
    }

    /// Check every event against the tracking table and its own window.
    ///
    /// Covers the lookups the renderer treats as preconditions: the passer on
    /// `start_frame` and both pressure participants on `start_frame`. An
    /// untracked pass receiver is not an issue.
    pub fn validate(&self) -> Vec<SceneIssue> {
        let mut issues = Vec::new();

        for (idx, event) in self.events.iter().enumerate() {
            let base = event.base();
            if base.start_frame > base.end_frame {
                issues.push(SceneIssue::InvertedWindow {
                    event: idx,
                    start: base.start_frame,
                    end: base.end_frame,
                });
            }
            if base.start_frame >= self.frame_count {
                issues.push(SceneIssue::OutsideScene {
                    event: idx,
                    start: base.start_frame,
                    frame_count: self.frame_count,
                });
            }

            let required: Vec<PlayerId> = match event {
                Event::Pass(pass) => vec![pass.passer_id],
                Event::Pressure(pressure) => {
                    if !(0.0..=1.0).contains(&pressure.pressure_intensity) {
                        issues.push(SceneIssue::IntensityOutOfRange {
                            event: idx,
                            value: pressure.pressure_intensity,
                        });
                    }
                    vec![pressure.pressuring_player_id, pressure.pressured_player_id]
                }
                Event::PossessionChange(_) => Vec::new(),
            };

            for player in required {
                if !self.tracks.contains(base.start_frame, player) {
                    issues.push(SceneIssue::MissingTrack {
                        event: idx,
                        frame: base.start_frame,
                        player,
                    });
                }
            }
        }

        issues
    }
}
