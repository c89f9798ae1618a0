//! Per-frame player positions supplied by the tracking subsystem.
//!
//! Positions are in the pixel space of the frames being rendered.

use std::collections::BTreeMap;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, Result};
use crate::events::PlayerId;

/// Tracking record for one player on one frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PlayerTrack {
    /// (x, y) in frame pixels
    pub position: (f32, f32),
}

impl PlayerTrack {
    pub fn at(x: f32, y: f32) -> Self {
        Self { position: (x, y) }
    }

    pub fn point(&self) -> Point2<f32> {
        Point2::new(self.position.0, self.position.1)
    }
}

/// frame index → player id → track record
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrackTable {
    #[serde(default)]
    frames: BTreeMap<u32, BTreeMap<PlayerId, PlayerTrack>>,
}

impl TrackTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, frame: u32, player: PlayerId, track: PlayerTrack) {
        self.frames.entry(frame).or_default().insert(player, track);
    }

    /// Builder-style insert of a bare position.
    pub fn with_position(mut self, frame: u32, player: PlayerId, x: f32, y: f32) -> Self {
        self.insert(frame, player, PlayerTrack::at(x, y));
        self
    }

    pub fn get(&self, frame: u32, player: PlayerId) -> Option<&PlayerTrack> {
        self.frames.get(&frame).and_then(|players| players.get(&player))
    }

    pub fn contains(&self, frame: u32, player: PlayerId) -> bool {
        self.get(frame, player).is_some()
    }

    /// Position lookup that treats a gap in the table as an error.
    pub fn position(&self, frame: u32, player: PlayerId) -> Result<Point2<f32>> {
        self.get(frame, player)
            .map(PlayerTrack::point)
            .ok_or(OverlayError::MissingTrack { frame, player })
    }

    pub fn players_on(&self, frame: u32) -> impl Iterator<Item = (&PlayerId, &PlayerTrack)> {
        self.frames.get(&frame).into_iter().flat_map(|players| players.iter())
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
