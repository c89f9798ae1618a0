use thiserror::Error;

use crate::events::PlayerId;

#[derive(Error, Debug)]
pub enum OverlayError {
    /// A player referenced by an event has no track entry on the frame
    /// the renderer needs it for.
    #[error("No track entry for player {player} on frame {frame}")]
    MissingTrack { frame: u32, player: PlayerId },

    #[error("Invalid overlay config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OverlayError {
    /// Whether the caller could fix this by supplying more complete
    /// tracking data and retrying the frame.
    pub fn is_track_gap(&self) -> bool {
        matches!(self, OverlayError::MissingTrack { .. })
    }
}

pub type Result<T> = std::result::Result<T, OverlayError>;
