//! # of_overlay - Football Event Overlay Renderer
//!
//! Draws banners, pass arrows, and pressure indicators onto video frames
//! from detected match events and per-frame player tracking.
//!
//! ## Features
//! - Pass banners that persist across the ball-flight window
//! - Pressure lines coloured by intensity with a frame-driven pulsing ring
//! - Possession change banners
//! - Deterministic output (same frames + events = same pixels)
//!
//! ## Usage
//! ```rust
//! use image::RgbImage;
//! use of_overlay::{Event, OverlayRenderer, PassEvent, TrackTable};
//!
//! let tracks = TrackTable::new()
//!     .with_position(10, 7, 200.0, 300.0)
//!     .with_position(20, 9, 600.0, 320.0);
//! let events: Vec<Event> = vec![PassEvent::new(10, 20, 7, Some(9)).into()];
//!
//! let mut renderer = OverlayRenderer::default();
//! let mut frame = RgbImage::new(1280, 720);
//! renderer.render_frame(&mut frame, &events, 10, &tracks).unwrap();
//! assert_eq!(renderer.active_events().len(), 1);
//! ```

// Drawing routines take many scalar parameters
#![allow(clippy::too_many_arguments)]

pub mod active;
pub mod banner;
pub mod config;
pub mod error;
pub mod events;
pub mod raster;
pub mod renderer;
pub mod scene;
pub mod tracks;

pub use active::ActiveEventSet;
pub use config::{BannerLayout, OverlayConfig};
pub use error::{OverlayError, Result};
pub use events::{
    Event, EventBase, PassEvent, PlayerId, PossessionChangeEvent, PressureEvent, TeamId,
};
pub use renderer::OverlayRenderer;
pub use scene::{OverlayScene, SceneIssue};
pub use tracks::{PlayerTrack, TrackTable};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
