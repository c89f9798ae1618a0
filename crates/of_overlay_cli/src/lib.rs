//! Overlay CLI support
//!
//! Scene → PNG frame sequence rendering and scene validation, shared by the
//! `overlay` binary and its tests.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::RgbImage;
use of_overlay::{Event, OverlayConfig, OverlayRenderer, OverlayScene, SceneIssue};
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub config: OverlayConfig,
    /// Still image placed under every frame; pitch green when absent
    pub background: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct RenderSummary {
    pub frames_written: u32,
    pub events_emitted: usize,
    pub out_dir: PathBuf,
}

pub fn frame_file_name(frame: u32) -> String {
    format!("frame_{:05}.png", frame)
}

/// Load `path` as RGB, resized to the scene size when it differs.
pub fn load_background(path: &Path, width: u32, height: u32) -> Result<RgbImage> {
    let image = image::open(path)
        .with_context(|| format!("opening background {}", path.display()))?
        .to_rgb8();
    if image.dimensions() == (width, height) {
        return Ok(image);
    }
    debug!(from = ?image.dimensions(), to = ?(width, height), "resizing background");
    Ok(image::imageops::resize(&image, width, height, FilterType::Triangle))
}

/// Render frames `0..frame_count` of `scene` into `out_dir`.
///
/// Each event is handed to the renderer on its `start_frame`, the way a live
/// detector emits it.
pub fn render_scene(
    scene: &OverlayScene,
    out_dir: &Path,
    options: &RenderOptions,
) -> Result<RenderSummary> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let mut renderer = OverlayRenderer::new(options.config.clone())?;
    let base = match &options.background {
        Some(path) => load_background(path, scene.width, scene.height)?,
        None => scene.blank_frame(),
    };

    let mut events_emitted = 0;
    for frame_index in 0..scene.frame_count {
        let events: Vec<Event> = scene.events_starting_at(frame_index).cloned().collect();
        events_emitted += events.len();

        let mut frame = base.clone();
        renderer
            .render_frame(&mut frame, &events, frame_index, &scene.tracks)
            .with_context(|| format!("rendering frame {}", frame_index))?;

        let path = out_dir.join(frame_file_name(frame_index));
        frame.save(&path).with_context(|| format!("writing {}", path.display()))?;
    }

    info!(frames = scene.frame_count, events = events_emitted, "scene rendered");
    Ok(RenderSummary {
        frames_written: scene.frame_count,
        events_emitted,
        out_dir: out_dir.to_path_buf(),
    })
}

pub fn validate_scene_file(path: &Path) -> Result<Vec<SceneIssue>> {
    let scene = OverlayScene::load(path)
        .with_context(|| format!("loading scene {}", path.display()))?;
    Ok(scene.validate())
}
