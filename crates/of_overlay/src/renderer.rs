//! # Overlay Renderer
//!
//! Composites event overlays onto one video frame at a time.
//!
//! ## Per-frame algorithm (`render_frame`)
//! 1. Prune passes that ended before this frame
//! 2. Absorb newly emitted passes into the active set
//! 3. Draw a banner for every pass whose window contains this frame
//! 4. Draw pressure and possession-change events from this call's list,
//!    in order
//!
//! Only passes persist between calls. The frame is borrowed mutably for the
//! duration of a call and modified in place.

use image::{Rgb, RgbImage};
use nalgebra::{Point2, Rotation2, Vector2};
use tracing::trace;

use crate::active::ActiveEventSet;
use crate::banner::{draw_banner, BannerSlots};
use crate::config::{rgb, OverlayConfig};
use crate::error::Result;
use crate::events::{Event, PassEvent, PossessionChangeEvent, PressureEvent};
use crate::raster::{draw_circle, draw_line, fill_triangle};
use crate::tracks::TrackTable;

#[derive(Debug, Clone)]
pub struct OverlayRenderer {
    config: OverlayConfig,
    active: ActiveEventSet,
    slots: BannerSlots,
}

impl Default for OverlayRenderer {
    fn default() -> Self {
        Self::from_valid_config(OverlayConfig::default())
    }
}

impl OverlayRenderer {
    pub fn new(config: OverlayConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: OverlayConfig) -> Self {
        let active = if config.dedupe_active {
            ActiveEventSet::deduplicating()
        } else {
            ActiveEventSet::new()
        };
        let slots = BannerSlots::new(config.banner.layout);
        Self { config, active, slots }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn active_events(&self) -> &ActiveEventSet {
        &self.active
    }

    /// Forget every tracked pass, e.g. when seeking to another clip.
    pub fn reset(&mut self) {
        self.active.clear();
        self.slots.reset();
    }

    /// Release all stacked banner rows. `render_frame` does this itself.
    pub fn reset_banner_rows(&mut self) {
        self.slots.reset();
    }

    /// Draw a banner in the next free row and hand the frame back.
    pub fn render_banner<'f>(
        &mut self,
        frame: &'f mut RgbImage,
        text: &str,
        color: Rgb<u8>,
    ) -> &'f mut RgbImage {
        let row = self.slots.next();
        draw_banner(frame, text, color, &self.config.banner, row)
    }

    /// Arrow from passer to receiver plus the pass banner.
    ///
    /// Returns whether the arrow was drawn; it is skipped when the pass has no
    /// receiver or the receiver is untracked on `end_frame`. The passer must
    /// be tracked on `start_frame`.
    pub fn render_pass_event(
        &mut self,
        frame: &mut RgbImage,
        event: &PassEvent,
        tracks: &TrackTable,
    ) -> Result<bool> {
        let passer = tracks.position(event.base.start_frame, event.passer_id)?;
        let receiver = event
            .receiver_id
            .and_then(|id| tracks.get(event.base.end_frame, id))
            .map(|track| track.point());

        let color = rgb(self.config.palette.pass);
        let drew_arrow = match receiver {
            Some(receiver) => {
                self.draw_arrow(frame, to_pixel(passer), to_pixel(receiver), color);
                true
            }
            None => false,
        };

        let text = event.banner_text();
        self.render_banner(frame, &text, color);
        Ok(drew_arrow)
    }

    /// Line between the two players coloured by intensity, a pulsing ring
    /// on the pressured player, and the pressure banner.
    ///
    /// The ring radius follows `frame_index`, so output is reproducible.
    pub fn render_pressure_event(
        &mut self,
        frame: &mut RgbImage,
        event: &PressureEvent,
        tracks: &TrackTable,
        frame_index: u32,
    ) -> Result<()> {
        let pressured = tracks.position(event.base.start_frame, event.pressured_player_id)?;
        let pressuring = tracks.position(event.base.start_frame, event.pressuring_player_id)?;
        let (from, to) = (to_pixel(pressuring), to_pixel(pressured));

        let pulse = &self.config.pulse;
        draw_circle(
            frame,
            to,
            pulse.radius_at(frame_index).trunc(),
            rgb(self.config.palette.pressure),
            pulse.thickness,
        );

        let line_color = self.intensity_color(event.pressure_intensity);
        draw_line(frame, from, to, line_color, self.config.arrow_thickness);

        let text = event.banner_text();
        self.render_banner(frame, &text, rgb(self.config.palette.pressure));
        Ok(())
    }

    pub fn render_possession_change(&mut self, frame: &mut RgbImage, event: &PossessionChangeEvent) {
        let text = event.banner_text();
        self.render_banner(frame, &text, rgb(self.config.palette.possession));
    }

    /// Composite every overlay for `frame_index` onto `frame`.
    ///
    /// `events` are the events emitted for this frame. Passes among them join
    /// the active set and keep being drawn until their window ends; pressure
    /// and possession changes are drawn only in the call that receives them.
    pub fn render_frame<'f>(
        &mut self,
        frame: &'f mut RgbImage,
        events: &[Event],
        frame_index: u32,
        tracks: &TrackTable,
    ) -> Result<&'f mut RgbImage> {
        self.slots.reset();

        self.active.prune(frame_index);
        self.active.absorb(events.iter().filter_map(|event| match event {
            Event::Pass(pass) => Some(pass),
            _ => None,
        }));

        let in_flight: Vec<PassEvent> =
            self.active.in_progress(frame_index).map(|(pass, _)| pass.clone()).collect();
        trace!(frame_index, passes = in_flight.len(), events = events.len(), "rendering frame");

        for pass in &in_flight {
            if self.config.pass_arrows {
                self.render_pass_event(frame, pass, tracks)?;
            } else {
                let color = rgb(self.config.palette.pass_active);
                self.render_banner(frame, &pass.base.description, color);
            }
        }

        for event in events {
            match event {
                Event::Pressure(pressure) => {
                    self.render_pressure_event(frame, pressure, tracks, frame_index)?;
                }
                Event::PossessionChange(change) => self.render_possession_change(frame, change),
                Event::Pass(_) => {}
            }
        }

        Ok(frame)
    }

    /// Linear blend from the low to the high intensity colour. Intensity is
    /// clamped to [0, 1], NaN counts as 0; channels are truncated.
    pub fn intensity_color(&self, intensity: f32) -> Rgb<u8> {
        let t = if intensity.is_nan() { 0.0 } else { intensity.clamp(0.0, 1.0) };
        let low = self.config.palette.intensity_low;
        let high = self.config.palette.intensity_high;
        let mut out = Rgb(low);
        for (channel, (lo, hi)) in out.0.iter_mut().zip(low.iter().zip(high.iter())) {
            let value = *lo as f32 + (*hi as f32 - *lo as f32) * t;
            *channel = value.clamp(0.0, 255.0) as u8;
        }
        out
    }

    /// Shaft plus a triangular head whose base sits on `to`. The head has a
    /// fixed size and is rotated into the pass direction.
    fn draw_arrow(&self, frame: &mut RgbImage, from: Point2<i32>, to: Point2<i32>, color: Rgb<u8>) {
        draw_line(frame, from, to, color, self.config.arrow_thickness);

        let angle = (to.y as f32 - from.y as f32).atan2(to.x as f32 - from.x as f32);
        let rotation = Rotation2::new(angle);
        let length = self.config.arrowhead_length;
        let tip = Point2::new(to.x as f32, to.y as f32);
        let head = [
            Vector2::new(length, 0.0),
            Vector2::new(0.0, length / 2.0),
            Vector2::new(0.0, -length / 2.0),
        ]
        .map(|v| tip + rotation * v);

        fill_triangle(frame, head, color);
    }
}

/// Tracker positions are truncated to whole pixels.
fn to_pixel(p: Point2<f32>) -> Point2<i32> {
    Point2::new(p.x as i32, p.y as i32)
}
