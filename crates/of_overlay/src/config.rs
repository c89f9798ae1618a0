//! # Overlay Configuration
//!
//! Visual constants for the renderer, fixed once a renderer is built.
//!
//! ## Usage
//! ```rust
//! use of_overlay::config::OverlayConfig;
//!
//! let config = OverlayConfig::default();
//! let compact = OverlayConfig::compact();
//! assert!(config.validate().is_ok() && compact.validate().is_ok());
//! ```

use std::path::Path;

use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, Result};

/// RGB triple as stored in config files.
pub type Color = [u8; 3];

pub fn rgb(color: Color) -> Rgb<u8> {
    Rgb(color)
}

/// Where each banner of a frame is placed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BannerLayout {
    /// Every banner uses the top band; the last one drawn is the legible one.
    #[default]
    Overlay,
    /// One band per banner, top to bottom in draw order.
    Stacked,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BannerConfig {
    /// Band height in pixels (default: 120)
    pub height: u32,
    /// Integer scale applied to the 8x8 glyphs (default: 3)
    pub font_scale: u32,
    /// Brush size of the coloured text fill (default: 2)
    pub text_thickness: u32,
    /// Extra brush size of the black outline over the fill (default: 2)
    pub outline_extra: u32,
    /// Weight of the black band over the frame (default: 0.7)
    pub opacity: f32,
    pub layout: BannerLayout,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            height: 120,
            font_scale: 3,
            text_thickness: 2,
            outline_extra: 2,
            opacity: 0.7,
            layout: BannerLayout::Overlay,
        }
    }
}

/// Pulsing ring drawn around a pressured player.
///
/// `radius = base_radius + amplitude * sin(frame * omega)`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PulseConfig {
    /// (default: 40.0)
    pub base_radius: f32,
    /// (default: 10.0)
    pub amplitude: f32,
    /// Phase step in radians per frame (default: 0.3)
    pub omega: f32,
    /// Ring thickness in pixels (default: 2)
    pub thickness: u32,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self { base_radius: 40.0, amplitude: 10.0, omega: 0.3, thickness: 2 }
    }
}

impl PulseConfig {
    pub fn radius_at(&self, frame: u32) -> f32 {
        self.base_radius + self.amplitude * (frame as f32 * self.omega).sin()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Palette {
    /// Pass banner and arrow (default: green)
    pub pass: Color,
    /// Description banner of an in-flight pass (default: dark green)
    pub pass_active: Color,
    /// Pressure banner and ring (default: red)
    pub pressure: Color,
    /// Possession change banner (default: orange)
    pub possession: Color,
    /// Pressure line at intensity 0.0 (default: green)
    pub intensity_low: Color,
    /// Pressure line at intensity 1.0 (default: red)
    pub intensity_high: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            pass: [0, 255, 0],
            pass_active: [0, 128, 0],
            pressure: [255, 0, 0],
            possession: [255, 165, 0],
            intensity_low: [0, 255, 0],
            intensity_high: [255, 0, 0],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OverlayConfig {
    pub banner: BannerConfig,
    pub pulse: PulseConfig,
    pub palette: Palette,
    /// Thickness of pass arrows and pressure lines (default: 3)
    pub arrow_thickness: u32,
    /// Length of the arrowhead along the pass direction (default: 30.0)
    pub arrowhead_length: f32,
    /// Draw the arrow visualization for in-flight passes instead of only
    /// their description banner (default: false)
    pub pass_arrows: bool,
    /// Ignore passes already held in the active set (default: false)
    pub dedupe_active: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            banner: BannerConfig::default(),
            pulse: PulseConfig::default(),
            palette: Palette::default(),
            arrow_thickness: 3,
            arrowhead_length: 30.0,
            pass_arrows: false,
            dedupe_active: false,
        }
    }
}

impl OverlayConfig {
    /// Full-HD broadcast output (default)
    pub fn broadcast() -> Self {
        Self::default()
    }

    /// Thin stacked banners for small previews
    pub fn compact() -> Self {
        let mut cfg = Self::default();
        cfg.banner.height = 40;
        cfg.banner.font_scale = 2;
        cfg.banner.text_thickness = 1;
        cfg.banner.outline_extra = 1;
        cfg.banner.layout = BannerLayout::Stacked;
        cfg.arrow_thickness = 2;
        cfg.arrowhead_length = 16.0;
        cfg.pulse.base_radius = 20.0;
        cfg.pulse.amplitude = 5.0;
        cfg
    }

    pub fn validate(&self) -> Result<()> {
        if self.banner.height == 0 {
            return Err(OverlayError::InvalidConfig("banner.height must be > 0".into()));
        }
        if self.banner.font_scale == 0 {
            return Err(OverlayError::InvalidConfig("banner.font_scale must be >= 1".into()));
        }
        if self.banner.text_thickness == 0 || self.arrow_thickness == 0 || self.pulse.thickness == 0
        {
            return Err(OverlayError::InvalidConfig("thicknesses must be >= 1".into()));
        }
        if !(0.0..=1.0).contains(&self.banner.opacity) {
            return Err(OverlayError::InvalidConfig(format!(
                "banner.opacity {} outside [0, 1]",
                self.banner.opacity
            )));
        }
        if !self.arrowhead_length.is_finite() || self.arrowhead_length < 0.0 {
            return Err(OverlayError::InvalidConfig("arrowhead_length must be >= 0".into()));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_presets_are_valid() {
        assert!(OverlayConfig::broadcast().validate().is_ok());
        assert!(OverlayConfig::compact().validate().is_ok());
        assert_eq!(OverlayConfig::compact().banner.layout, BannerLayout::Stacked);
    }

    #[test]
    fn test_rejects_zero_font_scale() {
        let mut cfg = OverlayConfig::default();
        cfg.banner.font_scale = 0;
        assert!(matches!(cfg.validate(), Err(OverlayError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_opacity_out_of_range() {
        let mut cfg = OverlayConfig::default();
        cfg.banner.opacity = 1.5;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_pulse_radius_is_frame_derived() {
        let pulse = PulseConfig::default();
        assert_eq!(pulse.radius_at(0), 40.0);
        assert_eq!(pulse.radius_at(17), pulse.radius_at(17));
        for frame in 0..200 {
            let r = pulse.radius_at(frame);
            assert!((30.0..=50.0).contains(&r), "frame {frame}: {r}");
        }
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "arrow_thickness": 5, "arrowhead_length": 20.0, "banner": {{
                "height": 60, "font_scale": 2, "text_thickness": 1,
                "outline_extra": 1, "opacity": 0.5, "layout": "stacked" }} }}"#
        )
        .unwrap();

        let cfg = OverlayConfig::load(file.path()).unwrap();
        assert_eq!(cfg.arrow_thickness, 5);
        assert_eq!(cfg.banner.layout, BannerLayout::Stacked);
        assert_eq!(cfg.palette, Palette::default());
        assert!(!cfg.pass_arrows);
    }
}
