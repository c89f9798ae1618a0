//! Full-width text banners shared by every event kind.

use image::{Rgb, RgbImage};

use crate::config::{BannerConfig, BannerLayout};
use crate::raster::{blend_rect, draw_text, measure_text};

const OUTLINE: Rgb<u8> = Rgb([0, 0, 0]);

/// Hands out banner rows for one rendered frame.
#[derive(Debug, Clone, Default)]
pub struct BannerSlots {
    layout: BannerLayout,
    next_row: u32,
}

impl BannerSlots {
    pub fn new(layout: BannerLayout) -> Self {
        Self { layout, next_row: 0 }
    }

    /// Row for the next banner. Always 0 in the overlay layout.
    pub fn next(&mut self) -> u32 {
        match self.layout {
            BannerLayout::Overlay => 0,
            BannerLayout::Stacked => {
                let row = self.next_row;
                self.next_row += 1;
                row
            }
        }
    }

    pub fn reset(&mut self) {
        self.next_row = 0;
    }

    /// Rows handed out since the last reset.
    pub fn used(&self) -> u32 {
        self.next_row
    }
}

/// Darken a band of `config.height` pixels starting at `row * height` and
/// centre `text` on it, black outline first, coloured fill second.
///
/// Rows starting below the frame are skipped.
pub fn draw_banner<'f>(
    frame: &'f mut RgbImage,
    text: &str,
    color: Rgb<u8>,
    config: &BannerConfig,
    row: u32,
) -> &'f mut RgbImage {
    let band_top = row.saturating_mul(config.height);
    if band_top >= frame.height() {
        return frame;
    }

    let width = frame.width();
    blend_rect(frame, 0, band_top as i32, width, config.height, OUTLINE, config.opacity);

    let (text_w, text_h) = measure_text(text, config.font_scale);
    let text_x = (width as i32 - text_w as i32) / 2;
    let text_y = band_top as i32 + (config.height as i32 - text_h as i32) / 2;

    draw_text(
        frame,
        text,
        text_x,
        text_y,
        config.font_scale,
        OUTLINE,
        config.text_thickness + config.outline_extra,
    );
    draw_text(frame, text, text_x, text_y, config.font_scale, color, config.text_thickness);

    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREY: Rgb<u8> = Rgb([100, 100, 100]);
    const GREEN: Rgb<u8> = Rgb([0, 255, 0]);

    fn count(img: &RgbImage, color: Rgb<u8>) -> usize {
        img.pixels().filter(|p| **p == color).count()
    }

    #[test]
    fn test_band_spans_full_width() {
        let cfg = BannerConfig::default();
        let mut img = RgbImage::from_pixel(1280, 400, GREY);
        draw_banner(&mut img, "PASS", GREEN, &cfg, 0);

        assert_eq!(img.get_pixel(0, 0), &Rgb([30, 30, 30]));
        assert_eq!(img.get_pixel(1279, cfg.height - 1), &Rgb([30, 30, 30]));
        assert_eq!(img.get_pixel(0, cfg.height), &GREY);
        assert!(count(&img, GREEN) > 0);
    }

    #[test]
    fn test_text_is_centred() {
        let cfg = BannerConfig::default();
        let mut img = RgbImage::from_pixel(1000, 300, GREY);
        draw_banner(&mut img, "I", GREEN, &cfg, 0);

        let xs: Vec<u32> = img
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == GREEN)
            .map(|(x, _, _)| x)
            .collect();
        let min = *xs.iter().min().unwrap();
        let max = *xs.iter().max().unwrap();
        let (cell_w, _) = measure_text("I", cfg.font_scale);
        let cell_left = (1000 - cell_w) / 2;
        assert!(min >= cell_left && max < cell_left + cell_w);
    }

    #[test]
    fn test_repeated_banners_share_the_band() {
        let cfg = BannerConfig::default();
        let mut img = RgbImage::from_pixel(800, 400, GREY);
        draw_banner(&mut img, "ONE", GREEN, &cfg, 0);
        draw_banner(&mut img, "TWO", GREEN, &cfg, 0);
        assert_eq!(img.get_pixel(1, 1), &Rgb([9, 9, 9]));
        assert_eq!(img.get_pixel(1, cfg.height + 1), &GREY);
    }

    #[test]
    fn test_row_below_frame_is_skipped() {
        let cfg = BannerConfig::default();
        let mut img = RgbImage::from_pixel(200, 100, GREY);
        let before = img.clone();
        draw_banner(&mut img, "LOST", GREEN, &cfg, 3);
        assert_eq!(img, before);
    }

    #[test]
    fn test_slots() {
        let mut overlay = BannerSlots::new(BannerLayout::Overlay);
        assert_eq!((overlay.next(), overlay.next()), (0, 0));

        let mut stacked = BannerSlots::new(BannerLayout::Stacked);
        assert_eq!((stacked.next(), stacked.next(), stacked.next()), (0, 1, 2));
        assert_eq!(stacked.used(), 3);
        stacked.reset();
        assert_eq!(stacked.next(), 0);
    }
}
