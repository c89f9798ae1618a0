//! Bitmap text from the `font8x8` legacy ASCII table.
//!
//! Glyph rows are 8 bits with the least significant bit as the leftmost
//! pixel. Each glyph cell is scaled by an integer factor; characters
//! outside ASCII fall back to `?`, except `→` which has its own glyph.

use font8x8::legacy::BASIC_LEGACY;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

/// Glyph cell edge in unscaled pixels.
pub const GLYPH_SIZE: u32 = 8;

const RIGHT_ARROW: [u8; 8] = [0x00, 0x10, 0x20, 0x7F, 0x20, 0x10, 0x00, 0x00];

fn glyph_for_char(ch: char) -> [u8; 8] {
    if ch == '\u{2192}' {
        return RIGHT_ARROW;
    }
    let index = ch as usize;
    if index < BASIC_LEGACY.len() {
        BASIC_LEGACY[index]
    } else {
        BASIC_LEGACY[b'?' as usize]
    }
}

/// (width, height) in pixels of `text` drawn at `scale`.
pub fn measure_text(text: &str, scale: u32) -> (u32, u32) {
    let cell = GLYPH_SIZE * scale;
    (text.chars().count() as u32 * cell, cell)
}

/// Draw `text` with its top-left corner at (x, y).
///
/// `thickness` grows every lit cell outward; `1` draws the glyph cells
/// exactly. Drawing the same text twice, thick and dark then thin and
/// coloured, gives an outlined label.
pub fn draw_text(
    frame: &mut RgbImage,
    text: &str,
    x: i32,
    y: i32,
    scale: u32,
    color: Rgb<u8>,
    thickness: u32,
) {
    let scale = scale.max(1) as i32;
    let grow = thickness.max(1) as i32 - 1;
    let grow_lo = grow / 2;
    let side = (scale + grow) as u32;
    let cell = GLYPH_SIZE as i32 * scale;

    for (col_idx, ch) in text.chars().enumerate() {
        let glyph = glyph_for_char(ch);
        let glyph_x = x + col_idx as i32 * cell;
        for (row, bits) in glyph.iter().enumerate() {
            if *bits == 0 {
                continue;
            }
            let py = y + row as i32 * scale;
            for bit in 0..GLYPH_SIZE as i32 {
                if (*bits >> bit) & 0x01 == 0 {
                    continue;
                }
                let px = glyph_x + bit * scale;
                let rect = Rect::at(px - grow_lo, py - grow_lo).of_size(side, side);
                draw_filled_rect_mut(frame, rect, color);
            }
        }
    }
}
