//! # Raster Primitives
//!
//! Immediate-mode drawing onto an `RgbImage`, built on `imageproc`. Every
//! primitive clips to the frame, so callers may pass coordinates that fall
//! partly or wholly outside it, however far.
//!
//! - `blend_rect` - alpha-blended filled rectangle
//! - `draw_line` - line with a square brush, clipped before stepping
//! - `draw_circle` - ring of given thickness
//! - `fill_triangle` - solid triangle
//! - `text` - 8x8 bitmap glyph text

pub mod text;

use std::ops::RangeInclusive;

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point;
use nalgebra::Point2;
use tracing::trace;

pub use text::{draw_text, measure_text, GLYPH_SIZE};

/// Largest coordinate magnitude handed to `imageproc`, which steps in `i32`
/// and `f32` internally. Integers above 2^24 are no longer exact in `f32`.
const MAX_COORD: f64 = (1u32 << 24) as f64;

/// Blend `color` over the rectangle with weight `alpha`:
/// `out = color * alpha + pixel * (1 - alpha)`.
pub fn blend_rect(
    frame: &mut RgbImage,
    x0: i32,
    y0: i32,
    width: u32,
    height: u32,
    color: Rgb<u8>,
    alpha: f32,
) {
    let alpha = alpha.clamp(0.0, 1.0);
    let x_start = x0.max(0) as u32;
    let y_start = y0.max(0) as u32;
    let x_end = (x0 as i64 + width as i64).clamp(0, frame.width() as i64) as u32;
    let y_end = (y0 as i64 + height as i64).clamp(0, frame.height() as i64) as u32;

    for y in y_start..y_end {
        for x in x_start..x_end {
            let px = frame.get_pixel_mut(x, y);
            for (channel, target) in px.0.iter_mut().zip(color.0.iter()) {
                let mixed = *target as f32 * alpha + *channel as f32 * (1.0 - alpha);
                *channel = mixed.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

/// Offsets covered by a square brush of side `size` around its centre.
fn brush_offsets(size: u32) -> RangeInclusive<i32> {
    let size = size.max(1) as i32;
    -((size - 1) / 2)..=size / 2
}

/// Clip the segment `from -> to` to the pixel rectangle
/// `[0, width - 1] x [0, height - 1]` (Liang-Barsky).
pub fn clip_segment(
    from: (f64, f64),
    to: (f64, f64),
    width: u32,
    height: u32,
) -> Option<((f64, f64), (f64, f64))> {
    if width == 0 || height == 0 {
        return None;
    }
    let (x_max, y_max) = (width as f64 - 1.0, height as f64 - 1.0);
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);

    for (p, q) in [(-dx, from.0), (dx, x_max - from.0), (-dy, from.1), (dy, y_max - from.1)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    Some(((from.0 + t0 * dx, from.1 + t0 * dy), (from.0 + t1 * dx, from.1 + t1 * dy)))
}

/// Line between two pixel points, inclusive of both ends. Thickness is a
/// square brush made of offset strokes.
pub fn draw_line(
    frame: &mut RgbImage,
    from: Point2<i32>,
    to: Point2<i32>,
    color: Rgb<u8>,
    thickness: u32,
) {
    let (width, height) = frame.dimensions();
    for oy in brush_offsets(thickness) {
        for ox in brush_offsets(thickness) {
            let start = (from.x as f64 + ox as f64, from.y as f64 + oy as f64);
            let end = (to.x as f64 + ox as f64, to.y as f64 + oy as f64);
            let Some((a, b)) = clip_segment(start, end, width, height) else {
                continue;
            };
            draw_line_segment_mut(
                frame,
                (a.0.round() as f32, a.1.round() as f32),
                (b.0.round() as f32, b.1.round() as f32),
                color,
            );
        }
    }
}

/// Ring around `center`: one circle per brush offset from `radius`
/// (truncated to whole pixels).
pub fn draw_circle(
    frame: &mut RgbImage,
    center: Point2<i32>,
    radius: f32,
    color: Rgb<u8>,
    thickness: u32,
) {
    if !radius.is_finite() || radius < 0.0 {
        return;
    }
    let offsets = brush_offsets(thickness);
    let radius = radius.trunc() as f64;
    let inner = (radius + *offsets.start() as f64).max(0.0);
    let outer = radius + *offsets.end() as f64;
    let (cx, cy) = (center.x as f64, center.y as f64);
    let (w, h) = (frame.width() as f64, frame.height() as f64);

    // ring's bounding box misses the frame
    if cx + outer < 0.0 || cy + outer < 0.0 || cx - outer >= w || cy - outer >= h {
        return;
    }
    // whole frame sits inside the hole
    let far_x = cx.abs().max((cx - (w - 1.0)).abs());
    let far_y = cy.abs().max((cy - (h - 1.0)).abs());
    if far_x * far_x + far_y * far_y < inner * inner {
        return;
    }
    if cx.abs() + outer > MAX_COORD || cy.abs() + outer > MAX_COORD {
        trace!(cx, cy, radius, "ring too large to draw");
        return;
    }

    for r in offsets {
        let r = radius + r as f64;
        if r >= 0.0 {
            draw_hollow_circle_mut(frame, (center.x, center.y), r as i32, color);
        }
    }
}

/// Solid triangle. Winding order does not matter.
pub fn fill_triangle(frame: &mut RgbImage, vertices: [Point2<f32>; 3], color: Rgb<u8>) {
    let representable = vertices.iter().all(|v| {
        v.x.is_finite()
            && v.y.is_finite()
            && (v.x.abs() as f64) < MAX_COORD
            && (v.y.abs() as f64) < MAX_COORD
    });
    if !representable {
        return;
    }

    let min_x = vertices.iter().map(|v| v.x).fold(f32::INFINITY, f32::min);
    let min_y = vertices.iter().map(|v| v.y).fold(f32::INFINITY, f32::min);
    let max_x = vertices.iter().map(|v| v.x).fold(f32::NEG_INFINITY, f32::max);
    let max_y = vertices.iter().map(|v| v.y).fold(f32::NEG_INFINITY, f32::max);
    if max_x < 0.0 || max_y < 0.0 || min_x >= frame.width() as f32 || min_y >= frame.height() as f32
    {
        return;
    }

    let poly = vertices.map(|v| Point::new(v.x.round() as i32, v.y.round() as i32));
    if poly[0] == poly[1] || poly[1] == poly[2] || poly[2] == poly[0] {
        return;
    }
    draw_polygon_mut(frame, &poly, color);
}
