//! Drawing primitives over a `Film<u32>`: lines, rectangles and circles.

use line_drawing::Bresenham;

use crate::film::Film;

pub const WHITE: u32 = 0x00FF_FFFF;
pub const BLACK: u32 = 0x0000_0000;
pub const BLUE: u32 = 0x0000_00FF;
pub const RED: u32 = 0x00FF_0000;
pub const GREEN: u32 = 0x0000_FF00;
pub const GRAY: u32 = 0x00DC_DCDC;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Right and bottom edges are exclusive.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

pub fn fill_rect(film: &mut Film<u32>, rect: &Rect, color: u32) {
    let (x0, y0) = (rect.x.round() as isize, rect.y.round() as isize);
    let (x1, y1) = (
        (rect.x + rect.width).round() as isize,
        (rect.y + rect.height).round() as isize,
    );
    for y in y0..y1 {
        for x in x0..x1 {
            film.write_at(x, y, color);
        }
    }
}

pub fn blit_circle(film: &mut Film<u32>, radius: f32, x: f32, y: f32, color: u32) {
    let r = radius.ceil() as isize;
    let (cx, cy) = (x.round() as isize, y.round() as isize);
    let radius_squared = radius * radius;
    for dy in -r..=r {
        for dx in -r..=r {
            if (dx * dx + dy * dy) as f32 <= radius_squared {
                film.write_at(cx + dx, cy + dy, color);
            }
        }
    }
}

/// Bresenham line, widened to `thickness` pixels across its major axis. The ends are
/// cut square at the endpoints.
pub fn draw_line(film: &mut Film<u32>, a: (f32, f32), b: (f32, f32), thickness: usize, color: u32) {
    let thickness = thickness.max(1) as isize;
    let (lo, hi) = (-(thickness - 1) / 2, thickness / 2);
    let start = (a.0.round() as isize, a.1.round() as isize);
    let end = (b.0.round() as isize, b.1.round() as isize);
    let mostly_horizontal = (end.0 - start.0).abs() >= (end.1 - start.1).abs();
    for (x, y) in Bresenham::new(start, end) {
        for offset in lo..=hi {
            if mostly_horizontal {
                film.write_at(x, y + offset, color);
            } else {
                film.write_at(x + offset, y, color);
            }
        }
    }
}
