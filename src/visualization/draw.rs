//! Rasterization primitives writing palette indices into a [`Frame`].

use font8x8::{UnicodeFonts, BASIC_FONTS};

use super::frame::Frame;
use crate::simulation::states::NVec2;

/// Glyph cell size of the bitmap font
pub const GLYPH: i64 = 8;

/// Map a world position to pixel coordinates on a canvas of extent `size`.
/// World origin lands on `(size/2, size/2)`; fractions truncate toward zero.
/// Far-away positions saturate to a coordinate well off the canvas.
pub fn world_to_pixel(x: &NVec2, size: u32) -> (i64, i64) {
    let half = (size / 2) as i64;
    (half.saturating_add(x.x as i64), half.saturating_add(x.y as i64))
}

/// Filled disk of radius `r` centred on `(cx, cy)`, membership `dx² + dy² < r²`
pub fn draw_disk(frame: &mut Frame, cx: i64, cy: i64, r: i32, index: u8) {
    let r = r as i64;
    for dx in -r..r {
        for dy in -r..r {
            if dx * dx + dy * dy < r * r {
                frame.set_index(cx.saturating_add(dx), cy.saturating_add(dy), index);
            }
        }
    }
}

/// ASCII text with its baseline at `y`, starting at column `x`
pub fn draw_label(frame: &mut Frame, x: i64, y: i64, text: &str, index: u8) {
    let top = y - GLYPH;
    for (n, ch) in text.chars().enumerate() {
        let Some(rows) = BASIC_FONTS.get(ch) else {
            continue;
        };
        let left = x + n as i64 * GLYPH;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..8 {
                // bit 0 is the leftmost pixel
                if bits & (1 << col) != 0 {
                    frame.set_index(left + col as i64, top + row as i64, index);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visualization::frame::Palette;

    #[test]
    fn disk_covers_strict_interior() {
        let mut f = Frame::new(21, 21, Palette::green_on_black());
        draw_disk(&mut f, 10, 10, 3, 1);

        assert_eq!(f.index_at(10, 10), Some(1));
        assert_eq!(f.index_at(8, 10), Some(1)); // dx = -2
        assert_eq!(f.index_at(7, 10), Some(0)); // dx = -3, dy = 0: 9 < 9 is false
        assert_eq!(f.index_at(13, 10), Some(0)); // dx = 3 is outside the range
        assert_eq!(f.index_at(7, 7), Some(0));
    }

    #[test]
    fn disk_at_edge_is_clipped() {
        let mut f = Frame::new(5, 5, Palette::green_on_black());
        draw_disk(&mut f, 0, 0, 4, 1);
        assert_eq!(f.index_at(0, 0), Some(1));
        assert_eq!(f.index_at(4, 4), Some(0));
    }

    #[test]
    fn label_sets_pixels_above_baseline() {
        let mut f = Frame::new(64, 32, Palette::green_on_black());
        draw_label(&mut f, 0, 20, "A", 1);
        let lit = f.pixels().iter().filter(|&&p| p == 1).count();
        assert!(lit > 0);
        for y in 20..32 {
            for x in 0..64 {
                assert_eq!(f.index_at(x, y), Some(0));
            }
        }
    }

    #[test]
    fn origin_maps_to_canvas_centre() {
        assert_eq!(world_to_pixel(&NVec2::zeros(), 800), (400, 400));
        assert_eq!(world_to_pixel(&NVec2::new(-1.7, 2.9), 800), (399, 402));
    }

    #[test]
    fn huge_coordinates_saturate_off_canvas() {
        assert_eq!(world_to_pixel(&NVec2::new(1.0e19, -1.0e19), 800), (i64::MAX, i64::MIN + 400));

        let mut f = Frame::new(9, 9, Palette::green_on_black());
        draw_disk(&mut f, i64::MAX, i64::MIN, 8, 1);
        draw_disk(&mut f, i64::MIN, i64::MAX, 8, 1);
        assert!(f.pixels().iter().all(|&p| p == 0));
    }
}
