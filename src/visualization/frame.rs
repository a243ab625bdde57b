//! Palette-indexed raster frames.

/// Small RGBA lookup table; pixel values index into it
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<[u8; 4]>,
}

impl Palette {
    pub const BLACK: [u8; 4] = [0x00, 0x00, 0x00, 0xff];
    pub const GREEN: [u8; 4] = [0x00, 0xff, 0x00, 0xff];

    pub fn new(colors: Vec<[u8; 4]>) -> Self {
        Self { colors }
    }

    /// Index 0 black background, index 1 green foreground
    pub fn green_on_black() -> Self {
        Self::new(vec![Self::BLACK, Self::GREEN])
    }

    /// Index 0 black background, then `levels` grays from dim to white.
    /// Index `levels` is full brightness.
    pub fn gray_fade(levels: u8) -> Self {
        let levels = levels.max(1);
        let mut colors = Vec::with_capacity(levels as usize + 1);
        colors.push(Self::BLACK);
        for i in 1..=levels {
            let g = (255 * i as u32 / levels as u32) as u8;
            colors.push([g, g, g, 0xff]);
        }
        Self::new(colors)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn color(&self, index: u8) -> Option<[u8; 4]> {
        self.colors.get(index as usize).copied()
    }

    pub fn colors(&self) -> &[[u8; 4]] {
        &self.colors
    }
}

/// Owned mutable raster of palette indices, row-major
#[derive(Debug, Clone)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    palette: Palette,
}

impl Frame {
    /// Blank frame, every pixel at palette index 0
    pub fn new(width: u32, height: u32, palette: Palette) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
            palette,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn offset(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Set a pixel's palette index; coordinates off the canvas are ignored
    pub fn set_index(&mut self, x: i64, y: i64, index: u8) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i] = index;
        }
    }

    pub fn index_at(&self, x: i64, y: i64) -> Option<u8> {
        self.offset(x, y).map(|i| self.pixels[i])
    }

    /// Expand to packed RGB8, indices outside the palette render black
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3);
        for &i in &self.pixels {
            let [r, g, b, _] = self.palette.color(i).unwrap_or(Palette::BLACK);
            out.extend_from_slice(&[r, g, b]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_fade_runs_from_black_to_white() {
        let p = Palette::gray_fade(8);
        assert_eq!(p.len(), 9);
        assert_eq!(p.color(0), Some(Palette::BLACK));
        assert_eq!(p.color(8), Some([255, 255, 255, 255]));
        assert!(p.color(1).unwrap()[0] < p.color(7).unwrap()[0]);
        assert_eq!(p.color(9), None);
    }

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut f = Frame::new(4, 3, Palette::green_on_black());
        f.set_index(-1, 0, 1);
        f.set_index(4, 0, 1);
        f.set_index(0, 3, 1);
        assert!(f.pixels().iter().all(|&p| p == 0));

        f.set_index(3, 2, 1);
        assert_eq!(f.index_at(3, 2), Some(1));
        assert_eq!(f.index_at(4, 2), None);
    }

    #[test]
    fn rgb_expansion_uses_palette() {
        let mut f = Frame::new(2, 1, Palette::green_on_black());
        f.set_index(1, 0, 1);
        assert_eq!(f.to_rgb8(), vec![0, 0, 0, 0, 255, 0]);
    }
}
