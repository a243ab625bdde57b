//! Encode frames into standard image containers.
//!
//! PNG keeps the palette (indexed color, 8-bit indices); JPEG expands the
//! palette to RGB first. Frames are written back to back with no framing of
//! our own, so the container format is the only frame boundary.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;

use crate::configuration::config::Encoding;
use crate::error::Result;
use crate::visualization::frame::Frame;

#[derive(Debug, Clone, Copy)]
pub struct FrameCodec {
    pub encoding: Encoding,
    pub jpeg_quality: u8,
}

impl FrameCodec {
    pub fn new(encoding: Encoding, jpeg_quality: u8) -> Self {
        Self { encoding, jpeg_quality }
    }

    pub fn png() -> Self {
        Self::new(Encoding::Png, 85)
    }

    /// Encode `frame` into a fresh buffer
    pub fn encode(&self, frame: &Frame) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        match self.encoding {
            Encoding::Png => encode_png(frame, &mut buf)?,
            Encoding::Jpeg => encode_jpeg(frame, self.jpeg_quality, &mut buf)?,
        }
        Ok(buf)
    }
}

fn encode_png(frame: &Frame, out: &mut Vec<u8>) -> Result<()> {
    let palette: Vec<u8> = frame
        .palette()
        .colors()
        .iter()
        .flat_map(|&[r, g, b, _]| [r, g, b])
        .collect();
    let alpha: Vec<u8> = frame.palette().colors().iter().map(|c| c[3]).collect();

    let mut encoder = png::Encoder::new(out, frame.width(), frame.height());
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_palette(palette);
    if alpha.iter().any(|&a| a != 0xff) {
        encoder.set_trns(alpha);
    }

    let mut writer = encoder.write_header()?;
    writer.write_image_data(frame.pixels())?;
    writer.finish()?;
    Ok(())
}

fn encode_jpeg(frame: &Frame, quality: u8, out: &mut Vec<u8>) -> Result<()> {
    let rgb = frame.to_rgb8();
    let mut encoder = JpegEncoder::new_with_quality(out, quality);
    encoder.encode(&rgb, frame.width(), frame.height(), ExtendedColorType::Rgb8)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visualization::draw::draw_disk;
    use crate::visualization::frame::Palette;

    fn sample_frame() -> Frame {
        let mut f = Frame::new(33, 33, Palette::gray_fade(8));
        draw_disk(&mut f, 16, 16, 8, 8);
        draw_disk(&mut f, 10, 10, 4, 3);
        f
    }

    #[test]
    fn png_is_indexed_with_frame_palette() {
        let bytes = FrameCodec::png().encode(&sample_frame()).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoder = png::Decoder::new(&bytes[..]);
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        assert_eq!(info.color_type, png::ColorType::Indexed);
        assert_eq!((info.width, info.height), (33, 33));
        assert_eq!(info.palette.as_ref().map(|p| p.len()), Some(9 * 3));
    }

    #[test]
    fn jpeg_has_start_and_end_markers() {
        let bytes = FrameCodec::new(Encoding::Jpeg, 80).encode(&sample_frame()).unwrap();
        assert_eq!(&bytes[..2], &[0xff, 0xd8]);
        assert_eq!(&bytes[bytes.len() - 2..], &[0xff, 0xd9]);
    }
}
