use {
    crate::{ImageError, PixelFormat},
    codec::{Codec, DecodeError, decode_bytes, encode_bytes},
};

/// One raw camera frame.
///
/// Rows are `step` bytes apart; `step` may exceed `width * bytes_per_pixel`
/// when the camera pads its rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFrame {
    pub height: u32,
    pub width: u32,
    pub step: u32,
    pub encoding: PixelFormat,
    pub data: Vec<u8>,
}

impl ImageFrame {
    /// A black, tightly packed frame.
    pub fn new(width: u32, height: u32, encoding: PixelFormat) -> Self {
        let step = width * encoding.bytes_per_pixel() as u32;
        Self {
            height,
            width,
            step,
            encoding,
            data: vec![0; step as usize * height as usize],
        }
    }

    /// Wrap raw bytes without checking them. See `validate`.
    pub fn from_raw(height: u32, step: u32, encoding: PixelFormat, data: Vec<u8>) -> Self {
        Self {
            height,
            width: step / encoding.bytes_per_pixel() as u32,
            step,
            encoding,
            data,
        }
    }

    /// Check that every row holds whole pixels and that the payload covers
    /// all `height` rows. Bytes past the last row are allowed and ignored.
    pub fn validate(&self) -> Result<(), ImageError> {
        let bpp = self.encoding.bytes_per_pixel();
        if self.step as usize % bpp != 0 {
            return Err(ImageError::Malformed(format!(
                "step {} is not a multiple of {} bytes per pixel",
                self.step, bpp
            )));
        }
        let needed = self.step as usize * self.height as usize;
        if self.data.len() < needed {
            return Err(ImageError::Malformed(format!(
                "{} data bytes, {} rows of {} bytes need {}",
                self.data.len(),
                self.height,
                self.step,
                needed
            )));
        }
        Ok(())
    }

    /// Iterate over the rows, each exactly `step` bytes long.
    ///
    /// Assumes a validated frame; a short payload yields fewer rows.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        let step = (self.step as usize).max(1);
        let len = (self.step as usize * self.height as usize).min(self.data.len());
        self.data[..len].chunks_exact(step)
    }

    /// Overwrite one pixel; coordinates outside the frame are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: [u8; 3]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let bpp = self.encoding.bytes_per_pixel();
        let offset = y as usize * self.step as usize + x as usize * bpp;
        if let Some(pixel) = self.data.get_mut(offset..offset + bpp) {
            pixel.copy_from_slice(&value);
        }
    }

    pub fn fill(&mut self, value: [u8; 3]) {
        for pixel in self.data.chunks_exact_mut(3) {
            pixel.copy_from_slice(&value);
        }
    }
}

impl Codec for ImageFrame {
    fn encode(&self, buf: &mut Vec<u8>) {
        self.height.encode(buf);
        self.width.encode(buf);
        self.step.encode(buf);
        self.encoding.encode(buf);
        encode_bytes(&self.data, buf);
    }

    fn decode(buf: &[u8], pos: &mut usize) -> Result<Self, DecodeError> {
        Ok(Self {
            height: u32::decode(buf, pos)?,
            width: u32::decode(buf, pos)?,
            step: u32::decode(buf, pos)?,
            encoding: PixelFormat::decode(buf, pos)?,
            data: decode_bytes(buf, pos)?,
        })
    }
}
