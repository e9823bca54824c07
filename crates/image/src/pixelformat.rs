use codec::{Codec, DecodeError};

/// Layout of one pixel in an `ImageFrame`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb8,
    Bgr8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Rgb8 | PixelFormat::Bgr8 => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PixelFormat::Rgb8 => "rgb8",
            PixelFormat::Bgr8 => "bgr8",
        }
    }
}

impl Codec for PixelFormat {
    fn encode(&self, buf: &mut Vec<u8>) {
        let tag: u32 = match self {
            PixelFormat::Rgb8 => 0,
            PixelFormat::Bgr8 => 1,
        };
        tag.encode(buf);
    }

    fn decode(buf: &[u8], pos: &mut usize) -> Result<Self, DecodeError> {
        match u32::decode(buf, pos)? {
            0 => Ok(PixelFormat::Rgb8),
            1 => Ok(PixelFormat::Bgr8),
            v => Err(DecodeError::InvalidVariant(v)),
        }
    }
}
