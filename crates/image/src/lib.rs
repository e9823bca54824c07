//! Raw camera frames as they travel between nodes.
//!
//! `ImageFrame` mirrors what a camera driver hands out: a row count, a row
//! stride in bytes, a pixel layout and the packed bytes. Encoded files
//! (PNG, JPEG, BMP) can be turned into frames with `decode_frame`.

pub mod error;
pub mod frame;
pub mod pixelformat;

pub use error::ImageError;
pub use frame::ImageFrame;
pub use pixelformat::PixelFormat;

fn decode_frame_inner(data: &[u8]) -> Result<ImageFrame, ImageError> {
    let rgb = crates_image::load_from_memory(data)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(ImageFrame {
        height,
        width,
        step: width * 3,
        encoding: PixelFormat::Rgb8,
        data: rgb.into_raw(),
    })
}

/// Decodes an encoded image file into a tightly packed `Rgb8` frame.
///
/// The format is auto-detected. Alpha is discarded and 16-bit or float
/// images are reduced to 8 bits per channel. The CPU-bound work runs on
/// tokio's blocking thread pool.
///
/// # Errors
///
/// Returns `ImageError::Decode` if the data is invalid or the format is unsupported.
pub async fn decode_frame(data: &[u8]) -> Result<ImageFrame, ImageError> {
    let owned = data.to_vec();
    tokio::task::spawn_blocking(move || decode_frame_inner(&owned))
        .await
        .map_err(|e| ImageError::Decode(e.to_string()))?
}
