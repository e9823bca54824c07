use image::{ImageFrame, PixelFormat};

const BACKGROUND: [u8; 3] = [40, 60, 40];
const BALL: [u8; 3] = [255, 255, 255];

/// Synthetic camera frame: a white disc on a dark background.
///
/// The center may lie outside the frame, in which case only the visible
/// part of the disc is drawn.
pub fn ball_frame(width: u32, height: u32, center_x: i64, center_y: i64, radius: u32) -> ImageFrame {
    let mut frame = ImageFrame::new(width, height, PixelFormat::Rgb8);
    frame.fill(BACKGROUND);

    let r = radius as i64;
    let x_range = (center_x - r).max(0)..=(center_x + r).min(width as i64 - 1);
    for y in (center_y - r).max(0)..=(center_y + r).min(height as i64 - 1) {
        for x in x_range.clone() {
            let (dx, dy) = (x - center_x, y - center_y);
            if dx * dx + dy * dy <= r * r {
                frame.set_pixel(x as u32, y as u32, BALL);
            }
        }
    }
    frame
}

/// Horizontal ball position for the `tick`-th frame of a left to right sweep.
///
/// The ball enters fully hidden past the left edge and leaves fully hidden
/// past the right edge, then starts over.
pub fn sweep_x(tick: u64, width: u32, radius: u32, pixels_per_tick: u32) -> i64 {
    let span = width as u64 + 2 * radius as u64 + 2;
    let travelled = tick.wrapping_mul(pixels_per_tick as u64) % span;
    travelled as i64 - radius as i64 - 1
}
