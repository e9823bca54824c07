use crates_image::{DynamicImage, ImageBuffer, ImageFormat, Rgb, Rgba};
use image::{ImageError, PixelFormat, decode_frame};
use std::io::Cursor;

fn encode_png(image: DynamicImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("png encode failed");
    bytes
}

#[tokio::test]
async fn test_decode_rgb_png() {
    let mut buffer = ImageBuffer::from_pixel(4, 3, Rgb([0u8, 0, 0]));
    buffer.put_pixel(1, 2, Rgb([255, 255, 255]));

    let frame = decode_frame(&encode_png(DynamicImage::ImageRgb8(buffer))).await.unwrap();
    assert_eq!(frame.width, 4);
    assert_eq!(frame.height, 3);
    assert_eq!(frame.step, 12);
    assert_eq!(frame.encoding, PixelFormat::Rgb8);
    assert!(frame.validate().is_ok());

    let offset = 2 * 12 + 3;
    assert_eq!(&frame.data[offset..offset + 3], &[255, 255, 255]);
}

#[tokio::test]
async fn test_decode_drops_alpha() {
    let buffer = ImageBuffer::from_pixel(2, 2, Rgba([255u8, 255, 255, 0]));

    let frame = decode_frame(&encode_png(DynamicImage::ImageRgba8(buffer))).await.unwrap();
    assert_eq!(frame.step, 6);
    assert_eq!(frame.data, vec![255; 12]);
}

#[tokio::test]
async fn test_decode_garbage_fails() {
    let result = decode_frame(&[0x00, 0x01, 0x02, 0x03]).await;
    assert!(matches!(result, Err(ImageError::Decode(_))));
}
