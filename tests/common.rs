use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use img_parts::jpeg::{markers, Jpeg, JpegSegment};
use img_parts::png::Png;
use img_parts::{Bytes, ImageICC};
use std::io::Cursor;
use std::path::Path;

/// Deterministic RGB gradient so lossless round-trips can compare pixels.
pub fn gradient_image(width: u32, height: u32) -> DynamicImage {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    DynamicImage::ImageRgb8(img)
}

pub fn write_test_jpeg(path: &Path, width: u32, height: u32) {
    gradient_image(width, height)
        .save_with_format(path, ImageFormat::Jpeg)
        .unwrap();
}

pub fn write_test_png(path: &Path, width: u32, height: u32) {
    gradient_image(width, height)
        .save_with_format(path, ImageFormat::Png)
        .unwrap();
}

/// A file with a .jpg extension whose content no decoder will accept.
pub fn write_corrupt_jpeg(path: &Path) {
    std::fs::write(path, b"this is not a jpeg at all").unwrap();
}

/// A recognizable stand-in for a real color profile.
pub fn sample_icc_profile() -> Vec<u8> {
    (0u8..=255).cycle().take(512).collect()
}

/// A gradient PNG carrying `icc` in its iCCP chunk.
pub fn write_test_png_with_icc(path: &Path, width: u32, height: u32, icc: &[u8]) {
    let mut png_bytes = Vec::new();
    gradient_image(width, height)
        .write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
        .unwrap();

    let mut png = Png::from_bytes(Bytes::from(png_bytes)).unwrap();
    png.set_icc_profile(Some(Bytes::from(icc.to_vec())));

    let mut out = Vec::new();
    png.encoder().write_to(&mut out).unwrap();
    std::fs::write(path, out).unwrap();
}

/// A gradient JPEG whose Exif APP1 segment sets the Orientation tag.
pub fn write_test_jpeg_with_orientation(path: &Path, width: u32, height: u32, orientation: u16) {
    let mut jpeg_bytes = Vec::new();
    gradient_image(width, height)
        .write_to(&mut Cursor::new(&mut jpeg_bytes), ImageFormat::Jpeg)
        .unwrap();

    let mut jpeg = Jpeg::from_bytes(Bytes::from(jpeg_bytes)).unwrap();
    let segment = JpegSegment::new_with_contents(
        markers::APP1,
        Bytes::from(exif_orientation_payload(orientation)),
    );
    jpeg.segments_mut().insert(0, segment);

    let mut out = Vec::new();
    jpeg.encoder().write_to(&mut out).unwrap();
    std::fs::write(path, out).unwrap();
}

/// Little-endian TIFF header plus a one-entry IFD0 holding Orientation.
fn exif_orientation_payload(orientation: u16) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.extend_from_slice(b"Exif\0\0");
    payload.extend_from_slice(&[0x49, 0x49, 0x2A, 0x00]);
    payload.extend_from_slice(&8u32.to_le_bytes());
    payload.extend_from_slice(&1u16.to_le_bytes());
    payload.extend_from_slice(&0x0112u16.to_le_bytes());
    payload.extend_from_slice(&3u16.to_le_bytes());
    payload.extend_from_slice(&1u32.to_le_bytes());
    payload.extend_from_slice(&orientation.to_le_bytes());
    payload.extend_from_slice(&0u16.to_le_bytes());
    payload.extend_from_slice(&0u32.to_le_bytes());
    payload
}
