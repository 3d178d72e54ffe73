use crate::error::{ConversionError, Result};
use crate::resolve::Dimensions;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use img_parts::jpeg::Jpeg;
use img_parts::png::Png;
use img_parts::webp::WebP;
use img_parts::{Bytes, ImageICC};
use std::io::Cursor;
use std::path::Path;

/// libwebp compression effort (0-6). Fixed at the slowest, smallest setting:
/// this is a batch tool, output size wins over encode speed.
pub const WEBP_METHOD: i32 = 6;

/// WebP encoding parameters, immutable for a run.
#[derive(Debug, Clone, Copy)]
pub struct EncodingSpec {
    pub quality: u8,
    pub lossless: bool,
}

impl EncodingSpec {
    pub fn new(quality: u8, lossless: bool) -> Result<Self> {
        if quality > 100 {
            return Err(ConversionError::InvalidQuality(quality));
        }
        Ok(Self { quality, lossless })
    }
}

/// One input file's decoded pixels plus the metadata that must survive
/// re-encoding: the EXIF orientation (applied to the pixels, then dropped)
/// and the ICC profile (an opaque blob, copied into the output unmodified).
pub struct DecodedImage {
    pub pixels: DynamicImage,
    pub orientation: Option<u16>,
    pub icc_profile: Option<Vec<u8>>,
}

impl DecodedImage {
    pub fn dimensions(&self) -> Dimensions {
        let (width, height) = self.pixels.dimensions();
        Dimensions::new(width, height)
    }
}

/// Read and decode one image file, keeping its orientation tag and ICC blob.
pub fn load_image(path: &Path) -> Result<DecodedImage> {
    let bytes = std::fs::read(path)?;
    let pixels = image::load_from_memory(&bytes)?;
    let orientation = detect_exif_orientation(&bytes);
    let icc_profile = extract_icc_profile(&bytes);

    Ok(DecodedImage {
        pixels,
        orientation,
        icc_profile,
    })
}

/// Extract the EXIF Orientation tag (1-8). Returns None if missing or invalid.
pub fn detect_exif_orientation(bytes: &[u8]) -> Option<u16> {
    let mut cursor = Cursor::new(bytes);
    let exif = exif::Reader::new().read_from_container(&mut cursor).ok()?;
    let field = exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?;
    // The tag can be stored as Short or Long; get_uint covers both
    let value = field.value.get_uint(0)?;
    let orientation = value as u16;
    if (1..=8).contains(&orientation) {
        Some(orientation)
    } else {
        None
    }
}

/// Pull the embedded ICC profile out of a JPEG or PNG container. The blob is
/// never parsed here, only carried.
pub fn extract_icc_profile(bytes: &[u8]) -> Option<Vec<u8>> {
    if bytes.starts_with(&[0xFF, 0xD8]) {
        let jpeg = Jpeg::from_bytes(Bytes::from(bytes.to_vec())).ok()?;
        return jpeg.icc_profile().map(|icc| icc.to_vec());
    }
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        let png = Png::from_bytes(Bytes::from(bytes.to_vec())).ok()?;
        return png.icc_profile().map(|icc| icc.to_vec());
    }
    None
}

/// Rotate/mirror the pixels into display-correct orientation. The returned
/// image carries no orientation metadata; tag 1, unknown tags and None are
/// no-ops.
pub fn apply_orientation(img: DynamicImage, orientation: Option<u16>) -> DynamicImage {
    match orientation.unwrap_or(1) {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}

/// Orient, resample and encode one image.
///
/// The caller resolves `target` from the image's own decoded size; here the
/// pixels are first brought into display orientation, resized with Lanczos3
/// when the size actually changes, then encoded as WebP. An ICC blob, if
/// present, is re-attached to the encoded output byte for byte.
pub fn transform_image(
    decoded: DecodedImage,
    target: Dimensions,
    encoding: &EncodingSpec,
) -> Result<Vec<u8>> {
    let oriented = apply_orientation(decoded.pixels, decoded.orientation);

    let resized = if oriented.dimensions() == (target.width, target.height) {
        oriented
    } else {
        oriented.resize_exact(target.width, target.height, FilterType::Lanczos3)
    };

    encode_webp(&resized, encoding, decoded.icc_profile.as_deref())
}

/// Encode to WebP with libwebp's advanced config. Avoids an unnecessary
/// alpha channel to reduce file size.
pub fn encode_webp(
    img: &DynamicImage,
    encoding: &EncodingSpec,
    icc: Option<&[u8]>,
) -> Result<Vec<u8>> {
    let mut config = webp::WebPConfig::new()
        .map_err(|_| ConversionError::WebpEncode("failed to initialize WebPConfig".to_string()))?;
    config.quality = encoding.quality as f32;
    config.lossless = if encoding.lossless { 1 } else { 0 };
    config.method = WEBP_METHOD;

    let result = if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        let (w, h) = rgba.dimensions();
        webp::Encoder::from_rgba(&rgba, w, h).encode_advanced(&config)
    } else {
        let rgb = img.to_rgb8();
        let (w, h) = rgb.dimensions();
        webp::Encoder::from_rgb(&rgb, w, h).encode_advanced(&config)
    };
    let mem = result.map_err(|e| ConversionError::WebpEncode(format!("{e:?}")))?;

    let encoded = mem.to_vec();

    match icc {
        Some(icc_data) => embed_icc_webp(encoded, icc_data),
        None => Ok(encoded),
    }
}

/// Attach an ICC profile to encoded WebP bytes as an ICCP chunk.
fn embed_icc_webp(webp_data: Vec<u8>, icc: &[u8]) -> Result<Vec<u8>> {
    let mut container = WebP::from_bytes(Bytes::from(webp_data))?;
    container.set_icc_profile(Some(Bytes::from(icc.to_vec())));

    let mut output = Vec::new();
    container.encoder().write_to(&mut output)?;

    Ok(output)
}
