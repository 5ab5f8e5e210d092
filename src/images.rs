//! Data-URI rasters (logos, signatures) decoded into embeddable images.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::format::is_valid_image;
use crate::model::{EmbeddedImage, ImageFormat};

#[derive(Debug)]
pub enum ImageError {
    /// Failed the structural data-URI check.
    NotDataUri,
    UnsupportedFormat(String),
    Base64(base64::DecodeError),
    /// Bytes do not look like the format the URI declares.
    Malformed(&'static str),
    Decode(image::ImageError),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::NotDataUri => write!(f, "not a base64 image data URI"),
            ImageError::UnsupportedFormat(mime) => write!(f, "unsupported image type {mime}"),
            ImageError::Base64(e) => write!(f, "bad base64 payload: {e}"),
            ImageError::Malformed(what) => write!(f, "malformed image: {what}"),
            ImageError::Decode(e) => write!(f, "could not decode image: {e}"),
        }
    }
}

impl std::error::Error for ImageError {}

/// Pick the embedding format from the URI prefix, the same way a browser
/// would trust the declared MIME type.
pub fn declared_format(uri: &str) -> Result<ImageFormat, ImageError> {
    let mime = uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split(';').next())
        .ok_or(ImageError::NotDataUri)?;
    match mime.to_ascii_lowercase().as_str() {
        "image/png" => Ok(ImageFormat::Png),
        "image/jpeg" | "image/jpg" => Ok(ImageFormat::Jpeg),
        other => Err(ImageError::UnsupportedFormat(other.to_string())),
    }
}

pub fn decode_data_uri(uri: &str) -> Result<EmbeddedImage, ImageError> {
    if !is_valid_image(Some(uri)) {
        return Err(ImageError::NotDataUri);
    }
    let format = declared_format(uri)?;
    let (_, payload) = uri.split_once(";base64,").ok_or(ImageError::NotDataUri)?;
    let cleaned: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let data = STANDARD.decode(cleaned.as_bytes()).map_err(ImageError::Base64)?;

    match format {
        ImageFormat::Jpeg => prepare_jpeg(data),
        ImageFormat::Png => prepare_png(&data),
    }
}

/// Walk JPEG markers up to the first start-of-frame and read its geometry.
/// Returns (width, height, components).
fn jpeg_frame_info(data: &[u8]) -> Option<(u32, u32, u8)> {
    if data.len() < 4 || data[0] != 0xFF || data[1] != 0xD8 {
        return None;
    }
    let mut i = 2;
    while i + 4 < data.len() {
        if data[i] != 0xFF {
            return None;
        }
        let marker = data[i + 1];
        // Fill bytes and standalone markers carry no length
        if marker == 0xFF {
            i += 1;
            continue;
        }
        if marker == 0x01 || (0xD0..=0xD7).contains(&marker) {
            i += 2;
            continue;
        }
        if marker == 0xD9 || marker == 0xDA {
            return None;
        }
        let len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
        let is_sof = matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC);
        if is_sof && i + 9 < data.len() {
            let height = u16::from_be_bytes([data[i + 5], data[i + 6]]) as u32;
            let width = u16::from_be_bytes([data[i + 7], data[i + 8]]) as u32;
            let components = data[i + 9];
            return Some((width, height, components));
        }
        if len < 2 {
            return None;
        }
        i += 2 + len;
    }
    None
}

fn prepare_jpeg(data: Vec<u8>) -> Result<EmbeddedImage, ImageError> {
    let (w, h, components) =
        jpeg_frame_info(&data).ok_or(ImageError::Malformed("no JPEG frame header"))?;
    if w == 0 || h == 0 {
        return Err(ImageError::Malformed("zero-sized JPEG"));
    }
    if !matches!(components, 1 | 3 | 4) {
        return Err(ImageError::Malformed("unsupported JPEG component count"));
    }
    Ok(EmbeddedImage {
        data,
        format: ImageFormat::Jpeg,
        pixel_width: w,
        pixel_height: h,
        components,
        alpha: None,
    })
}

fn prepare_png(data: &[u8]) -> Result<EmbeddedImage, ImageError> {
    if data.len() < 24 || &data[..4] != b"\x89PNG" {
        return Err(ImageError::Malformed("missing PNG signature"));
    }
    let reader = image::ImageReader::with_format(
        std::io::Cursor::new(data),
        image::ImageFormat::Png,
    );
    let decoded = reader.decode().map_err(ImageError::Decode)?;
    let rgba = decoded.to_rgba8();
    let (w, h) = (rgba.width(), rgba.height());
    if w == 0 || h == 0 {
        return Err(ImageError::Malformed("zero-sized PNG"));
    }
    let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);

    let rgb_data: Vec<u8> = rgba
        .pixels()
        .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
        .collect();
    let alpha = has_alpha.then(|| {
        let alpha_data: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();
        miniz_oxide::deflate::compress_to_vec_zlib(&alpha_data, 6)
    });

    Ok(EmbeddedImage {
        data: miniz_oxide::deflate::compress_to_vec_zlib(&rgb_data, 6),
        format: ImageFormat::Png,
        pixel_width: w,
        pixel_height: h,
        components: 3,
        alpha,
    })
}
