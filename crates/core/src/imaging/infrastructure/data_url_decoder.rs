//! Decodes `data:image/...;base64,<payload>` strings into RGB frames.

use base64::Engine;
use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum ImageDecodeError {
    #[error("image payload has no ',' separator")]
    MissingSeparator,
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("could not decode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("decoded image is empty")]
    Empty,
}

/// Decode the part after the first comma of a data URL into an RGB frame.
///
/// Alpha is dropped; grayscale and palette images are expanded to RGB.
pub fn decode_data_url(data_url: &str) -> Result<Frame, ImageDecodeError> {
    let (_, payload) = data_url
        .split_once(',')
        .ok_or(ImageDecodeError::MissingSeparator)?;
    let bytes = base64::engine::general_purpose::STANDARD.decode(payload.trim())?;
    decode_image_bytes(&bytes)
}

pub fn decode_image_bytes(bytes: &[u8]) -> Result<Frame, ImageDecodeError> {
    let rgb = image::load_from_memory(bytes)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(ImageDecodeError::Empty);
    }
    Ok(Frame::new(rgb.into_raw(), width, height, 3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_data_url(width: u32, height: u32) -> String {
        let mut img = image::RgbaImage::new(width, height);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgba([50, 100, 200, 255]);
        }
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(bytes)
        )
    }

    #[test]
    fn test_decodes_png_data_url_to_rgb() {
        let frame = decode_data_url(&png_data_url(8, 6)).unwrap();
        assert_eq!(frame.width(), 8);
        assert_eq!(frame.height(), 6);
        assert_eq!(frame.channels(), 3);
        assert_eq!(&frame.data()[..3], &[50, 100, 200]);
    }

    #[test]
    fn test_only_text_after_first_comma_is_decoded() {
        let url = png_data_url(2, 2);
        let payload = url.split_once(',').unwrap().1;
        let frame = decode_data_url(&format!("anything-at-all,{payload}")).unwrap();
        assert_eq!(frame.width(), 2);
    }

    #[test]
    fn test_missing_separator() {
        assert!(matches!(
            decode_data_url("iVBORw0KGgo"),
            Err(ImageDecodeError::MissingSeparator)
        ));
    }

    #[test]
    fn test_invalid_base64() {
        assert!(matches!(
            decode_data_url("data:image/png;base64,@@not base64@@"),
            Err(ImageDecodeError::Base64(_))
        ));
    }

    #[test]
    fn test_valid_base64_but_not_an_image() {
        let payload = base64::engine::general_purpose::STANDARD.encode(b"hello world");
        assert!(matches!(
            decode_data_url(&format!("data:image/png;base64,{payload}")),
            Err(ImageDecodeError::Image(_))
        ));
    }

    #[test]
    fn test_empty_payload() {
        assert!(decode_data_url("data:image/png;base64,").is_err());
    }
}
