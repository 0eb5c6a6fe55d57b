//! In-memory representation of a generated image.

use base64::Engine as _;
use image::ImageFormat;

/// Image bytes as fetched, plus what decoding them revealed.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    bytes: Vec<u8>,
    format: ImageFormat,
    width: u32,
    height: u32,
}

impl GeneratedImage {
    /// Decode raw bytes, rejecting anything the `image` crate cannot read.
    pub fn decode(bytes: Vec<u8>) -> Result<Self, image::ImageError> {
        let format = image::guess_format(&bytes)?;
        let decoded = image::load_from_memory_with_format(&bytes, format)?;

        Ok(Self {
            width: decoded.width(),
            height: decoded.height(),
            bytes,
            format,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    /// Preferred file extension for saving the bytes unchanged.
    pub fn extension(&self) -> &'static str {
        self.format.extensions_str().first().copied().unwrap_or("img")
    }

    /// `data:` URL suitable for an `<img src>` attribute.
    pub fn data_url(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{}", self.mime_type(), encoded)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::encoded_image;
    use super::*;

    #[test]
    fn test_decode_png() {
        let bytes = encoded_image(4, 3, ImageFormat::Png);
        let image = GeneratedImage::decode(bytes.clone()).unwrap();

        assert_eq!(image.width(), 4);
        assert_eq!(image.height(), 3);
        assert_eq!(image.format(), ImageFormat::Png);
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.extension(), "png");
        assert_eq!(image.bytes(), bytes.as_slice());
    }

    #[test]
    fn test_decode_jpeg() {
        let image = GeneratedImage::decode(encoded_image(8, 8, ImageFormat::Jpeg)).unwrap();
        assert_eq!(image.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(GeneratedImage::decode(b"<html>not an image</html>".to_vec()).is_err());
        assert!(GeneratedImage::decode(Vec::new()).is_err());
    }

    #[test]
    fn test_data_url_prefix() {
        let image = GeneratedImage::decode(encoded_image(2, 2, ImageFormat::Png)).unwrap();
        assert!(image.data_url().starts_with("data:image/png;base64,iVBORw0KGgo"));
    }
}
