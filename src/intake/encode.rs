use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::ImageResult;
use std::sync::Arc;

/// JPEG quality used when a non-JPEG upload is transcoded for transport
const TRANSPORT_JPEG_QUALITY: u8 = 90;

/// Raw bytes of a selected image together with their MIME type.
///
/// Cheap to clone; the bytes are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    mime_type: String,
    bytes: Arc<[u8]>,
}

impl EncodedImage {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_jpeg(&self) -> bool {
        self.mime_type.eq_ignore_ascii_case("image/jpeg")
    }

    /// `data:` URL carrying the bytes as base64, built on demand
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type(), STANDARD.encode(&self.bytes))
    }

    /// JPEG bytes suitable for upload.
    ///
    /// JPEG input passes through untouched. Anything else is decoded and
    /// re-encoded; alpha is dropped since JPEG has none.
    pub fn to_jpeg(&self) -> ImageResult<Vec<u8>> {
        if self.is_jpeg() {
            return Ok(self.bytes.to_vec());
        }

        let rgb = image::load_from_memory(&self.bytes)?.to_rgb8();
        let mut out = Vec::new();
        JpegEncoder::new_with_quality(&mut out, TRANSPORT_JPEG_QUALITY).encode_image(&rgb)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{jpeg_bytes, png_bytes};

    #[test]
    fn test_jpeg_passes_through() {
        let bytes = jpeg_bytes(16, 16);
        let encoded = EncodedImage::new("image/jpeg", bytes.clone());
        assert_eq!(encoded.to_jpeg().unwrap(), bytes);
    }

    #[test]
    fn test_png_is_transcoded() {
        let encoded = EncodedImage::new("image/png", png_bytes(16, 16));
        let jpeg = encoded.to_jpeg().unwrap();

        assert_eq!(image::guess_format(&jpeg).unwrap(), image::ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 16));
    }

    #[test]
    fn test_data_url_round_trips() {
        let bytes = png_bytes(4, 4);
        let encoded = EncodedImage::new("image/png", bytes.clone());

        let url = encoded.data_url();
        let payload = url.strip_prefix("data:image/png;base64,").unwrap();
        assert_eq!(STANDARD.decode(payload).unwrap(), bytes);
    }

    #[test]
    fn test_garbage_fails_to_transcode() {
        let encoded = EncodedImage::new("image/png", b"not really a png".to_vec());
        assert!(encoded.to_jpeg().is_err());
    }
}
