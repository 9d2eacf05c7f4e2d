/// MIME type detection for selected files
///
/// Content sniffing wins over the extension, so a renamed text file is not
/// mistaken for an image.

use image::ImageFormat;

/// Reported when neither the content nor the extension is recognized
pub const UNKNOWN_MIME: &str = "application/octet-stream";

/// Determine the MIME type of a file from its bytes, falling back to its name.
pub fn detect(file_name: &str, bytes: &[u8]) -> &'static str {
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type();
    }

    ImageFormat::from_path(file_name)
        .map(|format| format.to_mime_type())
        .unwrap_or(UNKNOWN_MIME)
}

/// Whether a MIME type matches `image/*`
pub fn is_image(mime_type: &str) -> bool {
    mime_type
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
        && mime_type.len() > 6
}
