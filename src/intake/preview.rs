/// On-screen preview of the selected image
use iced::widget::image::Handle;
use image::{imageops::FilterType, ImageResult};

/// Longest edge of a generated preview
pub const PREVIEW_SIZE: u32 = 512;

/// A decoded, downscaled copy of the upload, ready for the image widget
#[derive(Debug, Clone)]
pub struct Preview {
    pub width: u32,
    pub height: u32,
    handle: Handle,
}

impl Preview {
    pub fn handle(&self) -> Handle {
        self.handle.clone()
    }
}

/// Decode image bytes and build a preview no larger than `PREVIEW_SIZE`.
/// Smaller images are kept at their native size.
pub fn generate(bytes: &[u8]) -> ImageResult<Preview> {
    let img = image::load_from_memory(bytes)?;

    let img = if img.width() > PREVIEW_SIZE || img.height() > PREVIEW_SIZE {
        img.resize(PREVIEW_SIZE, PREVIEW_SIZE, FilterType::Triangle)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(Preview {
        width,
        height,
        handle: Handle::from_rgba(width, height, rgba.into_raw()),
    })
}
