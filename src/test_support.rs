/// In-memory image fixtures for unit tests
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

use crate::intake;
use crate::state::data::UploadedImage;

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 7 % 256) as u8, (y * 11 % 256) as u8, 128])
    })
}

fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    gradient(width, height)
        .write_to(&mut out, format)
        .expect("encode test image");
    out.into_inner()
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Png)
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Jpeg)
}

/// A validated 8x8 PNG upload with the given file name
pub fn png_upload(file_name: &str) -> UploadedImage {
    intake::submit_bytes(file_name, png_bytes(8, 8)).expect("valid test upload")
}
