//! Image Module
//!
//! Raster images handed over by the engine (frames, thumbnails, document
//! crops) and the PNG encoding used to put them on the wire.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageDataError {
    #[error("pixel buffer holds {actual} bytes, {width}x{height} RGBA needs {expected}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("image codec: {0}")]
    Codec(#[from] image::ImageError),
}

/// 8-bit RGBA raster, row-major
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl ImageData {
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// Expand an 8-bit grayscale buffer to RGBA
    pub fn from_gray(width: u32, height: u32, gray: &[u8]) -> Self {
        let data = gray.iter().flat_map(|&v| [v, v, v, 0xFF]).collect();
        Self {
            width,
            height,
            data,
        }
    }

    /// Decode any supported container (PNG, JPEG) into RGBA
    pub fn decode(bytes: &[u8]) -> Result<Self, ImageDataError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            data: rgba.into_raw(),
        })
    }

    pub fn to_png(&self) -> Result<Vec<u8>, ImageDataError> {
        let expected = self.width as usize * self.height as usize * 4;
        let buffer = RgbaImage::from_raw(self.width, self.height, self.data.clone()).ok_or(
            ImageDataError::SizeMismatch {
                width: self.width,
                height: self.height,
                expected,
                actual: self.data.len(),
            },
        )?;

        let mut png = Cursor::new(Vec::new());
        buffer.write_to(&mut png, ImageFormat::Png)?;
        Ok(png.into_inner())
    }
}
