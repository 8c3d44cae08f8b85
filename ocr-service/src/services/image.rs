//! Image decoding for uploaded files.
//!
//! The container format is sniffed from the bytes themselves; the file name
//! and declared content type are never trusted.

use bytes::Bytes;
use image::{DynamicImage, ImageFormat};
use std::borrow::Cow;
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageDecodeError {
    #[error("unrecognised image format")]
    UnknownFormat,

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// An upload that decoded successfully.
///
/// Keeps the original bytes so formats the provider accepts natively can be
/// forwarded without re-encoding.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    image: DynamicImage,
    format: ImageFormat,
    bytes: Bytes,
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// MIME type and bytes suitable for an inline-data request part.
    ///
    /// PNG, JPEG and WebP pass through untouched; anything else is re-encoded
    /// as PNG.
    pub fn inline_payload(&self) -> Result<(&'static str, Cow<'_, [u8]>), image::ImageError> {
        match self.format {
            ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP => {
                Ok((self.format.to_mime_type(), Cow::Borrowed(self.bytes.as_ref())))
            }
            _ => {
                let mut buf = Vec::new();
                self.image
                    .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
                Ok((ImageFormat::Png.to_mime_type(), Cow::Owned(buf)))
            }
        }
    }
}

/// Decode raw upload bytes into a raster image.
pub fn decode(bytes: Bytes) -> Result<DecodedImage, ImageDecodeError> {
    let format = image::guess_format(&bytes).map_err(|_| ImageDecodeError::UnknownFormat)?;
    let image = image::load_from_memory_with_format(&bytes, format)?;

    Ok(DecodedImage {
        image,
        format,
        bytes,
    })
}
