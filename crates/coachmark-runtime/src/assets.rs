#![forbid(unsafe_code)]

//! Arrow image resolution and PNG decoding.

use coachmark_core::geometry::Size;
use coachmark_core::guide::{GuideItem, ImageHandle};
use coachmark_core::style::StyleConfig;
use image::ImageFormat;
use thiserror::Error;

/// Name of the arrow image shipped with this crate.
pub const BUNDLED_ARROW_NAME: &str = "coachmark.arrow";

static BUNDLED_ARROW_PNG: &[u8] = include_bytes!("../assets/arrow.png");

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to decode image {name:?}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },
}

/// Decode PNG bytes into straight RGBA8. One pixel maps to one point.
pub fn decode_png(name: &str, bytes: &[u8]) -> Result<ImageHandle, AssetError> {
    let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Png).map_err(|source| {
        AssetError::Decode {
            name: name.to_owned(),
            source,
        }
    })?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(ImageHandle::with_pixels(
        name,
        Size::new(f64::from(width), f64::from(height)),
        rgba.into_raw(),
    ))
}

/// The default up-pointing arrow.
pub fn bundled_arrow() -> Result<ImageHandle, AssetError> {
    decode_png(BUNDLED_ARROW_NAME, BUNDLED_ARROW_PNG)
}

/// Arrow for `item`: its own image, else the style default, else the
/// bundled arrow.
pub fn resolve_arrow(item: &GuideItem, style: &StyleConfig) -> Result<ImageHandle, AssetError> {
    if let Some(image) = item.arrow().or(style.default_arrow_image.as_ref()) {
        return Ok(image.clone());
    }
    bundled_arrow()
}
