//! OCR (Optical Character Recognition) module.
//!
//! Provides text detection and recognition from screenshots using the ocrs library.

mod engine;
mod models;

use image::DynamicImage;
use textseek_protocol::TextRegion;

use crate::Result;

pub use engine::{Granularity, OcrService};
pub use models::find_models_dir;

/// Anything that can turn an image into text regions.
pub trait Recognizer {
    /// Detect and recognize all text in `image`.
    fn recognize(&self, image: &DynamicImage) -> Result<Vec<TextRegion>>;
}

impl<R: Recognizer + ?Sized> Recognizer for &R {
    fn recognize(&self, image: &DynamicImage) -> Result<Vec<TextRegion>> {
        (**self).recognize(image)
    }
}
