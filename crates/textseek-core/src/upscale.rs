//! Image enlargement for the second OCR pass.

use image::imageops::FilterType;
use image::DynamicImage;
use tracing::trace;

use crate::{Error, Result};

/// Largest accepted enlargement factor.
pub const MAX_UPSCALE_FACTOR: u32 = 8;

/// Pixel count the enlarged image may not exceed.
pub const MAX_UPSCALED_PIXELS: u64 = 150_000_000;

/// Dimensions of a `width` x `height` image enlarged by `factor`, if they fit
/// the pixel budget.
pub fn upscaled_size(width: u32, height: u32, factor: u32) -> Option<(u32, u32)> {
    let width = width.checked_mul(factor)?;
    let height = height.checked_mul(factor)?;
    let pixels = u64::from(width) * u64::from(height);
    (pixels <= MAX_UPSCALED_PIXELS).then_some((width, height))
}

/// Enlarge `image` by an integer `factor` in both dimensions using Lanczos3.
pub fn upscale(image: &DynamicImage, factor: u32) -> Result<DynamicImage> {
    if factor > MAX_UPSCALE_FACTOR {
        return Err(Error::InvalidRequest(format!(
            "upscale factor must be at most {}, got {}",
            MAX_UPSCALE_FACTOR, factor
        )));
    }
    if factor <= 1 {
        return Ok(image.clone());
    }

    let (width, height) = upscaled_size(image.width(), image.height(), factor).ok_or_else(|| {
        Error::InvalidRequest(format!(
            "{}x{} image is too large to upscale by {}",
            image.width(),
            image.height(),
            factor
        ))
    })?;
    trace!(
        "Upscaling {}x{} -> {}x{}",
        image.width(),
        image.height(),
        width,
        height
    );

    Ok(image.resize_exact(width, height, FilterType::Lanczos3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_upscale_dimensions() {
        let image = DynamicImage::new_rgb8(4, 3);
        let scaled = upscale(&image, 3).unwrap();
        assert_eq!((scaled.width(), scaled.height()), (12, 9));
    }

    #[test]
    fn test_factor_one_is_a_copy() {
        let image = DynamicImage::new_rgb8(5, 7);
        let scaled = upscale(&image, 1).unwrap();
        assert_eq!((scaled.width(), scaled.height()), (5, 7));
    }

    #[test]
    fn test_flat_color_survives() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(6, 6, Rgb([200, 10, 10])));
        let scaled = upscale(&image, 2).unwrap().to_rgb8();
        let Rgb([r, g, b]) = *scaled.get_pixel(5, 5);
        assert!(r.abs_diff(200) <= 1 && g.abs_diff(10) <= 1 && b.abs_diff(10) <= 1);
    }

    #[test]
    fn test_oversized_factor_rejected() {
        let image = DynamicImage::new_rgb8(4, 3);
        assert!(matches!(upscale(&image, u32::MAX), Err(Error::InvalidRequest(_))));
        assert!(matches!(
            upscale(&image, MAX_UPSCALE_FACTOR + 1),
            Err(Error::InvalidRequest(_))
        ));
        assert!(upscale(&image, MAX_UPSCALE_FACTOR).is_ok());
    }

    #[test]
    fn test_upscaled_size_budget() {
        assert_eq!(upscaled_size(1920, 1080, 3), Some((5760, 3240)));
        assert_eq!(upscaled_size(u32::MAX, 1, 2), None);
        assert_eq!(upscaled_size(20_000, 20_000, 8), None);
    }
}
