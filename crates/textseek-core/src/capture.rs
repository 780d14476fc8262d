//! Screen capture via the xcap crate.

use image::DynamicImage;
use tracing::debug;
use xcap::Monitor;

use crate::{Error, Result};

/// A captured monitor image and how to map its pixels back to the desktop.
#[derive(Debug, Clone)]
pub struct ScreenFrame {
    /// Captured pixels (physical resolution).
    pub image: DynamicImage,
    /// Top-left corner of the monitor in desktop coordinates.
    pub origin: (i32, i32),
    /// Physical pixels per logical pixel.
    pub scale_factor: f32,
}

impl ScreenFrame {
    /// Map a pixel position in `image` to desktop (cursor) coordinates.
    pub fn to_screen(&self, x: i32, y: i32) -> (i32, i32) {
        let scale = if self.scale_factor > 0.0 {
            self.scale_factor
        } else {
            1.0
        };
        (
            self.origin.0 + (x as f32 / scale).round() as i32,
            self.origin.1 + (y as f32 / scale).round() as i32,
        )
    }
}

/// Capture the primary monitor, or the monitor at `index`.
pub fn capture_screen(index: Option<usize>) -> Result<ScreenFrame> {
    let monitors = Monitor::all().map_err(|e| Error::Capture(format!("Failed to get monitors: {}", e)))?;

    let monitor = match index {
        Some(i) => monitors
            .get(i)
            .cloned()
            .ok_or_else(|| {
                Error::Capture(format!(
                    "Monitor index {} not found ({} available)",
                    i,
                    monitors.len()
                ))
            })?,
        None => monitors
            .iter()
            .find(|m| m.is_primary().unwrap_or(false))
            .or_else(|| monitors.first())
            .cloned()
            .ok_or_else(|| Error::Capture("No monitors detected".to_string()))?,
    };

    let origin = (monitor.x().unwrap_or(0), monitor.y().unwrap_or(0));
    let scale_factor = monitor.scale_factor().unwrap_or(1.0);

    let image = monitor
        .capture_image()
        .map_err(|e| Error::Capture(e.to_string()))?;

    debug!(
        "Captured {}x{} at {:?} (scale {})",
        image.width(),
        image.height(),
        origin,
        scale_factor
    );

    Ok(ScreenFrame {
        image: DynamicImage::ImageRgba8(image),
        origin,
        scale_factor,
    })
}
