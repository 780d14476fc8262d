//! Engine for textseek.
//!
//! Runs OCR over a screenshot, finds a target string among the detected
//! text with a two-pass fuzzy match, and moves the cursor to it.

pub mod capture;
pub mod cursor;
pub mod error;
pub mod locate;
pub mod ocr;
pub mod scratch;
pub mod similarity;
pub mod upscale;

pub use capture::{capture_screen, ScreenFrame};
pub use cursor::{move_to_location, tour, EnigoPointer, Motion, Pointer};
pub use error::{Error, Result};
pub use locate::{find_coordinates, find_coordinates_in, LocateConfig, Locator};
pub use ocr::{find_models_dir, Granularity, OcrService, Recognizer};
pub use scratch::Scratch;
pub use similarity::{similarity_ratio, Metric};
pub use upscale::{upscale, upscaled_size, MAX_UPSCALE_FACTOR};
