//! Finding the screen position of a target text.
//!
//! A first OCR pass over the image keeps regions that match the target at a
//! strict threshold. If that doesn't single out one region, the image is
//! upscaled and read again with a looser threshold; several survivors there
//! are settled by OCR confidence.

use std::cmp::Ordering;
use std::path::Path;

use image::DynamicImage;
use textseek_protocol::{Location, Pass, Resolution, TextRegion};
use tracing::{debug, info};

use crate::ocr::Recognizer;
use crate::scratch::Scratch;
use crate::similarity::Metric;
use crate::upscale::{upscale, MAX_UPSCALE_FACTOR};
use crate::{Error, Result};

/// Similarity required in the first pass.
pub const FIRST_OCR_THRESHOLD: f64 = 0.9;
/// Similarity required in the upscaled pass.
pub const SECOND_OCR_THRESHOLD: f64 = 0.7;
/// Enlargement used for the second pass.
pub const UPSCALE_FACTOR: u32 = 3;

/// Tuning for [`Locator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocateConfig {
    pub first_threshold: f64,
    pub second_threshold: f64,
    pub upscale_factor: u32,
    pub metric: Metric,
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            first_threshold: FIRST_OCR_THRESHOLD,
            second_threshold: SECOND_OCR_THRESHOLD,
            upscale_factor: UPSCALE_FACTOR,
            metric: Metric::Ratio,
        }
    }
}

impl LocateConfig {
    /// Reject thresholds outside `[0, 1]` and an upscale factor outside
    /// `1..=MAX_UPSCALE_FACTOR`.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("first threshold", self.first_threshold),
            ("second threshold", self.second_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidRequest(format!(
                    "{} must be between 0 and 1, got {}",
                    name, value
                )));
            }
        }
        if !(1..=MAX_UPSCALE_FACTOR).contains(&self.upscale_factor) {
            return Err(Error::InvalidRequest(format!(
                "upscale factor must be between 1 and {}, got {}",
                MAX_UPSCALE_FACTOR, self.upscale_factor
            )));
        }
        Ok(())
    }
}

/// A region that passed a threshold, with its score.
struct Candidate {
    region: TextRegion,
    similarity: f64,
}

/// Runs the two-pass search with a given recognizer.
pub struct Locator<R> {
    recognizer: R,
    config: LocateConfig,
}

impl<R: Recognizer> Locator<R> {
    pub fn new(recognizer: R, config: LocateConfig) -> Self {
        Self { recognizer, config }
    }

    pub fn config(&self) -> &LocateConfig {
        &self.config
    }

    /// Find `target` in the scratch copy of the image.
    ///
    /// Returns `Ok(None)` when neither pass has a candidate.
    pub fn locate(&self, scratch: &Scratch, target: &str) -> Result<Option<Location>> {
        if target.trim().is_empty() {
            return Err(Error::InvalidRequest(
                "Please enter text to search".to_string(),
            ));
        }
        self.config.validate()?;

        let original = scratch.load_source()?;
        debug!(
            "Searching for '{}' in {}x{} image",
            target,
            original.width(),
            original.height()
        );

        let first = self.candidates(&original, target, self.config.first_threshold)?;
        debug!("First pass: {} candidate(s)", first.len());
        if let [only] = first.as_slice() {
            let (x, y) = only.region.center();
            return Ok(Some(self.location(only, x, y, Pass::Original, Resolution::Unique)));
        }

        let factor = self.config.upscale_factor;
        let upscaled = upscale(&original, factor)?;
        scratch.store_upscaled(&upscaled)?;
        drop(original);

        let second = self.candidates(&upscaled, target, self.config.second_threshold)?;
        debug!("Upscaled pass (x{}): {} candidate(s)", factor, second.len());

        let (best, resolution) = match second.len() {
            0 => {
                info!("Could not find '{}'", target);
                return Ok(None);
            }
            1 => (&second[0], Resolution::Unique),
            _ => (most_confident(&second), Resolution::HighestConfidence),
        };

        let (x, y) = scale_down_center(&best.region, factor);
        Ok(Some(self.location(best, x, y, Pass::Upscaled, resolution)))
    }

    fn candidates(&self, image: &DynamicImage, target: &str, threshold: f64) -> Result<Vec<Candidate>> {
        let regions = self.recognizer.recognize(image)?;
        Ok(regions
            .into_iter()
            .filter_map(|region| {
                let similarity = self.config.metric.score(&region.text, target);
                (similarity >= threshold).then_some(Candidate { region, similarity })
            })
            .collect())
    }

    fn location(&self, candidate: &Candidate, x: i32, y: i32, pass: Pass, resolution: Resolution) -> Location {
        info!(
            "Found '{}' at ({}, {}) [{:?}, {:?}]",
            candidate.region.text, x, y, pass, resolution
        );
        Location {
            text: candidate.region.text.clone(),
            x,
            y,
            similarity: candidate.similarity,
            pass,
            resolution,
        }
    }
}

/// Center of a region found in an image upscaled by `factor`, mapped back.
///
/// Position and half-size are floored separately.
fn scale_down_center(region: &TextRegion, factor: u32) -> (i32, i32) {
    let f = i32::try_from(factor.max(1)).unwrap_or(i32::MAX);
    let half = f.saturating_mul(2);
    (
        region.x.div_euclid(f).saturating_add(region.width.div_euclid(half)),
        region.y.div_euclid(f).saturating_add(region.height.div_euclid(half)),
    )
}

/// Highest OCR confidence; ties go to the higher similarity, then the earliest detection.
fn most_confident(candidates: &[Candidate]) -> &Candidate {
    let mut best = &candidates[0];
    for candidate in &candidates[1..] {
        if compare(candidate, best) == Ordering::Greater {
            best = candidate;
        }
    }
    best
}

fn compare(a: &Candidate, b: &Candidate) -> Ordering {
    let conf = |c: &Candidate| c.region.confidence.unwrap_or(f32::NEG_INFINITY);
    conf(a)
        .total_cmp(&conf(b))
        .then_with(|| a.similarity.total_cmp(&b.similarity))
}

/// Locate `target` in the image file at `image_path`.
///
/// Owns the scratch directory for the duration of the search and cleans it
/// up whether or not the search succeeds.
pub fn find_coordinates<R: Recognizer>(
    recognizer: R,
    image_path: &Path,
    target: &str,
    config: LocateConfig,
    keep_scratch: bool,
) -> Result<Option<Location>> {
    let scratch = Scratch::from_file(image_path)?;
    find_coordinates_in(recognizer, scratch, target, config, keep_scratch)
}

/// Locate `target` in an already prepared scratch copy, then clean it up.
///
/// The scratch directory is removed (or kept, with `keep_scratch`) whatever
/// the outcome of the search.
pub fn find_coordinates_in<R: Recognizer>(
    recognizer: R,
    scratch: Scratch,
    target: &str,
    config: LocateConfig,
    keep_scratch: bool,
) -> Result<Option<Location>> {
    debug!("Temporary image path: {}", scratch.source_path().display());
    let result = Locator::new(recognizer, config).locate(&scratch, target);
    if let Some(kept) = scratch.finish(keep_scratch) {
        info!("Scratch files kept in {}", kept.display());
    }
    result
}
