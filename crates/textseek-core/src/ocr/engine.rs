//! OCR engine wrapper using the ocrs library.

use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use image::DynamicImage;
use ocrs::{ImageSource, OcrEngine, OcrEngineParams, TextItem};
use rten::Model;
use textseek_protocol::TextRegion;
use tracing::{debug, trace};

use super::Recognizer;
use crate::{Error, Result};

/// Unit of text reported per region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Granularity {
    /// One region per text line.
    #[default]
    Line,
    /// One region per word.
    Word,
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "line" => Ok(Granularity::Line),
            "word" => Ok(Granularity::Word),
            other => Err(format!("unknown granularity '{}' (expected line or word)", other)),
        }
    }
}

/// OCR service for text detection and recognition.
pub struct OcrService {
    engine: OcrEngine,
    granularity: Granularity,
}

impl OcrService {
    /// Create a new OCR service by loading models from the given directory.
    pub fn new(models_dir: &Path, granularity: Granularity) -> Result<Self> {
        let engine = load_engine(models_dir).map_err(|e| Error::Ocr(format!("{:#}", e)))?;
        Ok(Self {
            engine,
            granularity,
        })
    }

    fn read_regions(&self, image: &DynamicImage) -> anyhow::Result<Vec<TextRegion>> {
        let img = image.to_rgb8();

        let (width, height) = (img.width(), img.height());
        trace!("Image loaded: {}x{}", width, height);

        let img_source = ImageSource::from_bytes(img.as_raw(), (width, height))
            .context("Failed to create image source")?;

        let ocr_input = self
            .engine
            .prepare_input(img_source)
            .context("Failed to prepare OCR input")?;

        let word_rects = self
            .engine
            .detect_words(&ocr_input)
            .context("Failed to detect words")?;

        trace!("Detected {} word regions", word_rects.len());

        let line_rects = self.engine.find_text_lines(&ocr_input, &word_rects);

        let line_texts = self
            .engine
            .recognize_text(&ocr_input, &line_rects)
            .context("Failed to recognize text")?;

        let mut regions = Vec::new();

        for line in line_texts.iter().flatten() {
            match self.granularity {
                Granularity::Line => {
                    let text = line.to_string();
                    if text.trim().is_empty() {
                        continue;
                    }
                    let rects = line.words().map(|w| item_rect(&w));
                    if let Some(region) = region_from_rects(text, rects) {
                        regions.push(region);
                    }
                }
                Granularity::Word => {
                    for word in line.words() {
                        let text = word.to_string();
                        if text.trim().is_empty() {
                            continue;
                        }
                        let rect = item_rect(&word);
                        if let Some(region) = region_from_rects(text, [rect]) {
                            regions.push(region);
                        }
                    }
                }
            }
        }

        debug!("Detected {} text regions ({:?})", regions.len(), self.granularity);

        Ok(regions)
    }
}

impl Recognizer for OcrService {
    fn recognize(&self, image: &DynamicImage) -> Result<Vec<TextRegion>> {
        self.read_regions(image)
            .map_err(|e| Error::Ocr(format!("{:#}", e)))
    }
}

fn load_engine(models_dir: &Path) -> anyhow::Result<OcrEngine> {
    let detection_path = models_dir.join(super::models::DETECTION_MODEL);
    let recognition_path = models_dir.join(super::models::RECOGNITION_MODEL);

    debug!("Loading OCR detection model from {:?}", detection_path);
    let detection_model = Model::load_file(&detection_path)
        .with_context(|| format!("Failed to load detection model from {:?}", detection_path))?;

    debug!("Loading OCR recognition model from {:?}", recognition_path);
    let recognition_model = Model::load_file(&recognition_path)
        .with_context(|| format!("Failed to load recognition model from {:?}", recognition_path))?;

    let engine = OcrEngine::new(OcrEngineParams {
        detection_model: Some(detection_model),
        recognition_model: Some(recognition_model),
        ..Default::default()
    })
    .context("Failed to create OCR engine")?;

    debug!("OCR engine initialized successfully");
    Ok(engine)
}

/// Left, top, width and height of a recognized item.
fn item_rect<T: TextItem>(item: &T) -> (i32, i32, i32, i32) {
    let rect = item.bounding_rect();
    (
        rect.left() as i32,
        rect.top() as i32,
        rect.width() as i32,
        rect.height() as i32,
    )
}

/// Bounding region covering all of `rects`.
///
/// ocrs has no per-line score, so the region carries no confidence.
fn region_from_rects(
    text: String,
    rects: impl IntoIterator<Item = (i32, i32, i32, i32)>,
) -> Option<TextRegion> {
    let mut min_x = i32::MAX;
    let mut min_y = i32::MAX;
    let mut max_x = i32::MIN;
    let mut max_y = i32::MIN;
    let mut any = false;

    for (left, top, width, height) in rects {
        min_x = min_x.min(left);
        min_y = min_y.min(top);
        max_x = max_x.max(left + width);
        max_y = max_y.max(top + height);
        any = true;
    }

    if !any {
        return None;
    }

    Some(TextRegion {
        text,
        x: min_x,
        y: min_y,
        width: max_x - min_x,
        height: max_y - min_y,
        confidence: None,
    })
}
