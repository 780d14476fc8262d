//! Command implementations.

pub mod find;
pub mod move_to;
pub mod read;
pub mod seek;
pub mod tour;

use textseek_core::{
    capture_screen, find_coordinates, find_coordinates_in, find_models_dir, Error, LocateConfig,
    OcrService, Recognizer, ScreenFrame, Scratch,
};
use textseek_protocol::{Location, TextRegion};
use tracing::{debug, info};

use crate::cli::{Globals, SourceArgs};
use crate::output::Output;

/// Unwrap an engine result, or print the error and exit.
pub(crate) fn or_exit<T>(output: &Output, result: Result<T, Error>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => output.fail(e.code(), &e.to_string()),
    }
}

/// Screenshot copied into scratch space, plus the capture geometry for `--screen`.
struct Prepared {
    scratch: Scratch,
    frame: Option<ScreenFrame>,
}

impl Prepared {
    fn open(source: &SourceArgs) -> Result<Self, Error> {
        match source.image_path() {
            Some(path) => {
                debug!("Original image path: {}", path.display());
                debug!("Original image exists: {}", path.exists());
                debug!("Original image is file: {}", path.is_file());
                Ok(Self {
                    scratch: Scratch::from_file(&path)?,
                    frame: None,
                })
            }
            None => {
                let frame = capture_screen(source.monitor)?;
                let scratch = Scratch::from_image(&frame.image)?;
                Ok(Self {
                    scratch,
                    frame: Some(frame),
                })
            }
        }
    }

    fn finish(self, keep: bool) {
        debug!("Temporary image path: {}", self.scratch.source_path().display());
        if let Some(kept) = self.scratch.finish(keep) {
            info!("Scratch files kept in {}", kept.display());
        }
    }

    fn map_region(&self, region: TextRegion) -> TextRegion {
        match &self.frame {
            Some(frame) => frame_region(frame, region),
            None => region,
        }
    }
}

fn load_ocr(globals: &Globals) -> Result<OcrService, Error> {
    let models_dir = find_models_dir(globals.models_dir.as_deref())?;
    OcrService::new(&models_dir, globals.granularity)
}

/// OCR every region of the source image.
pub(crate) fn read_regions(globals: &Globals, source: &SourceArgs) -> Result<Vec<TextRegion>, Error> {
    let ocr = load_ocr(globals)?;
    let prepared = Prepared::open(source)?;

    let result = prepared
        .scratch
        .load_source()
        .and_then(|image| ocr.recognize(&image));
    let regions = result.map(|regions| {
        regions
            .into_iter()
            .map(|r| prepared.map_region(r))
            .collect()
    });

    prepared.finish(globals.keep_scratch);
    regions
}

/// Run the two-pass search for `target` in the source image.
pub(crate) fn locate(
    globals: &Globals,
    source: &SourceArgs,
    config: LocateConfig,
    target: &str,
) -> Result<Option<Location>, Error> {
    config.validate()?;
    let ocr = load_ocr(globals)?;

    match source.image_path() {
        Some(path) => {
            debug!("Original image path: {}", path.display());
            find_coordinates(&ocr, &path, target, config, globals.keep_scratch)
        }
        None => {
            let frame = capture_screen(source.monitor)?;
            let scratch = Scratch::from_image(&frame.image)?;
            let found = find_coordinates_in(&ocr, scratch, target, config, globals.keep_scratch)?;
            Ok(found.map(|loc| frame_location(&frame, loc)))
        }
    }
}

/// Map a location found in a screen capture onto cursor coordinates.
fn frame_location(frame: &ScreenFrame, location: Location) -> Location {
    let (x, y) = frame.to_screen(location.x, location.y);
    Location { x, y, ..location }
}

/// Map a region found in a screen capture onto cursor coordinates.
fn frame_region(frame: &ScreenFrame, region: TextRegion) -> TextRegion {
    let (x, y) = frame.to_screen(region.x, region.y);
    let (right, bottom) = frame.to_screen(region.right(), region.bottom());
    TextRegion {
        x,
        y,
        width: right - x,
        height: bottom - y,
        ..region
    }
}
