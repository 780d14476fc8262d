//! Scratch directory holding the working copies of a screenshot.
//!
//! The source image is copied in under a plain name before OCR, and the
//! upscaled copy for the second pass is written next to it. The directory
//! is removed when the search ends unless the caller asks to keep it.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, ImageReader};
use tempfile::TempDir;
use tracing::{debug, warn};

use crate::{Error, Result};

const SOURCE_STEM: &str = "source";
const UPSCALED_NAME: &str = "upscaled.png";

/// Working directory for one search.
#[derive(Debug)]
pub struct Scratch {
    dir: TempDir,
    source: PathBuf,
}

impl Scratch {
    /// Copy the image at `path` into a fresh scratch directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ImageNotFound(path.to_path_buf()));
        }

        let dir = new_dir()?;
        let name = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}.{}", SOURCE_STEM, ext),
            None => SOURCE_STEM.to_string(),
        };
        let source = dir.path().join(name);

        std::fs::copy(path, &source)?;
        debug!("Copied {:?} to scratch file {:?}", path, source);

        Ok(Self { dir, source })
    }

    /// Write an in-memory image (e.g. a screen capture) into a fresh scratch directory.
    pub fn from_image(image: &DynamicImage) -> Result<Self> {
        let dir = new_dir()?;
        let source = dir.path().join(format!("{}.png", SOURCE_STEM));

        image
            .save_with_format(&source, ImageFormat::Png)
            .map_err(|source_err| Error::Encode {
                path: source.clone(),
                source: source_err,
            })?;
        debug!("Wrote captured image to scratch file {:?}", source);

        Ok(Self { dir, source })
    }

    /// Scratch directory path.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the working copy of the source image.
    pub fn source_path(&self) -> &Path {
        &self.source
    }

    /// Decode the source image, detecting the format from its contents.
    pub fn load_source(&self) -> Result<DynamicImage> {
        let bytes = std::fs::read(&self.source)?;
        let decode = |err| Error::Decode {
            path: self.source.clone(),
            source: err,
        };

        ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()?
            .decode()
            .map_err(decode)
    }

    /// Save the upscaled copy next to the source and return its path.
    pub fn store_upscaled(&self, image: &DynamicImage) -> Result<PathBuf> {
        let path = self.dir.path().join(UPSCALED_NAME);
        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|source| Error::Encode {
                path: path.clone(),
                source,
            })?;
        debug!("Wrote upscaled image to {:?}", path);
        Ok(path)
    }

    /// End the search: remove the directory, or keep it and return its path.
    ///
    /// Cleanup failures are logged, never returned.
    pub fn finish(self, keep: bool) -> Option<PathBuf> {
        if keep {
            let path = self.dir.keep();
            debug!("Keeping scratch directory {:?}", path);
            return Some(path);
        }

        let path = self.dir.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            warn!("Error cleaning up temporary files in {:?}: {}", path, e);
        }
        None
    }
}

fn new_dir() -> Result<TempDir> {
    Ok(tempfile::Builder::new().prefix("textseek-").tempdir()?)
}
