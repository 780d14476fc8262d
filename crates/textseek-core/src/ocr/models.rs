//! Locating the OCR model files.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Error, Result};

pub(crate) const DETECTION_MODEL: &str = "text-detection.rten";
pub(crate) const RECOGNITION_MODEL: &str = "text-recognition.rten";

/// Find the directory holding both OCR models.
///
/// Candidates, in order:
/// - `explicit`, when given (from `--models-dir` or `TEXTSEEK_MODELS_DIR`)
/// - `bin/../models` relative to the executable
/// - `$HOME/.cache/ocrs`, where `ocrs-cli` downloads its models
///
/// An explicit directory is never silently replaced by a fallback.
pub fn find_models_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    let candidates = match explicit {
        Some(dir) => vec![dir.to_path_buf()],
        None => default_candidates(),
    };

    for dir in &candidates {
        if has_models(dir) {
            debug!("Found models directory at {:?}", dir);
            return Ok(dir.clone());
        }
        debug!("No OCR models in {:?}", dir);
    }

    Err(Error::ModelsNotFound(candidates))
}

fn has_models(dir: &Path) -> bool {
    dir.join(DETECTION_MODEL).is_file() && dir.join(RECOGNITION_MODEL).is_file()
}

fn default_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(dir) = std::env::current_exe()
        .ok()
        .as_deref()
        .and_then(Path::parent) // bin/
        .and_then(Path::parent) // package root
        .map(|p| p.join("models"))
    {
        candidates.push(dir);
    }

    if let Some(home) = std::env::var_os("HOME") {
        candidates.push(PathBuf::from(home).join(".cache").join("ocrs"));
    }

    candidates
}
