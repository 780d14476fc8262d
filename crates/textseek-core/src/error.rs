//! Error type for the engine.

use std::path::PathBuf;

use textseek_protocol::ErrorCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The file {} does not exist.", .0.display())]
    ImageNotFound(PathBuf),

    #[error("Failed to decode image {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write image {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Could not find OCR models (text-detection.rten, text-recognition.rten) in: {}", format_dirs(.0))]
    ModelsNotFound(Vec<PathBuf>),

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("Screen capture failed: {0}")]
    Capture(String),

    #[error("Cursor movement failed: {0}")]
    Cursor(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Protocol code reported for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::ImageNotFound(_) => ErrorCode::ImageNotFound,
            Error::Decode { .. } | Error::Encode { .. } => ErrorCode::InvalidImage,
            Error::ModelsNotFound(_) => ErrorCode::ModelsNotFound,
            Error::Ocr(_) => ErrorCode::OcrFailed,
            Error::Capture(_) => ErrorCode::CaptureFailed,
            Error::Cursor(_) => ErrorCode::CursorFailed,
            Error::InvalidRequest(_) => ErrorCode::InvalidRequest,
            Error::Io(_) => ErrorCode::IoError,
        }
    }
}

fn format_dirs(dirs: &[PathBuf]) -> String {
    dirs.iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(
            Error::ImageNotFound(PathBuf::from("o1.png")).code(),
            ErrorCode::ImageNotFound
        );
        assert_eq!(Error::Ocr("boom".into()).code(), ErrorCode::OcrFailed);
        assert_eq!(
            Error::InvalidRequest("empty".into()).code(),
            ErrorCode::InvalidRequest
        );
    }

    #[test]
    fn test_models_not_found_lists_dirs() {
        let err = Error::ModelsNotFound(vec![PathBuf::from("/a"), PathBuf::from("/b")]);
        assert!(err.to_string().ends_with("in: /a, /b"));
    }

    #[test]
    fn test_image_not_found_message() {
        let err = Error::ImageNotFound(PathBuf::from("shots/o1.png"));
        assert_eq!(err.to_string(), "The file shots/o1.png does not exist.");
    }
}
