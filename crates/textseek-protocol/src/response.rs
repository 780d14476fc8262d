//! Response envelope printed by the CLI in JSON mode.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::region::{Location, TextRegion, Waypoint};

/// The result of one CLI command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Whether the operation succeeded.
    pub success: bool,

    /// Response data on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,

    /// Error details on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl Response {
    /// Create a successful response with data.
    pub fn success(data: ResponseData) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create a simple success response with no data.
    pub fn ok() -> Self {
        Self {
            success: true,
            data: Some(ResponseData::Ok),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorInfo {
                code,
                message: message.into(),
            }),
        }
    }
}

/// Response data variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseData {
    /// Simple acknowledgment.
    Ok,

    /// Every region the OCR pass detected.
    Regions {
        /// Detected regions, in engine order.
        regions: Vec<TextRegion>,
    },

    /// The target text was found.
    Located(Location),

    /// The target text was not found in either pass.
    NotFound {
        /// The text that was searched for.
        query: String,
    },

    /// The cursor was moved.
    Moved {
        /// Label of the destination.
        text: String,
        /// X coordinate.
        x: i32,
        /// Y coordinate.
        y: i32,
    },

    /// The cursor visited a list of waypoints.
    Toured {
        /// Waypoints visited, in order.
        visited: Vec<Waypoint>,
    },
}

/// Error information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
}

/// Error codes for structured error handling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Error)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The input image does not exist.
    #[error("image not found")]
    ImageNotFound,

    /// The input image could not be decoded or written.
    #[error("invalid image")]
    InvalidImage,

    /// OCR model files are missing.
    #[error("models not found")]
    ModelsNotFound,

    /// The OCR engine failed.
    #[error("ocr failed")]
    OcrFailed,

    /// Screen capture failed.
    #[error("capture failed")]
    CaptureFailed,

    /// Cursor movement failed.
    #[error("cursor failed")]
    CursorFailed,

    /// Invalid request parameters.
    #[error("invalid request")]
    InvalidRequest,

    /// The target text was not found.
    #[error("not found")]
    NotFound,

    /// Filesystem error.
    #[error("io error")]
    IoError,

    /// Anything else.
    #[error("internal error")]
    InternalError,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{Pass, Resolution};

    #[test]
    fn test_located_response() {
        let resp = Response::success(ResponseData::Located(Location {
            text: "Dayz".to_string(),
            x: 281,
            y: 291,
            similarity: 1.0,
            pass: Pass::Original,
            resolution: Resolution::Unique,
        }));

        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("\"type\":\"located\""));
        assert!(json.contains("\"x\":281"));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn test_error_response() {
        let resp = Response::error(ErrorCode::ImageNotFound, "The file o1.png does not exist.");

        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("\"code\":\"image_not_found\""));
        assert!(!json.contains("\"data\""));
    }

    #[test]
    fn test_not_found_response() {
        let resp = Response::success(ResponseData::NotFound {
            query: "Submit".to_string(),
        });

        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"type\":\"not_found\""));
        assert!(json.contains("\"query\":\"Submit\""));
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::ModelsNotFound.to_string(), "models not found");
        assert_eq!(ErrorCode::OcrFailed.to_string(), "ocr failed");
    }
}
