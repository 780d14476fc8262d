//! Data types for textseek.
//!
//! This crate defines the text regions produced by OCR, the locations
//! resolved from them, and the JSON response envelope the CLI prints.

mod region;
mod response;

pub use region::*;
pub use response::*;
