//! Output formatting for CLI responses.

use textseek_protocol::{ErrorCode, Response, ResponseData, TextRegion};

/// Output formatter.
pub struct Output {
    json: bool,
}

impl Output {
    /// Create a new output formatter.
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Whether JSON output is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Print a response.
    pub fn print_response(&self, response: &Response) {
        if self.json {
            print_json(response);
        } else if response.success {
            match response.data {
                Some(ref data) => println!("{}", render_data(data)),
                None => println!("OK"),
            }
        } else if let Some(ref error) = response.error {
            eprintln!("Error [{}]: {}", error.code, error.message);
        }
    }

    /// Print an error message.
    pub fn print_error(&self, code: ErrorCode, message: &str) {
        if self.json {
            print_json(&Response::error(code, message));
        } else {
            eprintln!("Error [{}]: {}", code, message);
        }
    }

    /// Print an error and exit with status 1.
    pub fn fail(&self, code: ErrorCode, message: &str) -> ! {
        self.print_error(code, message);
        std::process::exit(1);
    }
}

fn print_json(response: &Response) {
    match serde_json::to_string(response) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error [internal error]: failed to serialize response: {}", e),
    }
}

/// Human-readable form of response data.
fn render_data(data: &ResponseData) -> String {
    match data {
        ResponseData::Ok => "OK".to_string(),
        ResponseData::Regions { regions } => {
            if regions.is_empty() {
                "No text detected".to_string()
            } else {
                regions.iter().map(render_region).collect::<Vec<_>>().join("\n")
            }
        }
        ResponseData::Located(location) => {
            format!("Found '{}' at ({}, {})", location.text, location.x, location.y)
        }
        ResponseData::NotFound { query } => format!("Could not find '{}'", query),
        ResponseData::Moved { .. } | ResponseData::Toured { .. } => {
            "Cursor movement complete!".to_string()
        }
    }
}

fn render_region(region: &TextRegion) -> String {
    let confidence = match region.confidence {
        Some(c) => format!("{:.2}", c),
        None => "n/a".to_string(),
    };
    format!(
        "Detected text: '{}'\n\
         Confidence: {}\n\
         Location: Top-left ({}, {}), Bottom-right ({}, {})\n\
         Width: {}, Height: {}\n\
         ---",
        region.text,
        confidence,
        region.x,
        region.y,
        region.right(),
        region.bottom(),
        region.width,
        region.height
    )
}
