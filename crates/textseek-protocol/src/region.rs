//! Text regions, resolved locations and cursor waypoints.

use serde::{Deserialize, Serialize};

/// A text region found by OCR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRegion {
    /// Recognized text.
    pub text: String,
    /// Left edge X coordinate.
    pub x: i32,
    /// Top edge Y coordinate.
    pub y: i32,
    /// Width of bounding box.
    pub width: i32,
    /// Height of bounding box.
    pub height: i32,
    /// Recognition confidence reported by the engine, if it has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl TextRegion {
    /// Center of the bounding box.
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Right edge X coordinate.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge Y coordinate.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

/// Which OCR pass produced a location.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    /// OCR over the image as given.
    Original,
    /// OCR over the enlarged copy.
    Upscaled,
}

/// How the winning region was chosen among the candidates of its pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// It was the only region above the threshold.
    Unique,
    /// Several regions qualified; this one had the highest confidence.
    HighestConfidence,
}

/// Where a target text was found, in the coordinate space of the source image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Text as recognized (not the query).
    pub text: String,
    /// Center X coordinate.
    pub x: i32,
    /// Center Y coordinate.
    pub y: i32,
    /// Similarity between the recognized text and the query.
    pub similarity: f64,
    /// Pass that produced the match.
    pub pass: Pass,
    /// How the match was picked.
    pub resolution: Resolution,
}

/// A cursor destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Label logged when the cursor moves there.
    #[serde(default)]
    pub text: String,
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
}

impl From<&Location> for Waypoint {
    fn from(location: &Location) -> Self {
        Self {
            text: location.text.clone(),
            x: location.x,
            y: location.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(x: i32, y: i32, width: i32, height: i32) -> TextRegion {
        TextRegion {
            text: "Dayz".to_string(),
            x,
            y,
            width,
            height,
            confidence: None,
        }
    }

    #[test]
    fn test_center_floors() {
        assert_eq!(region(10, 20, 31, 11).center(), (25, 25));
        assert_eq!(region(0, 0, 1, 1).center(), (0, 0));
    }

    #[test]
    fn test_corners() {
        let r = region(115, 1185, 40, 18);
        assert_eq!(r.right(), 155);
        assert_eq!(r.bottom(), 1203);
    }

    #[test]
    fn test_region_omits_missing_confidence() {
        let json = serde_json::to_string(&region(1, 2, 3, 4)).unwrap();
        assert!(!json.contains("confidence"));

        let parsed: TextRegion =
            serde_json::from_str(r#"{"text":"a","x":1,"y":2,"width":3,"height":4}"#).unwrap();
        assert_eq!(parsed.confidence, None);
    }

    #[test]
    fn test_waypoint_list_parses() {
        let json = r#"[
            {"text": "fsfs", "x": 115, "y": 1185},
            {"x": 281, "y": 291}
        ]"#;
        let waypoints: Vec<Waypoint> = serde_json::from_str(json).unwrap();
        assert_eq!(waypoints.len(), 2);
        assert_eq!(waypoints[0].text, "fsfs");
        assert_eq!(waypoints[1].text, "");
        assert_eq!((waypoints[1].x, waypoints[1].y), (281, 291));
    }

    #[test]
    fn test_location_serializes_snake_case() {
        let location = Location {
            text: "Settings".to_string(),
            x: 40,
            y: 12,
            similarity: 0.95,
            pass: Pass::Upscaled,
            resolution: Resolution::HighestConfidence,
        };
        let json = serde_json::to_string(&location).unwrap();
        assert!(json.contains("\"pass\":\"upscaled\""));
        assert!(json.contains("\"resolution\":\"highest_confidence\""));

        let waypoint = Waypoint::from(&location);
        assert_eq!(waypoint.x, 40);
        assert_eq!(waypoint.text, "Settings");
    }
}
