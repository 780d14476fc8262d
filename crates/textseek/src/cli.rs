//! CLI command definitions using clap.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use textseek_core::{Granularity, LocateConfig, Metric, Motion, MAX_UPSCALE_FACTOR};

pub mod commands;

/// Find text on a screenshot with OCR and move the mouse cursor to it.
#[derive(Parser)]
#[command(name = "textseek")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding text-detection.rten and text-recognition.rten
    #[arg(long, env = "TEXTSEEK_MODELS_DIR", global = true)]
    pub models_dir: Option<PathBuf>,

    /// Report OCR results per line or per word
    #[arg(long, default_value = "line", global = true)]
    pub granularity: Granularity,

    /// Keep the scratch directory with the working images
    #[arg(long, global = true)]
    pub keep_scratch: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every text region OCR detects
    Read(ReadArgs),

    /// Find the coordinates of a text
    Find(FindArgs),

    /// Move the cursor to a position
    Move(MoveArgs),

    /// Find a text and move the cursor to it
    Seek(SeekArgs),

    /// Move the cursor through a list of waypoints from a JSON file
    Tour(TourArgs),
}

/// Settings shared by every OCR command.
#[derive(Clone)]
pub struct Globals {
    pub models_dir: Option<PathBuf>,
    pub granularity: Granularity,
    pub keep_scratch: bool,
}

impl From<&Cli> for Globals {
    fn from(cli: &Cli) -> Self {
        Self {
            models_dir: cli.models_dir.clone(),
            granularity: cli.granularity,
            keep_scratch: cli.keep_scratch,
        }
    }
}

/// Where the screenshot comes from.
#[derive(Args, Clone)]
pub struct SourceArgs {
    /// Screenshot file
    #[arg(
        long,
        short = 'i',
        value_name = "PATH",
        required_unless_present = "screen",
        conflicts_with = "screen"
    )]
    pub image: Option<String>,

    /// Capture the screen instead of reading a file
    #[arg(long)]
    pub screen: bool,

    /// Monitor to capture with --screen (default: primary)
    #[arg(long, requires = "screen")]
    pub monitor: Option<usize>,
}

impl SourceArgs {
    /// Image path with `~` expanded.
    pub fn image_path(&self) -> Option<PathBuf> {
        self.image
            .as_deref()
            .map(|p| PathBuf::from(shellexpand::tilde(p).into_owned()))
    }
}

/// Fuzzy match tuning.
#[derive(Args, Clone)]
pub struct LocateArgs {
    /// Similarity required in the first OCR pass
    #[arg(long, default_value = "0.9")]
    pub first_threshold: f64,

    /// Similarity required in the upscaled OCR pass
    #[arg(long, default_value = "0.7")]
    pub second_threshold: f64,

    /// Upscale factor for the second pass
    #[arg(
        long,
        default_value = "3",
        value_parser = clap::value_parser!(u32).range(1..=MAX_UPSCALE_FACTOR as i64)
    )]
    pub upscale: u32,

    /// Similarity metric (ratio, jaro-winkler, levenshtein)
    #[arg(long, default_value = "ratio")]
    pub metric: Metric,
}

impl LocateArgs {
    pub fn to_config(&self) -> LocateConfig {
        LocateConfig {
            first_threshold: self.first_threshold,
            second_threshold: self.second_threshold,
            upscale_factor: self.upscale,
            metric: self.metric,
        }
    }
}

/// Cursor animation.
#[derive(Args, Clone)]
pub struct MotionArgs {
    /// Time taken to reach the target, in milliseconds
    #[arg(long, default_value = "1000")]
    pub duration_ms: u64,

    /// Time to rest on the target afterwards, in milliseconds
    #[arg(long, default_value = "1000")]
    pub pause_ms: u64,
}

impl MotionArgs {
    pub fn to_motion(&self) -> Motion {
        Motion {
            duration: Duration::from_millis(self.duration_ms),
            pause: Duration::from_millis(self.pause_ms),
        }
    }
}

/// Read command arguments.
#[derive(Parser)]
pub struct ReadArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Find command arguments.
#[derive(Parser)]
pub struct FindArgs {
    /// Text to search for
    pub text: String,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub locate: LocateArgs,
}

/// Move command arguments.
#[derive(Parser)]
pub struct MoveArgs {
    /// X coordinate
    pub x: i32,

    /// Y coordinate
    pub y: i32,

    /// Label to log for the destination
    #[arg(long, default_value = "")]
    pub label: String,

    #[command(flatten)]
    pub motion: MotionArgs,
}

/// Seek command arguments.
#[derive(Parser)]
pub struct SeekArgs {
    /// Text to search for
    pub text: String,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub locate: LocateArgs,

    #[command(flatten)]
    pub motion: MotionArgs,
}

/// Tour command arguments.
#[derive(Parser)]
pub struct TourArgs {
    /// JSON file with a list of {"text", "x", "y"} waypoints
    pub file: String,

    /// Wait for Enter before moving
    #[arg(long)]
    pub confirm: bool,

    #[command(flatten)]
    pub motion: MotionArgs,
}
