//! CLI argument definitions.

use crate::constants::DEFAULT_CATALOG_FILENAME;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Triple-beep incident detection and timeline building for dashcam footage.
#[derive(Debug, Parser)]
#[command(name = "beepcut")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Input video files or directories to scan for incidents.
    pub inputs: Vec<PathBuf>,

    /// Common options for detection.
    #[command(flatten)]
    pub detect: DetectArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Build a timeline from a previously saved incident catalog.
    Timeline(TimelineArgs),
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the `timeline` subcommand.
#[derive(Debug, Args)]
pub struct TimelineArgs {
    /// Incident catalog to place (JSON, file id -> timestamps).
    #[arg(long, default_value = DEFAULT_CATALOG_FILENAME)]
    pub incidents: PathBuf,

    /// Output path for the timeline document.
    #[arg(short, long, default_value = "timeline.json")]
    pub out: PathBuf,

    /// Directory holding the source recordings
    /// (default: the catalog file's directory).
    #[arg(long, env = "BEEPCUT_MEDIA_DIR")]
    pub media_dir: Option<PathBuf>,

    /// Context policy overrides.
    #[command(flatten)]
    pub policy: PolicyArgs,
}

/// Context-policy overrides shared by detection and timeline runs.
#[derive(Debug, Args)]
pub struct PolicyArgs {
    /// Seconds of footage kept before each incident.
    #[arg(long, value_parser = parse_non_negative, env = "BEEPCUT_CONTEXT_BEFORE")]
    pub context_before: Option<f64>,

    /// Seconds of footage kept after each incident.
    #[arg(long, value_parser = parse_non_negative, env = "BEEPCUT_CONTEXT_AFTER")]
    pub context_after: Option<f64>,

    /// Timeline frame rate.
    #[arg(long, value_parser = parse_positive, env = "BEEPCUT_FPS")]
    pub fps: Option<f64>,
}

/// Arguments for the default detection run.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct DetectArgs {
    /// Output path for the incident catalog.
    #[arg(long, default_value = DEFAULT_CATALOG_FILENAME, env = "BEEPCUT_JSON_OUT")]
    pub json_out: PathBuf,

    /// Also build a timeline document from the fresh catalog.
    #[arg(long)]
    pub timeline_out: Option<PathBuf>,

    /// Lower edge of the alarm band in Hz.
    #[arg(long, value_parser = parse_positive_f32)]
    pub band_low: Option<f32>,

    /// Upper edge of the alarm band in Hz.
    #[arg(long, value_parser = parse_positive_f32)]
    pub band_high: Option<f32>,

    /// Minimum filtered-energy height for a pulse.
    #[arg(long, value_parser = parse_positive_f32, env = "BEEPCUT_MIN_HEIGHT")]
    pub min_height: Option<f32>,

    /// Minimum qualifying inter-pulse gap in seconds.
    #[arg(long, value_parser = parse_positive)]
    pub gap_min: Option<f64>,

    /// Maximum qualifying inter-pulse gap in seconds.
    #[arg(long, value_parser = parse_positive)]
    pub gap_max: Option<f64>,

    /// Context policy used when --timeline-out is given.
    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Stop on first error.
    #[arg(long)]
    pub fail_fast: bool,

    /// Suppress progress output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable the progress bar without reducing log output.
    #[arg(long)]
    pub no_progress: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse a strictly positive floating-point value.
fn parse_positive(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value <= 0.0 {
        return Err(format!("value must be positive, got {value}"));
    }
    Ok(value)
}

/// Parse a non-negative floating-point value.
fn parse_non_negative(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value < 0.0 {
        return Err(format!("value must not be negative, got {value}"));
    }
    Ok(value)
}

/// Parse a strictly positive f32.
fn parse_positive_f32(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value <= 0.0 {
        return Err(format!("value must be positive, got {value}"));
    }
    Ok(value)
}
