//! Beepcut - dashcam triple-beep incident detection and timeline building.
//!
//! This crate finds the recurring three-pulse alarm in dashcam audio and
//! turns the detections into context-padded clip placements for an external
//! video editor.

#![warn(missing_docs)]

pub mod audio;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod detect;
pub mod dsp;
pub mod error;
pub mod media;
pub mod output;
pub mod pipeline;
pub mod timeline;

use catalog::IncidentCatalog;
use clap::Parser;
use cli::{Cli, Command, ConfigAction, DetectArgs, PolicyArgs, TimelineArgs};
use config::{Config, DetectionConfig, load_default_config, save_default_config};
use indicatif::{ProgressBar, ProgressStyle};
use media::MediaLibrary;
use pipeline::{DetectionOutcome, collect_input_files, detect_file};
use std::path::{Path, PathBuf};
use timeline::{ContextPolicy, NumericSuffixNaming, TimelinePlacer};
use tracing::{error, info, warn};

pub use error::{Error, Result};

/// Main entry point for the beepcut CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.detect.verbose, cli.detect.quiet);

    let config = load_default_config()?;
    config::validate_config(&config)?;

    if let Some(command) = cli.command {
        return match command {
            Command::Config { action } => handle_config_command(action),
            Command::Timeline(args) => build_timeline_from_catalog(&args, &config),
        };
    }

    if cli.inputs.is_empty() {
        // Mirror `--help` rather than failing on a bare invocation.
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    }

    detect_inputs(&cli.inputs, &cli.detect, &config)
}

/// Run detection over the input files and write the incident catalog.
fn detect_inputs(inputs: &[PathBuf], args: &DetectArgs, config: &Config) -> Result<()> {
    use std::time::Instant;

    let total_start = Instant::now();

    let files = collect_input_files(inputs)?;
    if files.is_empty() {
        return Err(Error::NoValidVideoFiles);
    }
    info!("Found {} video file(s) to scan", files.len());

    let settings = detection_settings(config, args);

    let progress_enabled = !args.quiet && !args.no_progress;
    let progress = create_file_progress(files.len(), progress_enabled);

    let mut catalog = IncidentCatalog::new();
    let mut totals = RunTotals::default();
    let mut failures: Vec<(String, String)> = Vec::new();

    for file in &files {
        let file_id = file_id_of(file);

        match detect_file(file, &settings) {
            Ok(outcome) => {
                totals.record(&outcome);
                catalog.insert_file(&file_id);
                for timestamp in outcome.incidents {
                    catalog.add(&file_id, timestamp);
                }
            }
            Err(e) => {
                error!("Failed to process {}: {}", file.display(), e);
                if args.fail_fast {
                    if let Some(pb) = &progress {
                        pb.finish_with_message("Failed");
                    }
                    return Err(e);
                }
                failures.push((file_id, e.to_string()));
            }
        }
        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = &progress {
        pb.finish_with_message("Complete");
    }

    catalog.save(&args.json_out)?;
    info!("Wrote incident catalog: {}", args.json_out.display());

    info!(
        "Complete: {} processed, {} failed, {} incident(s) from {} pulse(s) \
         across {:.1}s of audio in {:.2}s",
        totals.processed,
        failures.len(),
        totals.incidents,
        totals.pulses,
        totals.audio_secs,
        total_start.elapsed().as_secs_f64()
    );
    for (file_id, reason) in &failures {
        warn!("skipped '{file_id}': {reason}");
    }

    if let Some(timeline_out) = &args.timeline_out {
        // Catalog keys are bare file names; the library root must be the
        // recordings directory. Inputs spanning several directories only
        // splice within the first one.
        let root = files[0]
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        if spans_multiple_directories(&files) {
            warn!(
                "inputs span multiple directories; boundary splices resolve against {} only",
                root.display()
            );
        }
        let policy = context_policy(config, &args.policy);
        place_and_write(&catalog, &root, &policy, timeline_out)?;
    }

    Ok(())
}

/// Build a timeline document from a previously saved catalog.
fn build_timeline_from_catalog(args: &TimelineArgs, config: &Config) -> Result<()> {
    let catalog = IncidentCatalog::load(&args.incidents)?;
    info!(
        "Loaded {} incident(s) across {} file(s) from {}",
        catalog.total_incidents(),
        catalog.files().count(),
        args.incidents.display()
    );

    let root = args.media_dir.clone().unwrap_or_else(|| {
        args.incidents
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    });

    let policy = context_policy(config, &args.policy);
    place_and_write(&catalog, &root, &policy, &args.out)
}

/// Run the placer and write the timeline document.
fn place_and_write(
    catalog: &IncidentCatalog,
    media_root: &Path,
    policy: &ContextPolicy,
    out: &Path,
) -> Result<()> {
    policy.validate()?;

    let library = MediaLibrary::new(media_root);
    let naming = NumericSuffixNaming;
    let placer = TimelinePlacer::new(&library, &naming, policy.clone());
    let report = placer.place(catalog);

    info!(
        "Placed {} clip(s) over {} frame(s); {} incident(s) skipped, {} splice(s) dropped",
        report.placements.len(),
        report.total_duration_frames,
        report.skipped.len(),
        report.splice_failures.len()
    );

    output::write_timeline_document(out, policy, &report)?;
    info!("Wrote timeline document: {}", out.display());
    Ok(())
}

/// Detection settings: config defaults with CLI overrides applied.
fn detection_settings(config: &Config, args: &DetectArgs) -> DetectionConfig {
    let mut settings = config.detection.clone();
    if let Some(v) = args.band_low {
        settings.band_low_hz = v;
    }
    if let Some(v) = args.band_high {
        settings.band_high_hz = v;
    }
    if let Some(v) = args.min_height {
        settings.min_pulse_height = v;
    }
    if let Some(v) = args.gap_min {
        settings.gap_min_secs = v;
    }
    if let Some(v) = args.gap_max {
        settings.gap_max_secs = v;
    }
    settings
}

/// Context policy: config defaults with CLI overrides applied.
fn context_policy(config: &Config, args: &PolicyArgs) -> ContextPolicy {
    ContextPolicy {
        context_before_secs: args
            .context_before
            .unwrap_or(config.timeline.context_before_secs),
        context_after_secs: args
            .context_after
            .unwrap_or(config.timeline.context_after_secs),
        frames_per_second: args.fps.unwrap_or(config.timeline.frames_per_second),
        channel_cycle: config.timeline.channel_cycle.clone(),
    }
}

/// Running totals across one detection run, for the end-of-run summary.
#[derive(Debug, Default)]
struct RunTotals {
    processed: usize,
    incidents: usize,
    pulses: usize,
    audio_secs: f64,
}

impl RunTotals {
    fn record(&mut self, outcome: &DetectionOutcome) {
        self.processed += 1;
        self.incidents += outcome.incidents.len();
        self.pulses += outcome.pulses;
        self.audio_secs += outcome.audio_secs;
    }
}

/// Whether the inputs resolve to more than one recordings directory.
fn spans_multiple_directories(files: &[PathBuf]) -> bool {
    files
        .windows(2)
        .any(|pair| pair[0].parent() != pair[1].parent())
}

fn file_id_of(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.to_string_lossy(), |n| n.to_string_lossy())
        .into_owned()
}

#[allow(clippy::cast_possible_truncation)]
fn create_file_progress(total: usize, enabled: bool) -> Option<ProgressBar> {
    if !enabled || total < 2 {
        return None;
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos}/{len} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    Some(pb)
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_env_filter(filter).init();
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = config::config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = save_default_config(&Config::default())?;
                println!("Created configuration file: {}", saved_path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config::config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
