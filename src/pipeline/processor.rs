//! Single-file detection pipeline.

use crate::audio::{decode_audio_track, resample};
use crate::config::DetectionConfig;
use crate::constants::TARGET_SAMPLE_RATE;
use crate::detect::{GapWindow, PulseDetector, match_triple_beeps};
use crate::dsp::{BandEnergyExtractor, FrequencyBand};
use crate::error::Result;
use std::path::Path;
use tracing::{debug, info};

/// Result of running detection over one file.
#[derive(Debug)]
pub struct DetectionOutcome {
    /// Incident timestamps in seconds, ascending.
    pub incidents: Vec<f64>,
    /// Number of pulses found before pattern matching.
    pub pulses: usize,
    /// Decoded audio duration in seconds.
    pub audio_secs: f64,
}

/// Run the full detection pipeline over one recording.
///
/// Decode the first audio channel, resample to the detection rate, extract
/// the alarm band's energy, find pulses, and match the triple-beep pattern.
pub fn detect_file(path: &Path, settings: &DetectionConfig) -> Result<DetectionOutcome> {
    use std::time::Instant;

    let start_time = Instant::now();
    info!("Processing: {}", path.display());

    let decoded = decode_audio_track(path)?;
    let audio_secs = decoded.duration_secs();
    info!(
        "Decoded {audio_secs:.1}s of audio at {} Hz",
        decoded.sample_rate
    );

    let samples = if decoded.sample_rate == TARGET_SAMPLE_RATE {
        decoded.samples
    } else {
        debug!(
            "Resampling from {} Hz to {} Hz...",
            decoded.sample_rate, TARGET_SAMPLE_RATE
        );
        resample(decoded.samples, decoded.sample_rate, TARGET_SAMPLE_RATE)?
    };
    let signal = crate::audio::AudioSignal {
        samples,
        sample_rate: TARGET_SAMPLE_RATE,
    };

    let extractor = BandEnergyExtractor::with_defaults();
    let band = FrequencyBand::new(
        settings.band_low_hz,
        settings.band_high_hz,
        TARGET_SAMPLE_RATE,
    )?;
    let trace = extractor.extract(&signal, band)?;
    debug!("Extracted {} energy frames", trace.len());

    #[allow(clippy::cast_precision_loss)]
    let detector = PulseDetector::new(
        settings.pulse_filter_low_hz,
        settings.pulse_filter_high_hz,
        TARGET_SAMPLE_RATE as f32,
        settings.min_pulse_height,
    )?;
    let pulses = detector.detect(&trace)?;
    debug!("Found {} pulses", pulses.len());

    let incidents = match_triple_beeps(
        &pulses,
        GapWindow {
            min_secs: settings.gap_min_secs,
            max_secs: settings.gap_max_secs,
        },
    );

    info!(
        "Found {} incident(s) in {:.2}s",
        incidents.len(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(DetectionOutcome {
        incidents,
        pulses: pulses.len(),
        audio_secs,
    })
}
