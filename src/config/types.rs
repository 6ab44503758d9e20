//! Configuration type definitions.

use crate::constants::{band, beep, pulse, timeline};
use serde::{Deserialize, Serialize};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Detection tuning.
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Timeline placement defaults.
    #[serde(default)]
    pub timeline: TimelineConfig,
}

/// Detection tuning parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Lower edge of the alarm band in Hz.
    pub band_low_hz: f32,

    /// Upper edge of the alarm band in Hz.
    pub band_high_hz: f32,

    /// Lower critical frequency of the pulse band-pass in Hz.
    pub pulse_filter_low_hz: f32,

    /// Upper critical frequency of the pulse band-pass in Hz.
    pub pulse_filter_high_hz: f32,

    /// Minimum filtered-energy height for a pulse.
    pub min_pulse_height: f32,

    /// Minimum qualifying inter-pulse gap in seconds.
    pub gap_min_secs: f64,

    /// Maximum qualifying inter-pulse gap in seconds.
    pub gap_max_secs: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            band_low_hz: band::DEFAULT_LOW_HZ,
            band_high_hz: band::DEFAULT_HIGH_HZ,
            pulse_filter_low_hz: pulse::DEFAULT_FILTER_LOW_HZ,
            pulse_filter_high_hz: pulse::DEFAULT_FILTER_HIGH_HZ,
            min_pulse_height: pulse::DEFAULT_MIN_HEIGHT,
            gap_min_secs: beep::DEFAULT_GAP_MIN_SECS,
            gap_max_secs: beep::DEFAULT_GAP_MAX_SECS,
        }
    }
}

/// Timeline placement defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Seconds of footage kept before each incident.
    pub context_before_secs: f64,

    /// Seconds of footage kept after each incident.
    pub context_after_secs: f64,

    /// Timeline frame rate.
    pub frames_per_second: f64,

    /// Editing-host channels cycled across successive incidents.
    pub channel_cycle: Vec<u32>,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            context_before_secs: timeline::DEFAULT_CONTEXT_BEFORE_SECS,
            context_after_secs: timeline::DEFAULT_CONTEXT_AFTER_SECS,
            frames_per_second: timeline::DEFAULT_FRAMES_PER_SECOND,
            channel_cycle: timeline::DEFAULT_CHANNEL_CYCLE.to_vec(),
        }
    }
}
