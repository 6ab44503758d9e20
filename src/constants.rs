//! Application-wide constants.
//!
//! All tuned magic numbers live here so detector variants can be compared
//! against a single reference set.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "beepcut";

/// Sample rate all audio is resampled to before detection, in Hz.
///
/// The alarm tone sits at 2-3 kHz, so 8 kHz keeps the band comfortably
/// below Nyquist while cutting STFT cost on long recordings.
pub const TARGET_SAMPLE_RATE: u32 = 8000;

/// Default incident catalog filename.
pub const DEFAULT_CATALOG_FILENAME: &str = "incidents.json";

/// Supported video container extensions for input collection.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "m4v", "avi", "ts", "mkv"];

/// Short-time transform geometry.
pub mod stft {
    /// Analysis window length in samples (Hann).
    pub const WINDOW_SIZE: usize = 256;

    /// Hop between adjacent analysis frames in samples.
    pub const HOP_SIZE: usize = 128;
}

/// Alarm-tone band defaults for the energy extractor.
pub mod band {
    /// Lower edge of the alarm band in Hz.
    pub const DEFAULT_LOW_HZ: f32 = 2000.0;

    /// Upper edge of the alarm band in Hz.
    pub const DEFAULT_HIGH_HZ: f32 = 3000.0;
}

/// Pulse detection defaults.
pub mod pulse {
    /// Lower critical frequency of the drift-rejection band-pass, in Hz.
    pub const DEFAULT_FILTER_LOW_HZ: f32 = 10.0;

    /// Upper critical frequency of the drift-rejection band-pass, in Hz.
    pub const DEFAULT_FILTER_HIGH_HZ: f32 = 1100.0;

    /// Minimum filtered-energy value for a local maximum to count as a pulse.
    ///
    /// The historical threshold of 200 was tuned on raw 16-bit sample values;
    /// decoded audio here is normalized to +/-1.0, so the default is the same
    /// threshold scaled by 1/32768.
    pub const DEFAULT_MIN_HEIGHT: f32 = 0.006;
}

/// Triple-beep timing window defaults.
pub mod beep {
    /// Minimum inter-pulse gap in seconds.
    pub const DEFAULT_GAP_MIN_SECS: f64 = 0.060;

    /// Maximum inter-pulse gap in seconds.
    pub const DEFAULT_GAP_MAX_SECS: f64 = 0.120;
}

/// Timeline placement defaults.
pub mod timeline {
    /// Seconds of footage kept before each incident.
    pub const DEFAULT_CONTEXT_BEFORE_SECS: f64 = 7.0;

    /// Seconds of footage kept after each incident.
    pub const DEFAULT_CONTEXT_AFTER_SECS: f64 = 7.0;

    /// Timeline frame rate used when no override is given.
    pub const DEFAULT_FRAMES_PER_SECOND: f64 = 30.0;

    /// Editing-host channels cycled across successive incidents.
    ///
    /// Two channels apart so a movie strip's paired audio track never lands
    /// on the next incident's video track.
    pub const DEFAULT_CHANNEL_CYCLE: &[u32] = &[1, 3];
}
