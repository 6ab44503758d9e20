//! Configuration validation.

use crate::config::Config;
use crate::error::{Error, Result};

/// Validate a loaded configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    let fail = |message: String| Err(Error::ConfigValidation { message });

    let d = &config.detection;
    if !(d.band_low_hz >= 0.0 && d.band_low_hz < d.band_high_hz) {
        return fail(format!(
            "alarm band must satisfy 0 <= low < high, got {}-{} Hz",
            d.band_low_hz, d.band_high_hz
        ));
    }
    if !(d.pulse_filter_low_hz > 0.0 && d.pulse_filter_low_hz < d.pulse_filter_high_hz) {
        return fail(format!(
            "pulse filter band must satisfy 0 < low < high, got {}-{} Hz",
            d.pulse_filter_low_hz, d.pulse_filter_high_hz
        ));
    }
    if d.min_pulse_height <= 0.0 {
        return fail(format!(
            "min_pulse_height must be positive, got {}",
            d.min_pulse_height
        ));
    }
    if !(d.gap_min_secs > 0.0 && d.gap_min_secs < d.gap_max_secs) {
        return fail(format!(
            "gap window must satisfy 0 < min < max, got {}-{}s",
            d.gap_min_secs, d.gap_max_secs
        ));
    }

    let t = &config.timeline;
    let policy = crate::timeline::ContextPolicy {
        context_before_secs: t.context_before_secs,
        context_after_secs: t.context_after_secs,
        frames_per_second: t.frames_per_second,
        channel_cycle: t.channel_cycle.clone(),
    };
    policy.validate()
}
