//! Signal-processing primitives for incident detection.

mod bandpass;
mod peaks;
mod stft;

pub use bandpass::BandpassFilter;
pub use peaks::find_peaks;
pub use stft::{BandEnergyExtractor, EnergyTrace, FrequencyBand};
