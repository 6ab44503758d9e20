//! Audio decoding and resampling.

mod decode;
mod resample;

pub use decode::{AudioSignal, decode_audio_track};
pub use resample::resample;
