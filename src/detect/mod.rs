//! Pulse detection and triple-beep pattern matching.

mod matcher;
mod pulses;

pub use matcher::{GapWindow, match_triple_beeps};
pub use pulses::{Pulse, PulseDetector};
