//! Processing pipeline components.

mod coordinator;
mod processor;

pub use coordinator::collect_input_files;
pub use processor::{DetectionOutcome, detect_file};
