//! Command-line interface definitions.

mod args;

pub use args::{Cli, Command, ConfigAction, DetectArgs, PolicyArgs, TimelineArgs};
