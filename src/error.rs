//! Error types for beepcut.

/// Result type alias for beepcut operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for beepcut.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// No valid video files found.
    #[error("no valid video files found in the provided paths")]
    NoValidVideoFiles,

    /// Failed to open a media file.
    #[error("failed to open media file '{path}'")]
    MediaOpen {
        /// Path to the media file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to decode audio.
    #[error("failed to decode audio from '{path}'")]
    AudioDecode {
        /// Path to the media file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No audio tracks found.
    #[error("no audio tracks found in '{path}'")]
    NoAudioTracks {
        /// Path to the media file.
        path: std::path::PathBuf,
    },

    /// Failed to resample audio.
    #[error("failed to resample audio: {reason}")]
    Resample {
        /// Description of the resampling failure.
        reason: String,
    },

    /// Frequency band is invalid for the given sample rate.
    #[error(
        "invalid frequency band {low_hz}-{high_hz} Hz (must satisfy 0 <= low < high <= {nyquist_hz} Hz)"
    )]
    InvalidBand {
        /// Lower band edge in Hz.
        low_hz: f32,
        /// Upper band edge in Hz.
        high_hz: f32,
        /// Nyquist frequency of the signal in Hz.
        nyquist_hz: f32,
    },

    /// Signal is too short for the pulse filter to settle.
    #[error("not enough energy frames for pulse filtering: got {got}, need at least {needed}")]
    InsufficientData {
        /// Number of energy frames available.
        got: usize,
        /// Minimum number of frames required by the filter.
        needed: usize,
    },

    /// Placement references a source whose duration cannot be resolved.
    #[error("unknown source '{file_id}': duration could not be resolved")]
    UnknownSource {
        /// Identifier of the unresolvable source file.
        file_id: String,
    },

    /// Filename does not carry a sequential numeric counter.
    #[error("filename '{file_id}' has no usable sequence counter")]
    MalformedFilename {
        /// Identifier of the offending file.
        file_id: String,
    },

    /// Failed to read an incident catalog file.
    #[error("failed to read incident catalog '{path}'")]
    CatalogRead {
        /// Path to the catalog file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse an incident catalog file.
    #[error("failed to parse incident catalog '{path}'")]
    CatalogParse {
        /// Path to the catalog file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write a JSON output file.
    #[error("failed to write JSON output file '{path}'")]
    JsonWrite {
        /// Path to the JSON file.
        path: std::path::PathBuf,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}
