//! Filesystem-backed source inspection for timeline placement.

use crate::timeline::SourceInspector;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use symphonia::core::codecs::CODEC_TYPE_NULL;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

/// Resolves file identifiers against a directory of recordings.
///
/// Durations come from container metadata (no decoding) and are cached per
/// file, since the placer asks about the same neighbours repeatedly.
pub struct MediaLibrary {
    root: PathBuf,
    durations: RefCell<HashMap<String, Option<f64>>>,
}

impl MediaLibrary {
    /// Create a library rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            durations: RefCell::new(HashMap::new()),
        }
    }

    fn path_for(&self, file_id: &str) -> PathBuf {
        self.root.join(file_id)
    }

    /// Duration of the first audio track from container metadata.
    fn probe_duration_secs(path: &Path) -> Option<f64> {
        let file = File::open(path).ok()?;
        let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .ok()?;

        let track = probed
            .format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL && t.codec_params.sample_rate.is_some())?;

        let n_frames = track.codec_params.n_frames?;
        let sample_rate = track.codec_params.sample_rate?;

        #[allow(clippy::cast_precision_loss)]
        Some(n_frames as f64 / f64::from(sample_rate))
    }
}

impl SourceInspector for MediaLibrary {
    fn duration_secs(&self, file_id: &str) -> Option<f64> {
        if let Some(&cached) = self.durations.borrow().get(file_id) {
            return cached;
        }

        let duration = Self::probe_duration_secs(&self.path_for(file_id));
        match duration {
            Some(secs) => debug!("probed '{file_id}': {secs:.2}s"),
            None => debug!("could not probe duration of '{file_id}'"),
        }
        self.durations
            .borrow_mut()
            .insert(file_id.to_string(), duration);
        duration
    }

    fn exists(&self, file_id: &str) -> bool {
        self.path_for(file_id).is_file()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn exists_checks_the_library_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("REC0001.MP4"), b"stub").unwrap();

        let library = MediaLibrary::new(dir.path());
        assert!(library.exists("REC0001.MP4"));
        assert!(!library.exists("REC0002.MP4"));
    }

    #[test]
    fn unreadable_file_yields_no_duration() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("junk.mp4"), b"not a container").unwrap();

        let library = MediaLibrary::new(dir.path());
        assert_eq!(library.duration_secs("junk.mp4"), None);
        // Second lookup hits the cache, same answer.
        assert_eq!(library.duration_secs("junk.mp4"), None);
    }
}
