//! Input collection for the detection pipeline.

use crate::constants::VIDEO_EXTENSIONS;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Collect video files from paths (files and directories).
///
/// Directories are walked recursively; the result is sorted so detection and
/// catalog order are stable across runs.
pub fn collect_input_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_video_file(path) {
                files.push(path.clone());
            } else {
                warn!("skipping unsupported file: {}", path.display());
            }
        } else if path.is_dir() {
            collect_video_files_recursive(path, &mut files)?;
        } else {
            warn!("skipping non-existent path: {}", path.display());
        }
    }

    files.sort();
    Ok(files)
}

fn collect_video_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            collect_video_files_recursive(&path, files)?;
        } else if is_video_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

/// Check if a file has a supported video container extension.
fn is_video_file(path: &Path) -> bool {
    use std::ffi::OsStr;

    path.extension().is_some_and(|ext| {
        VIDEO_EXTENSIONS
            .iter()
            .any(|candidate| ext.eq_ignore_ascii_case(OsStr::new(candidate)))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_is_case_insensitive() {
        assert!(is_video_file(Path::new("REC0001.MP4")));
        assert!(is_video_file(Path::new("clip.mov")));
        assert!(!is_video_file(Path::new("notes.txt")));
        assert!(!is_video_file(Path::new("no_extension")));
    }

    #[test]
    fn directories_are_walked_and_output_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("trip");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(dir.path().join("b.mp4"), b"x").unwrap();
        std::fs::write(nested.join("a.mp4"), b"x").unwrap();
        std::fs::write(dir.path().join("skip.json"), b"x").unwrap();

        let files = collect_input_files(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("b.mp4"));
        assert!(files[1].ends_with("trip/a.mp4"));
    }
}
