//! Sequential file naming schemes.
//!
//! Dashcams write strictly sequential per-session counters into filenames
//! ("REC0041.MP4", "REC0042.MP4", ...). Splicing context across a file
//! boundary needs the neighbouring name; the scheme is a capability so other
//! conventions can be substituted without touching the placer.

use crate::error::{Error, Result};

/// Derives the neighbouring file identifiers of a sequentially named file.
pub trait SequenceNaming {
    /// Identifier of the immediately preceding file in the sequence.
    fn predecessor_of(&self, file_id: &str) -> Result<String>;

    /// Identifier of the immediately following file in the sequence.
    fn successor_of(&self, file_id: &str) -> Result<String>;
}

/// Naming scheme for a zero-padded numeric counter at the end of the stem.
///
/// The counter's zero-padding width is preserved: the predecessor of
/// `REC0100.MP4` is `REC0099.MP4`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericSuffixNaming;

impl NumericSuffixNaming {
    fn shift(file_id: &str, delta: i64) -> Result<String> {
        let (stem, extension) = match file_id.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
            _ => (file_id, None),
        };

        let digits_start = stem
            .rfind(|c: char| !c.is_ascii_digit())
            .map_or(0, |i| i + c_len(stem, i));
        let (prefix, digits) = stem.split_at(digits_start);

        if digits.is_empty() {
            return Err(Error::MalformedFilename {
                file_id: file_id.to_string(),
            });
        }

        let counter: i64 = digits.parse().map_err(|_| Error::MalformedFilename {
            file_id: file_id.to_string(),
        })?;

        let shifted = counter + delta;
        if shifted < 0 {
            // A session's first file has no predecessor to name.
            return Err(Error::MalformedFilename {
                file_id: file_id.to_string(),
            });
        }

        let width = digits.len();
        let mut result = format!("{prefix}{shifted:0width$}");
        if let Some(ext) = extension {
            result.push('.');
            result.push_str(ext);
        }
        Ok(result)
    }
}

/// Byte length of the char starting at `i` in `s`.
fn c_len(s: &str, i: usize) -> usize {
    s[i..].chars().next().map_or(1, char::len_utf8)
}

impl SequenceNaming for NumericSuffixNaming {
    fn predecessor_of(&self, file_id: &str) -> Result<String> {
        Self::shift(file_id, -1)
    }

    fn successor_of(&self, file_id: &str) -> Result<String> {
        Self::shift(file_id, 1)
    }
}
