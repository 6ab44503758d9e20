//! Incident catalog: per-file triple-beep timestamps.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Ordered mapping from source file identifier to ascending incident times.
///
/// This is the serialization boundary between detection and placement: the
/// JSON form is a plain object of `file id -> [seconds, ...]`, keys sorted on
/// write, per-file timestamps ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncidentCatalog {
    incidents: BTreeMap<String, Vec<f64>>,
}

impl IncidentCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure `file_id` has an entry, even with no incidents.
    ///
    /// Processed files with zero detections still appear in the catalog so a
    /// later run can tell "scanned, clean" from "never scanned".
    pub fn insert_file(&mut self, file_id: &str) {
        self.incidents.entry(file_id.to_string()).or_default();
    }

    /// Record one incident, keeping the file's timestamp list ascending.
    pub fn add(&mut self, file_id: &str, timestamp_secs: f64) {
        let timestamps = self.incidents.entry(file_id.to_string()).or_default();
        let at = timestamps.partition_point(|&t| t <= timestamp_secs);
        timestamps.insert(at, timestamp_secs);
    }

    /// File identifiers in lexicographic order.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.incidents.keys().map(String::as_str)
    }

    /// Ascending incident timestamps for one file, if known.
    pub fn incidents_for(&self, file_id: &str) -> Option<&[f64]> {
        self.incidents.get(file_id).map(Vec::as_slice)
    }

    /// Iterate (file, timestamp) pairs in placement visitation order:
    /// lexicographic by file, ascending timestamp within a file.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.incidents
            .iter()
            .flat_map(|(file, times)| times.iter().map(move |&t| (file.as_str(), t)))
    }

    /// Total number of incidents across all files.
    pub fn total_incidents(&self) -> usize {
        self.incidents.values().map(Vec::len).sum()
    }

    /// Whether the catalog holds no files at all.
    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }

    /// Load a catalog from a JSON file.
    ///
    /// Key order in the document is irrelevant; timestamp lists are re-sorted
    /// ascending to restore the catalog invariant.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::CatalogRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut catalog: Self =
            serde_json::from_str(&contents).map_err(|e| Error::CatalogParse {
                path: path.to_path_buf(),
                source: e,
            })?;

        for timestamps in catalog.incidents.values_mut() {
            timestamps.sort_by(f64::total_cmp);
        }

        Ok(catalog)
    }

    /// Write the catalog as pretty-printed JSON with sorted keys.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self).map_err(|e| Error::JsonWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
