//! Timeline JSON document writer.
//!
//! The document is the batch handed to the external editing host: the full
//! ordered placement list plus everything the host needs to size and audit
//! the timeline. The host applies the placements; nothing here touches a
//! scene graph.

use crate::error::{Error, Result};
use crate::timeline::{ContextPolicy, PlacementReport};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Serialized form of one placement run.
#[derive(Debug, Serialize, Deserialize)]
pub struct TimelineDocument {
    /// When the document was generated.
    pub generated_at: DateTime<Utc>,
    /// Context policy the run used.
    pub policy: ContextPolicy,
    /// Placement results, including the skip report.
    #[serde(flatten)]
    pub report: PlacementReport,
}

/// Write a placement run as pretty-printed JSON.
pub fn write_timeline_document(
    path: &Path,
    policy: &ContextPolicy,
    report: &PlacementReport,
) -> Result<()> {
    let document = TimelineDocument {
        generated_at: Utc::now(),
        policy: policy.clone(),
        report: report.clone(),
    };

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &document).map_err(|e| Error::JsonWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
