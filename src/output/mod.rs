//! Output documents consumed by external hosts.

mod timeline_json;

pub use timeline_json::{TimelineDocument, write_timeline_document};
