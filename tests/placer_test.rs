//! Tests for timeline placement over an incident catalog.

#![allow(clippy::unwrap_used)]

use beepcut::catalog::IncidentCatalog;
use beepcut::timeline::{
    ContextPolicy, NumericSuffixNaming, PlacementRole, SourceInspector, TimelinePlacer,
};
use std::collections::HashMap;

/// In-memory stand-in for the media library.
struct FakeInspector {
    durations: HashMap<String, f64>,
}

impl FakeInspector {
    fn new(entries: &[(&str, f64)]) -> Self {
        Self {
            durations: entries
                .iter()
                .map(|(id, secs)| ((*id).to_string(), *secs))
                .collect(),
        }
    }
}

impl SourceInspector for FakeInspector {
    fn duration_secs(&self, file_id: &str) -> Option<f64> {
        self.durations.get(file_id).copied()
    }

    fn exists(&self, file_id: &str) -> bool {
        self.durations.contains_key(file_id)
    }
}

fn test_policy() -> ContextPolicy {
    ContextPolicy {
        context_before_secs: 14.0,
        context_after_secs: 5.0,
        frames_per_second: 30.0,
        channel_cycle: vec![1, 3],
    }
}

#[test]
fn test_incidents_get_non_overlapping_slots() {
    let sources = FakeInspector::new(&[("REC0041.MP4", 60.0)]);
    let naming = NumericSuffixNaming;
    let mut catalog = IncidentCatalog::new();
    catalog.add("REC0041.MP4", 20.0);
    catalog.add("REC0041.MP4", 45.0);

    let placer = TimelinePlacer::new(&sources, &naming, test_policy());
    let report = placer.place(&catalog);

    assert_eq!(report.placements.len(), 2);
    let first = &report.placements[0];
    let second = &report.placements[1];

    // Slot width is (14 + 5) * 30 = 570 frames.
    assert_eq!(first.timeline_start, 0);
    assert_eq!(first.duration, 570);
    assert_eq!(second.timeline_start, 570);
    assert_eq!(second.duration, 570);
    assert!(first.timeline_end() <= second.timeline_start);

    // Channels alternate through the cycle.
    assert_eq!(first.channel, 1);
    assert_eq!(second.channel, 3);

    assert_eq!(report.total_duration_frames, 2 * 570);
    assert!(report.skipped.is_empty());
    assert!(report.splice_failures.is_empty());
}

#[test]
fn test_early_incident_splices_predecessor_lead_in() {
    let sources = FakeInspector::new(&[("REC0041.MP4", 60.0), ("REC0042.MP4", 60.0)]);
    let naming = NumericSuffixNaming;
    let mut catalog = IncidentCatalog::new();
    catalog.add("REC0042.MP4", 5.0);

    let placer = TimelinePlacer::new(&sources, &naming, test_policy());
    let report = placer.place(&catalog);

    assert_eq!(report.placements.len(), 2);

    let lead_in = report
        .placements
        .iter()
        .find(|p| p.role == PlacementRole::LeadIn)
        .unwrap();
    let primary = report
        .placements
        .iter()
        .find(|p| p.role == PlacementRole::Primary)
        .unwrap();

    // 14s of context wanted, 5s available in the file itself, so 9s
    // (270 frames) come from the predecessor's tail.
    assert_eq!(lead_in.source, "REC0041.MP4");
    assert_eq!(lead_in.duration, 270);
    assert_eq!(lead_in.source_in, 60 * 30 - 270);

    // The splice sits flush against the primary, running into negative
    // timeline frames at slot zero.
    assert_eq!(primary.timeline_start, 0);
    assert_eq!(lead_in.timeline_start, -270);
    assert_eq!(lead_in.timeline_end(), primary.timeline_start);

    // Primary covers [0s, 10s] of its own file.
    assert_eq!(primary.source_in, 0);
    assert_eq!(primary.duration, 300);
    assert_eq!(primary.channel, lead_in.channel);
}

#[test]
fn test_missing_predecessor_truncates_without_error() {
    let sources = FakeInspector::new(&[("REC0042.MP4", 60.0)]);
    let naming = NumericSuffixNaming;
    let mut catalog = IncidentCatalog::new();
    catalog.add("REC0042.MP4", 5.0);

    let placer = TimelinePlacer::new(&sources, &naming, test_policy());
    let report = placer.place(&catalog);

    // Only the primary; the unavailable lead-in is dropped quietly.
    assert_eq!(report.placements.len(), 1);
    assert_eq!(report.placements[0].role, PlacementRole::Primary);
    assert!(report.splice_failures.is_empty());
    assert!(report.skipped.is_empty());
}

#[test]
fn test_missing_successor_truncates_without_error() {
    let sources = FakeInspector::new(&[("REC0041.MP4", 60.0)]);
    let naming = NumericSuffixNaming;
    let mut catalog = IncidentCatalog::new();
    catalog.add("REC0041.MP4", 58.0);

    let placer = TimelinePlacer::new(&sources, &naming, test_policy());
    let report = placer.place(&catalog);

    // The 3s of trailing context have nowhere to come from; only the
    // primary is placed and nothing is reported as a failure.
    assert_eq!(report.placements.len(), 1);
    assert_eq!(report.placements[0].role, PlacementRole::Primary);
    assert!(report.splice_failures.is_empty());
    assert!(report.skipped.is_empty());
}

#[test]
fn test_late_incident_splices_successor_tail() {
    let sources = FakeInspector::new(&[("REC0041.MP4", 60.0), ("REC0042.MP4", 60.0)]);
    let naming = NumericSuffixNaming;
    let mut catalog = IncidentCatalog::new();
    catalog.add("REC0041.MP4", 58.0);

    let placer = TimelinePlacer::new(&sources, &naming, test_policy());
    let report = placer.place(&catalog);

    assert_eq!(report.placements.len(), 2);
    let primary = &report.placements[0];
    let tail = &report.placements[1];

    assert_eq!(primary.role, PlacementRole::Primary);
    assert_eq!(tail.role, PlacementRole::Tail);

    // 3s of trailing context are missing from the file, borrowed from the
    // head of the successor.
    assert_eq!(tail.source, "REC0042.MP4");
    assert_eq!(tail.source_in, 0);
    assert_eq!(tail.duration, 90);
    assert_eq!(tail.timeline_start, primary.timeline_end());
}

#[test]
fn test_unknown_source_is_skipped_and_slot_is_reused() {
    let sources = FakeInspector::new(&[("REC0041.MP4", 60.0)]);
    let naming = NumericSuffixNaming;
    let mut catalog = IncidentCatalog::new();
    catalog.add("GHOST.MP4", 10.0);
    catalog.add("REC0041.MP4", 30.0);

    let placer = TimelinePlacer::new(&sources, &naming, test_policy());
    let report = placer.place(&catalog);

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].file_id, "GHOST.MP4");

    // The surviving incident takes slot zero; skips leave no hole.
    assert_eq!(report.placements.len(), 1);
    assert_eq!(report.placements[0].timeline_start, 0);
    assert_eq!(report.total_duration_frames, 570);
}

#[test]
fn test_malformed_name_drops_splice_but_keeps_primary() {
    let sources = FakeInspector::new(&[("dashcam.mp4", 60.0)]);
    let naming = NumericSuffixNaming;
    let mut catalog = IncidentCatalog::new();
    catalog.add("dashcam.mp4", 5.0);

    let placer = TimelinePlacer::new(&sources, &naming, test_policy());
    let report = placer.place(&catalog);

    assert_eq!(report.placements.len(), 1);
    assert_eq!(report.placements[0].role, PlacementRole::Primary);
    assert_eq!(report.splice_failures.len(), 1);
    assert_eq!(report.splice_failures[0].file_id, "dashcam.mp4");
    assert_eq!(report.total_duration_frames, 570);
}

#[test]
fn test_timestamp_beyond_source_duration_is_skipped() {
    let sources = FakeInspector::new(&[("REC0041.MP4", 60.0)]);
    let naming = NumericSuffixNaming;
    let mut catalog = IncidentCatalog::new();
    catalog.add("REC0041.MP4", 90.0);

    let placer = TimelinePlacer::new(&sources, &naming, test_policy());
    let report = placer.place(&catalog);

    assert!(report.placements.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.total_duration_frames, 0);
}

#[test]
fn test_empty_catalog_produces_empty_report() {
    let sources = FakeInspector::new(&[]);
    let naming = NumericSuffixNaming;
    let catalog = IncidentCatalog::new();

    let placer = TimelinePlacer::new(&sources, &naming, test_policy());
    let report = placer.place(&catalog);

    assert!(report.placements.is_empty());
    assert_eq!(report.total_duration_frames, 0);
}
