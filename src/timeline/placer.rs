//! Clip placement over fixed-width incident slots.
//!
//! Each incident gets one slot of `(context_before + context_after) * fps`
//! frames, allocated in visitation order (files lexicographic, timestamps
//! ascending). The primary clip always starts at its slot's first frame, so
//! placements of successive incidents can never overlap; boundary splices
//! borrow footage from the neighbouring sequential file and sit flush
//! against the primary clip.

use crate::catalog::IncidentCatalog;
use crate::error::Error;
use crate::timeline::SequenceNaming;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Context window and render settings for one placement run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextPolicy {
    /// Seconds of footage kept before each incident.
    pub context_before_secs: f64,
    /// Seconds of footage kept after each incident.
    pub context_after_secs: f64,
    /// Timeline frame rate.
    pub frames_per_second: f64,
    /// Editing-host channels cycled across successive incidents.
    pub channel_cycle: Vec<u32>,
}

impl Default for ContextPolicy {
    fn default() -> Self {
        use crate::constants::timeline;
        Self {
            context_before_secs: timeline::DEFAULT_CONTEXT_BEFORE_SECS,
            context_after_secs: timeline::DEFAULT_CONTEXT_AFTER_SECS,
            frames_per_second: timeline::DEFAULT_FRAMES_PER_SECOND,
            channel_cycle: timeline::DEFAULT_CHANNEL_CYCLE.to_vec(),
        }
    }
}

impl ContextPolicy {
    /// Validate the policy.
    pub fn validate(&self) -> crate::Result<()> {
        let fail = |message: String| Err(Error::ConfigValidation { message });
        if self.context_before_secs < 0.0 || self.context_after_secs < 0.0 {
            return fail("context window seconds must be non-negative".to_string());
        }
        if self.context_before_secs + self.context_after_secs <= 0.0 {
            return fail("context window must be longer than zero".to_string());
        }
        if !self.frames_per_second.is_finite() || self.frames_per_second <= 0.0 {
            return fail(format!(
                "frames_per_second must be positive, got {}",
                self.frames_per_second
            ));
        }
        if self.channel_cycle.is_empty() {
            return fail("channel_cycle must name at least one channel".to_string());
        }
        Ok(())
    }

    /// Uniform slot width in frames.
    pub fn slot_frames(&self) -> i64 {
        to_frames(
            self.context_before_secs + self.context_after_secs,
            self.frames_per_second,
        )
    }

    fn channel_for(&self, slot_index: i64) -> u32 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let i = (slot_index as u64 % self.channel_cycle.len() as u64) as usize;
        self.channel_cycle[i]
    }
}

/// Duration lookup and existence probe for source files.
///
/// Backed by the filesystem in production; tests substitute an in-memory map.
pub trait SourceInspector {
    /// Native duration of `file_id` in seconds, if resolvable.
    fn duration_secs(&self, file_id: &str) -> Option<f64>;

    /// Whether a file named `file_id` exists.
    fn exists(&self, file_id: &str) -> bool;
}

/// Why a placement exists within its incident slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementRole {
    /// Footage from the incident's own file.
    Primary,
    /// Lead-in borrowed from the preceding sequential file.
    LeadIn,
    /// Tail borrowed from the following sequential file.
    Tail,
}

/// One clip placement instruction for the editing host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipPlacement {
    /// Source file identifier.
    pub source: String,
    /// Timeline start frame. May be negative for a lead-in at slot zero;
    /// clamping is the host's business.
    pub timeline_start: i64,
    /// Offset into the source file, in frames (>= 0).
    pub source_in: i64,
    /// Clip length in frames (> 0).
    pub duration: i64,
    /// Editing-host channel index.
    pub channel: u32,
    /// Role of this clip within its incident slot.
    pub role: PlacementRole,
}

impl ClipPlacement {
    /// First timeline frame after the clip.
    pub fn timeline_end(&self) -> i64 {
        self.timeline_start + self.duration
    }
}

/// An incident that could not be placed at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedIncident {
    /// File the incident belongs to.
    pub file_id: String,
    /// Incident timestamp in seconds.
    pub timestamp_secs: f64,
    /// Human-readable reason.
    pub reason: String,
}

/// A splice that was dropped while its primary placement proceeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpliceFailure {
    /// File of the incident whose splice failed.
    pub file_id: String,
    /// Incident timestamp in seconds.
    pub timestamp_secs: f64,
    /// Human-readable reason.
    pub reason: String,
}

/// Outcome of one placement run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementReport {
    /// Placements in timeline order.
    pub placements: Vec<ClipPlacement>,
    /// Total timeline length: placed incidents times slot width.
    pub total_duration_frames: i64,
    /// Incidents skipped entirely.
    pub skipped: Vec<SkippedIncident>,
    /// Splices dropped while the primary placement proceeded.
    pub splice_failures: Vec<SpliceFailure>,
}

/// Maps an incident catalog onto non-overlapping clip placements.
pub struct TimelinePlacer<'a, S: SourceInspector, N: SequenceNaming> {
    sources: &'a S,
    naming: &'a N,
    policy: ContextPolicy,
}

impl<'a, S: SourceInspector, N: SequenceNaming> TimelinePlacer<'a, S, N> {
    /// Create a placer for one run.
    pub fn new(sources: &'a S, naming: &'a N, policy: ContextPolicy) -> Self {
        Self {
            sources,
            naming,
            policy,
        }
    }

    /// Place every incident in the catalog.
    ///
    /// Failures are scoped per incident: an unresolvable source skips that
    /// incident, a malformed filename skips only its splice. Both are
    /// recorded in the report and logged; placement of the remaining
    /// incidents continues. Skipped incidents free their slot, so the
    /// timeline stays hole-free.
    pub fn place(&self, catalog: &IncidentCatalog) -> PlacementReport {
        let slot_frames = self.policy.slot_frames();
        let mut report = PlacementReport::default();
        let mut slot_index = 0i64;

        for (file_id, timestamp_secs) in catalog.iter() {
            let Some(native_secs) = self.sources.duration_secs(file_id) else {
                warn!(
                    "skipping incident at {timestamp_secs:.2}s: {}",
                    Error::UnknownSource {
                        file_id: file_id.to_string()
                    }
                );
                report.skipped.push(SkippedIncident {
                    file_id: file_id.to_string(),
                    timestamp_secs,
                    reason: "source duration could not be resolved".to_string(),
                });
                continue;
            };

            if self.place_incident(file_id, timestamp_secs, native_secs, slot_index, &mut report)
            {
                slot_index += 1;
            }
        }

        report.total_duration_frames = slot_index * slot_frames;
        report
    }

    /// Place one incident into `slot_index`. Returns whether the slot was used.
    fn place_incident(
        &self,
        file_id: &str,
        timestamp_secs: f64,
        native_secs: f64,
        slot_index: i64,
        report: &mut PlacementReport,
    ) -> bool {
        let fps = self.policy.frames_per_second;
        let before = self.policy.context_before_secs;
        let after = self.policy.context_after_secs;

        let slot_start = slot_index * self.policy.slot_frames();
        let channel = self.policy.channel_for(slot_index);
        let native_frames = to_frames(native_secs, fps);

        // Primary clip: as much of [timestamp - before, timestamp + after] as
        // the file itself holds.
        let lead_secs = timestamp_secs.min(before);
        let source_in = to_frames((timestamp_secs - before).max(0.0), fps);
        let requested = to_frames(lead_secs + after, fps);
        let duration = clamp_to_source(source_in, requested, native_frames);

        if duration <= 0 {
            warn!(
                "skipping incident at {timestamp_secs:.2}s in '{file_id}': \
                 timestamp lies outside the source's {native_secs:.2}s duration"
            );
            report.skipped.push(SkippedIncident {
                file_id: file_id.to_string(),
                timestamp_secs,
                reason: "timestamp outside source duration".to_string(),
            });
            return false;
        }

        // Lead-in splice when the file starts less than `before` seconds
        // ahead of the incident.
        let missing_lead = to_frames((before - timestamp_secs).max(0.0), fps);
        if missing_lead > 0 {
            self.splice_lead_in(
                file_id,
                timestamp_secs,
                missing_lead,
                slot_start,
                channel,
                report,
            );
        }

        debug!(
            "slot {slot_index}: '{file_id}' t={timestamp_secs:.2}s -> \
             frames [{slot_start}, {}) on channel {channel}",
            slot_start + duration
        );
        report.placements.push(ClipPlacement {
            source: file_id.to_string(),
            timeline_start: slot_start,
            source_in,
            duration,
            channel,
            role: PlacementRole::Primary,
        });

        // Tail splice when the file ends less than `after` seconds past the
        // incident.
        let missing_tail = to_frames((timestamp_secs + after - native_secs).max(0.0), fps);
        if missing_tail > 0 {
            self.splice_tail(
                file_id,
                timestamp_secs,
                missing_tail,
                slot_start + duration,
                channel,
                report,
            );
        }

        true
    }

    /// Borrow the missing lead-in from the preceding file's tail.
    ///
    /// The splice ends exactly where the primary starts; at slot zero its
    /// start frame goes negative and is left for the host to clamp. A
    /// missing predecessor truncates the lead-in silently, by design.
    fn splice_lead_in(
        &self,
        file_id: &str,
        timestamp_secs: f64,
        missing_frames: i64,
        primary_start: i64,
        channel: u32,
        report: &mut PlacementReport,
    ) {
        let predecessor = match self.naming.predecessor_of(file_id) {
            Ok(id) => id,
            Err(e) => {
                warn!("lead-in splice dropped: {e}");
                report.splice_failures.push(SpliceFailure {
                    file_id: file_id.to_string(),
                    timestamp_secs,
                    reason: e.to_string(),
                });
                return;
            }
        };

        if !self.sources.exists(&predecessor) {
            debug!("no predecessor '{predecessor}' on disk, lead-in truncated");
            return;
        }

        let Some(pred_secs) = self.sources.duration_secs(&predecessor) else {
            warn!("lead-in splice dropped: no duration for '{predecessor}'");
            report.splice_failures.push(SpliceFailure {
                file_id: file_id.to_string(),
                timestamp_secs,
                reason: format!("predecessor '{predecessor}' duration could not be resolved"),
            });
            return;
        };

        let pred_frames = to_frames(pred_secs, self.policy.frames_per_second);
        let source_in = (pred_frames - missing_frames).max(0);
        let duration = clamp_to_source(source_in, missing_frames, pred_frames);
        if duration <= 0 {
            return;
        }

        report.placements.push(ClipPlacement {
            source: predecessor,
            timeline_start: primary_start - duration,
            source_in,
            duration,
            channel,
            role: PlacementRole::LeadIn,
        });
    }

    /// Borrow the missing trailing context from the following file's head.
    fn splice_tail(
        &self,
        file_id: &str,
        timestamp_secs: f64,
        missing_frames: i64,
        primary_end: i64,
        channel: u32,
        report: &mut PlacementReport,
    ) {
        let successor = match self.naming.successor_of(file_id) {
            Ok(id) => id,
            Err(e) => {
                warn!("tail splice dropped: {e}");
                report.splice_failures.push(SpliceFailure {
                    file_id: file_id.to_string(),
                    timestamp_secs,
                    reason: e.to_string(),
                });
                return;
            }
        };

        if !self.sources.exists(&successor) {
            debug!("no successor '{successor}' on disk, tail truncated");
            return;
        }

        let Some(succ_secs) = self.sources.duration_secs(&successor) else {
            warn!("tail splice dropped: no duration for '{successor}'");
            report.splice_failures.push(SpliceFailure {
                file_id: file_id.to_string(),
                timestamp_secs,
                reason: format!("successor '{successor}' duration could not be resolved"),
            });
            return;
        };

        let succ_frames = to_frames(succ_secs, self.policy.frames_per_second);
        let duration = clamp_to_source(0, missing_frames, succ_frames);
        if duration <= 0 {
            return;
        }

        report.placements.push(ClipPlacement {
            source: successor,
            timeline_start: primary_end,
            source_in: 0,
            duration,
            channel,
            role: PlacementRole::Tail,
        });
    }
}

/// Round a duration in seconds to whole timeline frames.
#[allow(clippy::cast_possible_truncation)]
fn to_frames(secs: f64, fps: f64) -> i64 {
    (secs * fps).round() as i64
}

/// Shrink a requested clip so `source_in + duration` stays inside the source.
///
/// The single clamping point for every placement, primary or splice.
fn clamp_to_source(source_in: i64, requested_frames: i64, native_frames: i64) -> i64 {
    requested_frames.min(native_frames - source_in).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_shrinks_overrunning_requests_only() {
        assert_eq!(clamp_to_source(0, 100, 300), 100);
        assert_eq!(clamp_to_source(250, 100, 300), 50);
        assert_eq!(clamp_to_source(300, 100, 300), 0);
        assert_eq!(clamp_to_source(400, 100, 300), 0);
    }

    #[test]
    fn slot_width_is_context_times_fps() {
        let policy = ContextPolicy {
            context_before_secs: 14.0,
            context_after_secs: 5.0,
            frames_per_second: 30.0,
            channel_cycle: vec![1, 3],
        };
        assert_eq!(policy.slot_frames(), 570);
    }

    #[test]
    fn channel_cycle_alternates() {
        let policy = ContextPolicy::default();
        assert_eq!(policy.channel_for(0), 1);
        assert_eq!(policy.channel_for(1), 3);
        assert_eq!(policy.channel_for(2), 1);
    }

    #[test]
    fn invalid_policies_are_rejected() {
        let no_fps = ContextPolicy {
            frames_per_second: 0.0,
            ..ContextPolicy::default()
        };
        assert!(no_fps.validate().is_err());

        let negative_context = ContextPolicy {
            context_before_secs: -1.0,
            ..ContextPolicy::default()
        };
        assert!(negative_context.validate().is_err());

        let no_channels = ContextPolicy {
            channel_cycle: Vec::new(),
            ..ContextPolicy::default()
        };
        assert!(no_channels.validate().is_err());
    }
}
