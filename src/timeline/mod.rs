//! Timeline placement: turning an incident catalog into clip placements.

mod naming;
mod placer;

pub use naming::{NumericSuffixNaming, SequenceNaming};
pub use placer::{
    ClipPlacement, ContextPolicy, PlacementReport, PlacementRole, SkippedIncident, SourceInspector,
    SpliceFailure, TimelinePlacer,
};
