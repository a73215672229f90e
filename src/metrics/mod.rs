//! Overlap statistics between a predicted and a ground-truth label volume.
//!
//! Both volumes are binarized independently (label `> 0` is foreground) and
//! compared voxel by voxel. The free functions use `DEFAULT_EPSILON`;
//! `OverlapStats` carries a configured epsilon instead.

pub mod overlap;
pub mod report;

pub use overlap::{
    dice, dice_with_epsilon, jaccard, jaccard_with_epsilon, OverlapCounts, OverlapStats,
};
pub use report::{OverlapReport, ReportSummary, VolumeOverlap};
