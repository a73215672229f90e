//! This file is the root of the `volseg` Rust crate.
//!
//! The crate has two independent halves:
//! 1.  `dataset`: a flat, randomly-addressable view over the 2D slices of a
//!     collection of 3D image/segmentation volumes, for training loops.
//! 2.  `metrics`: Dice and Jaccard overlap between a predicted and a ground-truth
//!     3D segmentation, for evaluation loops.
//!
//! Volume loading, collation, and model code live outside this crate; it only
//! consumes in-memory `ndarray` volumes and hands back arrays and scalars.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

// Lets `log_metric!` reach the `log` facade from downstream crates.
#[doc(hidden)]
pub use log as __log;

pub mod config;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod traits;
pub mod types;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================
pub use config::{OverlapConfig, SamplingConfig, VolsegConfig, DEFAULT_EPSILON};
pub use dataset::{EpochSampler, SliceIndex};
pub use error::{Result, VolsegError};
pub use logging::init_logging;
pub use metrics::{
    dice, dice_with_epsilon, jaccard, jaccard_with_epsilon, OverlapCounts, OverlapReport,
    OverlapStats, ReportSummary, VolumeOverlap,
};
pub use traits::SliceDataset;
pub use types::{Sample, SliceAddress, VolumeRecord};
