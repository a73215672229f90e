//! This module defines the core, strongly-typed data representations shared by
//! the dataset and metric layers.
//!
//! It currently includes the input `VolumeRecord`, the `SliceAddress` stored in
//! the slice table, and the per-index `Sample` handed to a training loop.

pub mod sample;
pub mod volume;

// Re-export the main type(s) for easier access.
pub use sample::Sample;
pub use volume::{SliceAddress, VolumeRecord};
