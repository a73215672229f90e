//! The slice-level view over a collection of volumes.
//!
//! `SliceIndex` flattens `VolumeRecord`s into a table of `SliceAddress`es once, at
//! construction, and serves `Sample`s from it by global index. `EpochSampler`
//! produces the per-epoch visiting order for an external training loop; it never
//! touches the data itself.

pub mod sampler;
pub mod slice_index;

pub use sampler::EpochSampler;
pub use slice_index::SliceIndex;

#[cfg(test)]
mod slice_index_tests;
