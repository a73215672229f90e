//! This module defines shared traits used across the dataset layer.

use crate::error::Result;

/// Capability interface for anything a training loop can fetch from by index.
///
/// Implementors must resolve every index in `0..len()` and reject the rest with
/// `VolsegError::IndexOutOfRange`.
pub trait SliceDataset {
    /// The type of a single item returned by the dataset.
    type Item;

    /// Number of addressable items.
    fn len(&self) -> usize;

    /// Returns the item at `index`.
    fn get(&self, index: usize) -> Result<Self::Item>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
