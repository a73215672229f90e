//! Input volumes and the addresses that point into them.

use ndarray::{Array3, ArrayD, Axis, Ix3};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, VolsegError};

/// One subject's image/segmentation pair, each shaped `slices x height x width`.
///
/// Records are produced by an external loader; the dataset layer only borrows
/// them. Fields are public, so `check` is re-run whenever a table is built.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeRecord<A, L> {
    pub image: Array3<A>,
    pub seg: Array3<L>,
}

impl<A, L> VolumeRecord<A, L> {
    /// Pairs an image with its segmentation. Both must have the same shape.
    pub fn new(image: Array3<A>, seg: Array3<L>) -> Result<Self> {
        let record = Self { image, seg };
        record.check()?;
        Ok(record)
    }

    /// Builds a record from dynamically-dimensioned arrays, as handed over by
    /// loaders that do not know the rank up front.
    pub fn from_dyn(image: ArrayD<A>, seg: ArrayD<L>) -> Result<Self> {
        if image.ndim() != 3 || seg.ndim() != 3 {
            return Err(VolsegError::Precondition(format!(
                "image and seg must be 3-dimensional (slices x height x width), got {:?} and {:?}",
                image.shape(),
                seg.shape()
            )));
        }
        let image = image.into_dimensionality::<Ix3>()?;
        let seg = seg.into_dimensionality::<Ix3>()?;
        Self::new(image, seg)
    }

    /// Number of slices along the first axis.
    pub fn slice_count(&self) -> usize {
        self.image.len_of(Axis(0))
    }

    /// `(height, width)` of every slice.
    pub fn spatial_shape(&self) -> (usize, usize) {
        let (_, h, w) = self.image.dim();
        (h, w)
    }

    pub(crate) fn check(&self) -> Result<()> {
        if self.image.shape() != self.seg.shape() {
            return Err(VolsegError::Precondition(format!(
                "image shape {:?} does not match seg shape {:?}",
                self.image.shape(),
                self.seg.shape()
            )));
        }
        Ok(())
    }
}

/// Position of one slice: which volume, and which index along its first axis.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SliceAddress {
    pub volume_index: usize,
    pub slice_index: usize,
}

impl SliceAddress {
    pub fn new(volume_index: usize, slice_index: usize) -> Self {
        Self {
            volume_index,
            slice_index,
        }
    }
}

impl fmt::Display for SliceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.volume_index, self.slice_index)
    }
}
