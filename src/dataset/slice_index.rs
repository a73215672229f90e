// In: src/dataset/slice_index.rs

use log::{debug, info, warn};
use ndarray::Axis;
use num_traits::AsPrimitive;

use crate::config::SamplingConfig;
use crate::dataset::sampler::EpochSampler;
use crate::error::{Result, VolsegError};
use crate::traits::SliceDataset;
use crate::types::{Sample, SliceAddress, VolumeRecord};

/// A flat, randomly-addressable view over the slices of borrowed volumes.
///
/// The address table is built once in ascending `(volume_index, slice_index)`
/// order and never mutated, so global index `idx` always maps to the same slice
/// and `get` is O(1). Only addresses are stored; slice data is copied out of the
/// borrowed records on demand.
#[derive(Debug)]
pub struct SliceIndex<'a, A, L> {
    data: &'a [VolumeRecord<A, L>],
    slices: Vec<SliceAddress>,
}

impl<'a, A, L> SliceIndex<'a, A, L>
where
    A: AsPrimitive<f32>,
    L: AsPrimitive<i64>,
{
    /// Builds the slice table over `data`.
    ///
    /// # Errors
    /// Returns `VolsegError::Precondition` naming the offending volume if any
    /// record's `image` and `seg` shapes disagree.
    pub fn new(data: &'a [VolumeRecord<A, L>]) -> Result<Self> {
        let total: usize = data.iter().map(VolumeRecord::slice_count).sum();
        let mut slices = Vec::with_capacity(total);

        for (volume_index, record) in data.iter().enumerate() {
            record.check().map_err(|e| match e {
                VolsegError::Precondition(msg) => {
                    VolsegError::Precondition(format!("volume {}: {}", volume_index, msg))
                }
                other => other,
            })?;

            let count = record.slice_count();
            if count == 0 {
                warn!("volume {} has no slices and contributes nothing", volume_index);
            }
            slices.extend((0..count).map(|slice_index| SliceAddress::new(volume_index, slice_index)));
        }

        info!(
            "Built slice table: {} volumes, {} slices",
            data.len(),
            slices.len()
        );
        log_metric!("event"="build_slice_table", "volumes"=&data.len(), "slices"=&slices.len());

        Ok(Self { data, slices })
    }

    /// Number of slices across all volumes.
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Number of volumes the table was built from, including empty ones.
    pub fn volume_count(&self) -> usize {
        self.data.len()
    }

    /// The whole address table, in global index order.
    pub fn addresses(&self) -> &[SliceAddress] {
        &self.slices
    }

    /// Resolves a global index to the slice it refers to.
    pub fn address(&self, idx: usize) -> Result<SliceAddress> {
        self.slices
            .get(idx)
            .copied()
            .ok_or(VolsegError::IndexOutOfRange {
                index: idx,
                len: self.slices.len(),
            })
    }

    /// Extracts slice `idx` as a `Sample` with `1 x H x W` image (`f32`) and
    /// segmentation (`i64`) arrays. The source volumes are left untouched.
    pub fn get(&self, idx: usize) -> Result<Sample> {
        let addr = self.address(idx)?;
        let record = &self.data[addr.volume_index];

        let image = record
            .image
            .index_axis(Axis(0), addr.slice_index)
            .insert_axis(Axis(0))
            .mapv(AsPrimitive::<f32>::as_);
        let seg = record
            .seg
            .index_axis(Axis(0), addr.slice_index)
            .insert_axis(Axis(0))
            .mapv(AsPrimitive::<i64>::as_);

        debug!("Fetched sample {} from slice {}", idx, addr);

        Ok(Sample { id: idx, image, seg })
    }

    /// An epoch sampler sized to this index.
    pub fn sampler(&self, config: SamplingConfig) -> Result<EpochSampler> {
        EpochSampler::new(self.len(), config)
    }
}

impl<'a, A, L> SliceDataset for SliceIndex<'a, A, L>
where
    A: AsPrimitive<f32>,
    L: AsPrimitive<i64>,
{
    type Item = Sample;

    fn len(&self) -> usize {
        SliceIndex::len(self)
    }

    fn get(&self, index: usize) -> Result<Sample> {
        SliceIndex::get(self, index)
    }
}
