//! Per-epoch visiting order over a dataset of known length.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::SamplingConfig;
use crate::error::Result;

/// Produces index orders and index batches for successive epochs.
///
/// With a fixed `seed` the sequence of epoch orders is reproducible. Collation of
/// the samples behind each batch is left to the caller.
pub struct EpochSampler {
    len: usize,
    config: SamplingConfig,
    rng: StdRng,
}

impl EpochSampler {
    pub fn new(len: usize, config: SamplingConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self { len, config, rng })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of batches `batches` will yield per epoch.
    pub fn num_batches(&self) -> usize {
        let size = self.config.batch_size;
        if self.config.drop_last {
            self.len / size
        } else {
            self.len.div_ceil(size)
        }
    }

    /// A permutation of `0..len` for the next epoch.
    pub fn epoch_order(&mut self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.len).collect();
        if self.config.shuffle {
            order.shuffle(&mut self.rng);
        }
        order
    }

    /// The next epoch order split into batches of `batch_size` indices.
    pub fn batches(&mut self) -> Vec<Vec<usize>> {
        let size = self.config.batch_size;
        let drop_last = self.config.drop_last;
        let batches: Vec<Vec<usize>> = self
            .epoch_order()
            .chunks(size)
            .filter(|chunk| !drop_last || chunk.len() == size)
            .map(<[usize]>::to_vec)
            .collect();
        debug!("Epoch of {} samples split into {} batches", self.len, batches.len());
        batches
    }
}
