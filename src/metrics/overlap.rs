// In: src/metrics/overlap.rs

use log::debug;
use ndarray::{ArrayBase, Data, Dimension, Ix3, Zip};
use num_traits::Zero;

use crate::config::{OverlapConfig, DEFAULT_EPSILON};
use crate::error::{Result, VolsegError};
use crate::metrics::report::VolumeOverlap;

//==================================================================================
// 1. Shape Contract
//==================================================================================

/// Both shapes must be 3-dimensional and equal. Runs before any numeric work.
fn check_volume_pair(left: &[usize], right: &[usize]) -> Result<()> {
    if left.len() != 3 || right.len() != 3 {
        return Err(VolsegError::shape_mismatch(
            left,
            right,
            "expecting 3 dimensional inputs",
        ));
    }
    if left != right {
        return Err(VolsegError::shape_mismatch(
            left,
            right,
            "expecting inputs of the same shape",
        ));
    }
    Ok(())
}

//==================================================================================
// 2. Voxel Counts
//==================================================================================

/// Foreground voxel totals for a prediction `a` and a ground truth `b`.
///
/// All counts are exact integers; the metrics derived from them perform a single
/// floating-point division.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlapCounts {
    /// Voxels that are foreground in both volumes.
    pub intersection: u64,
    pub a_foreground: u64,
    pub b_foreground: u64,
    /// Total voxels compared.
    pub voxels: u64,
}

impl OverlapCounts {
    /// Binarizes both volumes and counts foreground voxels in a single pass.
    ///
    /// A voxel is foreground when it compares strictly greater than zero, so
    /// negative values and NaN count as background.
    ///
    /// # Errors
    /// `VolsegError::ShapeMismatch` if either input is not 3-dimensional or the
    /// shapes differ. The message carries both shapes.
    pub fn from_volumes<A, B, Sa, Sb, Da, Db>(
        a: &ArrayBase<Sa, Da>,
        b: &ArrayBase<Sb, Db>,
    ) -> Result<Self>
    where
        A: Zero + PartialOrd,
        B: Zero + PartialOrd,
        Sa: Data<Elem = A>,
        Sb: Data<Elem = B>,
        Da: Dimension,
        Db: Dimension,
    {
        check_volume_pair(a.shape(), b.shape())?;
        let a = a.view().into_dimensionality::<Ix3>()?;
        let b = b.view().into_dimensionality::<Ix3>()?;

        let (a_zero, b_zero) = (A::zero(), B::zero());
        let mut counts = OverlapCounts {
            voxels: a.len() as u64,
            ..Default::default()
        };

        Zip::from(&a).and(&b).for_each(|x, y| {
            let in_a = *x > a_zero;
            let in_b = *y > b_zero;
            counts.a_foreground += u64::from(in_a);
            counts.b_foreground += u64::from(in_b);
            counts.intersection += u64::from(in_a && in_b);
        });

        Ok(counts)
    }

    /// `|A| + |B| - |A ∩ B|`.
    pub fn union(&self) -> u64 {
        self.a_foreground + self.b_foreground - self.intersection
    }

    /// `2 |A ∩ B| / (|A| + |B| + epsilon)`.
    pub fn dice(&self, epsilon: f64) -> f64 {
        let denominator = (self.a_foreground + self.b_foreground) as f64 + epsilon;
        (2 * self.intersection) as f64 / denominator
    }

    /// `|A ∩ B| / (|A ∪ B| + epsilon)`.
    pub fn jaccard(&self, epsilon: f64) -> f64 {
        self.intersection as f64 / (self.union() as f64 + epsilon)
    }
}

//==================================================================================
// 3. Public API (free functions)
//==================================================================================

/// Dice coefficient of two 3D label volumes with the default epsilon (`1e-6`).
///
/// Returns a value in `[0, 1]`; two all-background volumes give `0.0`.
pub fn dice<A, B, Sa, Sb, Da, Db>(a: &ArrayBase<Sa, Da>, b: &ArrayBase<Sb, Db>) -> Result<f64>
where
    A: Zero + PartialOrd,
    B: Zero + PartialOrd,
    Sa: Data<Elem = A>,
    Sb: Data<Elem = B>,
    Da: Dimension,
    Db: Dimension,
{
    dice_with_epsilon(a, b, DEFAULT_EPSILON)
}

/// Dice coefficient with an explicit denominator epsilon.
pub fn dice_with_epsilon<A, B, Sa, Sb, Da, Db>(
    a: &ArrayBase<Sa, Da>,
    b: &ArrayBase<Sb, Db>,
    epsilon: f64,
) -> Result<f64>
where
    A: Zero + PartialOrd,
    B: Zero + PartialOrd,
    Sa: Data<Elem = A>,
    Sb: Data<Elem = B>,
    Da: Dimension,
    Db: Dimension,
{
    Ok(OverlapCounts::from_volumes(a, b)?.dice(epsilon))
}

/// Jaccard index (IoU) of two 3D label volumes with the default epsilon (`1e-6`).
pub fn jaccard<A, B, Sa, Sb, Da, Db>(a: &ArrayBase<Sa, Da>, b: &ArrayBase<Sb, Db>) -> Result<f64>
where
    A: Zero + PartialOrd,
    B: Zero + PartialOrd,
    Sa: Data<Elem = A>,
    Sb: Data<Elem = B>,
    Da: Dimension,
    Db: Dimension,
{
    jaccard_with_epsilon(a, b, DEFAULT_EPSILON)
}

/// Jaccard index with an explicit denominator epsilon.
pub fn jaccard_with_epsilon<A, B, Sa, Sb, Da, Db>(
    a: &ArrayBase<Sa, Da>,
    b: &ArrayBase<Sb, Db>,
    epsilon: f64,
) -> Result<f64>
where
    A: Zero + PartialOrd,
    B: Zero + PartialOrd,
    Sa: Data<Elem = A>,
    Sb: Data<Elem = B>,
    Da: Dimension,
    Db: Dimension,
{
    Ok(OverlapCounts::from_volumes(a, b)?.jaccard(epsilon))
}

//==================================================================================
// 4. Configured Evaluator
//==================================================================================

/// Overlap statistics bound to an `OverlapConfig`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OverlapStats {
    config: OverlapConfig,
}

impl OverlapStats {
    pub fn new(config: OverlapConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn epsilon(&self) -> f64 {
        self.config.epsilon
    }

    pub fn dice<A, B, Sa, Sb, Da, Db>(
        &self,
        a: &ArrayBase<Sa, Da>,
        b: &ArrayBase<Sb, Db>,
    ) -> Result<f64>
    where
        A: Zero + PartialOrd,
        B: Zero + PartialOrd,
        Sa: Data<Elem = A>,
        Sb: Data<Elem = B>,
        Da: Dimension,
        Db: Dimension,
    {
        dice_with_epsilon(a, b, self.config.epsilon)
    }

    pub fn jaccard<A, B, Sa, Sb, Da, Db>(
        &self,
        a: &ArrayBase<Sa, Da>,
        b: &ArrayBase<Sb, Db>,
    ) -> Result<f64>
    where
        A: Zero + PartialOrd,
        B: Zero + PartialOrd,
        Sa: Data<Elem = A>,
        Sb: Data<Elem = B>,
        Da: Dimension,
        Db: Dimension,
    {
        jaccard_with_epsilon(a, b, self.config.epsilon)
    }

    /// Computes both metrics from one pass over the volumes.
    pub fn compare<A, B, Sa, Sb, Da, Db>(
        &self,
        name: &str,
        a: &ArrayBase<Sa, Da>,
        b: &ArrayBase<Sb, Db>,
    ) -> Result<VolumeOverlap>
    where
        A: Zero + PartialOrd,
        B: Zero + PartialOrd,
        Sa: Data<Elem = A>,
        Sb: Data<Elem = B>,
        Da: Dimension,
        Db: Dimension,
    {
        let counts = OverlapCounts::from_volumes(a, b)?;
        let result = VolumeOverlap {
            name: name.to_string(),
            dice: counts.dice(self.config.epsilon),
            jaccard: counts.jaccard(self.config.epsilon),
        };
        debug!(
            "{}: intersection={} |A|={} |B|={} dice={:.4} jaccard={:.4}",
            name,
            counts.intersection,
            counts.a_foreground,
            counts.b_foreground,
            result.dice,
            result.jaccard
        );
        log_metric!("event"="compare_volumes", "volume"=name, "dice"=&result.dice, "jaccard"=&result.jaccard);
        Ok(result)
    }
}

//==================================================================================
// 5. Unit Tests
//==================================================================================
