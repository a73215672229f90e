// In: src/metrics/report.rs

//! Per-volume evaluation results and their aggregate, serializable to JSON for
//! the evaluation loop that produced them.

use log::info;
use ndarray::{ArrayBase, Data, Dimension};
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::metrics::overlap::OverlapStats;

/// Overlap of one predicted volume against its ground truth.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VolumeOverlap {
    /// Caller-chosen identifier, typically the source filename.
    pub name: String,
    pub dice: f64,
    pub jaccard: f64,
}

/// Aggregate over all volumes in a report. Means are `None` for an empty report.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ReportSummary {
    pub volume_count: usize,
    pub mean_dice: Option<f64>,
    pub mean_jaccard: Option<f64>,
}

/// Accumulates `VolumeOverlap`s in evaluation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlapReport {
    volumes: Vec<VolumeOverlap>,
}

/// On-disk layout: the summary is written for readers but recomputed on load.
#[derive(Serialize)]
struct ReportDocument<'a> {
    summary: ReportSummary,
    volumes: &'a [VolumeOverlap],
}

#[derive(Deserialize)]
struct OwnedReportDocument {
    volumes: Vec<VolumeOverlap>,
}

impl OverlapReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: VolumeOverlap) {
        self.volumes.push(result);
    }

    /// Compares `prediction` against `ground_truth` and records the result.
    pub fn evaluate<A, B, Sa, Sb, Da, Db>(
        &mut self,
        stats: &OverlapStats,
        name: &str,
        prediction: &ArrayBase<Sa, Da>,
        ground_truth: &ArrayBase<Sb, Db>,
    ) -> Result<&VolumeOverlap>
    where
        A: Zero + PartialOrd,
        B: Zero + PartialOrd,
        Sa: Data<Elem = A>,
        Sb: Data<Elem = B>,
        Da: Dimension,
        Db: Dimension,
    {
        let result = stats.compare(name, prediction, ground_truth)?;
        self.volumes.push(result);
        let last = self.volumes.len() - 1;
        Ok(&self.volumes[last])
    }

    pub fn volumes(&self) -> &[VolumeOverlap] {
        &self.volumes
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    pub fn mean_dice(&self) -> Option<f64> {
        self.mean_of(|v| v.dice)
    }

    pub fn mean_jaccard(&self) -> Option<f64> {
        self.mean_of(|v| v.jaccard)
    }

    fn mean_of(&self, field: impl Fn(&VolumeOverlap) -> f64) -> Option<f64> {
        if self.volumes.is_empty() {
            return None;
        }
        let total: f64 = self.volumes.iter().map(field).sum();
        Some(total / self.volumes.len() as f64)
    }

    pub fn summary(&self) -> ReportSummary {
        let summary = ReportSummary {
            volume_count: self.volumes.len(),
            mean_dice: self.mean_dice(),
            mean_jaccard: self.mean_jaccard(),
        };
        info!(
            "Overlap report: {} volumes, mean dice {:?}, mean jaccard {:?}",
            summary.volume_count, summary.mean_dice, summary.mean_jaccard
        );
        summary
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.document())?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.document())?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let doc: OwnedReportDocument = serde_json::from_str(json)?;
        Ok(Self {
            volumes: doc.volumes,
        })
    }

    fn document(&self) -> ReportDocument<'_> {
        ReportDocument {
            summary: self.summary(),
            volumes: &self.volumes,
        }
    }
}
