// In: src/config.rs

//! The single source of truth for all volseg configuration.
//!
//! `VolsegConfig` is created once at the application boundary (e.g. from a JSON
//! file written by the training harness) and then handed to the components that
//! need it. Every field has a serde default so partial documents are accepted.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VolsegError};

/// Default denominator epsilon for the overlap statistics.
pub const DEFAULT_EPSILON: f64 = 1e-6;

//==================================================================================
// I. Component Configuration
//==================================================================================

/// Numeric settings for `OverlapStats`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct OverlapConfig {
    /// Added to the denominator of Dice and Jaccard only. Keeps the
    /// all-background case finite without altering a nonzero numerator.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
        }
    }
}

impl OverlapConfig {
    pub fn validate(&self) -> Result<()> {
        // Zero would turn the all-background case into 0/0.
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(VolsegError::Config(format!(
                "epsilon must be finite and positive, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}

/// Defines how an external training loop walks a `SliceIndex` each epoch.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct SamplingConfig {
    /// If true, every epoch visits the slices in a fresh random order.
    #[serde(default = "default_true")]
    pub shuffle: bool,

    /// Fixes the shuffle sequence. `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Number of slice indices per batch. Must be at least 1.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// If true, a trailing batch shorter than `batch_size` is discarded.
    #[serde(default)]
    pub drop_last: bool,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            shuffle: true,
            seed: None,
            batch_size: default_batch_size(),
            drop_last: false,
        }
    }
}

impl SamplingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(VolsegError::Config(
                "batch_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

//==================================================================================
// II. The Unified VolsegConfig
//==================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct VolsegConfig {
    #[serde(default)]
    pub overlap: OverlapConfig,

    #[serde(default)]
    pub sampling: SamplingConfig,
}

impl VolsegConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: VolsegConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.overlap.validate()?;
        self.sampling.validate()
    }
}

/// Helper for `serde` to default a boolean field to true.
fn default_true() -> bool {
    true
}

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

fn default_batch_size() -> usize {
    8
}
