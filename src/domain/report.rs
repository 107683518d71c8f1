// ============================================================
// Layer 3 — Training Reports
// ============================================================
// What a finished run hands back to the caller:
//
//   EpochRecord        one row per epoch (losses + accuracy)
//   TrainingReport     all epochs of one model + wall-clock time
//   ComparisonResults  both models trained on the same data
//
// Everything here is serde-serialisable so results can be
// written to results.json next to the checkpoints.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// serde_json writes NaN as null; read it back as NaN
fn nan_from_null<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.unwrap_or(f64::NAN))
}

/// The two architectures under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    PooledFeedForward,
    CrossAttention,
}

impl ModelKind {
    /// Short name used in tables, CSV rows and checkpoint file names.
    pub fn slug(&self) -> &'static str {
        match self {
            ModelKind::PooledFeedForward => "pooled-ff",
            ModelKind::CrossAttention    => "cross-attention",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Metrics for a single epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochRecord {
    /// Starts at 1
    pub epoch: usize,

    /// Mean cross-entropy over the training batches
    #[serde(deserialize_with = "nan_from_null")]
    pub train_loss: f64,

    /// Mean cross-entropy over the test batches (NaN if no test data)
    #[serde(deserialize_with = "nan_from_null")]
    pub test_loss: f64,

    /// Fraction of test samples whose argmax equals the label, in [0, 1]
    pub accuracy: f64,
}

/// Everything measured while training one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub model:         ModelKind,
    pub epochs:        Vec<EpochRecord>,
    pub train_seconds: f64,
}

impl TrainingReport {
    pub fn new(model: ModelKind) -> Self {
        Self { model, epochs: Vec::new(), train_seconds: 0.0 }
    }

    pub fn last(&self) -> Option<&EpochRecord> {
        self.epochs.last()
    }

    pub fn final_train_loss(&self) -> f64 {
        self.last().map_or(f64::NAN, |e| e.train_loss)
    }

    pub fn final_test_loss(&self) -> f64 {
        self.last().map_or(f64::NAN, |e| e.test_loss)
    }

    pub fn final_accuracy(&self) -> f64 {
        self.last().map_or(0.0, |e| e.accuracy)
    }

    pub fn best_accuracy(&self) -> f64 {
        self.epochs.iter().map(|e| e.accuracy).fold(0.0, f64::max)
    }
}

/// The hyperparameters a comparison ran with, kept alongside the results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentSummary {
    pub vocab_size:    usize,
    pub embed_dim:     usize,
    pub hidden_dim:    usize,
    pub num_heads:     usize,
    pub num_samples:   usize,
    pub train_samples: usize,
    pub test_samples:  usize,
    pub epochs:        usize,
}

/// Both models trained on the same split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResults {
    /// Free-form name, e.g. the sweep preset
    pub label:   String,
    pub summary: ExperimentSummary,
    pub reports: Vec<TrainingReport>,
}

impl ComparisonResults {
    pub fn report(&self, kind: ModelKind) -> Option<&TrainingReport> {
        self.reports.iter().find(|r| r.model == kind)
    }

    /// Highest final accuracy; ties go to the earlier report.
    pub fn most_accurate(&self) -> Option<&TrainingReport> {
        self.reports.iter().reduce(|best, r| {
            if r.final_accuracy() > best.final_accuracy() { r } else { best }
        })
    }

    /// Shortest wall-clock training time.
    pub fn fastest(&self) -> Option<&TrainingReport> {
        self.reports.iter().reduce(|best, r| {
            if r.train_seconds < best.train_seconds { r } else { best }
        })
    }
}
