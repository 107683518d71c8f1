// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Persists a finished comparison so models can be inspected
// later without retraining.
//
//   <output_dir>/
//     experiment_config.json   ← hyperparameters, to rebuild models
//     results.json             ← ComparisonResults
//     pooled-ff.mpk.gz         ← trained pooled model weights
//     cross-attention.mpk.gz   ← trained attention model weights
//
// Weights go through Burn's CompactRecorder (MessagePack +
// gzip). Loading fails if the architecture does not match the
// record, which is why the config is saved next to it.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use burn::{
    prelude::*,
    record::CompactRecorder,
};

use crate::application::compare_use_case::ExperimentConfig;
use crate::domain::report::{ComparisonResults, ModelKind};

const CONFIG_FILE:  &str = "experiment_config.json";
const RESULTS_FILE: &str = "results.json";

pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Creates the directory if it doesn't already exist.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create checkpoint directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Record path without extension; the recorder appends `.mpk.gz`.
    fn model_path(&self, kind: ModelKind) -> PathBuf {
        self.dir.join(kind.slug())
    }

    pub fn save_model<B: Backend, M: Module<B>>(&self, model: &M, kind: ModelKind) -> Result<()> {
        let path = self.model_path(kind);
        model
            .clone()
            .save_file(path.clone(), &CompactRecorder::new())
            .with_context(|| format!("Failed to save checkpoint to '{}'", path.display()))?;
        tracing::debug!("Saved {} checkpoint to '{}'", kind, path.display());
        Ok(())
    }

    /// Load weights into `model`, which must have the architecture they were saved from.
    pub fn load_model<B: Backend, M: Module<B>>(
        &self,
        model:  M,
        kind:   ModelKind,
        device: &B::Device,
    ) -> Result<M> {
        let path = self.model_path(kind);
        tracing::info!("Loading {} checkpoint from '{}'", kind, path.display());
        model
            .load_file(path.clone(), &CompactRecorder::new(), device)
            .with_context(|| {
                format!(
                    "Cannot load checkpoint '{}'. Have you run 'compare' with this output directory?",
                    path.display()
                )
            })
    }

    pub fn save_config(&self, cfg: &ExperimentConfig) -> Result<()> {
        self.write_json(CONFIG_FILE, cfg)
    }

    pub fn load_config(&self) -> Result<ExperimentConfig> {
        self.read_json(CONFIG_FILE)
    }

    pub fn save_results(&self, results: &ComparisonResults) -> Result<()> {
        self.write_json(RESULTS_FILE, results)
    }

    pub fn load_results(&self) -> Result<ComparisonResults> {
        self.read_json(RESULTS_FILE)
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.dir.join(name);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;
        tracing::debug!("Wrote '{}'", path.display());
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.dir.join(name);
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Malformed JSON in '{}'", path.display()))
    }
}
