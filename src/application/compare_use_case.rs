// ============================================================
// Layer 2 — CompareUseCase
// ============================================================
// Orchestrates one side-by-side comparison:
//
//   Step 1: Validate the configuration
//   Step 2: Generate synthetic samples      (Layer 4 - data)
//   Step 3: Split train/test                (Layer 4 - data)
//   Step 4: Prepare output directory        (Layer 6 - infra)
//   Step 5: Train + measure pooled model    (Layer 5 - ml)
//   Step 6: Train + measure attention model (Layer 5 - ml)
//   Step 7: Save checkpoints and results    (Layer 6 - infra)
//
// Both models see the same split and the same hyperparameters;
// only the architecture differs. The backend RNG is reseeded with
// cfg.seed before each model is built, so a rerun reproduces it.

use anyhow::{ensure, Result};
use burn::tensor::backend::Backend;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::{
    dataset::SequenceDataset,
    generator::SyntheticGenerator,
    splitter::split_train_test,
};
use crate::domain::report::{ComparisonResults, ExperimentSummary, ModelKind};
use crate::domain::traits::SampleSource;
use crate::infra::{checkpoint::CheckpointManager, metrics::MetricsLogger};
use crate::ml::{
    attention::CrossAttentionClassifierConfig,
    backend::{default_device, TrainBackend},
    pooled::PooledClassifierConfig,
    trainer::train_and_measure,
};

// ─── Experiment Configuration ────────────────────────────────────────────────
// All hyperparameters for one comparison.
// Saved as experiment_config.json so trained models can be rebuilt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub vocab_size:     usize,
    pub embed_dim:      usize,
    pub hidden_dim:     usize,
    pub num_heads:      usize,
    pub num_samples:    usize,
    pub epochs:         usize,
    pub batch_size:     usize,
    pub lr:             f64,
    pub dropout:        f64,
    pub train_fraction: f64,
    pub seed:           u64,
    /// Where metrics, checkpoints and results go; nothing is written when unset
    #[serde(default)]
    pub output_dir:     Option<PathBuf>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            vocab_size:     100,
            embed_dim:      32,
            hidden_dim:     64,
            num_heads:      4,
            num_samples:    1000,
            epochs:         10,
            batch_size:     32,
            lr:             1e-3,
            dropout:        0.1,
            train_fraction: 0.8,
            seed:           42,
            output_dir:     None,
        }
    }
}

impl ExperimentConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.vocab_size >= 2, "vocab_size must be at least 2 (got {})", self.vocab_size);
        ensure!(self.embed_dim > 0, "embed_dim must be positive");
        ensure!(self.hidden_dim > 0, "hidden_dim must be positive");
        ensure!(self.num_heads > 0, "num_heads must be positive");
        ensure!(
            self.embed_dim % self.num_heads == 0,
            "embed_dim ({}) must be divisible by num_heads ({})",
            self.embed_dim,
            self.num_heads
        );
        ensure!(self.num_samples >= 2, "num_samples must be at least 2 (got {})", self.num_samples);
        ensure!(self.epochs > 0, "epochs must be positive");
        ensure!(self.batch_size > 0, "batch_size must be positive");
        ensure!(self.lr > 0.0, "lr must be positive (got {})", self.lr);
        ensure!(
            (0.0..1.0).contains(&self.dropout),
            "dropout must be in [0, 1) (got {})",
            self.dropout
        );
        ensure!(
            self.train_fraction > 0.0 && self.train_fraction < 1.0,
            "train_fraction must be in (0, 1) (got {})",
            self.train_fraction
        );
        Ok(())
    }

    pub fn pooled_config(&self) -> PooledClassifierConfig {
        PooledClassifierConfig::new(self.vocab_size, self.embed_dim, self.hidden_dim)
            .with_dropout(self.dropout)
    }

    pub fn attention_config(&self) -> CrossAttentionClassifierConfig {
        CrossAttentionClassifierConfig::new(
            self.vocab_size, self.embed_dim, self.hidden_dim, self.num_heads,
        )
        .with_dropout(self.dropout)
    }

    pub fn summary(&self, train_samples: usize, test_samples: usize) -> ExperimentSummary {
        ExperimentSummary {
            vocab_size:  self.vocab_size,
            embed_dim:   self.embed_dim,
            hidden_dim:  self.hidden_dim,
            num_heads:   self.num_heads,
            num_samples: train_samples + test_samples,
            train_samples,
            test_samples,
            epochs:      self.epochs,
        }
    }
}

/// Generate data, train both models, return their reports side by side.
pub fn run_comparison(cfg: &ExperimentConfig) -> Result<ComparisonResults> {
    CompareUseCase::new(cfg.clone()).execute()
}

// ─── CompareUseCase ──────────────────────────────────────────────────────────
pub struct CompareUseCase {
    config: ExperimentConfig,
    label:  String,
}

impl CompareUseCase {
    pub fn new(config: ExperimentConfig) -> Self {
        Self { config, label: "comparison".to_string() }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Run on freshly generated synthetic data.
    pub fn execute(&self) -> Result<ComparisonResults> {
        let cfg = &self.config;
        let generator = SyntheticGenerator::new(cfg.vocab_size, cfg.num_samples, cfg.seed);
        self.execute_on(&generator)
    }

    /// Run on samples from any source.
    pub fn execute_on(&self, source: &dyn SampleSource) -> Result<ComparisonResults> {
        let cfg = &self.config;

        // ── Step 1: Validate ──────────────────────────────────────────────────
        cfg.validate()?;
        ensure!(
            source.vocab_size() <= cfg.vocab_size,
            "sample source vocabulary ({}) exceeds model vocabulary ({})",
            source.vocab_size(),
            cfg.vocab_size
        );

        // ── Step 2: Samples ───────────────────────────────────────────────────
        let samples = source.samples()?;
        tracing::info!("[{}] {} samples, vocab {}", self.label, samples.len(), cfg.vocab_size);

        // ── Step 3: Train / test split ────────────────────────────────────────
        let (train_samples, test_samples) = split_train_test(samples, cfg.train_fraction, cfg.seed);
        tracing::info!(
            "Split: {} train, {} test",
            train_samples.len(),
            test_samples.len()
        );
        let summary = cfg.summary(train_samples.len(), test_samples.len());
        let train   = SequenceDataset::new(train_samples);
        let test    = SequenceDataset::new(test_samples);

        // ── Step 4: Output directory ──────────────────────────────────────────
        let output = match &cfg.output_dir {
            Some(dir) => {
                let ckpt    = CheckpointManager::new(dir)?;
                let metrics = MetricsLogger::create(dir)?;
                ckpt.save_config(cfg)?;
                Some((ckpt, metrics))
            }
            None => None,
        };
        let metrics = output.as_ref().map(|(_, m)| m);

        let device = default_device();

        // ── Step 5: Pooled feedforward model ──────────────────────────────────
        TrainBackend::seed(&device, cfg.seed);
        let pooled = cfg.pooled_config().init::<TrainBackend>(&device);
        let (pooled, pooled_report) =
            train_and_measure(pooled, train.clone(), test.clone(), cfg, &device, metrics)?;

        // ── Step 6: Cross-attention model ─────────────────────────────────────
        TrainBackend::seed(&device, cfg.seed);
        let attention = cfg.attention_config().init::<TrainBackend>(&device);
        let (attention, attention_report) =
            train_and_measure(attention, train, test, cfg, &device, metrics)?;

        let results = ComparisonResults {
            label:   self.label.clone(),
            summary,
            reports: vec![pooled_report, attention_report],
        };

        // ── Step 7: Persist ───────────────────────────────────────────────────
        if let Some((ckpt, _)) = &output {
            ckpt.save_model(&pooled, ModelKind::PooledFeedForward)?;
            ckpt.save_model(&attention, ModelKind::CrossAttention)?;
            ckpt.save_results(&results)?;
            tracing::info!("Saved checkpoints and results to '{}'", ckpt.dir().display());
        }

        Ok(results)
    }
}
