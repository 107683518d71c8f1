// ============================================================
// Layer 2 — Hyperparameter Sweep
// ============================================================
// Re-runs the comparison under a handful of named variants of
// one base configuration:
//
//   baseline        base config as given
//   large-vocab     vocab_size  × 10
//   wide-embedding  embed_dim   × 4
//   large-dataset   num_samples × 5
//
// With an output directory, each preset writes to its own
// subdirectory: <output_dir>/<preset>/...

use anyhow::{Context, Result};
use std::fmt;

use crate::application::compare_use_case::{CompareUseCase, ExperimentConfig};
use crate::domain::report::ComparisonResults;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperimentPreset {
    Baseline,
    LargeVocab,
    WideEmbedding,
    LargeDataset,
}

impl ExperimentPreset {
    pub const ALL: [ExperimentPreset; 4] = [
        ExperimentPreset::Baseline,
        ExperimentPreset::LargeVocab,
        ExperimentPreset::WideEmbedding,
        ExperimentPreset::LargeDataset,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ExperimentPreset::Baseline      => "baseline",
            ExperimentPreset::LargeVocab    => "large-vocab",
            ExperimentPreset::WideEmbedding => "wide-embedding",
            ExperimentPreset::LargeDataset  => "large-dataset",
        }
    }

    /// Derive this preset's configuration from `base`.
    /// Fails if the scaled value does not fit in `usize`.
    pub fn apply(&self, base: &ExperimentConfig) -> Result<ExperimentConfig> {
        let mut cfg = base.clone();
        let scaled = match self {
            ExperimentPreset::Baseline      => None,
            ExperimentPreset::LargeVocab    => Some(("vocab_size", &mut cfg.vocab_size, 10)),
            ExperimentPreset::WideEmbedding => Some(("embed_dim", &mut cfg.embed_dim, 4)),
            ExperimentPreset::LargeDataset  => Some(("num_samples", &mut cfg.num_samples, 5)),
        };
        if let Some((field, value, factor)) = scaled {
            let current = *value;
            *value = current
                .checked_mul(factor)
                .with_context(|| format!("preset '{self}' overflows {field} ({current} x {factor})"))?;
        }
        cfg.output_dir = base.output_dir.as_ref().map(|dir| dir.join(self.name()));
        Ok(cfg)
    }
}

impl fmt::Display for ExperimentPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run one comparison per preset, in order. An empty list runs every preset.
pub fn run_sweep(base: &ExperimentConfig, presets: &[ExperimentPreset]) -> Result<Vec<ComparisonResults>> {
    let presets: &[ExperimentPreset] = if presets.is_empty() { &ExperimentPreset::ALL } else { presets };

    // Fail before any training if a preset produces a bad config
    for preset in presets {
        preset.apply(base)?.validate()?;
    }

    presets
        .iter()
        .map(|preset| {
            tracing::info!("Running preset '{}'", preset);
            CompareUseCase::new(preset.apply(base)?)
                .with_label(preset.name())
                .execute()
        })
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::path::PathBuf;

    #[test]
    fn test_presets_scale_one_knob_each() {
        let base = ExperimentConfig::default();
        assert_eq!(ExperimentPreset::Baseline.apply(&base).unwrap(), base);
        assert_eq!(ExperimentPreset::LargeVocab.apply(&base).unwrap().vocab_size, base.vocab_size * 10);
        assert_eq!(ExperimentPreset::WideEmbedding.apply(&base).unwrap().embed_dim, base.embed_dim * 4);
        assert_eq!(ExperimentPreset::LargeDataset.apply(&base).unwrap().num_samples, base.num_samples * 5);
        for p in ExperimentPreset::ALL {
            assert!(p.apply(&base).unwrap().validate().is_ok(), "{p} is invalid");
        }
    }

    #[test]
    fn test_scaling_overflow_is_an_error() {
        let base = ExperimentConfig { vocab_size: usize::MAX / 2, ..Default::default() };
        let err = ExperimentPreset::LargeVocab.apply(&base).unwrap_err();
        assert!(err.to_string().contains("vocab_size"), "{err}");
        assert!(run_sweep(&base, &[ExperimentPreset::LargeVocab]).is_err());

        // other presets leave the huge field alone
        assert!(ExperimentPreset::WideEmbedding.apply(&base).is_ok());
    }

    #[test]
    fn test_output_dir_is_per_preset() {
        let base = ExperimentConfig { output_dir: Some(PathBuf::from("runs")), ..Default::default() };
        assert_eq!(
            ExperimentPreset::LargeDataset.apply(&base).unwrap().output_dir,
            Some(PathBuf::from("runs").join("large-dataset"))
        );
    }

    #[test]
    #[serial]
    fn test_sweep_runs_requested_presets() {
        let base = ExperimentConfig {
            vocab_size: 8, embed_dim: 4, hidden_dim: 8, num_heads: 2,
            num_samples: 12, epochs: 1, batch_size: 4,
            ..Default::default()
        };
        let results = run_sweep(&base, &[ExperimentPreset::Baseline, ExperimentPreset::LargeVocab]).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].label, "baseline");
        assert_eq!(results[1].summary.vocab_size, 80);
    }
}
