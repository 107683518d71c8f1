// ============================================================
// Layer 2 — Similarity Inspection
// ============================================================
// Reloads both trained models from a comparison's output
// directory and scores how similar each model finds two token
// sequences. Inspection only; nothing is trained here.

use anyhow::{ensure, Result};
use burn::prelude::*;
use std::path::Path;

use crate::application::compare_use_case::ExperimentConfig;
use crate::domain::report::ModelKind;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::{
    attention::CrossAttentionClassifier,
    backend::{default_device, ComputeBackend, ComputeDevice},
    model::SequenceClassifier,
    pooled::PooledClassifier,
};

pub struct SimilarityUseCase {
    config:    ExperimentConfig,
    pooled:    PooledClassifier<ComputeBackend>,
    attention: CrossAttentionClassifier<ComputeBackend>,
    device:    ComputeDevice,
}

impl SimilarityUseCase {
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = output_dir.as_ref();
        ensure!(
            dir.is_dir(),
            "'{}' is not a directory. Run 'compare --output-dir' first.",
            dir.display()
        );

        let ckpt   = CheckpointManager::new(dir)?;
        let config = ckpt.load_config()?;
        let device = default_device();

        // Dropout is inactive outside autodiff, so the saved rate is harmless here
        let pooled = ckpt.load_model(
            config.pooled_config().init::<ComputeBackend>(&device),
            ModelKind::PooledFeedForward,
            &device,
        )?;
        let attention = ckpt.load_model(
            config.attention_config().init::<ComputeBackend>(&device),
            ModelKind::CrossAttention,
            &device,
        )?;

        tracing::info!("Models loaded from '{}'", dir.display());
        Ok(Self { config, pooled, attention, device })
    }

    /// Similarity of `a` and `b` under each model, pooled model first.
    pub fn compare(&self, a: &[u32], b: &[u32]) -> Result<Vec<(ModelKind, f32)>> {
        let a = self.to_tensor(a)?;
        let b = self.to_tensor(b)?;

        let score = |model: &dyn SequenceClassifier<ComputeBackend>| -> (ModelKind, f32) {
            let sim = model.similarity(a.clone(), b.clone()).into_scalar().elem::<f32>();
            (model.kind(), sim)
        };

        Ok(vec![score(&self.pooled), score(&self.attention)])
    }

    fn to_tensor(&self, tokens: &[u32]) -> Result<Tensor<ComputeBackend, 2, Int>> {
        ensure!(!tokens.is_empty(), "token sequence must not be empty");
        if let Some(&bad) = tokens.iter().find(|&&t| t as usize >= self.config.vocab_size) {
            anyhow::bail!(
                "token {} is outside the vocabulary (size {})",
                bad,
                self.config.vocab_size
            );
        }
        let ids: Vec<i64> = tokens.iter().map(|&t| t as i64).collect();
        Ok(Tensor::from_data(TensorData::new(ids, [1, tokens.len()]), &self.device))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::compare_use_case::CompareUseCase;
    use serial_test::serial;

    fn trained_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ExperimentConfig {
            vocab_size:  10,
            embed_dim:   4,
            hidden_dim:  8,
            num_heads:   2,
            num_samples: 12,
            epochs:      1,
            batch_size:  4,
            output_dir:  Some(dir.path().to_path_buf()),
            ..ExperimentConfig::default()
        };
        CompareUseCase::new(cfg).execute().unwrap();
        dir
    }

    #[test]
    #[serial]
    fn test_scores_from_both_models() {
        let dir    = trained_dir();
        let usecase = SimilarityUseCase::new(dir.path()).unwrap();
        let scores = usecase.compare(&[1, 2, 3], &[3, 2, 1, 0]).unwrap();

        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].0, ModelKind::PooledFeedForward);
        assert_eq!(scores[1].0, ModelKind::CrossAttention);
        for (_, s) in scores {
            assert!(s.is_finite() && s.abs() <= 1.0 + 1e-4);
        }
    }

    #[test]
    #[serial]
    fn test_rejects_out_of_vocab_and_empty() {
        let dir     = trained_dir();
        let usecase = SimilarityUseCase::new(dir.path()).unwrap();
        assert!(usecase.compare(&[1, 10], &[1]).is_err());
        assert!(usecase.compare(&[], &[1]).is_err());
    }

    #[test]
    fn test_missing_directory() {
        assert!(SimilarityUseCase::new("/definitely/not/here").is_err());
    }
}
