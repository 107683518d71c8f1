// ============================================================
// Layer 5 — Training Loop
// ============================================================
// train_and_measure: one model, fixed epoch count, Adam.
//
// Per epoch:
//   1. training pass  — forward, cross-entropy, backward, step
//   2. test pass      — model.valid() (dropout off, no autodiff),
//                       mean test loss + argmax accuracy
//   3. log the epoch  — tracing + optional metrics.csv row
//
// The whole loop is timed with a monotonic clock; that time is
// the "training time" reported next to the losses.
//
// Key Burn detail:
//   - Training runs on B (an AutodiffBackend)
//   - model.valid() returns the model on B::InnerBackend, so the
//     test loader is built for the inner backend
//   - argmax(1) returns [batch, 1]; flatten before .equal()
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::{DataLoader, DataLoaderBuilder},
    module::AutodiffModule,
    nn::loss::CrossEntropyLossConfig,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use std::{sync::Arc, time::Instant};

use crate::application::compare_use_case::ExperimentConfig;
use crate::data::{
    batcher::{SequenceBatch, SequenceBatcher},
    dataset::SequenceDataset,
};
use crate::domain::report::{EpochRecord, TrainingReport};
use crate::infra::metrics::MetricsLogger;
use crate::ml::model::SequenceClassifier;

type Loader<B> = Arc<dyn DataLoader<B, SequenceBatch<B>>>;

/// Train `model` on `train`, scoring it on `test` after every epoch.
///
/// Returns the trained model together with its per-epoch report.
pub fn train_and_measure<B, M>(
    model:   M,
    train:   SequenceDataset,
    test:    SequenceDataset,
    cfg:     &ExperimentConfig,
    device:  &B::Device,
    metrics: Option<&MetricsLogger>,
) -> Result<(M, TrainingReport)>
where
    B: AutodiffBackend,
    M: AutodiffModule<B> + SequenceClassifier<B>,
    M::InnerModule: SequenceClassifier<B::InnerBackend>,
{
    let mut model  = model;
    let mut report = TrainingReport::new(model.kind());
    tracing::info!(
        "Training {} ({} parameters) for {} epochs on {} samples",
        report.model,
        model.num_params(),
        cfg.epochs,
        train.sample_count(),
    );

    let mut optim = AdamConfig::new().with_epsilon(1e-8).init::<B, M>();

    // Empty splits get no loader; their metrics fall back to NaN / 0.
    let train_loader: Option<Loader<B>> = (train.sample_count() > 0).then(|| {
        DataLoaderBuilder::<B, _, _>::new(SequenceBatcher)
            .batch_size(cfg.batch_size)
            .shuffle(cfg.seed)
            .num_workers(1)
            .set_device(device.clone())
            .build(train)
    });
    let test_loader: Option<Loader<B::InnerBackend>> = (test.sample_count() > 0).then(|| {
        DataLoaderBuilder::<B::InnerBackend, _, _>::new(SequenceBatcher)
            .batch_size(cfg.batch_size)
            .num_workers(1)
            .set_device(device.clone())
            .build(test)
    });

    let ce      = CrossEntropyLossConfig::new().init(device);
    let started = Instant::now();

    for epoch in 1..=cfg.epochs {
        // ── Training phase ────────────────────────────────────────────────────
        let mut loss_sum = 0.0f64;
        let mut batches  = 0usize;

        if let Some(loader) = &train_loader {
            for batch in loader.iter() {
                let logits = model.logits(batch.tokens);
                let loss   = ce.forward(logits, batch.labels);

                loss_sum += loss.clone().into_scalar().elem::<f64>();
                batches  += 1;

                let grads = loss.backward();
                let grads = GradientsParams::from_grads(grads, &model);
                model = optim.step(cfg.lr, model, grads);
            }
        }
        let train_loss = if batches > 0 { loss_sum / batches as f64 } else { f64::NAN };

        // ── Test phase ────────────────────────────────────────────────────────
        let (test_loss, accuracy) = match &test_loader {
            Some(loader) => evaluate(&model.valid(), loader),
            None         => (f64::NAN, 0.0),
        };

        let record = EpochRecord { epoch, train_loss, test_loss, accuracy };
        tracing::info!(
            "[{}] epoch {:>3}/{} | train_loss={:.4} | test_loss={:.4} | acc={:.1}%",
            report.model, epoch, cfg.epochs, train_loss, test_loss, accuracy * 100.0,
        );
        if let Some(logger) = metrics {
            logger.log(report.model, &record)?;
        }
        report.epochs.push(record);
    }

    report.train_seconds = started.elapsed().as_secs_f64();
    tracing::info!("{} finished in {:.2}s", report.model, report.train_seconds);

    Ok((model, report))
}

/// Mean batch loss and accuracy of `model` over every batch of `loader`.
pub fn evaluate<B, M>(model: &M, loader: &Loader<B>) -> (f64, f64)
where
    B: Backend,
    M: SequenceClassifier<B>,
{
    let mut loss_sum = 0.0f64;
    let mut batches  = 0usize;
    let mut correct  = 0usize;
    let mut total    = 0usize;

    for batch in loader.iter() {
        let logits = model.logits(batch.tokens);
        let ce     = CrossEntropyLossConfig::new().init(&logits.device());

        loss_sum += ce
            .forward(logits.clone(), batch.labels.clone())
            .into_scalar()
            .elem::<f64>();
        batches += 1;

        let predicted = logits.argmax(1).flatten::<1>(0, 1);
        total   += batch.labels.dims()[0];
        correct += predicted
            .equal(batch.labels)
            .int()
            .sum()
            .into_scalar()
            .elem::<i64>() as usize;
    }

    let loss     = if batches > 0 { loss_sum / batches as f64 } else { f64::NAN };
    let accuracy = if total   > 0 { correct as f64 / total as f64 } else { 0.0 };
    (loss, accuracy)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{Autodiff, NdArray};
    use crate::data::generator::SyntheticGenerator;
    use crate::domain::report::ModelKind;
    use crate::domain::sequence::{SequencePattern, SequenceSample};
    use crate::domain::traits::SampleSource;
    use crate::ml::{attention::CrossAttentionClassifierConfig, pooled::PooledClassifierConfig};
    use serial_test::serial;

    type TestBackend = Autodiff<NdArray<f32>>;

    fn tiny_config() -> ExperimentConfig {
        ExperimentConfig {
            vocab_size:  12,
            embed_dim:   8,
            hidden_dim:  16,
            num_heads:   2,
            num_samples: 40,
            epochs:      2,
            batch_size:  8,
            lr:          1e-2,
            dropout:     0.0,
            ..ExperimentConfig::default()
        }
    }

    fn datasets(cfg: &ExperimentConfig) -> (SequenceDataset, SequenceDataset) {
        let samples = SyntheticGenerator::new(cfg.vocab_size, cfg.num_samples, cfg.seed)
            .samples()
            .unwrap();
        let (train, test) = samples.split_at(30);
        (SequenceDataset::new(train.to_vec()), SequenceDataset::new(test.to_vec()))
    }

    #[test]
    #[serial]
    fn test_report_has_one_record_per_epoch() {
        let cfg    = tiny_config();
        let device = Default::default();
        let (train, test) = datasets(&cfg);
        let model = PooledClassifierConfig::new(cfg.vocab_size, cfg.embed_dim, cfg.hidden_dim)
            .init::<TestBackend>(&device);

        let (_, report) = train_and_measure(model, train, test, &cfg, &device, None).unwrap();

        assert_eq!(report.model, ModelKind::PooledFeedForward);
        assert_eq!(report.epochs.len(), 2);
        assert_eq!(report.epochs[1].epoch, 2);
        for e in &report.epochs {
            assert!(e.train_loss.is_finite());
            assert!(e.test_loss.is_finite());
            assert!((0.0..=1.0).contains(&e.accuracy));
        }
        assert!(report.train_seconds >= 0.0);
    }

    #[test]
    #[serial]
    fn test_attention_model_trains() {
        let cfg    = tiny_config();
        let device = Default::default();
        let (train, test) = datasets(&cfg);
        let model = CrossAttentionClassifierConfig::new(
            cfg.vocab_size, cfg.embed_dim, cfg.hidden_dim, cfg.num_heads,
        )
        .with_dropout(0.0)
        .init::<TestBackend>(&device);

        let (_, report) = train_and_measure(model, train, test, &cfg, &device, None).unwrap();
        assert_eq!(report.model, ModelKind::CrossAttention);
        assert_eq!(report.epochs.len(), 2);
    }

    #[test]
    #[serial]
    fn test_memorises_a_single_sample() {
        let cfg = ExperimentConfig { epochs: 30, batch_size: 4, ..tiny_config() };
        let device = Default::default();
        let sample = SequenceSample::from_pattern(SequencePattern::Ascending { start: 1 }, 12);
        let train  = SequenceDataset::new(vec![sample.clone(); 4]);
        let test   = SequenceDataset::new(vec![sample]);
        let model  = PooledClassifierConfig::new(cfg.vocab_size, cfg.embed_dim, cfg.hidden_dim)
            .with_dropout(0.0)
            .init::<TestBackend>(&device);

        let (_, report) = train_and_measure(model, train, test, &cfg, &device, None).unwrap();

        let first = report.epochs.first().unwrap().train_loss;
        let last  = report.final_train_loss();
        assert!(last < first, "loss did not drop: {first} -> {last}");
        assert_eq!(report.final_accuracy(), 1.0);
    }

    #[test]
    #[serial]
    fn test_empty_test_set() {
        let cfg    = tiny_config();
        let device = Default::default();
        let (train, _) = datasets(&cfg);
        let model = PooledClassifierConfig::new(cfg.vocab_size, cfg.embed_dim, cfg.hidden_dim)
            .init::<TestBackend>(&device);

        let (_, report) =
            train_and_measure(model, train, SequenceDataset::new(Vec::new()), &cfg, &device, None)
                .unwrap();
        assert!(report.final_test_loss().is_nan());
        assert_eq!(report.final_accuracy(), 0.0);
    }

    #[test]
    #[serial]
    fn test_empty_train_set() {
        let cfg    = tiny_config();
        let device = Default::default();
        let (_, test) = datasets(&cfg);
        let model = PooledClassifierConfig::new(cfg.vocab_size, cfg.embed_dim, cfg.hidden_dim)
            .init::<TestBackend>(&device);

        let (_, report) =
            train_and_measure(model, SequenceDataset::new(Vec::new()), test, &cfg, &device, None)
                .unwrap();
        assert_eq!(report.epochs.len(), cfg.epochs);
        for e in &report.epochs {
            assert!(e.train_loss.is_nan());
            assert!(e.test_loss.is_finite());
            assert!((0.0..=1.0).contains(&e.accuracy));
        }
    }
}
