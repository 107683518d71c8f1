// ============================================================
// Layer 4 — Sequence Batcher
// ============================================================
// Implements Burn's Batcher trait to stack a Vec<SequenceSample>
// into tensors on the target device.
//
//   Input:  N samples, each SEQUENCE_LEN tokens + one label
//   Output: tokens [N, SEQUENCE_LEN], labels [N]
//
// Every sequence has the same length, so no padding or mask
// is needed: flatten the tokens, then reshape.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::domain::sequence::SequenceSample;

/// A batch of samples ready for the model forward pass.
#[derive(Debug, Clone)]
pub struct SequenceBatch<B: Backend> {
    /// Token ids — shape: [batch_size, seq_len]
    pub tokens: Tensor<B, 2, Int>,

    /// Target token per sample — shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

/// Stateless; the DataLoader hands in the device per call.
#[derive(Clone, Debug, Default)]
pub struct SequenceBatcher;

impl<B: Backend> Batcher<B, SequenceSample, SequenceBatch<B>> for SequenceBatcher {
    fn batch(&self, items: Vec<SequenceSample>, device: &B::Device) -> SequenceBatch<B> {
        let batch_size = items.len();
        let seq_len    = items.first().map_or(0, |s| s.tokens.len());

        // Vec<Vec<u32>> → flat Vec<i64>, row-major
        let token_flat: Vec<i64> = items
            .iter()
            .flat_map(|s| s.tokens.iter().map(|&t| t as i64))
            .collect();

        let labels: Vec<i64> = items.iter().map(|s| s.label as i64).collect();

        let tokens = Tensor::<B, 2, Int>::from_data(
            TensorData::new(token_flat, [batch_size, seq_len]),
            device,
        );
        let labels = Tensor::<B, 1, Int>::from_data(
            TensorData::new(labels, [batch_size]),
            device,
        );

        SequenceBatch { tokens, labels }
    }
}
