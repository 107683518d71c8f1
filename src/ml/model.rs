// ============================================================
// Layer 5 — Shared Model Pieces
// ============================================================
// Both classifiers end in the same feedforward head and both
// expose the same two operations, captured by the
// SequenceClassifier trait so the trainer can be generic.
//
//   tokens [b, L] ─► (model-specific encoder) ─► pooled [b, E]
//                                                   │
//                      FeedForwardHead ◄────────────┘
//                   E → H → ReLU → H → ReLU → vocab
//
// Reference: Burn Book §3 (Building Blocks)

use burn::{
    nn::{Dropout, DropoutConfig, Linear, LinearConfig},
    prelude::*,
    tensor::activation::relu,
};

use crate::domain::report::ModelKind;

/// What the trainer and the similarity inspector need from a model.
pub trait SequenceClassifier<B: Backend> {
    fn kind(&self) -> ModelKind;

    /// tokens: [batch, seq_len] → logits over the vocabulary: [batch, vocab]
    fn logits(&self, tokens: Tensor<B, 2, Int>) -> Tensor<B, 2>;

    /// Cosine similarity per row of two token batches: [batch].
    /// The sequences may differ in length but not in batch size.
    fn similarity(&self, a: Tensor<B, 2, Int>, b: Tensor<B, 2, Int>) -> Tensor<B, 1>;
}

#[derive(Config, Debug)]
pub struct FeedForwardHeadConfig {
    pub input_dim:  usize,
    pub hidden_dim: usize,
    pub output_dim: usize,
    #[config(default = 0.1)]
    pub dropout:    f64,
}

impl FeedForwardHeadConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> FeedForwardHead<B> {
        FeedForwardHead {
            ff1:     LinearConfig::new(self.input_dim, self.hidden_dim).init(device),
            ff2:     LinearConfig::new(self.hidden_dim, self.hidden_dim).init(device),
            output:  LinearConfig::new(self.hidden_dim, self.output_dim).init(device),
            dropout: DropoutConfig::new(self.dropout).init(),
        }
    }
}

/// Two ReLU feedforward layers and the output projection.
#[derive(Module, Debug)]
pub struct FeedForwardHead<B: Backend> {
    pub ff1:     Linear<B>,
    pub ff2:     Linear<B>,
    pub output:  Linear<B>,
    pub dropout: Dropout,
}

impl<B: Backend> FeedForwardHead<B> {
    /// pooled: [batch, input_dim] → [batch, output_dim]
    pub fn forward(&self, pooled: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = relu(self.ff1.forward(pooled));
        let x = self.dropout.forward(x);
        let x = relu(self.ff2.forward(x));
        self.output.forward(x)
    }
}

/// Average over the sequence axis: [batch, seq_len, dim] → [batch, dim]
pub fn mean_pool<B: Backend>(x: Tensor<B, 3>) -> Tensor<B, 2> {
    let [batch, _, dim] = x.dims();
    x.mean_dim(1).reshape([batch, dim])
}

/// Row-wise cosine similarity: [batch, dim] × [batch, dim] → [batch]
pub fn cosine_similarity<B: Backend>(a: Tensor<B, 2>, b: Tensor<B, 2>) -> Tensor<B, 1> {
    let dot    = (a.clone() * b.clone()).sum_dim(1);
    let norm_a = (a.clone() * a).sum_dim(1).sqrt();
    let norm_b = (b.clone() * b).sum_dim(1).sqrt();
    // Zero vectors score 0 instead of NaN
    (dot / (norm_a * norm_b).clamp_min(1e-8)).flatten::<1>(0, 1)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use burn::backend::NdArray;
    use serial_test::serial;

    type TestBackend = NdArray<f32>;

    fn values(t: Tensor<TestBackend, 1>) -> Vec<f32> {
        t.into_data().convert::<f32>().to_vec::<f32>().unwrap()
    }

    #[test]
    fn test_mean_pool_averages_positions() {
        let device = Default::default();
        let x = Tensor::<TestBackend, 3>::from_floats(
            [[[1.0, 2.0], [3.0, 4.0]], [[0.0, 0.0], [2.0, -2.0]]],
            &device,
        );
        let pooled = mean_pool(x);
        assert_eq!(pooled.dims(), [2, 2]);
        let v = pooled.into_data().convert::<f32>().to_vec::<f32>().unwrap();
        assert_eq!(v, vec![2.0, 3.0, 1.0, -1.0]);
    }

    #[test]
    fn test_cosine_similarity_cases() {
        let device = Default::default();
        let a = Tensor::<TestBackend, 2>::from_floats([[1.0, 0.0], [1.0, 1.0], [0.0, 0.0]], &device);
        let b = Tensor::<TestBackend, 2>::from_floats([[0.0, 1.0], [2.0, 2.0], [1.0, 0.0]], &device);
        let sims = values(cosine_similarity(a, b));
        assert_abs_diff_eq!(sims[0], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(sims[1], 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(sims[2], 0.0, epsilon = 1e-6);
    }

    #[test]
    #[serial]
    fn test_head_output_shape() {
        let device = Default::default();
        let head: FeedForwardHead<TestBackend> = FeedForwardHeadConfig::new(8, 16, 30).init(&device);
        let out = head.forward(Tensor::zeros([4, 8], &device));
        assert_eq!(out.dims(), [4, 30]);
    }
}
