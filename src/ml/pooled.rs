use burn::{
    nn::{Dropout, DropoutConfig, Embedding, EmbeddingConfig},
    prelude::*,
};

use crate::domain::report::ModelKind;
use crate::ml::model::{
    cosine_similarity, mean_pool, FeedForwardHead, FeedForwardHeadConfig, SequenceClassifier,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize.
#[derive(Config, Debug)]
pub struct PooledClassifierConfig {
    pub vocab_size: usize,
    pub embed_dim:  usize,
    pub hidden_dim: usize,
    #[config(default = 0.1)]
    pub dropout:    f64,
}

impl PooledClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> PooledClassifier<B> {
        let embedding = EmbeddingConfig::new(self.vocab_size, self.embed_dim).init(device);
        let dropout   = DropoutConfig::new(self.dropout).init();
        let head      = FeedForwardHeadConfig::new(self.embed_dim, self.hidden_dim, self.vocab_size)
            .with_dropout(self.dropout)
            .init(device);
        PooledClassifier { embedding, dropout, head }
    }
}

/// Embedding → mean pool → feedforward head. Word order is invisible to it.
#[derive(Module, Debug)]
pub struct PooledClassifier<B: Backend> {
    pub embedding: Embedding<B>,
    pub dropout:   Dropout,
    pub head:      FeedForwardHead<B>,
}

impl<B: Backend> PooledClassifier<B> {
    /// tokens: [batch, seq_len] → logits: [batch, vocab]
    pub fn forward(&self, tokens: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let x = self.dropout.forward(self.embedding.forward(tokens));
        self.head.forward(mean_pool(x))
    }

    /// Pooled embedding of each sequence: [batch, embed_dim]
    pub fn encode(&self, tokens: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        mean_pool(self.embedding.forward(tokens))
    }
}

impl<B: Backend> SequenceClassifier<B> for PooledClassifier<B> {
    fn kind(&self) -> ModelKind {
        ModelKind::PooledFeedForward
    }

    fn logits(&self, tokens: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        self.forward(tokens)
    }

    fn similarity(&self, a: Tensor<B, 2, Int>, b: Tensor<B, 2, Int>) -> Tensor<B, 1> {
        cosine_similarity(self.encode(a), self.encode(b))
    }
}
