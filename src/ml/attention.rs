// ============================================================
// Layer 5 — Cross-Attention Classifier
// ============================================================
// The pooled model plus one attention block before pooling:
//
//   attend(query, context) = LayerNorm(query + MHA(q=query, k=context, v=context))
//
// During training query and context are the same sequence.
// For similarity, sequence A attends over sequence B, and the
// pooled result is compared with B's own pooled embedding.
//
// Reference: Burn Book §3 (Building Blocks)
//            Vaswani et al. (2017) Attention Is All You Need

use burn::{
    nn::{
        attention::{MhaInput, MultiHeadAttention, MultiHeadAttentionConfig},
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        LayerNorm, LayerNormConfig,
    },
    prelude::*,
};

use crate::domain::report::ModelKind;
use crate::ml::model::{
    cosine_similarity, mean_pool, FeedForwardHead, FeedForwardHeadConfig, SequenceClassifier,
};

#[derive(Config, Debug)]
pub struct CrossAttentionClassifierConfig {
    pub vocab_size: usize,
    pub embed_dim:  usize,
    pub hidden_dim: usize,
    /// embed_dim must be divisible by num_heads
    pub num_heads:  usize,
    #[config(default = 0.1)]
    pub dropout:    f64,
}

impl CrossAttentionClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> CrossAttentionClassifier<B> {
        let embedding = EmbeddingConfig::new(self.vocab_size, self.embed_dim).init(device);
        let attention = MultiHeadAttentionConfig::new(self.embed_dim, self.num_heads)
            .with_dropout(self.dropout)
            .init(device);
        let norm      = LayerNormConfig::new(self.embed_dim).init(device);
        let dropout   = DropoutConfig::new(self.dropout).init();
        let head      = FeedForwardHeadConfig::new(self.embed_dim, self.hidden_dim, self.vocab_size)
            .with_dropout(self.dropout)
            .init(device);
        CrossAttentionClassifier { embedding, attention, norm, dropout, head }
    }
}

#[derive(Module, Debug)]
pub struct CrossAttentionClassifier<B: Backend> {
    pub embedding: Embedding<B>,
    pub attention: MultiHeadAttention<B>,
    pub norm:      LayerNorm<B>,
    pub dropout:   Dropout,
    pub head:      FeedForwardHead<B>,
}

impl<B: Backend> CrossAttentionClassifier<B> {
    /// query: [batch, q_len, dim], context: [batch, c_len, dim] → [batch, q_len, dim]
    pub fn attend(&self, query: Tensor<B, 3>, context: Tensor<B, 3>) -> Tensor<B, 3> {
        let attended = self
            .attention
            .forward(MhaInput::new(query.clone(), context.clone(), context))
            .context;
        self.norm.forward(query + attended)
    }

    /// tokens: [batch, seq_len] → logits: [batch, vocab]
    pub fn forward(&self, tokens: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let x = self.dropout.forward(self.embedding.forward(tokens));
        let x = self.attend(x.clone(), x);
        self.head.forward(mean_pool(x))
    }
}

impl<B: Backend> SequenceClassifier<B> for CrossAttentionClassifier<B> {
    fn kind(&self) -> ModelKind {
        ModelKind::CrossAttention
    }

    fn logits(&self, tokens: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        self.forward(tokens)
    }

    fn similarity(&self, a: Tensor<B, 2, Int>, b: Tensor<B, 2, Int>) -> Tensor<B, 1> {
        let emb_a = self.embedding.forward(a);
        let emb_b = self.embedding.forward(b);
        let a_over_b = mean_pool(self.attend(emb_a, emb_b.clone()));
        cosine_similarity(a_over_b, mean_pool(emb_b))
    }
}
