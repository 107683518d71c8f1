// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn module and training code lives here.
//
//   backend.rs   — NdArray or Wgpu, plus the Autodiff wrapper
//   model.rs     — SequenceClassifier trait, shared feedforward
//                  head, mean pooling, cosine similarity
//   pooled.rs    — embedding → mean pool → head
//   attention.rs — embedding → multi-head attention + layer norm
//                  → mean pool → head
//   trainer.rs   — train_and_measure: Adam, cross-entropy,
//                  per-epoch test loss and accuracy, timing
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)

/// Backend type aliases selected by cargo feature
pub mod backend;

/// Shared classifier trait and building blocks
pub mod model;

/// Pooled-embedding feedforward classifier
pub mod pooled;

/// Cross-attention classifier
pub mod attention;

/// Training and measurement loop
pub mod trainer;
