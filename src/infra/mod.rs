// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Files written next to an experiment run:
//
//   checkpoint.rs — model weights (Burn CompactRecorder),
//                   experiment_config.json and results.json
//
//   metrics.rs    — one metrics.csv row per model per epoch
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Model checkpoints, config and results persistence
pub mod checkpoint;

/// Training metrics CSV logger
pub mod metrics;
