// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from random patterns to device-ready batches:
//
//   SyntheticGenerator → labelled length-10 sequences
//       │
//       ▼
//   split_train_test   → seeded shuffle, train / test
//       │
//       ▼
//   SequenceDataset    → implements Burn's Dataset trait
//       │
//       ▼
//   SequenceBatcher    → stacks samples into tensor batches
//       │
//       ▼
//   DataLoader         → feeds batches to the training loop
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Seeded synthetic sequence generation
pub mod generator;

/// Implements Burn's Dataset trait for sequence samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Shuffles and splits data into train/test sets
pub mod splitter;
