// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing the
// experiment: what a sample is, which models exist, and
// what a finished training run reports.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Synthetic token sequences and their labels
pub mod sequence;

// Per-epoch metrics, per-model reports, side-by-side results
pub mod report;

// Core abstractions (traits) that other layers implement
pub mod traits;
