// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer asks a `SampleSource` for data and
// never cares whether it was generated, loaded, or fixed in
// a test.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use crate::domain::sequence::SequenceSample;

// ─── SampleSource ─────────────────────────────────────────────────────────────
/// Any component that can produce labelled sequences.
///
/// Implementations:
///   - SyntheticGenerator → seeded random patterns
pub trait SampleSource {
    /// Produce every sample this source has.
    fn samples(&self) -> Result<Vec<SequenceSample>>;

    /// Vocabulary the produced tokens and labels are drawn from.
    fn vocab_size(&self) -> usize;
}
