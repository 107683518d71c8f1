// ============================================================
// Layer 4 — Synthetic Sequence Generator
// ============================================================
// Produces `num_samples` labelled sequences, each drawn from
// one of the two patterns with equal probability:
//
//   Ascending   start  ~ U[0, vocab)
//   Alternating first  ~ U[0, vocab), second ~ U[0, vocab) \ {first}
//
// Seeded with StdRng so the same seed always yields the same
// dataset, which keeps the two models' comparison fair across
// reruns.

use anyhow::{ensure, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::domain::sequence::{SequencePattern, SequenceSample};
use crate::domain::traits::SampleSource;

#[derive(Debug, Clone)]
pub struct SyntheticGenerator {
    vocab_size:  usize,
    num_samples: usize,
    seed:        u64,
}

impl SyntheticGenerator {
    pub fn new(vocab_size: usize, num_samples: usize, seed: u64) -> Self {
        Self { vocab_size, num_samples, seed }
    }

    fn draw_pattern(&self, rng: &mut StdRng) -> SequencePattern {
        let vocab = self.vocab_size as u32;
        if rng.gen_bool(0.5) {
            SequencePattern::Ascending { start: rng.gen_range(0..vocab) }
        } else {
            let first  = rng.gen_range(0..vocab);
            // Skip over `first` so the two halves never coincide
            let second = rng.gen_range(0..vocab - 1);
            let second = if second >= first { second + 1 } else { second };
            SequencePattern::Alternating { first, second }
        }
    }
}

impl SampleSource for SyntheticGenerator {
    fn samples(&self) -> Result<Vec<SequenceSample>> {
        ensure!(
            self.vocab_size >= 2,
            "vocab_size must be at least 2 to build two distinct patterns (got {})",
            self.vocab_size
        );
        ensure!(
            self.vocab_size <= u32::MAX as usize,
            "vocab_size {} does not fit a u32 token id",
            self.vocab_size
        );

        let mut rng = StdRng::seed_from_u64(self.seed);
        let vocab   = self.vocab_size as u32;

        let samples: Vec<SequenceSample> = (0..self.num_samples)
            .map(|_| SequenceSample::from_pattern(self.draw_pattern(&mut rng), vocab))
            .collect();

        tracing::debug!(
            "Generated {} samples over a vocabulary of {} (seed {})",
            samples.len(),
            self.vocab_size,
            self.seed,
        );
        Ok(samples)
    }

    fn vocab_size(&self) -> usize {
        self.vocab_size
    }
}
