// ============================================================
// Layer 3 — Sequence Domain Types
// ============================================================
// A sample is a fixed-length run of token ids plus the token
// that continues it. Two patterns are generated:
//
//   Ascending   { start: 7 }          → 7 8 9 10 11 12 13 14 15 16 → 17
//   Alternating { first: 3, second: 9 } → 3 9 3 9 3 9 3 9 3 9       → 3
//
// All arithmetic wraps at the vocabulary size, so every token
// and every label is a valid id for that vocabulary.

use serde::{Deserialize, Serialize};

/// Number of tokens in every generated sequence.
pub const SEQUENCE_LEN: usize = 10;

/// The distributional pattern a sample was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequencePattern {
    /// Consecutive ids starting at `start`.
    Ascending { start: u32 },
    /// Two ids repeating in turn, `first` at every even position.
    Alternating { first: u32, second: u32 },
}

impl SequencePattern {
    /// Expand the pattern into `SEQUENCE_LEN` tokens.
    pub fn tokens(&self, vocab_size: u32) -> Vec<u32> {
        (0..SEQUENCE_LEN as u32)
            .map(|pos| self.token_at(pos, vocab_size))
            .collect()
    }

    /// The label is the token the pattern would emit next.
    pub fn label(&self, vocab_size: u32) -> u32 {
        self.token_at(SEQUENCE_LEN as u32, vocab_size)
    }

    fn token_at(&self, pos: u32, vocab_size: u32) -> u32 {
        match *self {
            // u64 so start + pos cannot overflow near u32::MAX
            SequencePattern::Ascending { start } => {
                ((u64::from(start) + u64::from(pos)) % u64::from(vocab_size)) as u32
            }
            SequencePattern::Alternating { first, second } => {
                if pos % 2 == 0 { first % vocab_size } else { second % vocab_size }
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SequencePattern::Ascending { .. }   => "ascending",
            SequencePattern::Alternating { .. } => "alternating",
        }
    }
}

/// One labelled training example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceSample {
    pub tokens:  Vec<u32>,
    pub label:   u32,
    pub pattern: SequencePattern,
}

impl SequenceSample {
    /// Build a sample from a pattern; tokens and label are derived, never given.
    pub fn from_pattern(pattern: SequencePattern, vocab_size: u32) -> Self {
        Self {
            tokens: pattern.tokens(vocab_size),
            label:  pattern.label(vocab_size),
            pattern,
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascending_tokens_and_label() {
        let s = SequenceSample::from_pattern(SequencePattern::Ascending { start: 3 }, 100);
        assert_eq!(s.tokens, vec![3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
        assert_eq!(s.label, 13);
    }

    #[test]
    fn test_ascending_wraps_at_vocab() {
        let s = SequenceSample::from_pattern(SequencePattern::Ascending { start: 15 }, 20);
        assert_eq!(s.tokens, vec![15, 16, 17, 18, 19, 0, 1, 2, 3, 4]);
        assert_eq!(s.label, 5);
    }

    #[test]
    fn test_ascending_wraps_at_largest_vocab() {
        let vocab = u32::MAX;
        let s = SequenceSample::from_pattern(SequencePattern::Ascending { start: vocab - 2 }, vocab);
        assert_eq!(s.tokens, vec![vocab - 2, vocab - 1, 0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(s.label, 8);
    }

    #[test]
    fn test_alternating_label_is_first() {
        let p = SequencePattern::Alternating { first: 4, second: 9 };
        let s = SequenceSample::from_pattern(p, 50);
        assert_eq!(s.tokens, vec![4, 9, 4, 9, 4, 9, 4, 9, 4, 9]);
        assert_eq!(s.label, 4);
        assert_eq!(p.name(), "alternating");
    }

    #[test]
    fn test_every_token_fits_vocab() {
        let vocab = 7;
        for start in 0..vocab {
            let s = SequenceSample::from_pattern(SequencePattern::Ascending { start }, vocab);
            assert_eq!(s.tokens.len(), SEQUENCE_LEN);
            assert!(s.tokens.iter().all(|&t| t < vocab));
            assert!(s.label < vocab);
        }
    }
}
