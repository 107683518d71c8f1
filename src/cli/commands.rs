// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Three subcommands: `compare`, `sweep` and `similarity`.
// clap's derive macros generate --help, error messages for
// bad input, and the string → number conversions.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::application::compare_use_case::ExperimentConfig;
use crate::application::sweep_use_case::ExperimentPreset;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train both models on one synthetic dataset and compare them
    Compare(CompareArgs),

    /// Run the comparison for several hyperparameter presets
    Sweep(SweepArgs),

    /// Score two token sequences with models saved by `compare`
    Similarity(SimilarityArgs),
}

/// Every experiment hyperparameter as a --flag.
#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    /// Number of distinct token ids; also the number of output classes
    #[arg(long, default_value_t = 100)]
    pub vocab_size: usize,

    /// Size of each token's embedding vector
    #[arg(long, default_value_t = 32)]
    pub embed_dim: usize,

    /// Width of the two feedforward layers
    #[arg(long, default_value_t = 64)]
    pub hidden_dim: usize,

    /// Attention heads; embed_dim must be divisible by this
    #[arg(long, default_value_t = 4)]
    pub num_heads: usize,

    /// Number of synthetic sequences to generate
    #[arg(long, default_value_t = 1000)]
    pub num_samples: usize,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 10)]
    pub epochs: usize,

    /// Number of samples per optimiser step
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Dropout probability during training
    #[arg(long, default_value_t = 0.1)]
    pub dropout: f64,

    /// Share of samples used for training; the rest is the test set
    #[arg(long, default_value_t = 0.8)]
    pub train_fraction: f64,

    /// Seed for data generation, the split and batch shuffling
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Write metrics.csv, results.json and model checkpoints here
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

/// Boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<CompareArgs> for ExperimentConfig {
    fn from(a: CompareArgs) -> Self {
        ExperimentConfig {
            vocab_size:     a.vocab_size,
            embed_dim:      a.embed_dim,
            hidden_dim:     a.hidden_dim,
            num_heads:      a.num_heads,
            num_samples:    a.num_samples,
            epochs:         a.epochs,
            batch_size:     a.batch_size,
            lr:             a.lr,
            dropout:        a.dropout,
            train_fraction: a.train_fraction,
            seed:           a.seed,
            output_dir:     a.output_dir,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetArg {
    Baseline,
    LargeVocab,
    WideEmbedding,
    LargeDataset,
}

impl From<PresetArg> for ExperimentPreset {
    fn from(p: PresetArg) -> Self {
        match p {
            PresetArg::Baseline      => ExperimentPreset::Baseline,
            PresetArg::LargeVocab    => ExperimentPreset::LargeVocab,
            PresetArg::WideEmbedding => ExperimentPreset::WideEmbedding,
            PresetArg::LargeDataset  => ExperimentPreset::LargeDataset,
        }
    }
}

#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Base configuration every preset is derived from
    #[command(flatten)]
    pub base: CompareArgs,

    /// Presets to run, in order (repeatable); all of them when omitted
    #[arg(long = "preset", value_enum)]
    pub presets: Vec<PresetArg>,
}

#[derive(Args, Debug)]
pub struct SimilarityArgs {
    /// Output directory of a previous `compare` run
    #[arg(long)]
    pub output_dir: PathBuf,

    /// First sequence, comma-separated token ids
    #[arg(long, value_delimiter = ',', required = true)]
    pub a: Vec<u32>,

    /// Second sequence, comma-separated token ids
    #[arg(long, value_delimiter = ',', required = true)]
    pub b: Vec<u32>,
}
