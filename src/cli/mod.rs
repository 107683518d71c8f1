// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap, hands work to Layer 2, and
// prints what comes back. Nothing here trains or computes.
//
//   compare    — one side-by-side comparison
//   sweep      — the comparison over hyperparameter presets
//   similarity — score a sequence pair with saved models
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;
pub mod report;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, CompareArgs, SimilarityArgs, SweepArgs};

use crate::application::{
    compare_use_case::{CompareUseCase, ExperimentConfig},
    similarity_use_case::SimilarityUseCase,
    sweep_use_case::{run_sweep, ExperimentPreset},
};

#[derive(Parser, Debug)]
#[command(
    name = "seq-compare",
    version,
    about = "Compare a pooled-embedding classifier with a cross-attention classifier on synthetic sequences."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Compare(args)    => run_compare(args),
            Commands::Sweep(args)      => run_sweep_command(args),
            Commands::Similarity(args) => run_similarity(args),
        }
    }
}

fn run_compare(args: CompareArgs) -> Result<()> {
    let config: ExperimentConfig = args.into();
    tracing::info!("Starting comparison: {:?}", config);

    let results = CompareUseCase::new(config).execute()?;
    report::print_results(&results);
    Ok(())
}

fn run_sweep_command(args: SweepArgs) -> Result<()> {
    let base: ExperimentConfig = args.base.into();
    let presets: Vec<ExperimentPreset> = args.presets.into_iter().map(Into::into).collect();

    let all = run_sweep(&base, &presets)?;
    for results in &all {
        report::print_results(results);
    }
    report::print_sweep_summary(&all);
    Ok(())
}

fn run_similarity(args: SimilarityArgs) -> Result<()> {
    let usecase = SimilarityUseCase::new(&args.output_dir)?;
    for (model, score) in usecase.compare(&args.a, &args.b)? {
        println!("{:<16} similarity = {:.4}", model.to_string(), score);
    }
    Ok(())
}
