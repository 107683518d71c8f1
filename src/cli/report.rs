// ============================================================
// Layer 1 — Results Printer
// ============================================================
// Side-by-side text rendering of a ComparisonResults:
//
//   == baseline: vocab=100 embed=32 hidden=64 heads=4 samples=1000 (800 train / 200 test) ==
//   epoch |        pooled-ff (train / test / acc)  |  cross-attention (train / test / acc)
//       1 |   4.5123 /   4.4981 /   3.0% |   4.5302 /   4.5011 /   2.9%
//   ...
//
// format_* build strings so the layout can be tested;
// print_* only write them to stdout.

use std::fmt::Write;

use crate::domain::report::{ComparisonResults, TrainingReport};

fn cell(report: &TrainingReport, epoch: usize) -> String {
    match report.epochs.get(epoch) {
        Some(e) => format!(
            "{:>8.4} / {:>8.4} / {:>5.1}%",
            e.train_loss, e.test_loss, e.accuracy * 100.0
        ),
        None => format!("{:>29}", "-"),
    }
}

pub fn format_results(results: &ComparisonResults) -> String {
    let s = &results.summary;
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(
        out,
        "== {}: vocab={} embed={} hidden={} heads={} samples={} ({} train / {} test) ==",
        results.label, s.vocab_size, s.embed_dim, s.hidden_dim, s.num_heads,
        s.num_samples, s.train_samples, s.test_samples,
    );

    let _ = write!(out, "epoch");
    for r in &results.reports {
        let _ = write!(out, " | {:>29}", format!("{} (train / test / acc)", r.model));
    }
    let _ = writeln!(out);

    let rows = results.reports.iter().map(|r| r.epochs.len()).max().unwrap_or(0);
    for i in 0..rows {
        let _ = write!(out, "{:>5}", i + 1);
        for r in &results.reports {
            let _ = write!(out, " | {}", cell(r, i));
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out);
    for r in &results.reports {
        let _ = writeln!(
            out,
            "{:<16} final train {:.4} | final test {:.4} | acc {:.1}% (best {:.1}%) | {:.2}s",
            r.model.to_string(),
            r.final_train_loss(),
            r.final_test_loss(),
            r.final_accuracy() * 100.0,
            r.best_accuracy() * 100.0,
            r.train_seconds,
        );
    }

    if let (Some(acc), Some(fast)) = (results.most_accurate(), results.fastest()) {
        let _ = writeln!(out, "most accurate: {} | fastest: {}", acc.model, fast.model);
    }
    out
}

/// Print the side-by-side comparison table.
pub fn print_results(results: &ComparisonResults) {
    println!("{}", format_results(results));
}

/// One line per preset: final accuracy and time for each model.
pub fn format_sweep_summary(all: &[ComparisonResults]) -> String {
    let mut out = String::from("== sweep summary ==\n");
    for results in all {
        let _ = write!(out, "{:<16}", results.label);
        for r in &results.reports {
            let _ = write!(
                out,
                " | {}: {:>5.1}% in {:>7.2}s",
                r.model,
                r.final_accuracy() * 100.0,
                r.train_seconds
            );
        }
        let _ = writeln!(out);
    }
    out
}

pub fn print_sweep_summary(all: &[ComparisonResults]) {
    println!("{}", format_sweep_summary(all));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::{EpochRecord, ExperimentSummary, ModelKind};

    fn results() -> ComparisonResults {
        let report = |model, accuracy, secs| TrainingReport {
            model,
            epochs: vec![
                EpochRecord { epoch: 1, train_loss: 2.0, test_loss: 2.5, accuracy: 0.1 },
                EpochRecord { epoch: 2, train_loss: 1.0, test_loss: 1.5, accuracy },
            ],
            train_seconds: secs,
        };
        ComparisonResults {
            label: "baseline".into(),
            summary: ExperimentSummary {
                vocab_size: 100, embed_dim: 32, hidden_dim: 64, num_heads: 4,
                num_samples: 1000, train_samples: 800, test_samples: 200, epochs: 2,
            },
            reports: vec![
                report(ModelKind::PooledFeedForward, 0.25, 0.5),
                report(ModelKind::CrossAttention, 0.75, 2.0),
            ],
        }
    }

    #[test]
    fn test_table_has_header_rows_and_winners() {
        let text = format_results(&results());
        assert!(text.starts_with("== baseline: vocab=100 embed=32"));
        assert!(text.contains("(800 train / 200 test)"));
        assert!(text.contains("pooled-ff (train / test / acc)"));
        assert!(text.contains("  2.0000 /   2.5000 /  10.0%"));
        assert!(text.contains("acc 75.0% (best 75.0%)"));
        assert!(text.contains("most accurate: cross-attention | fastest: pooled-ff"));
    }

    #[test]
    fn test_sweep_summary_line_per_preset() {
        let text = format_sweep_summary(&[results(), results()]);
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("pooled-ff:  25.0% in    0.50s"));
    }
}
