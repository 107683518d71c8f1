// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// One CSV row per model per epoch. Each comparison starts a
// fresh file, so the rows always describe the latest run.
//
// Output file: <output_dir>/metrics.csv
//
//   model,epoch,train_loss,test_loss,accuracy
//   pooled-ff,1,4.512300,4.498100,0.031000
//   pooled-ff,2,4.210900,4.187700,0.074000
//   cross-attention,1,4.530200,4.501100,0.029000
//   ...
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use crate::domain::report::{EpochRecord, ModelKind};

const HEADER: &str = "model,epoch,train_loss,test_loss,accuracy";

/// Logs epoch metrics to a CSV file for later analysis.
#[derive(Debug)]
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create the directory if needed and start `metrics.csv` with just the header.
    /// Rows left by an earlier run are discarded.
    pub fn create(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create metrics directory '{}'", dir.display()))?;

        let csv_path = dir.join("metrics.csv");
        let mut f = fs::File::create(&csv_path)
            .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
        writeln!(f, "{HEADER}")?;
        tracing::debug!("Created metrics CSV: '{}'", csv_path.display());

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new row.
    pub fn log(&self, model: ModelKind, m: &EpochRecord) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        writeln!(
            f,
            "{},{},{:.6},{:.6},{:.6}",
            model, m.epoch, m.train_loss, m.test_loss, m.accuracy,
        )?;
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn record(epoch: usize) -> EpochRecord {
        EpochRecord { epoch, train_loss: 1.5, test_loss: 1.25, accuracy: 0.5 }
    }

    #[test]
    fn test_header_and_rows() {
        let dir    = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::create(dir.path()).unwrap();
        logger.log(ModelKind::PooledFeedForward, &record(1)).unwrap();
        logger.log(ModelKind::CrossAttention, &record(1)).unwrap();

        let text  = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "pooled-ff,1,1.500000,1.250000,0.500000");
        assert_eq!(lines[2], "cross-attention,1,1.500000,1.250000,0.500000");
    }

    #[test]
    fn test_create_discards_previous_rows() {
        let dir = tempfile::tempdir().unwrap();
        let first = MetricsLogger::create(dir.path()).unwrap();
        first.log(ModelKind::PooledFeedForward, &record(1)).unwrap();
        first.log(ModelKind::PooledFeedForward, &record(2)).unwrap();

        MetricsLogger::create(dir.path()).unwrap()
            .log(ModelKind::CrossAttention, &record(1)).unwrap();

        let text = fs::read_to_string(dir.path().join("metrics.csv")).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], HEADER);
        assert!(lines[1].starts_with("cross-attention,1,"));
    }
}
