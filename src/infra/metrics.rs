// ============================================================
// Layer 5 — Metric Parsing and Results Logger
// ============================================================
// Two halves:
//
//   MetricReport::parse — reads the textual output of a linear
//   trainer and extracts four labelled numbers:
//
//       acc: 0.8731  p: 0.812  r: 0.790  f1: 0.801
//
//   Tokens may be split (`f1: 0.8`) or joined (`f1:0.8`), and a
//   trailing `%` is scaled to a fraction. Every field must be
//   present exactly once (or repeated with the same value);
//   anything else is a MetricParseError instead of a silently
//   wrong number.
//
//   MetricsLogger — appends one CSV row per experiment to
//   results.csv so a grid run leaves a table behind:
//
//       experiment,accuracy,precision,recall,f1
//       method-ngram_n-1,0.873100,0.812000,0.790000,0.801000
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use crate::domain::error::MetricParseError;

/// Scores reported by one trainer run. All values are fractions in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Output keys, in the order fields appear in MetricReport
const FIELDS: [(&str, &str); 4] = [
    ("acc", "accuracy"),
    ("p", "precision"),
    ("r", "recall"),
    ("f1", "f1"),
];

impl MetricReport {
    /// Parse a trainer's stdout into a report.
    pub fn parse(output: &str) -> Result<Self, MetricParseError> {
        let mut found: [Option<f64>; 4] = [None; 4];
        let mut tokens = output.split_whitespace();

        while let Some(token) = tokens.next() {
            let Some((key, inline)) = token.split_once(':') else {
                continue;
            };
            let Some(slot) = FIELDS.iter().position(|(k, _)| k.eq_ignore_ascii_case(key)) else {
                continue;
            };
            let field = FIELDS[slot].1;

            let raw = if inline.is_empty() {
                tokens.next().unwrap_or_default()
            } else {
                inline
            };
            let value = parse_value(raw).ok_or_else(|| MetricParseError::InvalidValue {
                field,
                value: raw.to_string(),
            })?;

            if let Some(first) = found[slot] {
                if first != value {
                    return Err(MetricParseError::DuplicateField {
                        field,
                        first,
                        second: value,
                    });
                }
            }
            found[slot] = Some(value);
        }

        let get = |i: usize| found[i].ok_or(MetricParseError::MissingField(FIELDS[i].1));
        Ok(Self {
            accuracy: get(0)?,
            precision: get(1)?,
            recall: get(2)?,
            f1: get(3)?,
        })
    }
}

/// `0.81`, `0.81,` or `81%` → 0.81
fn parse_value(raw: &str) -> Option<f64> {
    let raw = raw.trim_end_matches([',', ';']);
    let (digits, scale) = match raw.strip_suffix('%') {
        Some(d) => (d, 100.0),
        None => (raw, 1.0),
    };
    let v: f64 = digits.parse().ok()?;
    v.is_finite().then_some(v / scale)
}

/// Appends experiment results to a CSV file for later analysis.
pub struct MetricsLogger {
    /// Full path to the CSV file
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger in `dir`.
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create results directory '{}'", dir.display()))?;

        let csv_path = dir.join("results.csv");

        // Header only for a new file so repeated runs append
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)
                .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
            writeln!(f, "experiment,accuracy,precision,recall,f1")?;
            tracing::debug!("Created results CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one experiment's report as a new row.
    pub fn log(&self, experiment: &str, m: &MetricReport) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        writeln!(
            f,
            "{},{:.6},{:.6},{:.6},{:.6}",
            experiment, m.accuracy, m.precision, m.recall, m.f1,
        )?;

        tracing::debug!(
            "Logged '{}': acc={:.4}, f1={:.4}",
            experiment,
            m.accuracy,
            m.f1
        );
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}
