// ============================================================
// Layer 3 — Error Types
// ============================================================
// Every failure the partitioner, the metric parser or an
// external tool run can report. All of them are terminal for
// the current invocation: nothing here is retried. The fix is
// to correct the input and run again.
//
// The CLI layer wraps these in anyhow with extra context; the
// Display text leads with the error kind so the message on
// stderr names the precondition that failed.
//
// Reference: thiserror crate documentation
//            Rust Book §9 (Recoverable Errors with Result)

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the corpus partitioning pipeline.
#[derive(Error, Debug)]
pub enum PartitionError {
    /// Source file missing or unreadable
    #[error("corpus not found: cannot read '{}': {source}", path.display())]
    CorpusNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source file has no non-blank lines
    #[error("empty corpus: no entries found in '{}'", path.display())]
    EmptyCorpus { path: PathBuf },

    /// Candidate-label matching found zero or several labels
    #[error(
        "label resolution failed for entry '{entry}' (line {line_no}): {}",
        describe_matches(.matches)
    )]
    LabelResolution {
        entry: String,
        line_no: usize,
        matches: Vec<String>,
    },

    /// Entry lacks the structure the label scheme expects
    #[error("malformed entry '{entry}' (line {line_no}): {reason}")]
    MalformedEntry {
        entry: String,
        line_no: usize,
        reason: &'static str,
    },

    /// Candidate scheme configured with nothing to match against
    #[error("invalid label set: candidate scheme needs at least one non-empty label")]
    InvalidLabelSet,

    /// Writing an output artifact failed
    #[error("I/O error writing '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn describe_matches(matches: &[String]) -> String {
    if matches.is_empty() {
        "matches none of the candidate labels".to_string()
    } else {
        format!("matches several labels: {}", matches.join(", "))
    }
}

/// Failures turning a trainer's textual output into a MetricReport.
#[derive(Error, Debug, PartialEq)]
pub enum MetricParseError {
    #[error("metric parse error: field '{0}' missing from tool output")]
    MissingField(&'static str),

    #[error("metric parse error: field '{field}' has non-numeric value '{value}'")]
    InvalidValue { field: &'static str, value: String },

    #[error("metric parse error: field '{field}' reported twice ({first} vs {second})")]
    DuplicateField {
        field: &'static str,
        first: f64,
        second: f64,
    },
}

/// Failures running an external learning tool.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with status {status}: {stderr}")]
    Failed {
        program: String,
        status: i32,
        stderr: String,
    },

    #[error("tool I/O error: {0}")]
    Io(#[from] std::io::Error),
}
