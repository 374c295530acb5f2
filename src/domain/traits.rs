// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The seams between layers:
//   - CorpusSource   → where entries come from (a list file,
//                      or in-memory lines in tests)
//   - LabelExtractor → how an entry's label is derived
//   - ExternalTool   → a separately-invoked learner whose
//                      stdout we parse
//
// The partitioner only ever sees these traits, so it has no
// dependency on process invocation and can be tested with
// in-memory fakes.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use std::path::Path;

use crate::domain::entry::{Corpus, Entry};
use crate::domain::error::{PartitionError, ToolError};

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Any component that can produce a corpus of entries.
///
/// Implementations:
///   - CorpusLoader → reads a line-delimited list file
pub trait CorpusSource {
    /// Load every entry. An empty corpus is an error.
    fn load(&self) -> Result<Corpus, PartitionError>;
}

// ─── LabelExtractor ───────────────────────────────────────────────────────────
/// Maps an entry to exactly one label, or fails.
///
/// Implementations:
///   - LabelScheme (parent segment, candidate set, leading token)
pub trait LabelExtractor {
    fn label_of(&self, entry: &Entry) -> Result<String, PartitionError>;
}

// ─── ExternalTool ─────────────────────────────────────────────────────────────
/// Captured result of one external tool run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// A learner or feature extractor run as a separate program.
///
/// Implementations:
///   - CommandTool → spawns a process from a command template
pub trait ExternalTool {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Run the tool against one generated config file.
    /// A non-zero exit is an error; stdout is returned for parsing.
    fn run(&self, config_path: &Path) -> Result<ToolOutput, ToolError>;
}
