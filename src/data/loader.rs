// ============================================================
// Layer 4 — Corpus Loader
// ============================================================
// Reads a line-delimited corpus list: one document reference
// per line, e.g.
//
//   sports/doc001.txt
//   sports/doc002.txt
//   politics/doc001.txt
//
// Blank lines are skipped. Lines are kept as raw bytes, so a
// list written by an older tool in Latin-1 loads and its lines
// reach train.txt / test.txt unchanged.
//
// A missing or unreadable file is CorpusNotFound. A file with
// no entries is EmptyCorpus. In both cases nothing downstream
// runs, so no output file is created.
//
// Reference: Rust Book §12 (Reading a File)

use std::{fs, path::PathBuf};

use crate::domain::entry::Corpus;
use crate::domain::error::PartitionError;
use crate::domain::traits::CorpusSource;

/// Loads a corpus list file from disk.
/// Implements the CorpusSource trait from Layer 3.
pub struct CorpusLoader {
    path: PathBuf,
}

impl CorpusLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CorpusSource for CorpusLoader {
    fn load(&self) -> Result<Corpus, PartitionError> {
        let bytes = fs::read(&self.path).map_err(|source| PartitionError::CorpusNotFound {
            path: self.path.clone(),
            source,
        })?;

        let corpus = Corpus::from_bytes(&self.path, &bytes);

        if corpus.is_empty() {
            return Err(PartitionError::EmptyCorpus {
                path: self.path.clone(),
            });
        }

        tracing::info!(
            "Loaded {} entries from '{}'",
            corpus.len(),
            self.path.display()
        );
        Ok(corpus)
    }
}
