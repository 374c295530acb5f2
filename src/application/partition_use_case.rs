// ============================================================
// Layer 2 — PartitionUseCase
// ============================================================
// Orchestrates one partition run:
//
//   Step 1: Resolve the seed           (explicit or random)
//   Step 2: Load the corpus list       (Layer 4 - data)
//   Step 3: Label, group and split     (Layer 4 - data)
//   Step 4: Write train/test files     (Layer 4 - data)
//   Step 5: Write the manifest         (optional)
//
// Every label is resolved before any file is opened, so a bad
// entry or an empty corpus leaves the output directory as it
// was.
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::data::{
    labels::LabelScheme,
    loader::CorpusLoader,
    splitter::{partition, split_halves},
    writer::{write_split, SplitPaths},
};
use crate::domain::split::{PartitionStats, SplitCounts};
use crate::domain::traits::CorpusSource;

// ─── Partition Configuration ─────────────────────────────────────────────────
/// How the corpus is cut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    /// Per-label train/test counts
    Stratified {
        scheme: LabelScheme,
        counts: SplitCounts,
    },
    /// Whole corpus shuffled and halved, labels ignored
    Halves,
}

/// Everything a partition run needs. Serialisable so the
/// manifest records exactly what produced a split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionConfig {
    pub corpus_path: PathBuf,
    /// Defaults to the corpus's directory
    pub out_dir: Option<PathBuf>,
    /// `<prefix>-train.txt` instead of `train.txt`
    pub prefix: Option<String>,
    pub seed: Option<u64>,
    pub write_manifest: bool,
    pub mode: SplitMode,
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionOutcome {
    pub seed: u64,
    pub train_file: PathBuf,
    pub test_file: PathBuf,
    pub train_count: usize,
    pub test_count: usize,
    /// Per-label breakdown; None for an even split
    pub stats: Option<PartitionStats>,
    pub manifest: Option<PathBuf>,
}

#[derive(Serialize)]
struct Manifest<'a> {
    config: &'a PartitionConfig,
    outcome: &'a PartitionOutcome,
}

// ─── PartitionUseCase ─────────────────────────────────────────────────────────
pub struct PartitionUseCase {
    config: PartitionConfig,
}

impl PartitionUseCase {
    pub fn new(config: PartitionConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<PartitionOutcome> {
        let cfg = &self.config;

        // ── Step 1: Seed ──────────────────────────────────────────────────────
        // Always logged so an unseeded run can be replayed with --seed
        let seed = cfg.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        tracing::info!("Partitioning '{}' with seed {}", cfg.corpus_path.display(), seed);

        // ── Step 2: Load ──────────────────────────────────────────────────────
        let corpus = CorpusLoader::new(&cfg.corpus_path).load()?;

        // ── Step 3: Split ─────────────────────────────────────────────────────
        let (split, stats) = match &cfg.mode {
            SplitMode::Stratified { scheme, counts } => {
                let (split, stats) = partition(&corpus, scheme, *counts, &mut rng)?;
                for s in &stats.labels {
                    tracing::info!(
                        "Label '{}': {} available, {} train, {} test, {} dropped",
                        s.label,
                        s.available,
                        s.train,
                        s.test,
                        s.dropped
                    );
                }
                (split, Some(stats))
            }
            SplitMode::Halves => (split_halves(&corpus, &mut rng)?, None),
        };

        // ── Step 4: Write ─────────────────────────────────────────────────────
        let out_dir = cfg
            .out_dir
            .clone()
            .unwrap_or_else(|| corpus.directory().to_path_buf());
        let paths = SplitPaths::new(&out_dir, cfg.prefix.as_deref());
        write_split(&split, &paths)?;

        let mut outcome = PartitionOutcome {
            seed,
            train_file: paths.train,
            test_file: paths.test,
            train_count: split.train.len(),
            test_count: split.test.len(),
            stats,
            manifest: None,
        };

        // ── Step 5: Manifest ──────────────────────────────────────────────────
        if cfg.write_manifest {
            let name = match &cfg.prefix {
                Some(p) => format!("{p}-split_manifest.json"),
                None => "split_manifest.json".to_string(),
            };
            let path = out_dir.join(name);
            outcome.manifest = Some(path.clone());

            let json = serde_json::to_string_pretty(&Manifest {
                config: cfg,
                outcome: &outcome,
            })?;
            fs::write(&path, json)
                .with_context(|| format!("Cannot write manifest '{}'", path.display()))?;
            tracing::debug!("Saved split manifest to '{}'", path.display());
        }

        Ok(outcome)
    }
}
