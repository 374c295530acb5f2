// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the corpus list on disk and the two
// split files:
//
//   corpus list file
//       │
//       ▼
//   CorpusLoader   → reads non-blank lines into a Corpus
//       │
//       ▼
//   LabelScheme    → resolves one label per entry
//       │
//       ▼
//   splitter       → groups, shuffles and slices per label
//       │
//       ▼
//   writer         → train.txt / test.txt
//
// Each module is responsible for exactly one step and is
// tested on its own.

/// Reads corpus list files
pub mod loader;

/// Label derivation schemes
pub mod labels;

/// Stratified and even train/test splitting
pub mod splitter;

/// Writes split results to disk
pub mod writer;
