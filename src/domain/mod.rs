// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits that define the core
// concepts of the partitioner:
//
//   Entry / Corpus  — one document reference per input line
//   LabelGroups     — entries bucketed by label
//   Split           — the train/test output pair
//   errors          — the typed failure taxonomy
//   traits          — the seams other layers implement
//
// Rules for this layer:
//   - NO file I/O or process spawning
//   - NO clap or tracing-subscriber types
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A single corpus line and the corpus that holds them
pub mod entry;

// Label groups, the split result and its statistics
pub mod split;

// Typed errors for partitioning, metric parsing and tool runs
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
