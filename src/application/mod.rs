// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers for one command:
//
//   partition_use_case  — load, label, split and write a corpus
//   experiment_use_case — expand a config grid and run an
//                         external tool over it
//
// No printing here (that's Layer 1) and no parsing of CLI
// arguments; use cases take plain config structs.

// Stratified and even corpus splitting
pub mod partition_use_case;

// Config grid generation and external tool runs
pub mod experiment_use_case;
