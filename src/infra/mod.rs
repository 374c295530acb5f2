// ============================================================
// Layer 5 — Infrastructure Layer
// ============================================================
// The glue around the partitioner:
//
//   experiment_config.rs — immutable key/value configs and the
//                          JSON grids that enumerate them
//
//   external_tool.rs     — runs an external learner once per
//                          config and captures its output
//
//   metrics.rs           — parses acc/p/r/f1 out of a trainer's
//                          stdout and appends results to CSV
//
// None of this is needed to partition a corpus; the data layer
// never imports from here.

/// Experiment configuration files and grids
pub mod experiment_config;

/// External learning tool invocation
pub mod external_tool;

/// Trainer output parsing and results CSV logger
pub mod metrics;
