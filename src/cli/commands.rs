// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the subcommands and their flags:
//
//   partition <corpus> <train_count> [test_count]
//   halves    <corpus>
//   grid      <grid.json> --out-dir DIR
//   run       <grid.json> --out-dir DIR -- <tool> [args...]
//   metrics   <output-file | ->
//
// clap's derive macros generate help text, missing-argument
// errors and string → number conversion.
//
// Reference: Rust Book §12 (Building a CLI Program)

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::application::experiment_use_case::ExperimentPlan;
use crate::application::partition_use_case::{PartitionConfig, SplitMode};
use crate::data::labels::LabelScheme;
use crate::domain::split::SplitCounts;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a corpus into per-label train/test sets
    Partition(PartitionArgs),

    /// Shuffle a corpus and cut it into two equal halves
    Halves(HalvesArgs),

    /// Write one config file per combination in a grid
    Grid(GridArgs),

    /// Run an external tool over every config in a grid
    Run(RunArgs),

    /// Parse acc/p/r/f1 from a trainer's output
    Metrics(MetricsArgs),
}

/// How labels are read off each corpus line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemeArg {
    /// Parent path segment: `sports/doc1.txt` → sports
    Parent,
    /// Substring match against --labels
    Candidates,
    /// First whitespace token: `sports doc1.txt` → sports
    Prefix,
}

/// Output location flags shared by `partition` and `halves`
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Directory for the output files (default: the corpus's directory)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Name outputs <PREFIX>-train.txt / <PREFIX>-test.txt
    #[arg(long)]
    pub prefix: Option<String>,

    /// Seed for the shuffle; a random one is chosen and logged if omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Also write a JSON manifest with the config, seed and per-label counts
    #[arg(long)]
    pub manifest: bool,
}

#[derive(Args, Debug)]
pub struct PartitionArgs {
    /// Line-delimited corpus list, one document per line
    pub corpus: PathBuf,

    /// Entries per label for training
    pub train_count: usize,

    /// Entries per label for testing; omit or pass a negative
    /// number to take everything left after training
    #[arg(allow_negative_numbers = true)]
    pub test_count: Option<i64>,

    #[arg(long, value_enum, default_value_t = SchemeArg::Parent)]
    pub scheme: SchemeArg,

    /// Candidate labels for --scheme candidates (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub labels: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl PartitionArgs {
    fn label_scheme(&self) -> Result<LabelScheme> {
        Ok(match self.scheme {
            SchemeArg::Parent => LabelScheme::Parent,
            SchemeArg::Prefix => LabelScheme::Prefix,
            SchemeArg::Candidates => LabelScheme::candidates(self.labels.iter().cloned())?,
        })
    }
}

/// Convert CLI args into the application-layer PartitionConfig.
/// The application layer never sees clap types.
impl TryFrom<PartitionArgs> for PartitionConfig {
    type Error = anyhow::Error;

    fn try_from(a: PartitionArgs) -> Result<Self> {
        if a.scheme != SchemeArg::Candidates && !a.labels.is_empty() {
            tracing::warn!("--labels is ignored unless --scheme candidates is set");
        }
        let scheme = a.label_scheme()?;
        // Negative means "remainder"
        let test = a.test_count.and_then(|n| usize::try_from(n).ok());

        Ok(PartitionConfig {
            corpus_path: a.corpus,
            out_dir: a.output.out_dir,
            prefix: a.output.prefix,
            seed: a.output.seed,
            write_manifest: a.output.manifest,
            mode: SplitMode::Stratified {
                scheme,
                counts: SplitCounts::new(a.train_count, test),
            },
        })
    }
}

#[derive(Args, Debug)]
pub struct HalvesArgs {
    /// Line-delimited corpus list, one document per line
    pub corpus: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl From<HalvesArgs> for PartitionConfig {
    fn from(a: HalvesArgs) -> Self {
        PartitionConfig {
            corpus_path: a.corpus,
            out_dir: a.output.out_dir,
            prefix: a.output.prefix,
            seed: a.output.seed,
            write_manifest: a.output.manifest,
            mode: SplitMode::Halves,
        }
    }
}

#[derive(Args, Debug)]
pub struct GridArgs {
    /// JSON grid: { "base": {..}, "axes": [{ "key", "values" }] }
    pub grid: PathBuf,

    /// Directory for the generated .config files
    #[arg(long, default_value = "runs")]
    pub out_dir: PathBuf,
}

impl From<GridArgs> for ExperimentPlan {
    fn from(a: GridArgs) -> Self {
        ExperimentPlan {
            grid_path: a.grid,
            out_dir: a.out_dir,
        }
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub grid: GridArgs,

    /// Tool command; `{config}` is replaced by each config path,
    /// otherwise the path is appended
    #[arg(last = true, required = true)]
    pub command: Vec<String>,
}

#[derive(Args, Debug)]
pub struct MetricsArgs {
    /// File with the trainer's output, or `-` for stdin
    pub input: PathBuf,
}
