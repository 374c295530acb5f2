// ============================================================
// Layer 2 — ExperimentUseCase
// ============================================================
// Drives a grid of experiments through an external tool:
//
//   for each config in grid.expand():
//       write <out_dir>/<name>.config
//       run the tool on it
//       keep its stdout as <out_dir>/<name>.out
//       parse acc/p/r/f1 and append a row to results.csv
//
// Runs are sequential. A failing run (tool error or output we
// cannot parse) is logged and recorded in the summary; the
// remaining runs still go ahead.
//
// The tool is a trait object seam, so tests drive this with a
// fake instead of spawning processes.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::domain::traits::ExternalTool;
use crate::infra::{
    experiment_config::{ExperimentConfig, ExperimentGrid},
    metrics::{MetricReport, MetricsLogger},
};

/// Where the grid comes from and where its artifacts go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentPlan {
    pub grid_path: PathBuf,
    pub out_dir: PathBuf,
}

/// Outcome of one experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResult {
    pub name: String,
    pub report: Option<MetricReport>,
    pub error: Option<String>,
}

/// Outcome of a whole grid run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentSummary {
    pub results: Vec<ExperimentResult>,
}

impl ExperimentSummary {
    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| r.error.is_some()).count()
    }

    pub fn succeeded(&self) -> usize {
        self.results.len() - self.failed()
    }
}

/// Expand a grid file and write every config, without running anything.
pub fn write_grid(plan: &ExperimentPlan) -> Result<Vec<PathBuf>> {
    let grid = ExperimentGrid::load(&plan.grid_path)?;
    let configs = grid.expand()?;
    tracing::info!(
        "Writing {} configs from '{}'",
        configs.len(),
        plan.grid_path.display()
    );
    configs.iter().map(|c| c.write_to(&plan.out_dir)).collect()
}

pub struct ExperimentUseCase<'t> {
    plan: ExperimentPlan,
    tool: &'t dyn ExternalTool,
}

impl<'t> ExperimentUseCase<'t> {
    pub fn new(plan: ExperimentPlan, tool: &'t dyn ExternalTool) -> Self {
        Self { plan, tool }
    }

    pub fn execute(&self) -> Result<ExperimentSummary> {
        let grid = ExperimentGrid::load(&self.plan.grid_path)?;
        let configs = grid.expand()?;
        let logger = MetricsLogger::new(&self.plan.out_dir)?;

        tracing::info!(
            "Running {} experiments with '{}'",
            configs.len(),
            self.tool.name()
        );

        let mut summary = ExperimentSummary::default();
        for (i, config) in configs.iter().enumerate() {
            tracing::info!("[{}/{}] {}", i + 1, configs.len(), config.name());

            let result = match self.run_one(config) {
                Ok(report) => {
                    logger.log(config.name(), &report)?;
                    tracing::info!(
                        "{}: acc={:.4} p={:.4} r={:.4} f1={:.4}",
                        config.name(),
                        report.accuracy,
                        report.precision,
                        report.recall,
                        report.f1
                    );
                    ExperimentResult {
                        name: config.name().to_string(),
                        report: Some(report),
                        error: None,
                    }
                }
                Err(e) => {
                    tracing::warn!("{} failed: {:#}", config.name(), e);
                    ExperimentResult {
                        name: config.name().to_string(),
                        report: None,
                        error: Some(format!("{e:#}")),
                    }
                }
            };
            summary.results.push(result);
        }

        tracing::info!(
            "Finished: {} succeeded, {} failed; results in '{}'",
            summary.succeeded(),
            summary.failed(),
            logger.csv_path().display()
        );
        Ok(summary)
    }

    fn run_one(&self, config: &ExperimentConfig) -> Result<MetricReport> {
        let config_path = config.write_to(&self.plan.out_dir)?;

        let output = self
            .tool
            .run(&config_path)
            .with_context(|| format!("Tool '{}' failed on '{}'", self.tool.name(), config.name()))?;

        if !output.stderr.trim().is_empty() {
            tracing::debug!("{} stderr: {}", config.name(), output.stderr.trim());
        }

        let out_path = self.plan.out_dir.join(format!("{}.out", config.name()));
        fs::write(&out_path, &output.stdout)
            .with_context(|| format!("Cannot write tool output '{}'", out_path.display()))?;

        MetricReport::parse(&output.stdout)
            .with_context(|| format!("Unexpected output from '{}'", config.name()))
    }
}
