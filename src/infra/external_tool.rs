// ============================================================
// Layer 5 — External Tool Runner
// ============================================================
// Runs a separately-installed learner (feature extractor,
// linear trainer, topic model) once per generated config.
//
// A CommandTool is a command template. Every `{config}` in the
// arguments is replaced by the config file's path; if no
// argument mentions it, the path is appended as the last
// argument:
//
//   learn {config}            → learn runs/n-2.config
//   svm-train -v 5            → svm-train -v 5 runs/n-2.config
//
// stdout and stderr are captured. A non-zero exit status is a
// ToolError::Failed carrying the tool's stderr.
//
// Reference: std::process::Command documentation

use std::path::Path;
use std::process::Command;

use crate::domain::error::ToolError;
use crate::domain::traits::{ExternalTool, ToolOutput};

const CONFIG_PLACEHOLDER: &str = "{config}";

/// An external program described by a command template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTool {
    program: String,
    args: Vec<String>,
}

impl CommandTool {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Split `[program, args...]`; None if the slice is empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }

    /// Arguments with the config path substituted in.
    pub fn arguments_for(&self, config_path: &Path) -> Vec<String> {
        let config = config_path.display().to_string();
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|a| a.replace(CONFIG_PLACEHOLDER, &config))
            .collect();
        if !self.args.iter().any(|a| a.contains(CONFIG_PLACEHOLDER)) {
            args.push(config);
        }
        args
    }
}

impl ExternalTool for CommandTool {
    fn name(&self) -> &str {
        &self.program
    }

    fn run(&self, config_path: &Path) -> Result<ToolOutput, ToolError> {
        let args = self.arguments_for(config_path);
        tracing::debug!("Running {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| ToolError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(ToolError::Failed {
                program: self.program.clone(),
                // None when killed by a signal
                status: output.status.code().unwrap_or(-1),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(ToolOutput { stdout, stderr })
    }
}
