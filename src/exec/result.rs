use crate::error::CommandError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a batch of commands is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutionMode {
    /// Show the commands, never spawn anything
    Preview,
    /// Run every command in order, stopping at the first failure
    Automatic,
    /// Ask before each command whether to execute, skip or quit
    StepConfirm,
}

impl ExecutionMode {
    pub const ALL: [ExecutionMode; 3] = [
        ExecutionMode::Automatic,
        ExecutionMode::StepConfirm,
        ExecutionMode::Preview,
    ];

    /// Label used in mode selection menus
    pub fn label(&self) -> &'static str {
        match self {
            ExecutionMode::Preview => "Preview only (don't run anything)",
            ExecutionMode::Automatic => "Run all commands automatically",
            ExecutionMode::StepConfirm => "Confirm each command step by step",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExecutionMode::Preview => "preview",
            ExecutionMode::Automatic => "automatic",
            ExecutionMode::StepConfirm => "step-confirm",
        };
        f.write_str(name)
    }
}

impl FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "preview" | "dry-run" => Ok(ExecutionMode::Preview),
            "automatic" | "auto" => Ok(ExecutionMode::Automatic),
            "step-confirm" | "step" | "interactive" => Ok(ExecutionMode::StepConfirm),
            other => Err(format!(
                "Unknown execution mode '{}'. Expected preview, automatic or step-confirm",
                other
            )),
        }
    }
}

/// Outcome of one command; exactly one per result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed(CommandError),
    /// The user declined the danger confirmation
    Cancelled,
    /// The user skipped the command in step-confirm mode
    Skipped,
    /// Preview mode, nothing was spawned
    PreviewedOnly,
}

impl Outcome {
    /// Stable lowercase name, used in logs and the audit trail
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Succeeded => "succeeded",
            Outcome::Failed(_) => "failed",
            Outcome::Cancelled => "cancelled",
            Outcome::Skipped => "skipped",
            Outcome::PreviewedOnly => "previewed",
        }
    }
}

/// Result of handling a single command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub command: String,
    pub outcome: Outcome,
}

impl ExecutionResult {
    pub fn new(command: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            command: command.into(),
            outcome,
        }
    }

    pub fn succeeded(command: impl Into<String>) -> Self {
        Self::new(command, Outcome::Succeeded)
    }

    pub fn failed(command: impl Into<String>, error: CommandError) -> Self {
        Self::new(command, Outcome::Failed(error))
    }

    pub fn cancelled(command: impl Into<String>) -> Self {
        Self::new(command, Outcome::Cancelled)
    }

    pub fn skipped(command: impl Into<String>) -> Self {
        Self::new(command, Outcome::Skipped)
    }

    pub fn previewed(command: impl Into<String>) -> Self {
        Self::new(command, Outcome::PreviewedOnly)
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Succeeded)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, Outcome::Failed(_))
    }

    /// Whether an automatic batch must stop after this result
    pub fn halts_batch(&self) -> bool {
        matches!(self.outcome, Outcome::Failed(_) | Outcome::Cancelled)
    }

    /// Diagnostic message of a failed result
    pub fn error_message(&self) -> Option<String> {
        match &self.outcome {
            Outcome::Failed(err) => Some(err.to_string()),
            _ => None,
        }
    }
}
