pub mod orchestrator;

pub use orchestrator::RecoveryOrchestrator;

use crate::exec::report::summarize;
use crate::exec::result::ExecutionResult;
use crate::llm::client::LLMError;
use crate::prompt::PromptError;
use std::fmt;
use thiserror::Error;

/// Reasons a recovery dialogue could not help
///
/// These are logged and swallowed; they never replace the original failure.
#[derive(Debug, Error)]
pub enum RecoveryError {
    #[error("text generation failed: {0}")]
    Generator(#[from] LLMError),

    #[error("could not parse options from the response")]
    UnparseableOptions,

    #[error("prompt failed: {0}")]
    Prompt(#[from] PromptError),
}

/// One candidate fix proposed in the first recovery phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionOption {
    pub title: String,
    pub description: String,
    pub full_text: String,
}

/// What the generator needs to know to propose replacement commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryContext {
    pub failed_command: String,
    pub error_message: String,
    pub chosen_solution: Option<String>,
}

impl RecoveryContext {
    pub fn new(failed_command: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            failed_command: failed_command.into(),
            error_message: error_message.into(),
            chosen_solution: None,
        }
    }

    pub fn with_solution(mut self, solution: impl Into<String>) -> Self {
        self.chosen_solution = Some(solution.into());
        self
    }
}

/// How a recovery dialogue ended
#[derive(Debug)]
pub enum RecoveryOutcome {
    /// Replacement commands were run (or previewed)
    Executed(Vec<ExecutionResult>),
    /// The user backed out of the dialogue
    Cancelled,
    /// The generator's answer held no git commands
    NoCommands,
    Unavailable(RecoveryError),
}

impl fmt::Display for RecoveryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryOutcome::Executed(results) => {
                write!(f, "executed fix: {}", summarize(results))
            }
            RecoveryOutcome::Cancelled => f.write_str("cancelled by user"),
            RecoveryOutcome::NoCommands => f.write_str("no executable commands found"),
            RecoveryOutcome::Unavailable(e) => write!(f, "unavailable: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_with_solution() {
        let context = RecoveryContext::new("git push", "rejected").with_solution("Pull first");

        assert_eq!(context.failed_command, "git push");
        assert_eq!(context.chosen_solution.as_deref(), Some("Pull first"));
    }

    #[test]
    fn test_outcome_display() {
        let outcome = RecoveryOutcome::Executed(vec![ExecutionResult::succeeded("git pull")]);
        assert_eq!(
            outcome.to_string(),
            "executed fix: 1 succeeded, 0 failed, 0 cancelled, 0 skipped"
        );

        let outcome = RecoveryOutcome::Unavailable(RecoveryError::UnparseableOptions);
        assert_eq!(
            outcome.to_string(),
            "unavailable: could not parse options from the response"
        );
    }
}
