use std::io;
use thiserror::Error;

// Import module-level errors for AppError
use crate::config::settings::ConfigError;
use crate::llm::client::LLMError;
use crate::llm::translator::TranslationError;
use crate::prompt::PromptError;
use crate::recovery::RecoveryError;

/// Reasons a single command ends up `Failed`
///
/// The `Display` output is the diagnostic message carried verbatim by the
/// failed result and handed to recovery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Failed to start '{program}': {message}")]
    Spawn { program: String, message: String },

    #[error("{}", exit_message(.command, .code, .stderr))]
    NonZeroExit {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Empty command")]
    EmptyCommand,
}

impl CommandError {
    /// Exit code reported by the process, if it ran and exited normally
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            CommandError::NonZeroExit { code, .. } => *code,
            _ => None,
        }
    }
}

fn exit_message(command: &str, code: &Option<i32>, stderr: &str) -> String {
    let status = match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    };

    if stderr.trim().is_empty() {
        format!("Command '{}' failed with {}", command, status)
    } else {
        format!("Command '{}' failed with {}: {}", command, status, stderr.trim())
    }
}

/// Top-level application error that wraps all module-specific errors
///
/// The engine itself never returns these for a command outcome; they cover
/// setup and the outer CLI flow.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("LLM error: {0}")]
    Llm(#[from] LLMError),

    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),

    #[error("Recovery error: {0}")]
    Recovery(#[from] RecoveryError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for application-level operations
pub type AppResult<T> = std::result::Result<T, AppError>;
