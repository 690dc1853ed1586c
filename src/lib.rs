pub mod audit;
pub mod config;
pub mod error;
pub mod error_translation;
pub mod exec;
pub mod llm;
pub mod prompt;
pub mod recovery;
pub mod security;
pub mod ui;

// Re-export commonly used types for convenience
pub use error::{AppError, AppResult, CommandError};
pub use exec::{ExecutionMode, ExecutionResult, Executor, Outcome, Summary, summarize, tokenize};
pub use recovery::{RecoveryContext, RecoveryOrchestrator, RecoveryOutcome, SolutionOption};
pub use security::is_dangerous;
