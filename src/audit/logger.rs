use crate::exec::result::ExecutionResult;
use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024; // 10MB

/// Append-only record of every command the engine handled
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a new AuditLogger with the default log path
    pub fn new() -> std::io::Result<Self> {
        Self::with_path(Self::default_log_path()?)
    }

    /// Create an AuditLogger with a custom log path
    pub fn with_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let log_path = path.as_ref().to_path_buf();

        // Ensure directory exists
        if let Some(parent) = log_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(Self { log_path })
    }

    /// Get the default log path: ~/.config/gitmate/history.log
    fn default_log_path() -> std::io::Result<PathBuf> {
        let home = std::env::var("HOME").map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "HOME environment variable not set",
            )
        })?;

        Ok(PathBuf::from(home)
            .join(".config")
            .join("gitmate")
            .join("history.log"))
    }

    /// Log the outcome of one command
    ///
    /// Recovery-spawned commands are tagged so the trail shows which
    /// commands were proposed as fixes.
    pub fn log_result(&self, result: &ExecutionResult, from_recovery: bool) -> std::io::Result<()> {
        let origin = if from_recovery { "recovery" } else { "batch" };
        let mut entry = format!(
            "[{}] [{}] {}",
            result.outcome.kind(),
            origin,
            result.command
        );

        if let Some(message) = result.error_message() {
            entry.push_str(&format!(" error=\"{}\"", single_line(&message)));
        }

        self.append(&entry)
    }

    /// Log how a recovery dialogue for `failed_command` ended
    pub fn log_recovery(&self, failed_command: &str, outcome: &str) -> std::io::Result<()> {
        let entry = format!(
            "[RECOVERY] failed=\"{}\" outcome=\"{}\"",
            failed_command,
            single_line(outcome)
        );
        self.append(&entry)
    }

    fn append(&self, entry: &str) -> std::io::Result<()> {
        // Check and rotate log if needed
        self.rotate_if_needed()?;

        let timestamp = Utc::now().to_rfc3339();
        let user = std::env::var("USER").unwrap_or_else(|_| "unknown".to_string());
        let cwd = std::env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "?".to_string());

        let line = format!("[{}] [{}] [{}] {}\n", timestamp, user, cwd, entry);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        file.write_all(line.as_bytes())?;
        file.flush()?;

        Ok(())
    }

    /// Rotate log file if it exceeds MAX_LOG_SIZE
    fn rotate_if_needed(&self) -> std::io::Result<()> {
        if !self.log_path.exists() {
            return Ok(());
        }

        let metadata = fs::metadata(&self.log_path)?;
        if metadata.len() > MAX_LOG_SIZE {
            // Rotate: history.log -> history.log.1
            let backup_path = self.log_path.with_extension("log.1");
            fs::rename(&self.log_path, backup_path)?;
        }

        Ok(())
    }

    /// Get the path to the log file
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

fn single_line(text: &str) -> String {
    text.replace('\n', " | ")
}
