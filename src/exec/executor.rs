use crate::audit::AuditLogger;
use crate::exec::result::{ExecutionResult, Outcome};
use crate::exec::spawn::ProcessSpawner;
use crate::prompt::Prompter;
use crate::recovery::RecoveryOrchestrator;
use crate::security::DangerClassifier;
use std::time::Duration;

/// Pause between commands in automatic mode so tools can flush output
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(300);

/// Runs commands under an execution mode, with danger confirmation and
/// optional recovery after failures.
///
/// The single-command path lives in `runner`, the batch loop in `batch`.
/// An executor holds no per-batch state, so batches never affect each other.
pub struct Executor {
    pub(crate) spawner: Box<dyn ProcessSpawner>,
    pub(crate) prompter: Box<dyn Prompter>,
    pub(crate) classifier: DangerClassifier,
    pub(crate) recovery: Option<RecoveryOrchestrator>,
    audit: Option<AuditLogger>,
    pub(crate) step_delay: Duration,
}

impl Executor {
    /// Create an executor without recovery or audit logging
    pub fn new(spawner: Box<dyn ProcessSpawner>, prompter: Box<dyn Prompter>) -> Self {
        Self {
            spawner,
            prompter,
            classifier: DangerClassifier::new(),
            recovery: None,
            audit: None,
            step_delay: DEFAULT_STEP_DELAY,
        }
    }

    /// Enable recovery dialogues after failed commands
    pub fn with_recovery(mut self, orchestrator: RecoveryOrchestrator) -> Self {
        self.recovery = Some(orchestrator);
        self
    }

    pub fn with_audit_logger(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    pub fn prompter(&self) -> &dyn Prompter {
        self.prompter.as_ref()
    }

    /// Append a result to the audit trail; previews are not recorded
    pub(crate) fn record(&self, result: &ExecutionResult, from_recovery: bool) {
        if matches!(result.outcome, Outcome::PreviewedOnly) {
            return;
        }

        if let Some(audit) = &self.audit
            && let Err(e) = audit.log_result(result, from_recovery)
        {
            tracing::warn!("Failed to write audit log: {}", e);
        }
    }

    pub(crate) fn record_recovery(&self, failed_command: &str, outcome: &str) {
        if let Some(audit) = &self.audit
            && let Err(e) = audit.log_recovery(failed_command, outcome)
        {
            tracing::warn!("Failed to write audit log: {}", e);
        }
    }
}
