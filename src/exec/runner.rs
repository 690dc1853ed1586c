use crate::error::CommandError;
use crate::exec::executor::Executor;
use crate::exec::result::{ExecutionMode, ExecutionResult, Outcome};
use crate::exec::tokenizer::tokenize;
use crate::recovery::{RecoveryContext, RecoveryOutcome};
use crate::ui::console;

const DANGER_QUESTION: &str = "This command is potentially destructive. Run it anyway?";

impl Executor {
    /// Handle a single command.
    ///
    /// Dangerous commands are confirmed first, even in preview mode. A failed
    /// command starts a recovery dialogue unless `suppress_recovery` is set or
    /// recovery is disabled; recovery never changes the returned result.
    pub fn run_command(
        &self,
        command: &str,
        mode: ExecutionMode,
        suppress_recovery: bool,
    ) -> ExecutionResult {
        let result = self.execute_command(command, mode);

        console::outcome_line(&result);
        self.record(&result, suppress_recovery);

        if let Outcome::Failed(err) = &result.outcome
            && !suppress_recovery
        {
            self.start_recovery(command, err);
        }

        result
    }

    fn execute_command(&self, command: &str, mode: ExecutionMode) -> ExecutionResult {
        if let Some(op) = self.classifier.classify(command) {
            console::danger_warning(command, op);
            if !self.confirm_dangerous(command) {
                tracing::info!(command = %command, "Dangerous command declined");
                return ExecutionResult::cancelled(command);
            }
        }

        match mode {
            ExecutionMode::Preview => return ExecutionResult::previewed(command),
            ExecutionMode::Automatic | ExecutionMode::StepConfirm => {}
        }

        let tokens = tokenize(command);
        let Some((program, args)) = tokens.split_first() else {
            return ExecutionResult::failed(command, CommandError::EmptyCommand);
        };

        tracing::debug!(program = %program, args = ?args, "Spawning command");

        match self.spawner.spawn(program, args) {
            Ok(outcome) if outcome.success => ExecutionResult::succeeded(command),
            Ok(outcome) => ExecutionResult::failed(
                command,
                CommandError::NonZeroExit {
                    command: command.to_string(),
                    code: outcome.exit_code,
                    stderr: outcome.stderr,
                },
            ),
            Err(e) => ExecutionResult::failed(
                command,
                CommandError::Spawn {
                    program: program.clone(),
                    message: e.to_string(),
                },
            ),
        }
    }

    /// An unanswerable prompt counts as "no"
    fn confirm_dangerous(&self, command: &str) -> bool {
        match self.prompter.confirm(DANGER_QUESTION, false) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(command = %command, "Danger confirmation failed, treating as declined: {}", e);
                false
            }
        }
    }

    fn start_recovery(&self, command: &str, err: &CommandError) {
        let Some(recovery) = &self.recovery else {
            return;
        };

        let context = RecoveryContext::new(command, err.to_string());
        let outcome = recovery.recover(self, &context);

        match &outcome {
            RecoveryOutcome::Unavailable(e) => {
                tracing::warn!(command = %command, "Recovery unavailable: {}", e);
            }
            other => tracing::info!(command = %command, "Recovery finished: {}", other),
        }
        self.record_recovery(command, &outcome.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::spawn::{ProcessSpawner, SpawnOutcome};
    use crate::prompt::{PromptError, Prompter};
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Calls(Arc<Mutex<Vec<(String, Vec<String>)>>>);

    struct FakeSpawner {
        calls: Calls,
        outcome: fn(&str) -> io::Result<SpawnOutcome>,
    }

    impl ProcessSpawner for FakeSpawner {
        fn spawn(&self, program: &str, args: &[String]) -> io::Result<SpawnOutcome> {
            self.calls
                .0
                .lock()
                .unwrap()
                .push((program.to_string(), args.to_vec()));
            (self.outcome)(program)
        }
    }

    struct FixedConfirm(Option<bool>);

    impl Prompter for FixedConfirm {
        fn confirm(&self, question: &str, _default: bool) -> Result<bool, PromptError> {
            self.0.ok_or_else(|| PromptError::NoAnswer(question.to_string()))
        }

        fn select(&self, question: &str, _items: &[String], _default: usize) -> Result<usize, PromptError> {
            Err(PromptError::NoAnswer(question.to_string()))
        }

        fn input(&self, question: &str) -> Result<String, PromptError> {
            Err(PromptError::NoAnswer(question.to_string()))
        }
    }

    fn build_executor(confirm: Option<bool>, outcome: fn(&str) -> io::Result<SpawnOutcome>) -> (Executor, Calls) {
        let calls = Calls::default();
        let spawner = FakeSpawner {
            calls: calls.clone(),
            outcome,
        };
        (Executor::new(Box::new(spawner), Box::new(FixedConfirm(confirm))), calls)
    }

    fn ok(_: &str) -> io::Result<SpawnOutcome> {
        Ok(SpawnOutcome::success())
    }

    fn exit_one(_: &str) -> io::Result<SpawnOutcome> {
        Ok(SpawnOutcome::failure(1, "fatal: bad revision"))
    }

    fn not_found(_: &str) -> io::Result<SpawnOutcome> {
        Err(io::Error::new(io::ErrorKind::NotFound, "program not found"))
    }

    #[test]
    fn test_success_passes_tokens_to_spawner() {
        let (executor, calls) = build_executor(None, ok);
        let result = executor.run_command(r#"git commit -m "fix: a b""#, ExecutionMode::Automatic, false);

        assert_eq!(result.outcome, Outcome::Succeeded);
        let calls = calls.0.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "git");
        assert_eq!(calls[0].1, vec!["commit", "-m", "fix: a b"]);
    }

    #[test]
    fn test_non_zero_exit_is_failed_with_message() {
        let (executor, _calls) = build_executor(None, exit_one);
        let result = executor.run_command("git show nope", ExecutionMode::Automatic, false);

        assert!(result.is_failure());
        let message = result.error_message().unwrap();
        assert!(message.contains("exit code 1"));
        assert!(message.contains("fatal: bad revision"));
    }

    #[test]
    fn test_spawn_error_is_failed() {
        let (executor, _calls) = build_executor(None, not_found);
        let result = executor.run_command("gti status", ExecutionMode::StepConfirm, false);

        match result.outcome {
            Outcome::Failed(CommandError::Spawn { program, message }) => {
                assert_eq!(program, "gti");
                assert!(message.contains("program not found"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_empty_command_never_spawns() {
        let (executor, calls) = build_executor(None, ok);
        let result = executor.run_command("   ", ExecutionMode::Automatic, false);

        assert_eq!(result.outcome, Outcome::Failed(CommandError::EmptyCommand));
        assert!(calls.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_declined_danger_is_cancelled() {
        let (executor, calls) = build_executor(Some(false), ok);
        let result = executor.run_command("git reset --hard HEAD~1", ExecutionMode::Automatic, false);

        assert_eq!(result.outcome, Outcome::Cancelled);
        assert!(calls.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unanswered_danger_prompt_is_cancelled() {
        let (executor, calls) = build_executor(None, ok);
        let result = executor.run_command("git push --force", ExecutionMode::Automatic, false);

        assert_eq!(result.outcome, Outcome::Cancelled);
        assert!(calls.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_accepted_danger_runs() {
        let (executor, calls) = build_executor(Some(true), ok);
        let result = executor.run_command("git clean -fd", ExecutionMode::Automatic, false);

        assert_eq!(result.outcome, Outcome::Succeeded);
        assert_eq!(calls.0.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_preview_confirms_danger_but_never_spawns() {
        let (executor, calls) = build_executor(Some(true), ok);
        let result = executor.run_command("git branch -D old", ExecutionMode::Preview, false);
        assert_eq!(result.outcome, Outcome::PreviewedOnly);

        let (executor, _) = build_executor(Some(false), ok);
        let result = executor.run_command("git branch -D old", ExecutionMode::Preview, false);
        assert_eq!(result.outcome, Outcome::Cancelled);

        assert!(calls.0.lock().unwrap().is_empty());
    }
}
