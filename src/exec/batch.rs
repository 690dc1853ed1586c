use crate::exec::executor::Executor;
use crate::exec::result::{ExecutionMode, ExecutionResult};
use crate::ui::console;
use std::thread;

/// Per-command choice in step-confirm mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepChoice {
    Execute,
    Skip,
    Quit,
}

impl StepChoice {
    const ALL: [StepChoice; 3] = [StepChoice::Execute, StepChoice::Skip, StepChoice::Quit];

    fn label(&self) -> &'static str {
        match self {
            StepChoice::Execute => "Execute",
            StepChoice::Skip => "Skip",
            StepChoice::Quit => "Quit",
        }
    }
}

impl Executor {
    /// Run a batch with recovery allowed for failed commands
    pub fn run_batch(&self, commands: &[String], mode: ExecutionMode) -> Vec<ExecutionResult> {
        self.run_batch_with(commands, mode, false)
    }

    /// Run a batch, one command at a time and in order.
    ///
    /// Results line up with `commands` but may stop short: commands after a
    /// halt have no result. `suppress_recovery` is passed to every command.
    pub fn run_batch_with(
        &self,
        commands: &[String],
        mode: ExecutionMode,
        suppress_recovery: bool,
    ) -> Vec<ExecutionResult> {
        tracing::debug!(%mode, count = commands.len(), suppress_recovery, "Running batch");

        match mode {
            ExecutionMode::Preview => {
                console::preview_list(commands);
                commands.iter().map(ExecutionResult::previewed).collect()
            }
            ExecutionMode::Automatic => self.run_automatic(commands, suppress_recovery),
            ExecutionMode::StepConfirm => self.run_step_confirm(commands, suppress_recovery),
        }
    }

    fn run_automatic(&self, commands: &[String], suppress_recovery: bool) -> Vec<ExecutionResult> {
        let mut results = Vec::with_capacity(commands.len());

        for (index, command) in commands.iter().enumerate() {
            console::command_header(index, commands.len(), command);

            let result = self.run_command(command, ExecutionMode::Automatic, suppress_recovery);
            let halt = result.halts_batch();
            results.push(result);

            if halt {
                tracing::info!(
                    "Stopping batch at command {} of {}",
                    index + 1,
                    commands.len()
                );
                break;
            }

            if index + 1 < commands.len() && !self.step_delay.is_zero() {
                thread::sleep(self.step_delay);
            }
        }

        results
    }

    fn run_step_confirm(&self, commands: &[String], suppress_recovery: bool) -> Vec<ExecutionResult> {
        let mut results = Vec::with_capacity(commands.len());

        for (index, command) in commands.iter().enumerate() {
            console::command_header(index, commands.len(), command);

            match self.ask_step() {
                StepChoice::Quit => {
                    tracing::info!("Batch quit before command {}", index + 1);
                    break;
                }
                StepChoice::Skip => {
                    let result = ExecutionResult::skipped(command);
                    console::outcome_line(&result);
                    self.record(&result, suppress_recovery);
                    results.push(result);
                }
                StepChoice::Execute => {
                    let result =
                        self.run_command(command, ExecutionMode::StepConfirm, suppress_recovery);
                    let failed = result.is_failure();
                    results.push(result);

                    let remaining = index + 1 < commands.len();
                    if failed && remaining && !self.confirm_continue() {
                        break;
                    }
                }
            }
        }

        results
    }

    /// An unanswerable prompt counts as Quit
    fn ask_step(&self) -> StepChoice {
        let items: Vec<String> = StepChoice::ALL
            .iter()
            .map(|choice| choice.label().to_string())
            .collect();

        match self.prompter.select("Run this command?", &items, 0) {
            Ok(index) => StepChoice::ALL.get(index).copied().unwrap_or(StepChoice::Quit),
            Err(e) => {
                tracing::warn!("Step prompt failed, quitting batch: {}", e);
                StepChoice::Quit
            }
        }
    }

    fn confirm_continue(&self) -> bool {
        match self.prompter.confirm("The command failed. Continue with the remaining commands?", false) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("Continue prompt failed, stopping batch: {}", e);
                false
            }
        }
    }
}
