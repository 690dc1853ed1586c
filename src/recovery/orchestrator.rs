use crate::exec::executor::Executor;
use crate::exec::result::ExecutionMode;
use crate::llm::client::TextGenerator;
use crate::llm::parser::{extract_git_commands, parse_solution_options};
use crate::llm::prompts::{recovery_commands_prompt, recovery_options_prompt};
use crate::prompt::Prompter;
use crate::recovery::{RecoveryContext, RecoveryError, RecoveryOutcome, SolutionOption};
use crate::ui::console;
use tokio::runtime::Handle;

const FREE_TEXT_LABEL: &str = "Describe a fix myself";
const CANCEL_LABEL: &str = "Cancel";

enum SolutionChoice {
    Option(usize),
    FreeText,
    Cancel,
}

/// Drives the two-phase fix dialogue after a command fails.
///
/// Phase one asks the generator for three general directions, phase two
/// turns the one the user picks into concrete commands and runs them with
/// recovery suppressed, so a failing fix never opens another dialogue.
pub struct RecoveryOrchestrator {
    generator: Box<dyn TextGenerator>,
    runtime: Handle,
}

impl RecoveryOrchestrator {
    /// `runtime` drives the async generator; `recover` must not be called
    /// from inside that runtime's async context.
    pub fn new(generator: Box<dyn TextGenerator>, runtime: Handle) -> Self {
        Self { generator, runtime }
    }

    /// Run the dialogue for one failure. Never fails: problems end the
    /// dialogue as `RecoveryOutcome::Unavailable`.
    pub fn recover(&self, executor: &Executor, context: &RecoveryContext) -> RecoveryOutcome {
        console::notice("Looking for ways to fix this...");

        match self.run_dialogue(executor, context) {
            Ok(outcome) => outcome,
            Err(e) => {
                console::warning(&format!("Recovery unavailable: {}", e));
                RecoveryOutcome::Unavailable(e)
            }
        }
    }

    fn run_dialogue(
        &self,
        executor: &Executor,
        context: &RecoveryContext,
    ) -> Result<RecoveryOutcome, RecoveryError> {
        let prompter = executor.prompter();

        // Phase 1: option discovery
        let response = self.generate(&recovery_options_prompt(
            &context.failed_command,
            &context.error_message,
        ))?;
        let options = parse_solution_options(&response);
        if options.is_empty() {
            tracing::debug!(response = %response, "No numbered options in response");
            return Err(RecoveryError::UnparseableOptions);
        }
        console::solution_options(&options);

        // Phase 2: selection and concretization
        let solution = match Self::choose_solution(prompter, &options)? {
            SolutionChoice::Option(index) => options[index].full_text.clone(),
            SolutionChoice::FreeText => prompter.input("Describe how to fix it")?,
            SolutionChoice::Cancel => return Ok(RecoveryOutcome::Cancelled),
        };
        let context = context.clone().with_solution(solution);

        let response = self.generate(&recovery_commands_prompt(
            &context.failed_command,
            &context.error_message,
            context.chosen_solution.as_deref().unwrap_or_default(),
        ))?;
        let commands = extract_git_commands(&response);
        if commands.is_empty() {
            console::notice("No executable commands found in the suggestion.");
            return Ok(RecoveryOutcome::NoCommands);
        }

        console::command_list("Proposed fix:", &commands);
        let Some(mode) = Self::choose_mode(prompter)? else {
            return Ok(RecoveryOutcome::Cancelled);
        };

        let results = executor.run_batch_with(&commands, mode, true);
        Ok(RecoveryOutcome::Executed(results))
    }

    fn generate(&self, prompt: &str) -> Result<String, RecoveryError> {
        let response = self.runtime.block_on(self.generator.generate(prompt))?;
        Ok(response)
    }

    fn choose_solution(
        prompter: &dyn Prompter,
        options: &[SolutionOption],
    ) -> Result<SolutionChoice, RecoveryError> {
        let mut items: Vec<String> = options.iter().map(|option| option.title.clone()).collect();
        items.push(FREE_TEXT_LABEL.to_string());
        items.push(CANCEL_LABEL.to_string());

        let index = prompter.select("How do you want to fix it?", &items, 0)?;

        Ok(match index {
            i if i < options.len() => SolutionChoice::Option(i),
            i if i == options.len() => SolutionChoice::FreeText,
            _ => SolutionChoice::Cancel,
        })
    }

    /// `None` when the user cancels
    fn choose_mode(prompter: &dyn Prompter) -> Result<Option<ExecutionMode>, RecoveryError> {
        let mut items: Vec<String> = ExecutionMode::ALL
            .iter()
            .map(|mode| mode.label().to_string())
            .collect();
        items.push(CANCEL_LABEL.to_string());

        let index = prompter.select("How should the fix run?", &items, 0)?;
        Ok(ExecutionMode::ALL.get(index).copied())
    }
}
