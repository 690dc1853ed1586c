use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Prompt interaction failed: {0}")]
    Interaction(#[from] dialoguer::Error),

    #[error("No answer available for: {0}")]
    NoAnswer(String),

    #[error("Empty choice list for: {0}")]
    NoChoices(String),
}

/// Blocking user interaction used by the execution engine
///
/// Every call blocks until the user answers.
pub trait Prompter {
    /// Ask a yes/no question
    fn confirm(&self, question: &str, default: bool) -> Result<bool, PromptError>;

    /// Pick one entry of `items`, returning its index
    fn select(&self, question: &str, items: &[String], default: usize) -> Result<usize, PromptError>;

    /// Read a non-empty line of free text
    fn input(&self, question: &str) -> Result<String, PromptError>;
}

/// Terminal prompts rendered with dialoguer
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, question: &str, default: bool) -> Result<bool, PromptError> {
        let answer = Confirm::with_theme(&self.theme)
            .with_prompt(question)
            .default(default)
            .interact()?;
        Ok(answer)
    }

    fn select(&self, question: &str, items: &[String], default: usize) -> Result<usize, PromptError> {
        if items.is_empty() {
            return Err(PromptError::NoChoices(question.to_string()));
        }

        let index = Select::with_theme(&self.theme)
            .with_prompt(question)
            .items(items)
            .default(default.min(items.len() - 1))
            .interact()?;
        Ok(index)
    }

    fn input(&self, question: &str) -> Result<String, PromptError> {
        let text: String = Input::with_theme(&self.theme)
            .with_prompt(question)
            .validate_with(|value: &String| -> Result<(), &str> {
                if value.trim().is_empty() {
                    Err("Please enter some text")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;
        Ok(text.trim().to_string())
    }
}
