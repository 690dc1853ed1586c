use crate::llm::client::{LLMError, TextGenerator};
use crate::llm::parser::extract_git_commands;
use crate::llm::prompts::command_generation_prompt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("LLM error: {0}")]
    LLMError(#[from] LLMError),

    #[error("Empty request")]
    EmptyRequest,

    #[error("No git commands found in response: {0}")]
    NoCommands(String),
}

/// Turns a natural-language request into an ordered command list
pub struct Translator {
    client: Box<dyn TextGenerator>,
}

impl Translator {
    pub fn new(client: Box<dyn TextGenerator>) -> Self {
        Self { client }
    }

    pub async fn translate(&self, request: &str) -> Result<Vec<String>, TranslationError> {
        let request = request.trim();
        if request.is_empty() {
            return Err(TranslationError::EmptyRequest);
        }

        let response = self
            .client
            .generate(&command_generation_prompt(request))
            .await?;

        let commands = extract_git_commands(&response);
        if commands.is_empty() {
            return Err(TranslationError::NoCommands(response.trim().to_string()));
        }

        tracing::debug!("Translated request into {} command(s)", commands.len());
        Ok(commands)
    }
}
