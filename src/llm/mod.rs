pub mod anthropic;
pub mod client;
pub mod parser;
pub mod prompts;
pub mod translator;

pub use anthropic::AnthropicClient;
pub use client::{LLMError, TextGenerator};
pub use parser::{extract_git_commands, parse_solution_options};
pub use translator::{TranslationError, Translator};
