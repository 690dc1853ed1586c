use crate::error::{AppError, CommandError};

/// Plain-language explanation of a failure, with the raw text preserved
#[derive(Debug, Clone)]
pub struct UserFriendlyError {
    pub simple_message: String,
    pub suggestion: Option<String>,
    pub raw_error: String,
}

pub struct ErrorTranslator;

impl ErrorTranslator {
    /// Translate an AppError into a user-friendly error message
    pub fn translate_app_error(error: &AppError) -> UserFriendlyError {
        match error {
            AppError::Command(cmd_err) => Self::translate(cmd_err),
            AppError::Config(config_err) => UserFriendlyError {
                simple_message: "Configuration error occurred.".to_string(),
                suggestion: Some("Check your config file at ~/.config/gitmate/config.toml".to_string()),
                raw_error: config_err.to_string(),
            },
            AppError::Llm(llm_err) => UserFriendlyError {
                simple_message: "Error communicating with the LLM.".to_string(),
                suggestion: Some("Check your API key and network connection".to_string()),
                raw_error: llm_err.to_string(),
            },
            AppError::Translation(trans_err) => UserFriendlyError {
                simple_message: "Could not turn your request into commands.".to_string(),
                suggestion: Some("Try rephrasing your request, or pass commands with --command".to_string()),
                raw_error: trans_err.to_string(),
            },
            AppError::Prompt(prompt_err) => UserFriendlyError {
                simple_message: "Could not read your answer from the terminal.".to_string(),
                suggestion: Some("Run gitmate in an interactive terminal or pass --mode".to_string()),
                raw_error: prompt_err.to_string(),
            },
            AppError::Recovery(rec_err) => UserFriendlyError {
                simple_message: "Automatic recovery was not available.".to_string(),
                suggestion: None,
                raw_error: rec_err.to_string(),
            },
            AppError::Io(io_err) => UserFriendlyError {
                simple_message: "I/O error occurred.".to_string(),
                suggestion: Some("Check file permissions and disk space".to_string()),
                raw_error: io_err.to_string(),
            },
        }
    }

    /// Translate a command failure into a user-friendly error message
    pub fn translate(error: &CommandError) -> UserFriendlyError {
        match error {
            CommandError::Spawn { program, .. } => UserFriendlyError {
                simple_message: format!("Could not start '{}'.", program),
                suggestion: Some(format!("Make sure '{}' is installed and on your PATH.", program)),
                raw_error: error.to_string(),
            },
            _ => Self::translate_text(&error.to_string()),
        }
    }

    /// Translate raw error text (usually a tool's stderr)
    pub fn translate_text(error_text: &str) -> UserFriendlyError {
        let (simple_message, suggestion) = Self::match_error_patterns(error_text);

        UserFriendlyError {
            simple_message,
            suggestion,
            raw_error: error_text.to_string(),
        }
    }

    fn match_error_patterns(error_text: &str) -> (String, Option<String>) {
        let lower = error_text.to_lowercase();

        match HINTS.iter().find(|hint| hint.matches(&lower)) {
            Some(hint) => (
                hint.message.to_string(),
                hint.suggestion.map(str::to_string),
            ),
            None => (error_text.to_string(), None),
        }
    }
}

/// A known failure text and what to tell the user about it
struct Hint {
    /// Lowercase fragments; any one of them identifies the failure
    needles: &'static [&'static str],
    message: &'static str,
    suggestion: Option<&'static str>,
}

impl Hint {
    fn matches(&self, lower: &str) -> bool {
        self.needles.iter().any(|needle| lower.contains(needle))
    }
}

/// Checked in order, first match wins
const HINTS: &[Hint] = &[
    Hint {
        needles: &["has no upstream branch", "does not have an upstream"],
        message: "This branch is not tracking a remote branch yet.",
        suggestion: Some("Push with tracking: git push -u origin <branch>"),
    },
    Hint {
        needles: &["conflict"],
        message: "Git stopped on conflicting changes.",
        suggestion: Some("Resolve the conflicted files, stage them with git add, then continue."),
    },
    Hint {
        needles: &["non-fast-forward", "(fetch first)", "have diverged"],
        message: "The remote branch has commits you don't have locally.",
        suggestion: Some("Integrate them first: git pull --rebase"),
    },
    Hint {
        needles: &["did not match any file"],
        message: "No file or branch matches that name.",
        suggestion: Some("Check the spelling; git status and git branch -a list what exists."),
    },
    Hint {
        needles: &["not a git repository"],
        message: "This directory is not inside a git repository.",
        suggestion: Some("Change into your project directory, or create one with git init."),
    },
    Hint {
        needles: &["already exists"],
        message: "Something with that name already exists.",
        suggestion: Some("Pick another name or remove the existing one first."),
    },
    Hint {
        needles: &["authentication failed", "permission denied", "could not read username"],
        message: "The remote rejected your credentials.",
        suggestion: Some("Check your SSH key or access token."),
    },
    Hint {
        needles: &["could not resolve host", "unable to access", "does not appear to be a git repository"],
        message: "The remote could not be reached.",
        suggestion: Some("Check the network and the remote URL (git remote -v)."),
    },
    Hint {
        needles: &["would be overwritten", "uncommitted changes"],
        message: "Your uncommitted changes are in the way.",
        suggestion: Some("Commit them or set them aside with git stash."),
    },
    Hint {
        needles: &["rebase in progress", "currently rebasing"],
        message: "A rebase is still in progress.",
        suggestion: Some("Finish it with git rebase --continue or undo it with git rebase --abort."),
    },
    Hint {
        needles: &["merge in progress", "not concluded your merge"],
        message: "A merge is still in progress.",
        suggestion: Some("Commit to finish it or undo it with git merge --abort."),
    },
    Hint {
        needles: &["nothing to commit", "no changes added to commit"],
        message: "There is nothing staged to commit.",
        suggestion: Some("Stage changes with git add <file> first."),
    },
];
