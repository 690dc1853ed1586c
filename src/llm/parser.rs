//! Parsers for free-text generator responses.
//!
//! Both parsers are line based and never fail: lines that do not match the
//! grammar are ignored, so an unusable response yields an empty list.

use crate::recovery::SolutionOption;
use regex::Regex;
use std::sync::OnceLock;

/// Fallback titles are cut to this many characters
const TITLE_LIMIT: usize = 40;

/// A `title: description` split is only trusted for titles up to this length
const MAX_SPLIT_TITLE: usize = 60;

/// `N. text`
static OPTION_LINE: OnceLock<Regex> = OnceLock::new();

/// `title: description`, with optional markdown bold around the title. The
/// colon must be followed by whitespace so `https://` never splits a line.
static TITLE_SPLIT: OnceLock<Regex> = OnceLock::new();

/// A git invocation at the start of a line, optionally after a list marker,
/// a `$ ` prompt or up to three backticks
static GIT_LINE: OnceLock<Regex> = OnceLock::new();

fn option_line() -> &'static Regex {
    OPTION_LINE.get_or_init(|| Regex::new(r"^\s*\d+\.\s*(.+)$").expect("option pattern must compile"))
}

fn title_split() -> &'static Regex {
    TITLE_SPLIT.get_or_init(|| {
        Regex::new(r"^\*{0,2}([^:*][^:]*?)\*{0,2}\s*:\s+(.+)$").expect("title pattern must compile")
    })
}

fn git_line() -> &'static Regex {
    GIT_LINE.get_or_init(|| {
        Regex::new(r"^\s*(?:[-*]\s+|\d+\.\s+|\$\s+)?`{0,3}\s*(git\s+[^\n`]+)")
            .expect("git command pattern must compile")
    })
}

/// Extract numbered remediation options from a response.
///
/// Every line of the form `N. text` becomes one option. When `text` splits
/// as `title: description` both parts are used; otherwise the title is a
/// shortened copy of the text and the description is the whole text.
pub fn parse_solution_options(response: &str) -> Vec<SolutionOption> {
    response
        .lines()
        .filter_map(|line| option_line().captures(line))
        .filter_map(|caps| {
            let text = caps[1].trim();
            if text.is_empty() {
                return None;
            }
            Some(build_option(text))
        })
        .collect()
}

fn build_option(text: &str) -> SolutionOption {
    if let Some(caps) = title_split().captures(text) {
        let title = caps[1].trim();
        let description = caps[2].trim();
        if !title.is_empty() && title.chars().count() <= MAX_SPLIT_TITLE && !description.is_empty() {
            return SolutionOption {
                title: title.to_string(),
                description: description.to_string(),
                full_text: text.to_string(),
            };
        }
    }

    SolutionOption {
        title: truncate_title(text),
        description: text.to_string(),
        full_text: text.to_string(),
    }
}

/// Shorten `text` to the title limit, adding an ellipsis when cut
pub fn truncate_title(text: &str) -> String {
    if text.chars().count() <= TITLE_LIMIT {
        return text.to_string();
    }

    let mut title: String = text.chars().take(TITLE_LIMIT).collect();
    title.push_str("...");
    title
}

/// Extract git command lines from a response, in order of appearance.
///
/// Fences, inline backticks and surrounding whitespace are stripped; prose
/// lines are ignored.
pub fn extract_git_commands(response: &str) -> Vec<String> {
    response
        .lines()
        .filter_map(|line| git_line().captures(line))
        .map(|caps| caps[1].trim().trim_end_matches('\r').trim().to_string())
        .filter(|command| !command.is_empty())
        .collect()
}
