use crate::error::CommandError;
use crate::error_translation::ErrorTranslator;
use crate::exec::report::Summary;
use crate::exec::result::{ExecutionResult, Outcome};
use crate::recovery::SolutionOption;
use crate::security::DangerousOp;
use crossterm::style::Stylize;

/// Header printed before a command runs
pub fn command_header(index: usize, total: usize, command: &str) {
    println!();
    println!(
        "{} {}",
        format!("[{}/{}]", index + 1, total).dark_grey(),
        command.bold()
    );
}

/// Numbered listing of a command batch under a heading
pub fn command_list(heading: &str, commands: &[String]) {
    println!("{}", heading.cyan().bold());
    for (i, command) in commands.iter().enumerate() {
        println!("  {} {}", format!("{}.", i + 1).dark_grey(), command);
    }
}

pub fn preview_list(commands: &[String]) {
    command_list("Commands (preview, nothing will run):", commands);
}

pub fn danger_warning(command: &str, op: DangerousOp) {
    println!(
        "{} {} {}",
        "⚠".yellow().bold(),
        command.bold(),
        format!("({})", op.description()).yellow()
    );
}

/// One-line outcome of a command, with a hint for failures
pub fn outcome_line(result: &ExecutionResult) {
    match &result.outcome {
        Outcome::Succeeded => println!("{} {}", "✓".green().bold(), result.command),
        Outcome::Failed(err) => {
            println!("{} {}", "✗".red().bold(), result.command);
            failure_hint(err);
        }
        Outcome::Cancelled => println!("{} {} (cancelled)", "-".yellow(), result.command),
        Outcome::Skipped => println!("{} {} (skipped)", "»".dark_grey(), result.command),
        Outcome::PreviewedOnly => println!("{} {}", "·".cyan(), result.command),
    }
}

fn failure_hint(err: &CommandError) {
    let friendly = ErrorTranslator::translate(err);
    println!("  {}", friendly.simple_message.as_str().red());
    if let Some(suggestion) = friendly.suggestion {
        println!("  {} {}", "hint:".dark_grey(), suggestion);
    }
}

pub fn solution_options(options: &[SolutionOption]) {
    println!("{}", "Possible fixes:".cyan().bold());
    for (i, option) in options.iter().enumerate() {
        println!("  {} {}", format!("{}.", i + 1).bold(), option.title.as_str().bold());
        if option.description != option.title {
            println!("     {}", option.description.as_str().dark_grey());
        }
    }
}

pub fn summary(summary: &Summary) {
    let line = summary.to_string();
    if summary.has_failures() {
        println!("\n{}", line.red());
    } else {
        println!("\n{}", line.green());
    }
}

pub fn notice(message: &str) {
    println!("{}", message.cyan());
}

pub fn warning(message: &str) {
    println!("{} {}", "!".yellow().bold(), message);
}
