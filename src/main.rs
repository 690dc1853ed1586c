use clap::Parser;
use gitmate::audit::AuditLogger;
use gitmate::config::{Config, ConfigError};
use gitmate::error_translation::ErrorTranslator;
use gitmate::exec::{ExecutionMode, Executor, Summary, SystemSpawner, summarize};
use gitmate::llm::{AnthropicClient, Translator};
use gitmate::prompt::{Prompter, TerminalPrompter};
use gitmate::recovery::RecoveryOrchestrator;
use gitmate::ui::console;
use gitmate::AppResult;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "gitmate", version, about = "Turn plain-language requests into git commands and run them safely")]
struct Cli {
    /// How to run the commands: preview, automatic or step-confirm
    #[arg(short, long)]
    mode: Option<ExecutionMode>,

    /// Don't offer AI-assisted recovery when a command fails
    #[arg(long)]
    no_recovery: bool,

    /// Run this command instead of translating a request (repeatable)
    #[arg(short = 'c', long = "command", value_name = "CMD")]
    commands: Vec<String>,

    /// What you want to do, in plain language
    request: Vec<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gitmate=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(summary) if summary.has_failures() => ExitCode::from(1),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            let friendly = ErrorTranslator::translate_app_error(&e);
            eprintln!("Error: {}", friendly.simple_message);
            if let Some(suggestion) = friendly.suggestion {
                eprintln!("  {}", suggestion);
            }
            eprintln!("  ({})", friendly.raw_error);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> AppResult<Summary> {
    let config = Config::load_or_default()?;
    let runtime = Runtime::new()?;
    let prompter = TerminalPrompter::new();

    let api_key = config.get_api_key();
    let new_client = |key: &str| {
        AnthropicClient::with_options(key.to_string(), config.llm.model.clone(), config.llm_timeout())
    };

    let commands = if !cli.commands.is_empty() {
        cli.commands
    } else {
        let key = api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingApiKey(config.llm.api_key_env.clone()))?;
        let translator = Translator::new(Box::new(new_client(key)?));
        runtime.block_on(translator.translate(&cli.request.join(" ")))?
    };

    let mode = match cli.mode {
        Some(mode) => mode,
        None => {
            console::command_list("Proposed commands:", &commands);
            choose_mode(&prompter, config.execution.default_mode)?
        }
    };

    let spawner = SystemSpawner::new().with_capture_stderr(config.execution.capture_stderr);
    let mut executor =
        Executor::new(Box::new(spawner), Box::new(prompter)).with_step_delay(config.step_delay());

    if config.behavior.recovery_enabled && !cli.no_recovery {
        match api_key.as_deref() {
            Some(key) => {
                let orchestrator =
                    RecoveryOrchestrator::new(Box::new(new_client(key)?), runtime.handle().clone());
                executor = executor.with_recovery(orchestrator);
            }
            None => tracing::warn!(
                "No API key in ${}, recovery is disabled",
                config.llm.api_key_env
            ),
        }
    }

    if config.behavior.log_commands {
        match AuditLogger::new() {
            Ok(logger) => executor = executor.with_audit_logger(logger),
            Err(e) => tracing::warn!("Audit log unavailable: {}", e),
        }
    }

    let results = executor.run_batch(&commands, mode);
    let summary = summarize(&results);
    console::summary(&summary);

    Ok(summary)
}

fn choose_mode(prompter: &dyn Prompter, default: ExecutionMode) -> AppResult<ExecutionMode> {
    let items: Vec<String> = ExecutionMode::ALL
        .iter()
        .map(|mode| mode.label().to_string())
        .collect();
    let default_index = ExecutionMode::ALL
        .iter()
        .position(|mode| *mode == default)
        .unwrap_or(0);

    let index = prompter.select("How should these commands run?", &items, default_index)?;
    Ok(ExecutionMode::ALL
        .get(index)
        .copied()
        .unwrap_or(ExecutionMode::Preview))
}
