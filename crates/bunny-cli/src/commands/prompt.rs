//! Terminal prompts. Real prompts need the `interactive` feature.

use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

/// Ask a yes/no question. Refuses to guess when no terminal is attached.
pub fn confirm(
    output: &OutputManager,
    question: &str,
    default: bool,
    skip_flag: &'static str,
) -> CliResult<bool> {
    if !output.is_interactive() {
        return Err(CliError::MissingArgument {
            what: "confirmation",
            flag: skip_flag,
        });
    }
    ask_confirm(question, default)
}

/// Ask for a line of text; `default` is offered and used on empty input.
pub fn input(question: &str, default: Option<&str>, allow_empty: bool) -> CliResult<String> {
    ask_input(question, default, allow_empty)
}

#[cfg(feature = "interactive")]
fn ask_confirm(question: &str, default: bool) -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(question)
        .default(default)
        .interact()
        .map_err(prompt_failed)
}

#[cfg(feature = "interactive")]
fn ask_input(question: &str, default: Option<&str>, allow_empty: bool) -> CliResult<String> {
    let mut prompt = dialoguer::Input::<String>::new()
        .with_prompt(question)
        .allow_empty(allow_empty);
    if let Some(default) = default {
        prompt = prompt.default(default.to_owned());
    }
    prompt.interact_text().map_err(prompt_failed)
}

#[cfg(feature = "interactive")]
fn prompt_failed(err: dialoguer::Error) -> CliError {
    CliError::InvalidInput {
        message: format!("prompt failed: {err}"),
        source: Some(Box::new(err)),
    }
}

/// Without dialoguer: a plain `[Y/n]` read from stdin.
#[cfg(not(feature = "interactive"))]
fn ask_confirm(question: &str, default: bool) -> CliResult<bool> {
    use std::io::{self, Write};

    use crate::error::IntoCli;

    let hint = if default { "[Y/n]" } else { "[y/N]" };
    print!("{question} {hint} ");
    io::stdout()
        .flush()
        .with_cli_context(|| "failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .with_cli_context(|| "failed to read confirmation input")?;

    Ok(match line.trim().to_ascii_lowercase().as_str() {
        "" => default,
        answer => answer == "y" || answer == "yes",
    })
}

#[cfg(not(feature = "interactive"))]
fn ask_input(_question: &str, _default: Option<&str>, _allow_empty: bool) -> CliResult<String> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}
