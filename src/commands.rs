use crate::cli::Cli;
use crate::common::CommonParams;
use crate::config::Config;
use crate::error::AppError;
use crate::messages;
use crate::paraphrase::{ParaphraseService, is_significantly_different};
use crate::types::{ParaphraseRequest, ParaphraseResponse, TargetLength};
use crate::ui;
use crate::{log_debug, trace_error};
use anyhow::{Result, anyhow};
use clap::{CommandFactory, crate_version};
use clap_complete::Shell;
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Width used when wrapping the rewrite for display
const DISPLAY_WIDTH: usize = 80;

/// Handle the default rewrite action: one-shot when a description is given,
/// otherwise an interactive session
pub async fn handle_rewrite(
    common: &CommonParams,
    description: Option<String>,
    length: Option<TargetLength>,
) -> Result<()> {
    let mut config = Config::load()?;
    common.apply_to_config(&mut config);
    config.validate()?;

    let service = ParaphraseService::new(config)?;

    match description {
        Some(text) => {
            run_paraphrase(&service, text, length).await?;
            Ok(())
        }
        None => run_interactive(&service, length).await,
    }
}

/// Run one paraphrase call with a spinner and print the result
async fn run_paraphrase(
    service: &ParaphraseService,
    description: String,
    length: Option<TargetLength>,
) -> Result<ParaphraseResponse, AppError> {
    let mut request = ParaphraseRequest::new(description);
    request.target_length = length;

    let waiting = messages::get_waiting_message();
    let spinner = ui::create_spinner(
        &waiting
            .text
            .truecolor(waiting.color.0, waiting.color.1, waiting.color.2)
            .to_string(),
    );
    let result = service.paraphrase(&request).await;
    spinner.finish_and_clear();

    let response = result?;
    display_response(&response);
    Ok(response)
}

fn display_response(response: &ParaphraseResponse) {
    ui::print_newline();
    ui::print_bordered_content(&textwrap::fill(&response.paraphrased, DISPLAY_WIDTH));
    if let Some(tokens) = response.tokens_used {
        let usage = format!("{tokens} tokens used");
        ui::print_message(&usage.dimmed().to_string());
    }
    if !is_significantly_different(&response.original, &response.paraphrased) {
        ui::print_warning("The rewrite stays very close to the original wording.");
    }
}

/// Interactive read-loop: one description per line, one API call per entry.
/// Only a rejected credential ends the session; every other failure lets the
/// user try again.
async fn run_interactive(
    service: &ParaphraseService,
    length: Option<TargetLength>,
) -> Result<()> {
    ui::print_message(&ui::create_gradient_text(&format!(
        "🪶 Resay {}",
        crate_version!()
    )));
    ui::print_message("Paste a product description and press Enter. Type 'exit' or 'quit' to leave.");
    ui::print_newline();

    let stdin = io::stdin();
    loop {
        print!("{} ", "❯".truecolor(128, 255, 234).bold());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        match run_paraphrase(service, input.to_string(), length).await {
            Ok(_) => ui::print_newline(),
            Err(err) if err.is_fatal() => {
                trace_error!(target: "resay::session", "aborting session: {err}");
                ui::print_error(&format!("{err}"));
                ui::print_info("Check your GEMINI_API_KEY and restart the session.");
                return Err(anyhow!(err));
            }
            Err(err @ AppError::RateLimit { .. }) => {
                ui::print_error(&format!("{err}"));
                ui::print_info("Wait a moment and try again.");
            }
            Err(err) => {
                ui::print_error(&format!("{err}"));
                ui::print_info("Adjust the description and try again.");
            }
        }
    }

    ui::print_message("Goodbye!");
    Ok(())
}

/// Handle the `Config` command
pub fn handle_config(common: &CommonParams, api_key: Option<String>) -> Result<()> {
    let changes_requested = api_key.is_some()
        || common.model.is_some()
        || common.max_tokens.is_some()
        || common.temperature.is_some();

    if changes_requested {
        let mut config = Config::load_file(Config::config_path().as_deref())?;
        if let Some(key) = api_key {
            config.api_key = key;
        }
        common.apply_to_config(&mut config);
        config.save()?;
        ui::print_success("Configuration saved.");
        return Ok(());
    }

    let config = Config::load()?;
    log_debug!("Displaying configuration: {:?}", config);

    ui::print_info("Current configuration:");
    ui::print_message(&format!("  API key: {}", config.masked_api_key()));
    ui::print_message(&format!("  Model: {}", config.model));
    ui::print_message(&format!(
        "  Max tokens: {}",
        config
            .max_tokens
            .map_or_else(|| "default".to_string(), |v| v.to_string())
    ));
    ui::print_message(&format!(
        "  Temperature: {}",
        config
            .temperature
            .map_or_else(|| "default".to_string(), |v| v.to_string())
    ));
    ui::print_message(&format!("  Environment: {}", config.environment));
    ui::print_message(&format!("  Log level: {}", config.log_level));

    match config.validate() {
        Ok(()) => ui::print_success("Configuration is valid."),
        Err(err) => ui::print_warning(&format!("{err}")),
    }

    Ok(())
}

/// Handle the `Completions` command
pub fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "resay", &mut io::stdout());
}
