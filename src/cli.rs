use crate::commands;
use crate::common::{CommonParams, target_length_parser};
use crate::log_debug;
use crate::types::TargetLength;
use crate::ui;
use anyhow::anyhow;
use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand, crate_version};
use clap_complete::Shell;
use colored::Colorize;

const LOG_FILE: &str = "resay-debug.log";

/// CLI structure defining the available commands and global arguments
#[derive(Parser)]
#[command(
    author,
    version = crate_version!(),
    about = "Resay: AI-powered product description simplifier",
    long_about = "Resay rewrites product descriptions in simple, clear language using the Gemini API, preserving the meaning of the original copy.",
    disable_version_flag = true,
    after_help = get_dynamic_help(),
    styles = get_styles(),
)]
pub struct Cli {
    /// Subcommands available for the CLI
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Product description to rewrite
    #[arg(help = "Product description to rewrite; omit to start an interactive session")]
    pub description: Option<String>,

    #[command(flatten)]
    pub common: CommonParams,

    /// Relative length of the rewrite
    #[arg(
        short = 'L',
        long = "length",
        help = "Relative length of the rewrite (short, medium, long)",
        value_parser = target_length_parser
    )]
    pub length: Option<TargetLength>,

    /// Log debug messages to a file
    #[arg(
        short = 'l',
        long = "log",
        global = true,
        help = "Log debug messages to a file"
    )]
    pub log: bool,

    /// Specify a custom log file path
    #[arg(
        long = "log-file",
        global = true,
        help = "Specify a custom log file path"
    )]
    pub log_file: Option<String>,

    /// Suppress non-essential output (spinners, banners, etc.)
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress non-essential output"
    )]
    pub quiet: bool,

    /// Display the version
    #[arg(
        short = 'v',
        long = "version",
        global = true,
        help = "Display the version"
    )]
    pub version: bool,
}

/// Enumeration of available subcommands
#[derive(Subcommand)]
#[command(subcommand_negates_reqs = true)]
#[command(subcommand_precedence_over_arg = true)]
pub enum Commands {
    /// Show or update the stored configuration
    #[command(
        about = "Show or update Resay settings",
        long_about = "Show the effective configuration, or persist new values to the config file. Environment variables always take precedence at run time."
    )]
    Config {
        #[command(flatten)]
        common: CommonParams,

        /// Store an API key in the config file
        #[arg(long, help = "Store an API key in the config file")]
        api_key: Option<String>,
    },

    /// Generate shell completion scripts
    #[command(about = "Generate shell completion scripts")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum, help = "Shell to generate completions for")]
        shell: Shell,
    },
}

/// Define custom styles for Clap
fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Magenta.on_default().bold())
        .usage(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Green.on_default().bold())
        .placeholder(AnsiColor::Yellow.on_default())
        .valid(AnsiColor::Blue.on_default().bold())
        .invalid(AnsiColor::Red.on_default().bold())
        .error(AnsiColor::Red.on_default().bold())
}

/// Parse the command-line arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Generate dynamic help including available target lengths
fn get_dynamic_help() -> String {
    let lengths_list = TargetLength::all_names()
        .iter()
        .map(|name| format!("{}", name.bold()))
        .collect::<Vec<_>>()
        .join(" • ");

    format!(
        "\nTarget lengths: {lengths_list}\n\nSet {} with your Gemini API key before first use.",
        "GEMINI_API_KEY".bold()
    )
}

/// Main function to parse arguments and handle the command
pub async fn main() -> anyhow::Result<()> {
    let cli = parse_args();

    if cli.version {
        ui::print_version(crate_version!());
        return Ok(());
    }

    crate::logger::init().map_err(|e| anyhow!("failed to initialize logging: {e}"))?;

    if cli.log {
        crate::logger::enable_logging();
        let log_file = cli.log_file.as_deref().unwrap_or(LOG_FILE);
        crate::logger::set_log_file(log_file)?;

        // Load config to check for verbose logging settings
        if let Ok(config) = crate::config::Config::load() {
            let verbose = matches!(config.log_level.as_str(), "debug" | "trace");
            crate::logger::set_verbose_logging(verbose);
        }
    } else {
        crate::logger::disable_logging();
    }

    // Set quiet mode in the UI module
    if cli.quiet {
        ui::set_quiet_mode(true);
    }

    match cli.command {
        Some(Commands::Config { common, api_key }) => commands::handle_config(&common, api_key),
        Some(Commands::Completions { shell }) => {
            commands::handle_completions(shell);
            Ok(())
        }
        None => {
            log_debug!(
                "Handling rewrite with description={}, length={:?}",
                cli.description.is_some(),
                cli.length
            );
            commands::handle_rewrite(&cli.common, cli.description, cli.length).await
        }
    }
}
