use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reviewlens::cli::commands;
use reviewlens::cli::{CommandContext, OutputFormat};
use reviewlens::constants::delivery::DEFAULT_WAIT_SECS;
use reviewlens::types::Role;

/// Parse role from string
fn parse_role(s: &str) -> Result<Role, String> {
    s.parse()
}

/// Parse output format from string
fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse()
}

#[derive(Parser)]
#[command(name = "reviewlens")]
#[command(
    version,
    about = "Collect restaurant reviews, analyze them, and build an LLM prompt"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(long, short, help = "Use this config file instead of the layered config")]
    config: Option<PathBuf>,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive form loop (default)
    Interactive {
        #[arg(long, default_value_t = DEFAULT_WAIT_SECS, help = "Seconds to wait for a delivery")]
        wait: u64,
    },

    /// Run one analysis cycle and print the result
    Analyze {
        #[arg(long, short, help = "Restaurant name")]
        name: String,
        #[arg(
            long,
            short,
            default_value = "owner",
            value_parser = parse_role,
            help = "Prompt audience: owner (식당주인용), consumer (고객용)"
        )]
        role: Role,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            value_parser = parse_format,
            help = "Output format: text, json, yaml"
        )]
        format: OutputFormat,
        #[arg(long, help = "Send the prompt to the configured LLM delivery")]
        send: bool,
        #[arg(long, default_value_t = DEFAULT_WAIT_SECS, help = "Seconds to wait for a delivery")]
        wait: u64,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current effective configuration
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            value_parser = parse_format,
            help = "Output format: text (TOML), json, yaml"
        )]
        format: OutputFormat,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mreviewlens encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Default hook prints the backtrace when RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = cli.command.unwrap_or(Commands::Interactive {
        wait: DEFAULT_WAIT_SECS,
    });

    match command {
        Commands::Interactive { wait } => {
            let ctx = CommandContext::load(cli.config.as_deref(), cli.quiet)?;
            let rt = Runtime::new()?;
            rt.block_on(commands::interactive::run(&ctx, wait))?;
        }
        Commands::Analyze {
            name,
            role,
            format,
            send,
            wait,
        } => {
            let ctx = CommandContext::load(cli.config.as_deref(), cli.quiet)?;
            let rt = Runtime::new()?;
            rt.block_on(commands::analyze::run(&ctx, &name, role, format, send, wait))?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                commands::config::show(cli.config.as_deref(), format)?;
            }
            ConfigAction::Path => {
                commands::config::path()?;
            }
            ConfigAction::Init { global, force } => {
                if global {
                    commands::config::init_global(force)?;
                } else {
                    commands::config::init_project(force)?;
                }
            }
        },
    }

    Ok(())
}
