use crate::demo::{run_demo, DemoArgs};
use crate::quote::{run_check_config, run_quote, run_show_config, ConfigArgs, QuoteArgs};
use clap::{Parser, Subcommand};
use cleaning_quote::config::AppConfig;
use cleaning_quote::error::AppError;
use cleaning_quote::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Cleaning Quoter",
    about = "Estimate labor hours and quote prices for cleaning jobs from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Quote a single job from property attributes
    Quote(QuoteArgs),
    /// Inspect the administrator pricing configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Run an end-to-end demo against in-memory storage (default command)
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the active configuration as JSON
    Show(ConfigArgs),
    /// Check every stored configuration against the pricing invariants
    Check(ConfigArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(config.environment, &config.telemetry)?;

    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Quote(args) => run_quote(&config, args),
        Command::Config {
            command: ConfigCommand::Show(args),
        } => run_show_config(&config, args),
        Command::Config {
            command: ConfigCommand::Check(args),
        } => run_check_config(&config, args),
        Command::Demo(args) => run_demo(&config, args),
    }
}
