use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use ratebot::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for ratebot::AppCommand {
    fn from(cmd: Commands) -> ratebot::AppCommand {
        match cmd {
            Commands::Serve => ratebot::AppCommand::Serve,
            Commands::Chat => ratebot::AppCommand::Chat,
            Commands::Rates { date, currency } => ratebot::AppCommand::Rates { date, currency },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Run the Telegram bot
    Serve,
    /// Chat with the bot in the terminal
    Chat,
    /// Print exchange rates for a date
    Rates {
        /// Date as dd.mm.yyyy or dd/mm/yyyy, defaults to today
        date: Option<String>,

        /// Show a single currency, e.g. USD
        #[arg(long)]
        currency: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => ratebot::cli::setup::setup().map(|path| {
            println!("Created default configuration at {}", path.display());
        }),
        Some(cmd) => ratebot::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
