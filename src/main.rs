use anyhow::Result;
use clap::{Parser, Subcommand};

use tripsplit::cli::{
    handle_config_command, handle_expense_command, handle_init_command, handle_member_command,
    handle_settle_command, ConfigArgs, ExpenseCommands, MemberCommands, SettleArgs,
};
use tripsplit::config::{paths::TripPaths, settings::Settings};
use tripsplit::logging::init_logging;
use tripsplit::storage::Storage;

#[derive(Parser)]
#[command(
    name = "tripsplit",
    version,
    about = "Settle up shared expenses after a group trip",
    long_about = "tripsplit records who paid for what during a trip, in either of \
                  two currencies, and works out who should pay whom so that \
                  everyone ends up even."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new trip
    Init,

    /// Show current configuration and paths
    Config(ConfigArgs),

    /// Roster management commands
    #[command(subcommand)]
    Member(MemberCommands),

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Compute who pays whom
    Settle(SettleArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = TripPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    init_logging(&settings.log_level);

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            handle_init_command(&paths, &storage, &settings)?;
        }
        Some(Commands::Config(args)) => {
            handle_config_command(&paths, &mut settings, args)?;
        }
        Some(Commands::Member(cmd)) => {
            handle_member_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Settle(args)) => {
            handle_settle_command(&storage, &settings, args)?;
        }
        None => {
            println!("tripsplit - settle up shared trip expenses");
            println!();
            println!("Run 'tripsplit --help' for usage information.");
            println!("Run 'tripsplit init' to start a new trip.");
        }
    }

    Ok(())
}
