use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use money_tracker::cli::{
    handle_account_command, handle_audit_command, handle_backup_command,
    handle_category_command, handle_config_command, handle_export_command,
    handle_filter_command, handle_summary_command, handle_transaction_command, AccountCommands,
    BackupCommands, CategoryCommands, ConfigCommands, ExportFormat, FilterCommands,
    SummaryCommands, TransactionCommands,
};
use money_tracker::config::{paths::TrackerPaths, settings::Settings};
use money_tracker::models::TransactionKind;
use money_tracker::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "money-tracker",
    version,
    about = "Command-line personal finance tracker",
    long_about = "money-tracker records income and expense transactions against your \
                  accounts and categories, and summarizes them by day, week, month or \
                  any date range. Data lives in a single JSON file; set \
                  MONEY_TRACKER_DATA_DIR to choose where."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Show transactions matching one criterion
    #[command(subcommand)]
    Filter(FilterCommands),

    /// Income, expense and net totals
    #[command(subcommand)]
    Summary(SummaryCommands),

    /// Backup management commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Export data as CSV or JSON
    Export {
        /// Export format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Create the data directory, default settings and categories
    Init,

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = TrackerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("money-tracker - personal finance from the command line");
            println!();
            println!("Run 'money-tracker --help' for usage information.");
            println!("Run 'money-tracker init' to get started.");
            return Ok(());
        }
    };

    match command {
        Commands::Init => {
            println!("Initializing money-tracker at: {}", paths.base_dir().display());
            if initialize_storage(&paths)? {
                println!("Initialization complete!");
            } else {
                println!("Already initialized; nothing changed.");
            }
            println!();
            println!("Default categories:");
            for kind in TransactionKind::ALL {
                let names = money_tracker::models::Category::defaults(kind);
                println!("  {:<8} {}", kind.as_str(), names.join(", "));
            }
            println!();
            println!("Next: money-tracker account create Cash --balance 100");
        }
        Commands::Config { command } => {
            handle_config_command(&paths, &mut settings, command)?;
        }
        command => {
            let mut storage = Storage::open(paths, &settings)?;
            run(&mut storage, &settings, command)?;
        }
    }

    Ok(())
}

fn run(storage: &mut Storage, settings: &Settings, command: Commands) -> Result<()> {
    match command {
        Commands::Transaction(cmd) => handle_transaction_command(storage, settings, cmd)?,
        Commands::Account(cmd) => handle_account_command(storage, settings, cmd)?,
        Commands::Category(cmd) => handle_category_command(storage, settings, cmd)?,
        Commands::Filter(cmd) => handle_filter_command(storage, settings, cmd)?,
        Commands::Summary(cmd) => handle_summary_command(storage, settings, cmd)?,
        Commands::Backup(cmd) => handle_backup_command(storage, settings, cmd)?,
        Commands::Export {
            format,
            output,
            pretty,
        } => handle_export_command(storage, format, output, pretty)?,
        Commands::Audit { limit } => handle_audit_command(storage, limit)?,
        Commands::Init | Commands::Config { .. } => {}
    }
    Ok(())
}
