mod companies;
mod notifications;
mod searches;

use angocontacts_core::{load_app_config, AppConfig};
use angocontacts_search::HttpSearchProvider;
use angocontacts_store::{CollectionStore, FileStore, KeyValueStore};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use companies::{HistoryCommands, SavedCommands};
use notifications::NotificationsCommands;
use searches::{SearchArgs, SearchesCommands};

#[derive(Debug, Parser)]
#[command(name = "angocontacts")]
#[command(about = "Find, clean and export contacts for companies in Angola")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for companies and add new ones to the history
    Search(SearchArgs),
    /// Manage saved companies
    Saved {
        #[command(subcommand)]
        command: SavedCommands,
    },
    /// Inspect and clean the search history
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
    /// Manage saved searches
    Searches {
        #[command(subcommand)]
        command: SearchesCommands,
    },
    /// Read and manage notifications
    Notifications {
        #[command(subcommand)]
        command: NotificationsCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::debug!(env = %config.env, data_dir = %config.data_dir.display(), "starting");
    let mut store = CollectionStore::load(FileStore::new(&config.data_dir));
    run_startup_checks(cli.command.as_ref(), &config, &mut store);

    match cli.command {
        Some(Commands::Search(args)) => {
            let provider = HttpSearchProvider::from_config(&config)?;
            searches::run_search_command(&provider, &mut store, &args).await?;
        }
        Some(Commands::Saved { command }) => companies::run_saved(&mut store, command)?,
        Some(Commands::History { command }) => companies::run_history(&mut store, command)?,
        Some(Commands::Searches { command }) => {
            searches::run_searches(&config, &mut store, command).await?;
        }
        Some(Commands::Notifications { command }) => {
            notifications::run_notifications(&config, &mut store, command)?;
        }
        None => print_overview(&store),
    }

    Ok(())
}

/// Flags outdated saved searches before dispatching the command.
/// `notifications check` runs the same check itself and reports its count,
/// so it is skipped here.
fn run_startup_checks<S: KeyValueStore>(
    command: Option<&Commands>,
    config: &AppConfig,
    store: &mut CollectionStore<S>,
) -> usize {
    if matches!(
        command,
        Some(Commands::Notifications {
            command: NotificationsCommands::Check
        })
    ) {
        return 0;
    }
    notifications::flag_outdated_searches(config, store)
}

fn print_overview<S: KeyValueStore>(store: &CollectionStore<S>) {
    println!("saved companies:  {}", store.saved_companies().len());
    println!("search history:   {}", store.history().len());
    println!("saved searches:   {}", store.saved_searches().len());
    println!("notifications:    {} unread", store.unread_count());
}
