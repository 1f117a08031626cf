//! Saved-company and history command handlers.

use std::path::{Path, PathBuf};

use angocontacts_core::{sanitize, Company, NotificationKind, Sanitized};
use angocontacts_export::{write_csv_file, ExportTable};
use angocontacts_store::{CollectionStore, KeyValueStore};
use clap::Subcommand;

/// Sub-commands available under `saved`.
#[derive(Debug, Subcommand)]
pub enum SavedCommands {
    /// List saved companies
    List,
    /// Save a company from the search history
    Add {
        /// History record id (see `history list`)
        history_id: String,
    },
    /// Remove a saved company
    Remove { id: String },
    /// Remove duplicate emails and phones across saved companies
    Clean,
    /// Export saved companies as CSV
    Export {
        #[arg(long, default_value = "angocontacts_export.csv")]
        out: PathBuf,
    },
}

/// Sub-commands available under `history`.
#[derive(Debug, Subcommand)]
pub enum HistoryCommands {
    /// List every company found so far
    List,
    /// Remove duplicate emails and phones across the history
    Clean,
    /// Forget the whole history
    Clear,
    /// Export the history as CSV
    Export {
        #[arg(long, default_value = "angocontacts_history.csv")]
        out: PathBuf,
    },
}

pub(crate) fn run_saved<S: KeyValueStore>(
    store: &mut CollectionStore<S>,
    command: SavedCommands,
) -> anyhow::Result<()> {
    match command {
        SavedCommands::List => print_companies(&store.saved_companies(), "saved companies"),
        SavedCommands::Add { history_id } => {
            let company = save_from_history(store, &history_id)?;
            println!("saved {}", company.name);
        }
        SavedCommands::Remove { id } => {
            if !store.remove_company(&id) {
                anyhow::bail!("no saved company with id '{id}'");
            }
            println!("removed {id}");
        }
        SavedCommands::Clean => {
            let removed = store.clean_saved();
            println!("removed {removed} duplicate contacts from saved companies");
        }
        SavedCommands::Export { out } => {
            let companies = store.saved_companies();
            let removed = export_companies(store, &companies, &out)?;
            report_export(&out, companies.len(), removed);
        }
    }
    Ok(())
}

pub(crate) fn run_history<S: KeyValueStore>(
    store: &mut CollectionStore<S>,
    command: HistoryCommands,
) -> anyhow::Result<()> {
    match command {
        HistoryCommands::List => print_companies(&store.history(), "search history"),
        HistoryCommands::Clean => {
            let removed = store.clean_history();
            println!("removed {removed} duplicate contacts from history");
        }
        HistoryCommands::Clear => {
            store.clear_history();
            println!("history cleared");
        }
        HistoryCommands::Export { out } => {
            let companies = store.history();
            let removed = export_companies(store, &companies, &out)?;
            report_export(&out, companies.len(), removed);
        }
    }
    Ok(())
}

/// Copies a history record into the saved companies, then cleans the saved
/// collection and reports any removed contacts as a notification.
///
/// Saving a name that is already saved is not an error; the existing record
/// is kept.
///
/// # Errors
///
/// Returns an error if no history record has `history_id`.
pub(crate) fn save_from_history<S: KeyValueStore>(
    store: &mut CollectionStore<S>,
    history_id: &str,
) -> anyhow::Result<Company> {
    let company = store
        .history()
        .iter()
        .find(|c| c.id == history_id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("no company with id '{history_id}' in history"))?;

    if !store.add_company(company.clone()) {
        tracing::info!(name = %company.name, "company was already saved");
    }
    let removed = store.clean_saved();
    if removed > 0 {
        store.add_notification(
            "Duplicate contacts removed",
            &format!("Removed {removed} duplicate contacts while saving."),
            NotificationKind::Info,
        );
    }
    Ok(company)
}

/// Sanitizes `companies` and writes them to `out` as CSV. The stored
/// collection is not modified; a notification records any contacts the
/// export dropped. Returns the removed count.
///
/// # Errors
///
/// Returns an error if the CSV file cannot be written.
pub(crate) fn export_companies<S: KeyValueStore>(
    store: &mut CollectionStore<S>,
    companies: &[Company],
    out: &Path,
) -> anyhow::Result<usize> {
    let Sanitized {
        cleaned,
        removed_count,
    } = sanitize(companies);
    if removed_count > 0 {
        store.add_notification(
            "Export cleaned",
            &format!("Removed {removed_count} duplicate contacts before exporting."),
            NotificationKind::Info,
        );
    }
    write_csv_file(&ExportTable::build(&cleaned), out)?;
    Ok(removed_count)
}

fn report_export(out: &Path, rows: usize, removed: usize) {
    println!("exported {rows} companies to {}", out.display());
    if removed > 0 {
        println!("dropped {removed} duplicate contacts from the export");
    }
}

pub(crate) fn print_companies(companies: &[Company], label: &str) {
    if companies.is_empty() {
        println!("no {label} yet");
        return;
    }

    println!(
        "{:<38}{:<32}{:<14}{:<18}{:<16}EMAILS",
        "ID", "NAME", "PROVINCE", "SECTOR", "PHONE"
    );
    for c in companies {
        let phone = c
            .mobile_phone
            .as_deref()
            .or(c.landline_phone.as_deref())
            .unwrap_or("\u{2014}");
        println!(
            "{:<38}{:<32}{:<14}{:<18}{:<16}{}",
            c.id,
            truncate(&c.name, 30),
            truncate(&c.province, 12),
            truncate(&c.sector, 16),
            phone,
            c.emails.join(", ")
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('\u{2026}');
        out
    }
}
