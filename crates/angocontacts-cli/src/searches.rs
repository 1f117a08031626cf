//! Search and saved-search command handlers.

use std::path::PathBuf;

use angocontacts_core::{AppConfig, SearchQuery};
use angocontacts_search::{run_search, HttpSearchProvider, SearchOutcome, SearchProvider};
use angocontacts_store::{CollectionStore, KeyValueStore};
use clap::{Args, Subcommand};

use crate::companies::{export_companies, print_companies};

/// Arguments for `search`.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// What to look for (e.g. "bancos", "clínicas dentárias")
    pub query: String,
    /// Restrict to an Angolan province
    #[arg(long)]
    pub province: Option<String>,
    /// Restrict to a business sector
    #[arg(long)]
    pub sector: Option<String>,
    /// Known contact email to anchor the search
    #[arg(long)]
    pub email: Option<String>,
    /// Keep this query as a saved search
    #[arg(long)]
    pub save: bool,
    /// Also write the cleaned results to a CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl SearchArgs {
    /// Blank scoping hints count as absent.
    pub(crate) fn to_query(&self) -> SearchQuery {
        fn hint(value: Option<&String>) -> Option<String> {
            value
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }
        SearchQuery {
            query: self.query.trim().to_string(),
            email: hint(self.email.as_ref()),
            province: hint(self.province.as_ref()),
            sector: hint(self.sector.as_ref()),
        }
    }
}

/// Sub-commands available under `searches`.
#[derive(Debug, Subcommand)]
pub enum SearchesCommands {
    /// List saved searches, newest first
    List,
    /// Delete a saved search
    Remove { id: String },
    /// Run a saved search again
    Run { id: String },
}

/// Runs `args` against `provider`, optionally saving the query first and
/// exporting the results afterwards.
///
/// # Errors
///
/// Returns an error only if the export file cannot be written; a failed
/// search prints an empty result.
pub(crate) async fn run_search_command<P, S>(
    provider: &P,
    store: &mut CollectionStore<S>,
    args: &SearchArgs,
) -> anyhow::Result<SearchOutcome>
where
    P: SearchProvider,
    S: KeyValueStore,
{
    let query = args.to_query();
    if args.save {
        let saved = store.save_search(&query);
        println!("saved search {}", saved.id);
    }

    let outcome = run_search(provider, store, &query).await;
    report_outcome(&outcome);

    if let Some(out) = &args.export {
        let removed = export_companies(store, &outcome.results, out)?;
        println!(
            "exported {} companies to {}",
            outcome.results.len(),
            out.display()
        );
        if removed > 0 {
            println!("dropped {removed} duplicate contacts from the export");
        }
    }
    Ok(outcome)
}

pub(crate) async fn run_searches<S: KeyValueStore>(
    config: &AppConfig,
    store: &mut CollectionStore<S>,
    command: SearchesCommands,
) -> anyhow::Result<()> {
    match command {
        SearchesCommands::List => print_saved_searches(store),
        SearchesCommands::Remove { id } => {
            if !store.remove_saved_search(&id) {
                anyhow::bail!("no saved search with id '{id}'");
            }
            println!("removed {id}");
        }
        SearchesCommands::Run { id } => {
            let provider = HttpSearchProvider::from_config(config)?;
            let outcome = rerun_saved_search(&provider, store, &id).await?;
            report_outcome(&outcome);
        }
    }
    Ok(())
}

/// Re-runs a saved search through the normal search pipeline.
///
/// # Errors
///
/// Returns an error if no saved search has `id`.
pub(crate) async fn rerun_saved_search<P, S>(
    provider: &P,
    store: &mut CollectionStore<S>,
    id: &str,
) -> anyhow::Result<SearchOutcome>
where
    P: SearchProvider,
    S: KeyValueStore,
{
    let query = store
        .saved_searches()
        .iter()
        .find(|s| s.id == id)
        .map(angocontacts_core::SavedSearch::to_query)
        .ok_or_else(|| anyhow::anyhow!("no saved search with id '{id}'"))?;
    Ok(run_search(provider, store, &query).await)
}

fn report_outcome(outcome: &SearchOutcome) {
    print_companies(&outcome.results, "results");
    println!(
        "{} results, {} new in history, {} duplicate contacts removed",
        outcome.results.len(),
        outcome.added,
        outcome.removed
    );
}

fn print_saved_searches<S: KeyValueStore>(store: &CollectionStore<S>) {
    let searches = store.saved_searches();
    if searches.is_empty() {
        println!("no saved searches yet");
        return;
    }

    println!("{:<38}{:<18}{:<30}FILTERS", "ID", "SAVED", "QUERY");
    for s in searches.iter() {
        let filters: Vec<String> = [
            s.province.as_deref().map(|p| format!("province={p}")),
            s.sector.as_deref().map(|p| format!("sector={p}")),
            s.email.as_deref().map(|p| format!("email={p}")),
        ]
        .into_iter()
        .flatten()
        .collect();
        println!(
            "{:<38}{:<18}{:<30}{}",
            s.id,
            s.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            s.query,
            filters.join(" ")
        );
    }
}
