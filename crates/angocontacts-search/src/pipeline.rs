//! Search pipeline orchestration.

use angocontacts_core::{
    dedup_by_name, sanitize, Company, NotificationKind, Sanitized, SearchQuery,
};
use angocontacts_store::{CollectionStore, KeyValueStore};

use crate::ingest::parse_candidates;
use crate::provider::SearchProvider;

/// What one search produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Results unique by name and sanitized, in the order the collaborator
    /// returned them.
    pub results: Vec<Company>,
    /// Records that were new to the history.
    pub added: usize,
    /// Duplicate contacts removed from the results and from the history.
    pub removed: usize,
}

/// Run one search and fold its results into the history.
///
/// 1. Ask `provider` and parse its answer into companies.
/// 2. Drop repeated names, keeping the first, then sanitize the results.
/// 3. Append new names to the history, then clean the history.
/// 4. Notify about new companies and about removed duplicates.
///
/// A failed search is logged and produces an empty outcome; the store is
/// left untouched.
pub async fn run_search<P, S>(
    provider: &P,
    store: &mut CollectionStore<S>,
    query: &SearchQuery,
) -> SearchOutcome
where
    P: SearchProvider,
    S: KeyValueStore,
{
    let raw = match provider.search(query).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!(query = %query.query, error = %e, "search failed");
            return SearchOutcome::default();
        }
    };

    let candidates = dedup_by_name(parse_candidates(&raw));
    let Sanitized {
        cleaned: results,
        removed_count: removed_from_results,
    } = sanitize(candidates.as_slice());

    if results.is_empty() {
        tracing::info!(query = %query.query, "search returned no companies");
        return SearchOutcome {
            results,
            added: 0,
            removed: removed_from_results,
        };
    }

    let added = store.add_to_history(&results);
    let removed_from_history = store.clean_history();
    let removed = removed_from_results + removed_from_history;

    if added > 0 {
        store.add_notification(
            "New companies found",
            &format!("Found {added} new companies for \"{}\".", query.label()),
            NotificationKind::Success,
        );
    }
    if removed > 0 {
        store.add_notification(
            "Duplicate contacts removed",
            &format!("Removed {removed} duplicate contacts (emails/phones)."),
            NotificationKind::Info,
        );
    }

    tracing::info!(
        query = %query.query,
        results = results.len(),
        added,
        removed,
        "search complete"
    );
    SearchOutcome {
        results,
        added,
        removed,
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
