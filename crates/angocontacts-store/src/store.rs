//! The collection store: single owner of every persisted collection.
//!
//! Readers get `Arc` snapshots; every mutation builds a new collection,
//! swaps it in, persists it under its own key and publishes a
//! [`StoreEvent::Changed`]. Persistence failures are logged and never
//! surface to callers: in-memory state stays authoritative for the session.

use std::collections::HashSet;
use std::sync::Arc;

use angocontacts_core::{
    dedup_by_name, normalize_name, sanitize, Company, Notification, NotificationKind, SavedSearch,
    Sanitized, SearchQuery,
};
use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::kv::KeyValueStore;
use crate::types::{Collection, StoreEvent};

const EVENT_CAPACITY: usize = 64;

pub struct CollectionStore<S> {
    backend: S,
    saved: Arc<Vec<Company>>,
    history: Arc<Vec<Company>>,
    searches: Arc<Vec<SavedSearch>>,
    notifications: Arc<Vec<Notification>>,
    events: broadcast::Sender<StoreEvent>,
}

impl<S: KeyValueStore> CollectionStore<S> {
    /// Reads every collection from `backend`.
    ///
    /// Company collections are deduplicated by name, sanitized, and written
    /// back in their clean form. A key that cannot be read or parsed is
    /// logged and its collection starts empty; nothing is written for it.
    pub fn load(backend: S) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let mut store = Self {
            backend,
            saved: Arc::default(),
            history: Arc::default(),
            searches: Arc::default(),
            notifications: Arc::default(),
            events,
        };

        if let Some(companies) = store.read_collection(Collection::SavedCompanies) {
            store.saved = Arc::new(clean_on_load(Collection::SavedCompanies, companies));
            store.persist(Collection::SavedCompanies);
        }
        if let Some(companies) = store.read_collection(Collection::History) {
            store.history = Arc::new(clean_on_load(Collection::History, companies));
            store.persist(Collection::History);
        }
        if let Some(searches) = store.read_collection(Collection::SavedSearches) {
            store.searches = Arc::new(searches);
        }
        if let Some(notifications) = store.read_collection(Collection::Notifications) {
            store.notifications = Arc::new(notifications);
        }

        tracing::debug!(
            saved = store.saved.len(),
            history = store.history.len(),
            searches = store.searches.len(),
            notifications = store.notifications.len(),
            "collection store loaded"
        );
        store
    }

    // -----------------------------------------------------------------------
    // snapshots
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn saved_companies(&self) -> Arc<Vec<Company>> {
        Arc::clone(&self.saved)
    }

    #[must_use]
    pub fn history(&self) -> Arc<Vec<Company>> {
        Arc::clone(&self.history)
    }

    #[must_use]
    pub fn saved_searches(&self) -> Arc<Vec<SavedSearch>> {
        Arc::clone(&self.searches)
    }

    #[must_use]
    pub fn notifications(&self) -> Arc<Vec<Notification>> {
        Arc::clone(&self.notifications)
    }

    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// Receives a [`StoreEvent`] for every collection replaced after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    #[must_use]
    pub fn backend(&self) -> &S {
        &self.backend
    }

    // -----------------------------------------------------------------------
    // saved companies
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn is_saved(&self, name: &str) -> bool {
        let key = normalize_name(name);
        self.saved.iter().any(|c| normalize_name(&c.name) == key)
    }

    /// Appends `company` unless a record with the same normalized name is
    /// already saved. Returns whether it was added.
    pub fn add_company(&mut self, company: Company) -> bool {
        if self.is_saved(&company.name) {
            tracing::debug!(name = %company.name, "company already saved");
            return false;
        }
        let mut next = self.saved.as_ref().clone();
        next.push(company);
        self.replace_saved(next);
        true
    }

    /// Returns whether a record was removed. Persists either way.
    pub fn remove_company(&mut self, id: &str) -> bool {
        let before = self.saved.len();
        let next: Vec<Company> = self.saved.iter().filter(|c| c.id != id).cloned().collect();
        let removed = next.len() != before;
        self.replace_saved(next);
        removed
    }

    /// Sanitizes the saved companies. Writes only when something was removed.
    pub fn clean_saved(&mut self) -> usize {
        let Sanitized {
            cleaned,
            removed_count,
        } = sanitize(self.saved.as_slice());
        if removed_count > 0 {
            tracing::info!(
                removed = removed_count,
                "removed duplicate contacts from saved companies"
            );
            self.replace_saved(cleaned);
        }
        removed_count
    }

    // -----------------------------------------------------------------------
    // history
    // -----------------------------------------------------------------------

    /// Appends each record whose normalized name is not yet in history,
    /// including names seen earlier in `batch`. Returns the number added.
    /// Nothing is written when no name is new.
    ///
    /// Contacts are not sanitized here; call [`Self::clean_history`] after
    /// ingestion to get the removed count.
    pub fn add_to_history(&mut self, batch: &[Company]) -> usize {
        let mut seen: HashSet<String> = self
            .history
            .iter()
            .map(|c| normalize_name(&c.name))
            .collect();
        let mut next = self.history.as_ref().clone();
        let mut added = 0;
        for company in batch {
            if seen.insert(normalize_name(&company.name)) {
                next.push(company.clone());
                added += 1;
            }
        }
        if added > 0 {
            self.replace_history(next);
        }
        added
    }

    /// Sanitizes the history. Writes only when something was removed.
    pub fn clean_history(&mut self) -> usize {
        let Sanitized {
            cleaned,
            removed_count,
        } = sanitize(self.history.as_slice());
        if removed_count > 0 {
            tracing::info!(removed = removed_count, "removed duplicate contacts from history");
            self.replace_history(cleaned);
        }
        removed_count
    }

    pub fn clear_history(&mut self) {
        self.replace_history(Vec::new());
    }

    // -----------------------------------------------------------------------
    // saved searches
    // -----------------------------------------------------------------------

    /// Records `query` as a new saved search, newest first.
    pub fn save_search(&mut self, query: &SearchQuery) -> SavedSearch {
        let search = SavedSearch {
            id: Uuid::new_v4().to_string(),
            query: query.query.clone(),
            email: query.email.clone(),
            province: query.province.clone(),
            sector: query.sector.clone(),
            timestamp: Utc::now(),
        };
        let mut next = Vec::with_capacity(self.searches.len() + 1);
        next.push(search.clone());
        next.extend(self.searches.iter().cloned());
        self.replace_searches(next);
        search
    }

    /// Returns whether a saved search was removed. Persists either way.
    pub fn remove_saved_search(&mut self, id: &str) -> bool {
        let before = self.searches.len();
        let next: Vec<SavedSearch> = self
            .searches
            .iter()
            .filter(|s| s.id != id)
            .cloned()
            .collect();
        let removed = next.len() != before;
        self.replace_searches(next);
        removed
    }

    /// Adds a warning for each saved search older than `max_age`, unless a
    /// warning quoting that search's query already exists. Returns the
    /// number of notifications created.
    pub fn flag_outdated_searches(&mut self, now: DateTime<Utc>, max_age: Duration) -> usize {
        let outdated: Vec<String> = self
            .searches
            .iter()
            .filter(|s| now - s.timestamp > max_age)
            .map(|s| s.query.clone())
            .collect();

        let mut created = 0;
        for query in outdated {
            let quoted = format!("\"{query}\"");
            let already_flagged = self
                .notifications
                .iter()
                .any(|n| n.kind == NotificationKind::Warning && n.message.contains(&quoted));
            if already_flagged {
                continue;
            }
            let message = format!(
                "Your saved search {quoted} has not been refreshed in over {} days. \
                 Run it again to pick up new results.",
                max_age.num_days()
            );
            self.push_notification("Outdated search", &message, NotificationKind::Warning, now);
            created += 1;
        }
        created
    }

    // -----------------------------------------------------------------------
    // notifications
    // -----------------------------------------------------------------------

    /// Prepends an unread notification stamped with the current time.
    pub fn add_notification(
        &mut self,
        title: &str,
        message: &str,
        kind: NotificationKind,
    ) -> Notification {
        self.push_notification(title, message, kind, Utc::now())
    }

    /// Returns whether a notification with `id` exists. Persists either way.
    pub fn mark_notification_read(&mut self, id: &str) -> bool {
        let mut found = false;
        let next: Vec<Notification> = self
            .notifications
            .iter()
            .map(|n| {
                if n.id == id {
                    found = true;
                    Notification { read: true, ..n.clone() }
                } else {
                    n.clone()
                }
            })
            .collect();
        self.replace_notifications(next);
        found
    }

    pub fn mark_all_notifications_read(&mut self) {
        let next: Vec<Notification> = self
            .notifications
            .iter()
            .map(|n| Notification { read: true, ..n.clone() })
            .collect();
        self.replace_notifications(next);
    }

    /// Returns whether a notification was removed. Persists either way.
    pub fn remove_notification(&mut self, id: &str) -> bool {
        let before = self.notifications.len();
        let next: Vec<Notification> = self
            .notifications
            .iter()
            .filter(|n| n.id != id)
            .cloned()
            .collect();
        let removed = next.len() != before;
        self.replace_notifications(next);
        removed
    }

    fn push_notification(
        &mut self,
        title: &str,
        message: &str,
        kind: NotificationKind,
        timestamp: DateTime<Utc>,
    ) -> Notification {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            message: message.to_string(),
            kind,
            read: false,
            timestamp,
        };
        let mut next = Vec::with_capacity(self.notifications.len() + 1);
        next.push(notification.clone());
        next.extend(self.notifications.iter().cloned());
        self.replace_notifications(next);
        notification
    }

    // -----------------------------------------------------------------------
    // replacement + persistence
    // -----------------------------------------------------------------------

    fn replace_saved(&mut self, next: Vec<Company>) {
        self.saved = Arc::new(next);
        self.commit(Collection::SavedCompanies);
    }

    fn replace_history(&mut self, next: Vec<Company>) {
        self.history = Arc::new(next);
        self.commit(Collection::History);
    }

    fn replace_searches(&mut self, next: Vec<SavedSearch>) {
        self.searches = Arc::new(next);
        self.commit(Collection::SavedSearches);
    }

    fn replace_notifications(&mut self, next: Vec<Notification>) {
        self.notifications = Arc::new(next);
        self.commit(Collection::Notifications);
    }

    fn commit(&self, collection: Collection) {
        self.persist(collection);
        // No subscribers is fine.
        let _ = self.events.send(StoreEvent::Changed(collection));
    }

    fn persist(&self, collection: Collection) {
        let payload = match collection {
            Collection::SavedCompanies => encode(self.saved.as_slice()),
            Collection::History => encode(self.history.as_slice()),
            Collection::SavedSearches => encode(self.searches.as_slice()),
            Collection::Notifications => encode(self.notifications.as_slice()),
        };
        let payload = match payload {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(
                    collection = %collection,
                    error = %e,
                    "failed to serialize collection"
                );
                return;
            }
        };
        if let Err(e) = self.backend.write(collection.key(), &payload) {
            tracing::error!(
                collection = %collection,
                error = %e,
                "failed to persist collection"
            );
        }
    }

    fn read_collection<T: DeserializeOwned>(&self, collection: Collection) -> Option<Vec<T>> {
        let raw = match self.backend.read(collection.key()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!(collection = %collection, error = %e, "failed to read collection");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(items) => Some(items),
            Err(e) => {
                tracing::error!(
                    collection = %collection,
                    error = %e,
                    "failed to parse persisted collection; starting empty"
                );
                None
            }
        }
    }
}

fn encode<T: Serialize>(items: &[T]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}

fn clean_on_load(collection: Collection, companies: Vec<Company>) -> Vec<Company> {
    let before = companies.len();
    let unique = dedup_by_name(companies);
    let duplicate_records = before - unique.len();
    let Sanitized {
        cleaned,
        removed_count,
    } = sanitize(unique.as_slice());
    if duplicate_records > 0 || removed_count > 0 {
        tracing::info!(
            collection = %collection,
            duplicate_records,
            duplicate_contacts = removed_count,
            "cleaned collection on load"
        );
    }
    cleaned
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
