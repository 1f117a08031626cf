/// The independently persisted collections owned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    SavedCompanies,
    History,
    SavedSearches,
    Notifications,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::SavedCompanies,
        Collection::History,
        Collection::SavedSearches,
        Collection::Notifications,
    ];

    /// Storage key the collection is persisted under.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Collection::SavedCompanies => "angocontacts_saved_companies",
            Collection::History => "angocontacts_search_history",
            Collection::SavedSearches => "angocontacts_saved_searches",
            Collection::Notifications => "angocontacts_notifications",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Collection::SavedCompanies => write!(f, "saved companies"),
            Collection::History => write!(f, "search history"),
            Collection::SavedSearches => write!(f, "saved searches"),
            Collection::Notifications => write!(f, "notifications"),
        }
    }
}

/// Published on every wholesale replacement of a collection snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    Changed(Collection),
}
