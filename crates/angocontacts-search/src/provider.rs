use std::future::Future;

use angocontacts_core::SearchQuery;

use crate::error::SearchError;

/// A source of company candidates for a query.
///
/// Implementations return the raw response text; turning it into
/// [`angocontacts_core::Company`] records is [`crate::parse_candidates`]'s job.
pub trait SearchProvider {
    /// # Errors
    ///
    /// Returns [`SearchError`] when the collaborator cannot be reached or
    /// rejects the request.
    fn search(&self, query: &SearchQuery)
        -> impl Future<Output = Result<String, SearchError>> + Send;
}
