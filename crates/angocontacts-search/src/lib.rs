//! Company discovery: the remote search collaborator, candidate ingestion,
//! and the search pipeline that feeds results into the collection store.

pub mod client;
pub mod error;
pub mod ingest;
pub mod pipeline;
pub mod provider;

pub use client::HttpSearchProvider;
pub use error::SearchError;
pub use ingest::parse_candidates;
pub use pipeline::{run_search, SearchOutcome};
pub use provider::SearchProvider;
