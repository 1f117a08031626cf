//! HTTP adapter for the remote company-search collaborator.
//!
//! The collaborator receives the [`SearchQuery`] as a JSON body and answers
//! with a JSON array of company candidates. The body is returned verbatim;
//! callers run it through [`crate::parse_candidates`].

use std::time::Duration;

use angocontacts_core::{AppConfig, SearchQuery};
use reqwest::{Client, Url};

use crate::error::SearchError;
use crate::provider::SearchProvider;

/// [`SearchProvider`] that POSTs queries to a configured endpoint.
///
/// Use [`HttpSearchProvider::from_config`] in the binary or
/// [`HttpSearchProvider::new`] to point at a mock server in tests.
pub struct HttpSearchProvider {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl HttpSearchProvider {
    /// Builds a provider from the application config.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] when no search endpoint is configured,
    /// otherwise the same errors as [`HttpSearchProvider::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, SearchError> {
        let endpoint = config.require_search_url()?;
        Self::new(
            endpoint,
            config.search_api_key.as_deref(),
            config.search_timeout_secs,
            &config.user_agent,
        )
    }

    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SearchError::InvalidUrl`] if `endpoint`
    /// is not an absolute URL.
    pub fn new(
        endpoint: &str,
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let endpoint = Url::parse(endpoint).map_err(|e| SearchError::InvalidUrl {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.map(str::to_owned),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl SearchProvider for HttpSearchProvider {
    async fn search(&self, query: &SearchQuery) -> Result<String, SearchError> {
        let mut request = self.client.post(self.endpoint.clone()).json(query);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        tracing::debug!(query = %query.query, endpoint = %self.endpoint, "sending search request");
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}
