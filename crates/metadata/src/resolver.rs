//! Title lookup across an ordered list of providers.
//!
//! Rules:
//! 1. Providers are tried in order; the first one that yields a candidate and
//!    a record wins, and nothing from other providers is merged in.
//! 2. Any failure (search error, empty search, fetch error, timeout) moves on
//!    to the next provider.
//! 3. Once the list is exhausted: not found if at least one provider answered
//!    cleanly, upstream error if every provider failed.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use movieinfo_core::types::MovieInfo;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::MetadataError;
use crate::normalize::normalize;
use crate::provider::MovieProvider;

pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("query must not be empty")]
    EmptyQuery,
    #[error("no movie found matching the query")]
    NotFound,
    #[error("no movie providers are configured")]
    NoProviders,
    #[error("{provider} lookup failed: {source}")]
    Upstream {
        provider: String,
        #[source]
        source: MetadataError,
    },
}

/// Outcome of one provider's search + fetch attempt.
enum Attempt {
    Found(MovieInfo),
    NoMatch,
    Failed(MetadataError),
}

#[derive(Clone)]
pub struct MovieResolver {
    providers: Vec<Arc<dyn MovieProvider>>,
    call_timeout: Duration,
}

impl MovieResolver {
    pub fn new(providers: Vec<Arc<dyn MovieProvider>>, call_timeout: Duration) -> Self {
        Self {
            providers,
            call_timeout,
        }
    }

    /// Provider names in fallback order.
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// Look up `query` and return the normalized record of the first provider
    /// that finds it.
    pub async fn resolve(&self, query: &str) -> Result<MovieInfo, ResolveError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ResolveError::EmptyQuery);
        }
        if self.providers.is_empty() {
            return Err(ResolveError::NoProviders);
        }

        let mut answered_cleanly = false;
        let mut last_failure = None;

        for provider in &self.providers {
            match self.attempt(provider.as_ref(), query).await {
                Attempt::Found(info) => {
                    info!(provider = provider.name(), query, title = %info.title, "movie resolved");
                    return Ok(info);
                }
                Attempt::NoMatch => {
                    debug!(provider = provider.name(), query, "no match, trying next provider");
                    answered_cleanly = true;
                }
                Attempt::Failed(err) => {
                    warn!(provider = provider.name(), query, error = %err, "provider failed, trying next provider");
                    last_failure = Some((provider.name().to_string(), err));
                }
            }
        }

        match last_failure {
            Some((provider, source)) if !answered_cleanly => {
                Err(ResolveError::Upstream { provider, source })
            }
            _ => Err(ResolveError::NotFound),
        }
    }

    async fn attempt(&self, provider: &dyn MovieProvider, query: &str) -> Attempt {
        let candidates = match self
            .bounded(provider.name(), provider.search_by_title(query))
            .await
        {
            Ok(candidates) => candidates,
            Err(err) => return Attempt::Failed(err),
        };

        let Some(top) = candidates.into_iter().next() else {
            return Attempt::NoMatch;
        };
        debug!(provider = provider.name(), provider_id = %top.provider_id, title = %top.title, "top candidate");

        let record = match self
            .bounded(provider.name(), provider.fetch_by_id(&top.provider_id))
            .await
        {
            Ok(record) => record,
            Err(err) => return Attempt::Failed(err),
        };

        let fallback_title = if top.title.trim().is_empty() {
            query
        } else {
            top.title.as_str()
        };
        Attempt::Found(normalize(record, fallback_title))
    }

    async fn bounded<T>(
        &self,
        provider: &str,
        call: impl Future<Output = Result<T, MetadataError>>,
    ) -> Result<T, MetadataError> {
        tokio::time::timeout(self.call_timeout, call)
            .await
            .map_err(|_| MetadataError::Timeout {
                provider: provider.to_string(),
                after: self.call_timeout,
            })?
    }
}
