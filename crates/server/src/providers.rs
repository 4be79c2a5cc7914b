//! Startup construction of the provider chain.

use std::sync::Arc;

use movieinfo_metadata::MetadataError;
use movieinfo_metadata::omdb::OmdbClient;
use movieinfo_metadata::provider::MovieProvider;
use movieinfo_metadata::resolver::MovieResolver;
use movieinfo_metadata::tmdb::TmdbClient;
use tracing::{info, warn};

use crate::config::{ProviderKind, ServerConfig};

/// Build the configured providers in fallback order.
///
/// A provider that cannot be constructed (no API key, client build failure)
/// is left out for the lifetime of the process.
pub fn build_providers(config: &ServerConfig) -> Vec<Arc<dyn MovieProvider>> {
    let mut providers: Vec<Arc<dyn MovieProvider>> = Vec::new();

    for kind in &config.provider_order {
        match build_provider(*kind, config) {
            Ok(provider) => {
                info!(provider = %kind, "movie provider enabled");
                providers.push(provider);
            }
            Err(e) => {
                warn!(provider = %kind, error = %e, "movie provider unavailable, skipping");
            }
        }
    }

    if providers.is_empty() {
        warn!("no movie providers available; every lookup will fail until MOVIEINFO_OMDB_KEY or MOVIEINFO_TMDB_KEY is set");
    }

    providers
}

pub fn build_resolver(config: &ServerConfig) -> MovieResolver {
    MovieResolver::new(build_providers(config), config.provider_timeout)
}

fn build_provider(
    kind: ProviderKind,
    config: &ServerConfig,
) -> Result<Arc<dyn MovieProvider>, MetadataError> {
    let missing_key = || MetadataError::Config(format!("no API key configured for {kind}"));

    let provider: Arc<dyn MovieProvider> = match kind {
        ProviderKind::Omdb => {
            let key = config.omdb_api_key.clone().ok_or_else(missing_key)?;
            Arc::new(OmdbClient::new(key, config.provider_timeout)?)
        }
        ProviderKind::Tmdb => {
            let key = config.tmdb_api_key.clone().ok_or_else(missing_key)?;
            Arc::new(TmdbClient::new(key, config.provider_timeout)?)
        }
    };
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(omdb: Option<&str>, tmdb: Option<&str>, order: Vec<ProviderKind>) -> ServerConfig {
        ServerConfig {
            omdb_api_key: omdb.map(str::to_string),
            tmdb_api_key: tmdb.map(str::to_string),
            provider_order: order,
            ..ServerConfig::from_lookup(|_| None)
        }
    }

    #[test]
    fn providers_follow_configured_order() {
        let cfg = config(
            Some("omdb-key"),
            Some("tmdb-key"),
            vec![ProviderKind::Tmdb, ProviderKind::Omdb],
        );
        let names: Vec<String> = build_providers(&cfg)
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, vec!["tmdb", "omdb"]);
    }

    #[test]
    fn provider_without_key_is_absent() {
        let cfg = config(None, Some("tmdb-key"), vec![ProviderKind::Omdb, ProviderKind::Tmdb]);
        let resolver = build_resolver(&cfg);
        assert_eq!(resolver.provider_names(), vec!["tmdb"]);
    }

    #[test]
    fn no_keys_means_no_providers() {
        let cfg = config(None, None, vec![ProviderKind::Omdb, ProviderKind::Tmdb]);
        assert!(build_providers(&cfg).is_empty());
    }
}
