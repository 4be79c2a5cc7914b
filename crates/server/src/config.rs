//! Process configuration read from `MOVIEINFO_*` environment variables.

use std::time::Duration;

use movieinfo_metadata::resolver::DEFAULT_CALL_TIMEOUT;
use tracing::warn;

const DEFAULT_BIND: &str = "0.0.0.0:8000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Omdb,
    Tmdb,
}

impl ProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Omdb => "omdb",
            Self::Tmdb => "tmdb",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "omdb" => Some(Self::Omdb),
            "tmdb" => Some(Self::Tmdb),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Read before the tracing subscriber exists, so it never logs.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup("MOVIEINFO_LOG_FORMAT") {
            Some(f) if f.trim().eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub omdb_api_key: Option<String>,
    pub tmdb_api_key: Option<String>,
    /// Fallback order, first entry is the primary provider.
    pub provider_order: Vec<ProviderKind>,
    pub provider_timeout: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key).and_then(|value| {
                let trimmed = value.trim().to_string();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed)
                }
            })
        };

        let provider_order = get("MOVIEINFO_PROVIDERS")
            .map(|order| parse_provider_order(&order))
            .unwrap_or_else(|| vec![ProviderKind::Omdb, ProviderKind::Tmdb]);

        let provider_timeout = get("MOVIEINFO_PROVIDER_TIMEOUT_SECS")
            .and_then(|v| match v.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    warn!(value = %v, "invalid MOVIEINFO_PROVIDER_TIMEOUT_SECS, using default");
                    None
                }
            })
            .unwrap_or(DEFAULT_CALL_TIMEOUT);

        Self {
            bind_addr: get("MOVIEINFO_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string()),
            omdb_api_key: get("MOVIEINFO_OMDB_KEY"),
            tmdb_api_key: get("MOVIEINFO_TMDB_KEY"),
            provider_order,
            provider_timeout,
        }
    }
}

fn parse_provider_order(order: &str) -> Vec<ProviderKind> {
    let mut kinds = Vec::new();
    for name in order.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        match ProviderKind::parse(name) {
            Some(kind) if !kinds.contains(&kind) => kinds.push(kind),
            Some(_) => {}
            None => warn!(provider = %name, "unknown provider in MOVIEINFO_PROVIDERS, skipping"),
        }
    }
    kinds
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(pairs: &[(&str, &str)]) -> ServerConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg.bind_addr, "0.0.0.0:8000");
        assert_eq!(cfg.omdb_api_key, None);
        assert_eq!(cfg.tmdb_api_key, None);
        assert_eq!(cfg.provider_order, vec![ProviderKind::Omdb, ProviderKind::Tmdb]);
        assert_eq!(cfg.provider_timeout, DEFAULT_CALL_TIMEOUT);
    }

    #[test]
    fn blank_keys_are_unset() {
        let cfg = config(&[("MOVIEINFO_OMDB_KEY", "   "), ("MOVIEINFO_TMDB_KEY", " abc ")]);
        assert_eq!(cfg.omdb_api_key, None);
        assert_eq!(cfg.tmdb_api_key.as_deref(), Some("abc"));
    }

    #[test]
    fn provider_order_skips_unknown_and_duplicates() {
        let cfg = config(&[("MOVIEINFO_PROVIDERS", "TMDB, imdbpy, omdb, tmdb")]);
        assert_eq!(cfg.provider_order, vec![ProviderKind::Tmdb, ProviderKind::Omdb]);
    }

    #[test]
    fn provider_timeout_from_seconds() {
        let cfg = config(&[("MOVIEINFO_PROVIDER_TIMEOUT_SECS", "3")]);
        assert_eq!(cfg.provider_timeout, Duration::from_secs(3));

        let cfg = config(&[("MOVIEINFO_PROVIDER_TIMEOUT_SECS", "0")]);
        assert_eq!(cfg.provider_timeout, DEFAULT_CALL_TIMEOUT);

        let cfg = config(&[("MOVIEINFO_PROVIDER_TIMEOUT_SECS", "soon")]);
        assert_eq!(cfg.provider_timeout, DEFAULT_CALL_TIMEOUT);
    }

    #[test]
    fn log_format_is_case_insensitive() {
        assert_eq!(
            LogFormat::from_lookup(|_| Some(" JSON ".to_string())),
            LogFormat::Json
        );
        assert_eq!(LogFormat::from_lookup(|_| None), LogFormat::Text);
        assert_eq!(
            LogFormat::from_lookup(|_| Some("pretty".to_string())),
            LogFormat::Text
        );
    }
}
