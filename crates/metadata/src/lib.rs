pub mod normalize;
pub mod omdb;
pub mod provider;
pub mod resolver;
pub mod tmdb;

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("not found")]
    NotFound,
    #[error("{provider} did not answer within {after:?}")]
    Timeout { provider: String, after: Duration },
    #[error("configuration error: {0}")]
    Config(String),
}

/// Detail record as fetched from a provider, before normalization.
///
/// Providers expose different subsets of these fields, so every one of them
/// is optional.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RawMovieRecord {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub runtimes: Option<Runtime>,
    pub genres: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub cast: Option<Vec<CastEntry>>,
    pub plot: Option<Synopsis>,
    pub plot_outline: Option<Synopsis>,
    pub cover_url: Option<String>,
    pub full_size_cover_url: Option<String>,
    /// IMDb identifier, with or without the `tt` prefix.
    pub imdb_id: Option<String>,
}

/// Runtime values in minutes. Some providers list one per release cut.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Runtime {
    Entries(Vec<String>),
    Single(String),
}

/// Plot text. Entries may end with a `::author` attribution.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Synopsis {
    Entries(Vec<String>),
    Single(String),
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CastEntry {
    pub name: String,
    pub character: Option<String>,
}

impl CastEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            character: None,
        }
    }
}

impl std::fmt::Display for CastEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Trim a provider string, treating blanks as missing.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
