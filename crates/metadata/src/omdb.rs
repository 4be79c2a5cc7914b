//! OMDb (Open Movie Database) provider client.
//!
//! API reference: https://www.omdbapi.com/
//!
//! OMDb ids are IMDb ids (`tt1375666`), and missing values come back as the
//! literal string `"N/A"`.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::provider::{CandidateRef, MovieProvider, parse_year};
use crate::{CastEntry, MetadataError, RawMovieRecord, Runtime, Synopsis};

const BASE_URL: &str = "https://www.omdbapi.com/";
const NOT_AVAILABLE: &str = "N/A";
const NO_MATCH: &str = "Movie not found!";
const UNKNOWN_ID: &str = "Incorrect IMDb ID.";

pub struct OmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchItem>,
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
}

/// Detail payload for `?i=<imdb id>`.
#[derive(Debug, Deserialize)]
struct OmdbMovie {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Runtime")]
    runtime: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Language")]
    language: Option<String>,
    #[serde(rename = "Actors")]
    actors: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

impl OmdbClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, MetadataError> {
        let api_key = api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(MetadataError::Config("OMDb API key is empty".into()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MetadataError::Config(format!("build OMDb client: {e}")))?;

        Ok(Self {
            api_key,
            base_url: BASE_URL.to_string(),
            client,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        params: &[(&str, &str)],
    ) -> Result<T, MetadataError> {
        let mut all_params = vec![("apikey", self.api_key.as_str())];
        all_params.extend_from_slice(params);

        debug!(url = %self.base_url, ?params, "OMDb request");

        let resp = self
            .client
            .get(&self.base_url)
            .query(&all_params)
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(MetadataError::Provider(format!(
                "OMDb returned {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| MetadataError::Provider(format!("parse JSON: {e}")))
    }
}

#[async_trait::async_trait]
impl MovieProvider for OmdbClient {
    fn name(&self) -> &str {
        "omdb"
    }

    async fn search_by_title(&self, query: &str) -> Result<Vec<CandidateRef>, MetadataError> {
        let data: OmdbSearchResponse = self.get(&[("s", query), ("type", "movie")]).await?;
        parse_search_response(data)
    }

    async fn fetch_by_id(&self, provider_id: &str) -> Result<RawMovieRecord, MetadataError> {
        let data: OmdbMovie = self.get(&[("i", provider_id), ("plot", "full")]).await?;
        parse_movie(data)
    }
}

fn is_false(response: Option<&str>) -> bool {
    response.is_some_and(|r| r.eq_ignore_ascii_case("false"))
}

fn parse_search_response(data: OmdbSearchResponse) -> Result<Vec<CandidateRef>, MetadataError> {
    if is_false(data.response.as_deref()) {
        return match data.error.as_deref() {
            Some(NO_MATCH) => Ok(Vec::new()),
            Some(err) => Err(MetadataError::Provider(err.to_string())),
            None => Err(MetadataError::Provider("OMDb search failed".into())),
        };
    }

    Ok(data
        .search
        .into_iter()
        .filter_map(|item| {
            Some(CandidateRef {
                provider_id: available(item.imdb_id)?,
                title: available(item.title).unwrap_or_default(),
                year: item.year.as_deref().and_then(parse_year),
            })
        })
        .collect())
}

fn parse_movie(data: OmdbMovie) -> Result<RawMovieRecord, MetadataError> {
    if is_false(data.response.as_deref()) {
        return match data.error.as_deref() {
            Some(UNKNOWN_ID) => Err(MetadataError::NotFound),
            Some(err) => Err(MetadataError::Provider(err.to_string())),
            None => Err(MetadataError::Provider("OMDb lookup failed".into())),
        };
    }

    Ok(RawMovieRecord {
        title: available(data.title),
        year: data.year.as_deref().and_then(parse_year),
        rating: available(data.imdb_rating).and_then(|r| r.parse().ok()),
        // "148 min" → "148"
        runtimes: available(data.runtime).map(|r| {
            let minutes = r.trim_end_matches("min").trim().to_string();
            Runtime::Entries(vec![minutes])
        }),
        genres: available(data.genre).map(|g| split_list(&g)),
        languages: available(data.language).map(|l| split_list(&l)),
        cast: available(data.actors).map(|a| split_list(&a).into_iter().map(CastEntry::new).collect()),
        plot: available(data.plot).map(Synopsis::Single),
        plot_outline: None,
        cover_url: available(data.poster),
        full_size_cover_url: None,
        imdb_id: available(data.imdb_id),
    })
}

/// Drops blanks and OMDb's `"N/A"` placeholder.
fn available(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != NOT_AVAILABLE)
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
