//! TMDB (The Movie Database) provider client.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs

use std::time::Duration;

use tracing::debug;

use crate::provider::{CandidateRef, MovieProvider, parse_year};
use crate::{CastEntry, MetadataError, RawMovieRecord, Runtime, Synopsis, non_blank};

const BASE_URL: &str = "https://api.themoviedb.org/3";
const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

pub struct TmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, MetadataError> {
        let api_key = api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(MetadataError::Config("TMDB API key is empty".into()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MetadataError::Config(format!("build TMDB client: {e}")))?;

        Ok(Self {
            api_key,
            base_url: BASE_URL.to_string(),
            client,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn get_json(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, MetadataError> {
        let mut all_params = vec![("api_key", self.api_key.as_str())];
        all_params.extend_from_slice(params);

        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "TMDB request");

        let resp = self
            .client
            .get(&url)
            .query(&all_params)
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MetadataError::NotFound);
        }

        if !resp.status().is_success() {
            return Err(MetadataError::Provider(format!(
                "TMDB returned {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| MetadataError::Provider(format!("parse JSON: {e}")))
    }
}

#[async_trait::async_trait]
impl MovieProvider for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn search_by_title(&self, query: &str) -> Result<Vec<CandidateRef>, MetadataError> {
        let data = self.get_json("/search/movie", &[("query", query)]).await?;
        Ok(parse_search_results(&data))
    }

    async fn fetch_by_id(&self, provider_id: &str) -> Result<RawMovieRecord, MetadataError> {
        let data = self
            .get_json(
                &format!("/movie/{provider_id}"),
                &[("append_to_response", "credits")],
            )
            .await?;

        Ok(parse_movie_record(&data))
    }
}

fn parse_search_results(data: &serde_json::Value) -> Vec<CandidateRef> {
    let results = data["results"].as_array().cloned().unwrap_or_default();

    results
        .iter()
        .take(10)
        .filter_map(|r| {
            let id = r["id"].as_u64()?;
            Some(CandidateRef {
                provider_id: id.to_string(),
                title: r["title"].as_str().unwrap_or_default().to_string(),
                year: r["release_date"].as_str().and_then(parse_year),
            })
        })
        .collect()
}

fn parse_movie_record(data: &serde_json::Value) -> RawMovieRecord {
    // TMDB reports 0.0 for titles nobody has voted on.
    let rating = match data["vote_count"].as_u64() {
        Some(0) => None,
        _ => data["vote_average"].as_f64(),
    };

    RawMovieRecord {
        title: non_blank(data["title"].as_str()),
        year: data["release_date"].as_str().and_then(parse_year),
        rating,
        runtimes: data["runtime"]
            .as_u64()
            .filter(|minutes| *minutes > 0)
            .map(|minutes| Runtime::Entries(vec![minutes.to_string()])),
        genres: data["genres"].as_array().map(|gs| {
            gs.iter()
                .filter_map(|g| g["name"].as_str().map(|s| s.to_string()))
                .collect()
        }),
        languages: data["spoken_languages"].as_array().map(|ls| {
            ls.iter()
                .filter_map(|l| {
                    non_blank(l["english_name"].as_str()).or_else(|| non_blank(l["name"].as_str()))
                })
                .collect()
        }),
        cast: data["credits"]["cast"].as_array().map(|cast| {
            cast.iter()
                .filter_map(|person| {
                    Some(CastEntry {
                        name: non_blank(person["name"].as_str())?,
                        character: non_blank(person["character"].as_str()),
                    })
                })
                .collect()
        }),
        plot: non_blank(data["overview"].as_str()).map(Synopsis::Single),
        plot_outline: non_blank(data["tagline"].as_str()).map(Synopsis::Single),
        cover_url: data["poster_path"]
            .as_str()
            .map(|p| format!("{IMAGE_BASE}/w500{p}")),
        full_size_cover_url: data["poster_path"]
            .as_str()
            .map(|p| format!("{IMAGE_BASE}/original{p}")),
        imdb_id: non_blank(data["imdb_id"].as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_movie_record_from_json() {
        let json = serde_json::json!({
            "id": 27205,
            "imdb_id": "tt1375666",
            "title": "Inception",
            "overview": "Cobb, a skilled thief who commits corporate espionage...",
            "tagline": "Your mind is the scene of the crime.",
            "release_date": "2010-07-15",
            "runtime": 148,
            "vote_average": 8.4,
            "vote_count": 35000,
            "poster_path": "/poster.jpg",
            "genres": [
                { "id": 28, "name": "Action" },
                { "id": 878, "name": "Science Fiction" }
            ],
            "spoken_languages": [
                { "english_name": "English", "iso_639_1": "en", "name": "English" },
                { "english_name": "", "iso_639_1": "ja", "name": "日本語" }
            ],
            "credits": {
                "cast": [
                    { "name": "Leonardo DiCaprio", "character": "Cobb" },
                    { "name": "Joseph Gordon-Levitt", "character": "Arthur" }
                ]
            }
        });

        let record = parse_movie_record(&json);
        assert_eq!(record.title.as_deref(), Some("Inception"));
        assert_eq!(record.year, Some(2010));
        assert!((record.rating.unwrap() - 8.4).abs() < 0.01);
        assert_eq!(record.runtimes, Some(Runtime::Entries(vec!["148".into()])));
        assert_eq!(
            record.genres,
            Some(vec!["Action".to_string(), "Science Fiction".to_string()])
        );
        assert_eq!(
            record.languages,
            Some(vec!["English".to_string(), "日本語".to_string()])
        );
        let cast = record.cast.unwrap();
        assert_eq!(cast.len(), 2);
        assert_eq!(cast[0].name, "Leonardo DiCaprio");
        assert_eq!(cast[0].character.as_deref(), Some("Cobb"));
        assert!(record.cover_url.unwrap().ends_with("/w500/poster.jpg"));
        assert!(
            record
                .full_size_cover_url
                .unwrap()
                .ends_with("/original/poster.jpg")
        );
        assert_eq!(record.imdb_id.as_deref(), Some("tt1375666"));
    }

    #[test]
    fn unrated_and_sparse_movie() {
        let json = serde_json::json!({
            "title": "Unreleased Short",
            "vote_average": 0.0,
            "vote_count": 0,
            "runtime": 0,
            "imdb_id": null
        });

        let record = parse_movie_record(&json);
        assert_eq!(record.rating, None);
        assert_eq!(record.runtimes, None);
        assert_eq!(record.year, None);
        assert_eq!(record.cast, None);
        assert_eq!(record.plot, None);
        assert_eq!(record.cover_url, None);
        assert_eq!(record.imdb_id, None);
    }

    #[test]
    fn parse_search_results_keeps_order() {
        let json = serde_json::json!({
            "results": [
                { "id": 27205, "title": "Inception", "release_date": "2010-07-15" },
                { "id": 64956, "title": "Inception: The Cobol Job", "release_date": "" },
                { "title": "missing id" }
            ]
        });

        let results = parse_search_results(&json);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].provider_id, "27205");
        assert_eq!(results[0].year, Some(2010));
        assert_eq!(results[1].title, "Inception: The Cobol Job");
        assert_eq!(results[1].year, None);
    }

    #[test]
    fn empty_search_is_empty_list() {
        let json = serde_json::json!({ "page": 1, "results": [], "total_results": 0 });
        assert!(parse_search_results(&json).is_empty());
    }

    #[test]
    fn blank_api_key_is_rejected() {
        assert!(matches!(
            TmdbClient::new("  ".into(), Duration::from_secs(5)),
            Err(MetadataError::Config(_))
        ));
    }

    #[test]
    fn base_url_override_drops_trailing_slash() {
        let client = TmdbClient::new("key".into(), Duration::from_secs(5))
            .unwrap()
            .with_base_url("http://127.0.0.1:9/3/");
        assert_eq!(client.base_url, "http://127.0.0.1:9/3");
        assert_eq!(client.api_key, "key");
    }
}
