use serde::{Deserialize, Serialize};

/// Movie metadata as returned by `GET /movie`.
///
/// The shape is fixed regardless of which provider answered. Optional fields
/// serialize as `null` and list fields as `[]`, never omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct MovieInfo {
    pub title: String,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    /// Runtime values in minutes, joined with `:`.
    pub duration: Option<String>,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default)]
    pub language: Vec<String>,
    /// Top-billed cast, at most [`MAX_ACTORS`] names in provider order.
    #[serde(default)]
    pub actors: Vec<String>,
    pub story_line: Option<String>,
    pub poster: Option<String>,
    /// Always `tt`-prefixed when present.
    pub imdb_id: Option<String>,
}

pub const MAX_ACTORS: usize = 10;
