//! Provider record → `MovieInfo` mapping.
//!
//! Never fails: missing data becomes `None` or an empty list.

use movieinfo_core::types::{MAX_ACTORS, MovieInfo};

use crate::{RawMovieRecord, Runtime, Synopsis, non_blank};

/// Separator between plot text and its `::author` attribution.
const ATTRIBUTION_MARKER: &str = "::";

/// Build the response record from a provider record.
///
/// `fallback_title` is used when the provider record carries no title.
pub fn normalize(record: RawMovieRecord, fallback_title: &str) -> MovieInfo {
    let story_line = first_synopsis(record.plot.as_ref())
        .or_else(|| first_synopsis(record.plot_outline.as_ref()));

    MovieInfo {
        title: non_blank(record.title.as_deref()).unwrap_or_else(|| fallback_title.to_string()),
        year: record.year,
        rating: record.rating,
        duration: record.runtimes.as_ref().and_then(duration),
        genre: record.genres.unwrap_or_default(),
        language: record.languages.unwrap_or_default(),
        actors: record
            .cast
            .unwrap_or_default()
            .into_iter()
            .take(MAX_ACTORS)
            .map(|person| person.to_string())
            .collect(),
        story_line,
        poster: non_blank(record.cover_url.as_deref())
            .or_else(|| non_blank(record.full_size_cover_url.as_deref())),
        imdb_id: imdb_id(record.imdb_id.as_deref()),
    }
}

fn duration(runtime: &Runtime) -> Option<String> {
    match runtime {
        Runtime::Entries(values) => {
            let parts: Vec<&str> = values
                .iter()
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(":"))
            }
        }
        Runtime::Single(value) => non_blank(Some(value.as_str())),
    }
}

fn first_synopsis(synopsis: Option<&Synopsis>) -> Option<String> {
    let first = match synopsis? {
        Synopsis::Entries(entries) => entries.first()?,
        Synopsis::Single(text) => text,
    };
    let text = first
        .split_once(ATTRIBUTION_MARKER)
        .map_or(first.as_str(), |(text, _)| text);
    non_blank(Some(text))
}

fn imdb_id(raw: Option<&str>) -> Option<String> {
    let id = non_blank(raw)?;
    let digits = id.strip_prefix("tt").unwrap_or(&id);
    if digits.is_empty() {
        return None;
    }
    Some(format!("tt{digits}"))
}
