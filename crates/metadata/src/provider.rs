use crate::{MetadataError, RawMovieRecord};

/// A movie database that can search by title and fetch details by id.
///
/// Implementations are stateless pass-throughs to a remote service and are
/// shared across requests behind an `Arc`.
#[async_trait::async_trait]
pub trait MovieProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Search for movies by free-text title.
    ///
    /// Results keep the provider's relevance order. No match is an empty
    /// list, not an error.
    async fn search_by_title(&self, query: &str) -> Result<Vec<CandidateRef>, MetadataError>;

    /// Fetch the full record for an id returned by [`Self::search_by_title`].
    ///
    /// Returns [`MetadataError::NotFound`] if the provider does not know the id.
    async fn fetch_by_id(&self, provider_id: &str) -> Result<RawMovieRecord, MetadataError>;
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CandidateRef {
    pub provider_id: String,
    pub title: String,
    pub year: Option<i32>,
}

/// Leading four-digit year of a date or year-range string (`2010-07-16`, `2008–2013`).
pub(crate) fn parse_year(value: &str) -> Option<i32> {
    value.trim().get(..4).and_then(|y| y.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_from_dates_and_ranges() {
        assert_eq!(parse_year("2010-07-16"), Some(2010));
        assert_eq!(parse_year("2008–2013"), Some(2008));
        assert_eq!(parse_year("1999"), Some(1999));
        assert_eq!(parse_year("N/A"), None);
        assert_eq!(parse_year(""), None);
    }
}
