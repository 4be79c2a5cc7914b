use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use movieinfo_core::error::{ApiError, ErrorEnvelope};
use movieinfo_metadata::resolver::ResolveError;

/// Newtype wrapper so we can implement `IntoResponse` in this crate.
pub struct AppError(pub ApiError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let envelope = ErrorEnvelope::from(&self.0);
        (status, Json(envelope)).into_response()
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        Self(e)
    }
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        let api = match e {
            ResolveError::EmptyQuery => ApiError::BadRequest(e.to_string()),
            ResolveError::NotFound => ApiError::NotFound(e.to_string()),
            ResolveError::NoProviders | ResolveError::Upstream { .. } => {
                ApiError::Internal(e.to_string())
            }
        };
        Self(api)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use movieinfo_metadata::MetadataError;

    fn status_of(e: ResolveError) -> u16 {
        AppError::from(e).0.status_code()
    }

    #[test]
    fn resolve_errors_map_to_distinct_statuses() {
        assert_eq!(status_of(ResolveError::EmptyQuery), 400);
        assert_eq!(status_of(ResolveError::NotFound), 404);
        assert_eq!(status_of(ResolveError::NoProviders), 500);
        assert_eq!(
            status_of(ResolveError::Upstream {
                provider: "omdb".into(),
                source: MetadataError::Network("timed out".into()),
            }),
            500
        );
    }
}
