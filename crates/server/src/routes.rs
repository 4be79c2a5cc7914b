use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use movieinfo_core::error::ApiError;
use movieinfo_core::types::MovieInfo;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/movie", get(get_movie))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    providers: Vec<String>,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        providers: state.resolver.provider_names(),
    })
}

// ---------------------------------------------------------------------------
// Movie lookup
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct MovieQuery {
    q: Option<String>,
}

async fn get_movie(
    State(state): State<AppState>,
    Query(query): Query<MovieQuery>,
) -> Result<Json<MovieInfo>, AppError> {
    let q = query
        .q
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("query parameter `q` is required".into()))?;

    let info = state.resolver.resolve(&q).await?;
    Ok(Json(info))
}
