use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::warn;

use foursquare_client::{Category, SearchFilter};
use placebot_core::engine::DEFAULT_LIMIT;

use crate::AppState;

// Fixed dummy search used to enumerate categories when the taxonomy endpoint
// is not an option (the original frontend's fallback path).
const CATEGORY_PROBE_QUERY: &str = "restaurant";
const CATEGORY_PROBE_LIMIT: u32 = 50;
const CATEGORY_PROBE_LL: (f64, f64) = (13.0067, 80.2570);

// --- Request bodies ---

#[derive(Deserialize)]
pub struct SearchParams {
    query: String,
    latitude: f64,
    longitude: f64,
    limit: Option<u32>,
}

#[derive(Deserialize)]
pub struct ChatbotQuery {
    query: String,
    latitude: f64,
    longitude: f64,
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

// --- Handlers ---

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Placebot backend is running with dynamic category mapping!"
    }))
}

/// Raw search passthrough: category-resolved search plus audit logging, no
/// reasoning. Provider failure comes back as an explicit error payload, never
/// a crash.
pub async fn foursquare_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    match state
        .engine
        .search_places(&params.query, params.latitude, params.longitude, limit)
        .await
    {
        Ok(results) => Json(serde_json::json!({ "results": results })),
        Err(e) => {
            warn!(error = %e, "Places search failed");
            Json(serde_json::json!({ "results": [], "error": e.to_string() }))
        }
    }
}

/// Full chatbot pipeline: search, reason, fall back to local ranking.
pub async fn chatbot_query(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatbotQuery>,
) -> impl IntoResponse {
    let reply = state
        .engine
        .handle_query(
            &payload.query,
            payload.latitude,
            payload.longitude,
            payload.limit,
        )
        .await;

    Json(serde_json::json!({
        "reply": reply.reply,
        "places": { "results": reply.places },
    }))
}

/// Enumerate categories by running a dummy search and collecting the distinct
/// categories seen across its results.
pub async fn categories_fallback(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let filter = SearchFilter::Query(CATEGORY_PROBE_QUERY.to_string());
    let (latitude, longitude) = CATEGORY_PROBE_LL;

    match state
        .places
        .search(&filter, latitude, longitude, CATEGORY_PROBE_LIMIT)
        .await
    {
        Ok(results) => {
            let mut seen: Vec<Category> = Vec::new();
            for place in &results {
                for category in &place.categories {
                    if !seen.iter().any(|c| c.id == category.id) {
                        seen.push(category.clone());
                    }
                }
            }
            Json(serde_json::json!({ "categories": seen }))
        }
        Err(e) => {
            warn!(error = %e, "Category enumeration probe failed");
            Json(serde_json::json!({
                "error": "Failed to fetch categories",
                "status": e.status(),
            }))
        }
    }
}
