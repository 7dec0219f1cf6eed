use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use foursquare_client::FoursquareClient;
use placebot_core::audit::AuditLog;
use placebot_core::reasoning::OpenAiReasoner;
use placebot_core::{CategoryTaxonomy, ChatEngine, Config};

mod rest;

pub struct AppState {
    pub engine: ChatEngine,
    pub places: FoursquareClient,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    let places = FoursquareClient::new(config.foursquare_api_key.clone());

    info!("Fetching category taxonomy from Foursquare");
    let taxonomy = match CategoryTaxonomy::fetch(&places).await {
        Ok(taxonomy) => taxonomy,
        Err(e) => {
            warn!(error = %e, "Taxonomy fetch failed, continuing with free-text search only");
            CategoryTaxonomy::empty()
        }
    };

    let reasoner = OpenAiReasoner::new(config.openai_api_key.clone(), config.openai_model.clone());
    let audit = AuditLog::new(config.log_dir.clone());

    let engine = ChatEngine::new(
        Arc::new(places.clone()),
        Arc::new(reasoner),
        taxonomy,
        audit,
    );

    let state = Arc::new(AppState { engine, places });

    let app = Router::new()
        // Health check
        .route("/", get(rest::health))
        // Raw places search passthrough
        .route("/chatbot/foursquare", get(rest::foursquare_search))
        // Full chatbot pipeline
        .route("/chatbot/query", post(rest::chatbot_query))
        // Category enumeration via dummy search
        .route("/chatbot/categories", get(rest::categories_fallback))
        .with_state(state)
        // CORS: the frontend is served from a different origin
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Logging layer: method + path + status + latency only (no query params)
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        );

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("Placebot API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
