use std::sync::Arc;

use async_trait::async_trait;
use foursquare_client::{FoursquareClient, Place, SearchFilter};
use serde::Serialize;
use tracing::{info, warn};

use crate::audit::AuditLog;
use crate::error::PlacebotError;
use crate::filter::filter_by_categories;
use crate::ranking::rank_places;
use crate::reasoning::Reasoner;
use crate::taxonomy::CategoryTaxonomy;

pub const NO_RESULTS_REPLY: &str = "No relevant places found nearby.";

const FALLBACK_PREAMBLE: &str = "Based on local analysis, here are the top suggested places:";
const FALLBACK_TOP_N: usize = 3;

pub const DEFAULT_LIMIT: u32 = 5;

/// Places search seam. Implemented by `FoursquareClient`; tests substitute
/// in-memory stubs.
#[async_trait]
pub trait PlacesSearch: Send + Sync {
    async fn search(
        &self,
        filter: &SearchFilter,
        latitude: f64,
        longitude: f64,
        limit: u32,
    ) -> Result<Vec<Place>, PlacebotError>;
}

#[async_trait]
impl PlacesSearch for FoursquareClient {
    async fn search(
        &self,
        filter: &SearchFilter,
        latitude: f64,
        longitude: f64,
        limit: u32,
    ) -> Result<Vec<Place>, PlacebotError> {
        FoursquareClient::search(self, filter, latitude, longitude, limit)
            .await
            .map_err(|e| PlacebotError::ProviderUnavailable(e.to_string()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub reply: String,
    pub places: Vec<Place>,
}

/// Composes the pipeline: resolve -> search -> (filter) -> reason-or-rank.
///
/// The taxonomy is built once at startup and held read-only here; no state is
/// mutated per request.
pub struct ChatEngine {
    places: Arc<dyn PlacesSearch>,
    reasoner: Arc<dyn Reasoner>,
    taxonomy: CategoryTaxonomy,
    audit: AuditLog,
    category_filter: Option<Vec<u32>>,
}

impl ChatEngine {
    pub fn new(
        places: Arc<dyn PlacesSearch>,
        reasoner: Arc<dyn Reasoner>,
        taxonomy: CategoryTaxonomy,
        audit: AuditLog,
    ) -> Self {
        Self {
            places,
            reasoner,
            taxonomy,
            audit,
            category_filter: None,
        }
    }

    /// Narrow every search to an allow-listed category set (the
    /// cafe/restaurant variant).
    pub fn with_category_filter(mut self, allowed: Vec<u32>) -> Self {
        self.category_filter = Some(allowed);
        self
    }

    /// Resolve the query against the taxonomy, run the places search, and
    /// record the call in the audit log. Exactly one of a category filter or
    /// the raw query text goes out per call.
    pub async fn search_places(
        &self,
        query: &str,
        latitude: f64,
        longitude: f64,
        limit: u32,
    ) -> Result<Vec<Place>, PlacebotError> {
        let filter = match self.taxonomy.resolve(query) {
            Some(ids) => {
                info!(query, category_ids = ?ids, "Resolved query to category filter");
                SearchFilter::Categories(ids.to_vec())
            }
            None => SearchFilter::Query(query.to_string()),
        };

        let mut results = self
            .places
            .search(&filter, latitude, longitude, limit)
            .await?;

        if let Some(allowed) = &self.category_filter {
            results = filter_by_categories(results, allowed);
        }

        // Auditing must never block a response.
        if let Err(e) = self.audit.record(query, latitude, longitude, &results) {
            warn!(error = %e, "Audit log write failed, continuing");
        }

        Ok(results)
    }

    /// Full pipeline. Always produces a reply; provider and reasoning
    /// failures degrade rather than propagate.
    pub async fn handle_query(
        &self,
        query: &str,
        latitude: f64,
        longitude: f64,
        limit: u32,
    ) -> ChatReply {
        let places = match self.search_places(query, latitude, longitude, limit).await {
            Ok(places) => places,
            Err(e) => {
                warn!(error = %e, "Places search failed, treating as no results");
                Vec::new()
            }
        };

        if places.is_empty() {
            return ChatReply {
                reply: NO_RESULTS_REPLY.to_string(),
                places: Vec::new(),
            };
        }

        match self.reasoner.reason(query, &places).await {
            Ok(narrative) => ChatReply {
                reply: narrative,
                places,
            },
            Err(e) => {
                warn!(error = %e, "Reasoning unavailable, using local ranking");
                let ranked = rank_places(query, places);
                let bullets = ranked
                    .iter()
                    .take(FALLBACK_TOP_N)
                    .map(|p| format!("- {}", p.name))
                    .collect::<Vec<_>>()
                    .join("\n");
                ChatReply {
                    reply: format!("{FALLBACK_PREAMBLE}\n{bullets}"),
                    places: ranked,
                }
            }
        }
    }
}
