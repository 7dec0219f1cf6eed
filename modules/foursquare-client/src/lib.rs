pub mod error;
pub mod types;

pub use error::{FoursquareError, Result};
pub use types::{Category, CategoryNode, Location, Place, SearchResponse};

use std::time::Duration;

const BASE_URL: &str = "https://api.foursquare.com/v3";

/// Bound on every outbound call so a slow provider cannot hold a request open.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Exactly one of a free-text term or a category filter is sent per search,
/// never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFilter {
    Query(String),
    Categories(Vec<u32>),
}

#[derive(Clone)]
pub struct FoursquareClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl FoursquareClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Search places near a coordinate. `ll` is "<lat>,<lon>" per the v3 API.
    pub async fn search(
        &self,
        filter: &SearchFilter,
        latitude: f64,
        longitude: f64,
        limit: u32,
    ) -> Result<Vec<Place>> {
        let url = format!("{}/places/search", self.base_url);
        let ll = format!("{latitude},{longitude}");

        let mut params = vec![("ll", ll), ("limit", limit.to_string())];
        match filter {
            SearchFilter::Query(q) => params.push(("query", q.clone())),
            SearchFilter::Categories(ids) => {
                let joined = ids
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                params.push(("categories", joined));
            }
        }

        tracing::debug!(?filter, latitude, longitude, limit, "Foursquare places search");

        let resp = self
            .client
            .get(&url)
            .header("Authorization", &self.api_key)
            .header("accept", "application/json")
            .query(&params)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FoursquareError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let response: SearchResponse = resp.json().await?;
        tracing::debug!(count = response.results.len(), "Foursquare search returned");
        Ok(response.results)
    }

    /// Fetch the full category taxonomy tree. Called once at startup.
    pub async fn fetch_categories(&self) -> Result<Vec<CategoryNode>> {
        let url = format!("{}/places/categories", self.base_url);

        let resp = self
            .client
            .get(&url)
            .header("Authorization", &self.api_key)
            .header("accept", "application/json")
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FoursquareError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let nodes: Vec<CategoryNode> = resp.json().await?;
        Ok(nodes)
    }
}
