// Responsible for all communication with the place-search provider.

use crate::domain::error::ServiceError;
use crate::domain::model::Restaurant;
use crate::domain::places::{build_query, normalize_response, PlaceSearchResponse};
use crate::infra::config;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{error, info};

/// Restaurant category group code used by the provider.
const FOOD_CATEGORY_GROUP: &str = "FD6";

/// Resolves a text query to normalized restaurants.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// `region` is the user's text; `category` narrows the query when present.
    async fn search(&self, region: &str, category: Option<&str>)
        -> Result<Vec<Restaurant>, ServiceError>;
}

pub struct KakaoPlaceClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl KakaoPlaceClient {
    pub fn new(api_key: String, base_url: String) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Builds a client from the environment, or `None` when no API key is configured.
    pub fn from_env() -> anyhow::Result<Option<Self>> {
        match config::kakao_api_key() {
            Some(key) => Ok(Some(Self::new(key, config::kakao_api_base_url())?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl PlaceSearch for KakaoPlaceClient {
    async fn search(
        &self,
        region: &str,
        category: Option<&str>,
    ) -> Result<Vec<Restaurant>, ServiceError> {
        let query = build_query(region, category);
        let url = format!("{}/v2/local/search/keyword.json", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("KakaoAK {}", self.api_key))
            .query(&[("query", query.as_str()), ("category_group_code", FOOD_CATEGORY_GROUP)])
            .send()
            .await
            .map_err(|e| {
                error!("Place search request failed: {}", e);
                ServiceError::upstream(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Place search error: {}", status);
            return Err(ServiceError::upstream(format!(
                "place search answered {}",
                status
            )));
        }

        let body: PlaceSearchResponse = response.json().await.map_err(|e| {
            error!("Place search returned a malformed body: {}", e);
            ServiceError::upstream(format!("malformed place search body: {}", e))
        })?;

        let restaurants = normalize_response(body, region.trim());
        info!(
            "Found {} restaurants for query: {}",
            restaurants.len(),
            query
        );
        Ok(restaurants)
    }
}
