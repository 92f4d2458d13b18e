//! HTTP source for the restaurant-listing endpoint (`GET /restaurants?region=`).

use crate::app::search_poller::RestaurantSource;
use crate::domain::error::ServiceError;
use crate::domain::model::Restaurant;
use crate::infra::config;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value as JsonValue;
use std::time::Duration;

pub struct HttpRestaurantSource {
    client: Client,
    base_url: String,
}

impl HttpRestaurantSource {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(&config::restaurants_api_url())
    }
}

#[async_trait]
impl RestaurantSource for HttpRestaurantSource {
    /// Non-2xx, a non-array body, or an item that is not restaurant-shaped is an error.
    async fn list_by_region(&self, region: &str) -> Result<Vec<Restaurant>, ServiceError> {
        let response = self
            .client
            .get(format!("{}/restaurants", self.base_url))
            .query(&[("region", region)])
            .send()
            .await
            .map_err(|e| ServiceError::upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::upstream(format!(
                "listing answered {}",
                status
            )));
        }

        let body: JsonValue = response
            .json()
            .await
            .map_err(|e| ServiceError::upstream(format!("listing body is not JSON: {}", e)))?;
        if !body.is_array() {
            return Err(ServiceError::upstream("listing body is not an array"));
        }
        serde_json::from_value(body)
            .map_err(|e| ServiceError::upstream(format!("malformed restaurant in listing: {}", e)))
    }
}
