//! Search poll controller.
//!
//! The restaurant-listing endpoint is eventually consistent: a region that was never searched
//! before may come back empty until the upstream index catches up. The controller therefore
//! polls on empty results, with a fixed interval and a hard attempt cap, and stops at the first
//! non-empty answer. A failed request (transport error, non-2xx, malformed body) is terminal
//! and is never retried.
//!
//! One search is live per controller. Starting a new one cancels the previous one, which then
//! resolves as `Superseded` instead of delivering stale results.

use crate::domain::error::ServiceError;
use crate::domain::model::Restaurant;
use crate::infra::config;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// The "list restaurants by region" endpoint, as seen by the controller.
#[async_trait]
pub trait RestaurantSource: Send + Sync {
    /// One request. `Ok(vec![])` means "not indexed yet"; `Err` means the request failed.
    async fn list_by_region(&self, region: &str) -> Result<Vec<Restaurant>, ServiceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Wait between an empty answer and the next attempt.
    pub interval: Duration,
    /// Total attempts including the first.
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_attempts: 10,
        }
    }
}

impl PollPolicy {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn from_env() -> Self {
        Self::new(
            Duration::from_millis(config::search_poll_interval_ms()),
            config::search_poll_max_attempts(),
        )
    }
}

#[derive(Debug)]
pub enum SearchOutcome {
    /// Blank region; nothing was requested.
    Skipped,
    /// First non-empty answer, placeholder images filled in.
    Found(Vec<Restaurant>),
    /// Every attempt came back empty. "No results", not an error.
    Exhausted,
    /// A request failed; polling stopped immediately.
    Failed(ServiceError),
    /// A newer search on the same controller took over.
    Superseded,
}

impl SearchOutcome {
    /// Collapses the outcome into the plain result list the caller renders.
    pub fn into_restaurants(self) -> Vec<Restaurant> {
        match self {
            SearchOutcome::Found(restaurants) => restaurants,
            _ => Vec::new(),
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, SearchOutcome::Superseded)
    }
}

pub struct SearchPollController {
    source: Arc<dyn RestaurantSource>,
    policy: PollPolicy,
    generation: AtomicU64,
    current: Mutex<CancellationToken>,
}

impl SearchPollController {
    pub fn new(source: Arc<dyn RestaurantSource>, policy: PollPolicy) -> Self {
        Self {
            source,
            policy,
            generation: AtomicU64::new(0),
            current: Mutex::new(CancellationToken::new()),
        }
    }

    pub fn policy(&self) -> PollPolicy {
        self.policy
    }

    /// Cancels the in-flight search, if any, without starting a new one.
    pub async fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.current.lock().await.cancel();
    }

    pub async fn search(&self, region: &str) -> SearchOutcome {
        let region = region.trim();
        if region.is_empty() {
            return SearchOutcome::Skipped;
        }

        let (generation, token) = {
            let mut current = self.current.lock().await;
            current.cancel();
            let token = CancellationToken::new();
            *current = token.clone();
            (self.generation.fetch_add(1, Ordering::SeqCst) + 1, token)
        };

        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => SearchOutcome::Superseded,
            outcome = self.poll(region) => outcome,
        };

        // A newer search may have started between the last await and here.
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Search for '{}' superseded", region);
            return SearchOutcome::Superseded;
        }
        outcome
    }

    async fn poll(&self, region: &str) -> SearchOutcome {
        let max_attempts = self.policy.max_attempts;

        for attempt in 1..=max_attempts {
            let restaurants = match self.source.list_by_region(region).await {
                Ok(restaurants) => restaurants,
                Err(e) => {
                    warn!("Listing for '{}' failed on attempt {}: {}", region, attempt, e);
                    return SearchOutcome::Failed(e);
                }
            };

            if !restaurants.is_empty() {
                info!(
                    "Listing for '{}' returned {} restaurants on attempt {}",
                    region,
                    restaurants.len(),
                    attempt
                );
                return SearchOutcome::Found(
                    restaurants
                        .into_iter()
                        .map(Restaurant::with_default_image)
                        .collect(),
                );
            }

            debug!("Listing for '{}' empty on attempt {}/{}", region, attempt, max_attempts);
            if attempt < max_attempts {
                tokio::time::sleep(self.policy.interval).await;
            }
        }

        info!("No results for '{}' after {} attempts", region, max_attempts);
        SearchOutcome::Exhausted
    }
}
