//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use moodfood::app::search_poller::RestaurantSource;
use moodfood::infra::kakao::PlaceSearch;
use moodfood::transport;
use moodfood::{MemoryKvStore, Restaurant, RestaurantId, ReviewService, ServiceError};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn restaurant(id: i64, name: &str, category: &str) -> Restaurant {
    Restaurant {
        id: RestaurantId::Numeric(id),
        name: name.to_string(),
        category: category.to_string(),
        address: format!("{} address", name),
        phone: String::new(),
        x: Some(127.0),
        y: Some(37.5),
        region: "gangnam".to_string(),
        place_url: String::new(),
        image_url: None,
        rating: 0.0,
        price_range: Default::default(),
    }
}

pub fn names(restaurants: &[Restaurant]) -> Vec<&str> {
    restaurants.iter().map(|r| r.name.as_str()).collect()
}

/// Listing source that replays queued answers per region, then answers empty forever.
#[derive(Default)]
pub struct ScriptedSource {
    answers: Mutex<HashMap<String, VecDeque<Result<Vec<Restaurant>, ServiceError>>>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, region: &str, answer: Result<Vec<Restaurant>, ServiceError>) {
        self.answers
            .lock()
            .unwrap()
            .entry(region.to_string())
            .or_default()
            .push_back(answer);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RestaurantSource for ScriptedSource {
    async fn list_by_region(&self, region: &str) -> Result<Vec<Restaurant>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers
            .lock()
            .unwrap()
            .get_mut(region)
            .and_then(|q| q.pop_front())
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Place search that answers empty for the first `empty_calls` requests, then `results`.
/// Models an upstream index that has not caught up yet.
pub struct LaggingPlaces {
    empty_calls: usize,
    results: Vec<Restaurant>,
    calls: AtomicUsize,
}

impl LaggingPlaces {
    pub fn new(empty_calls: usize, results: Vec<Restaurant>) -> Self {
        Self {
            empty_calls,
            results,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlaceSearch for LaggingPlaces {
    async fn search(
        &self,
        region: &str,
        _category: Option<&str>,
    ) -> Result<Vec<Restaurant>, ServiceError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if region == "broken" {
            return Err(ServiceError::upstream("provider answered 500"));
        }
        if n < self.empty_calls {
            return Ok(Vec::new());
        }
        Ok(self.results.clone())
    }
}

/// Starts the API on an ephemeral loopback port and returns its base URL.
pub async fn spawn_server(
    places: Option<Arc<dyn PlaceSearch>>,
) -> Result<(String, tokio::task::JoinHandle<()>), Box<dyn std::error::Error>> {
    let state = transport::http::AppState {
        reviews: ReviewService::new(Arc::new(MemoryKvStore::new())),
        places,
    };
    let router = transport::http::create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let server = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Ok((format!("http://{}", addr), server))
}
