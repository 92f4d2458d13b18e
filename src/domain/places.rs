//! Normalization of raw place-search records into `Restaurant`s.
//!
//! The provider answers keyword searches with a `documents` array. Each document carries a
//! hierarchical category (`음식점 > 한식 > 국밥`) that is reduced to its trailing label.

use crate::domain::model::{PriceRange, Restaurant, RestaurantId};
use serde::Deserialize;

/// Label used when the provider sends no category at all.
pub const DEFAULT_CATEGORY: &str = "음식점";

const CATEGORY_SEPARATOR: char = '>';

/// Keyword-search response body.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct PlaceSearchResponse {
    #[serde(default)]
    pub documents: Vec<PlaceDocument>,
}

/// One raw place record. Every field is optional: the provider omits freely.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct PlaceDocument {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub place_name: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub address_name: Option<String>,
    #[serde(default)]
    pub road_address_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub place_url: Option<String>,
    #[serde(default)]
    pub x: Option<String>,
    #[serde(default)]
    pub y: Option<String>,
}

/// `"음식점 > 한식 > 국밥"` -> `"국밥"`. Missing or blank -> `DEFAULT_CATEGORY`.
pub fn trailing_category(taxonomy: Option<&str>) -> String {
    taxonomy
        .and_then(|t| t.rsplit(CATEGORY_SEPARATOR).next())
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string()
}

/// Builds the provider query: `"<query> <category>"`, or `"<query> 맛집"` without a category.
pub fn build_query(query: &str, category: Option<&str>) -> String {
    match category.map(str::trim).filter(|c| !c.is_empty()) {
        Some(category) => format!("{} {}", query.trim(), category),
        None => format!("{} 맛집", query.trim()),
    }
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

/// Converts one document at `index` in the response.
///
/// A missing id becomes `ext_<index>`, which is only unique within this response.
pub fn normalize_document(doc: PlaceDocument, index: usize, region: &str) -> Restaurant {
    let id = match non_blank(doc.id) {
        Some(id) => RestaurantId::from(id.as_str()),
        None => RestaurantId::synthetic(index),
    };
    let address = non_blank(doc.road_address_name)
        .or_else(|| non_blank(doc.address_name))
        .unwrap_or_default();

    Restaurant {
        id,
        name: doc.place_name.unwrap_or_default(),
        category: trailing_category(doc.category_name.as_deref()),
        address,
        phone: doc.phone.unwrap_or_default(),
        x: doc.x.as_deref().and_then(|v| v.trim().parse().ok()),
        y: doc.y.as_deref().and_then(|v| v.trim().parse().ok()),
        region: region.to_string(),
        place_url: doc.place_url.unwrap_or_default(),
        image_url: None,
        // The provider has no rating or price data.
        rating: 0.0,
        price_range: PriceRange::Medium,
    }
}

pub fn normalize_response(response: PlaceSearchResponse, region: &str) -> Vec<Restaurant> {
    response
        .documents
        .into_iter()
        .enumerate()
        .map(|(index, doc)| normalize_document(doc, index, region))
        .collect()
}
