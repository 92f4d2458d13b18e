use crate::domain::model::PriceRange;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use utoipa::ToSchema;

/// Image shown for restaurants the listing did not supply one for.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1517248135467-4c7edcad34c4?w=400";

/// Restaurant identifier.
///
/// Numeric when the upstream supplies one; otherwise a positional `ext_<n>` id synthesized by
/// the place-search gateway. Synthetic ids are only unique within a single response and must
/// never be used as a persistence key.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum RestaurantId {
    Numeric(i64),
    Synthetic(String),
}

impl RestaurantId {
    pub fn synthetic(index: usize) -> Self {
        RestaurantId::Synthetic(format!("ext_{}", index))
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, RestaurantId::Synthetic(_))
    }
}

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestaurantId::Numeric(n) => write!(f, "{}", n),
            RestaurantId::Synthetic(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RestaurantId {
    fn from(n: i64) -> Self {
        RestaurantId::Numeric(n)
    }
}

impl From<&str> for RestaurantId {
    fn from(s: &str) -> Self {
        match s.trim().parse::<i64>() {
            Ok(n) => RestaurantId::Numeric(n),
            Err(_) => RestaurantId::Synthetic(s.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for RestaurantId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match JsonValue::deserialize(deserializer)? {
            JsonValue::Number(n) => n
                .as_i64()
                .map(RestaurantId::Numeric)
                .ok_or_else(|| serde::de::Error::custom("restaurant id out of range")),
            JsonValue::String(s) => Ok(RestaurantId::from(s.as_str())),
            other => Err(serde::de::Error::custom(format!(
                "expected restaurant id, got {}",
                other
            ))),
        }
    }
}

/// Immutable snapshot of a place returned by search. Not persisted.
#[derive(Deserialize, Serialize, Debug, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    #[schema(value_type = Object)]
    pub id: RestaurantId,
    pub name: String,
    /// Free-text category in the provider's own taxonomy (e.g. `한식 > 국밥`).
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    /// Longitude.
    #[serde(default, deserialize_with = "de_coordinate")]
    pub x: Option<f64>,
    /// Latitude.
    #[serde(default, deserialize_with = "de_coordinate")]
    pub y: Option<f64>,
    #[serde(default)]
    pub region: String,
    #[serde(default, alias = "externalPlaceUrl")]
    pub place_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub price_range: PriceRange,
}

impl Restaurant {
    /// Identity used for list rendering. Upstream may repeat ids, so the triple is used.
    pub fn render_key(&self) -> String {
        format!("{}-{}-{}", self.id, self.name, self.address)
    }

    pub fn image_url_or_placeholder(&self) -> &str {
        match self.image_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => PLACEHOLDER_IMAGE_URL,
        }
    }

    pub fn with_default_image(mut self) -> Self {
        if self.image_url.as_deref().map_or(true, str::is_empty) {
            self.image_url = Some(PLACEHOLDER_IMAGE_URL.to_string());
        }
        self
    }
}

/// Accepts a JSON number or a numeric string. Anything else becomes `None`.
fn de_coordinate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let v = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(match v {
        Some(JsonValue::Number(n)) => n.as_f64(),
        Some(JsonValue::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}
