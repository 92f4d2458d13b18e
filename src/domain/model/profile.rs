//! Client-owned session types: the user profile and the transient mood selector.

use crate::domain::error::ServiceError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Deserialize, Serialize, Debug, ToSchema, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PriceRange {
    Low,
    #[default]
    Medium,
    High,
}

/// Created once at onboarding and left alone until the user resets it.
#[derive(Deserialize, Serialize, Debug, ToSchema, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    /// Cuisine tags such as `korean` or `dessert`.
    pub cuisine_preferences: BTreeSet<String>,
    #[serde(default)]
    pub price_range: PriceRange,
    #[serde(default)]
    pub dietary_restrictions: BTreeSet<String>,
}

impl UserProfile {
    /// Builds a profile the way onboarding accepts it: a name and at least one cuisine.
    pub fn new(
        name: &str,
        cuisine_preferences: impl IntoIterator<Item = impl Into<String>>,
        price_range: PriceRange,
        dietary_restrictions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, ServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::validation("name is required"));
        }
        let cuisine_preferences: BTreeSet<String> =
            cuisine_preferences.into_iter().map(Into::into).collect();
        if cuisine_preferences.is_empty() {
            return Err(ServiceError::validation("select at least one cuisine"));
        }
        Ok(Self {
            name: name.to_string(),
            cuisine_preferences,
            price_range,
            dietary_restrictions: dietary_restrictions.into_iter().map(Into::into).collect(),
        })
    }
}

/// Emotional-state selector. Used only to re-rank results, never to filter them out.
#[derive(Deserialize, Serialize, Debug, ToSchema, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Sad,
    Stressed,
    Tired,
    Energetic,
    Romantic,
    Casual,
    Excited,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Stressed,
        Mood::Tired,
        Mood::Energetic,
        Mood::Romantic,
        Mood::Casual,
        Mood::Excited,
    ];

    /// Category keywords this mood favours, in priority order.
    pub fn preferred_categories(self) -> &'static [&'static str] {
        match self {
            Mood::Happy => &["일식", "이탈리안", "디저트", "카페"],
            Mood::Sad => &["한식", "양식", "디저트", "카페"],
            Mood::Stressed => &["한식", "중식", "양식"],
            Mood::Tired => &["한식", "중식"],
            Mood::Energetic => &["이탈리안", "중식", "양식"],
            Mood::Romantic => &["일식", "이탈리안"],
            Mood::Casual => &["양식", "디저트", "카페"],
            Mood::Excited => &["중식", "한식", "양식"],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Stressed => "stressed",
            Mood::Tired => "tired",
            Mood::Energetic => "energetic",
            Mood::Romantic => "romantic",
            Mood::Casual => "casual",
            Mood::Excited => "excited",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ServiceError::validation(format!("unknown mood '{}'", s)))
    }
}
