//! Recommendation filter & ranker.
//!
//! Pure and deterministic. The cuisine filter runs first, then the mood re-ordering; without a
//! profile neither step applies and the input comes back unchanged.
//!
//! Category matching is a loose textual overlap. Provider categories vary in
//! granularity (`한식 > 국밥` vs `한식`), so a keyword matches when it is contained in the
//! category OR the category is contained in the keyword.

use crate::domain::model::{Mood, Restaurant, UserProfile};

/// Maps a cuisine preference tag to the category keywords it accepts.
/// Unknown tags accept nothing.
pub fn cuisine_keywords(preference: &str) -> &'static [&'static str] {
    match preference {
        "korean" => &["한식", "한국음식"],
        "japanese" => &["일식", "일본음식"],
        "chinese" => &["중식", "중국음식"],
        "western" => &["양식", "서양음식"],
        "italian" => &["이탈리안", "이탈리아음식"],
        "dessert" => &["디저트", "카페", "베이커리"],
        _ => &[],
    }
}

/// Bidirectional containment. An empty category never matches.
pub fn category_overlaps(category: &str, keyword: &str) -> bool {
    if category.is_empty() {
        return false;
    }
    category.contains(keyword) || keyword.contains(category)
}

/// Whether the category contains one of the mood's preferred keywords.
pub fn matches_mood(category: &str, mood: Mood) -> bool {
    !category.is_empty()
        && mood
            .preferred_categories()
            .iter()
            .any(|keyword| category.contains(keyword))
}

/// Keeps restaurants whose category overlaps any keyword of any preference.
/// An empty preference set passes everything through.
pub fn filter_by_cuisine(restaurants: Vec<Restaurant>, profile: &UserProfile) -> Vec<Restaurant> {
    if profile.cuisine_preferences.is_empty() {
        return restaurants;
    }

    let accepted: Vec<&str> = profile
        .cuisine_preferences
        .iter()
        .flat_map(|pref| cuisine_keywords(pref).iter().copied())
        .collect();

    restaurants
        .into_iter()
        .filter(|r| accepted.iter().any(|kw| category_overlaps(&r.category, kw)))
        .collect()
}

/// Stable partition: mood matches first, everything else after, relative order kept.
pub fn order_by_mood(mut restaurants: Vec<Restaurant>, mood: Mood) -> Vec<Restaurant> {
    // `sort_by_key` is stable; `false` (a match) sorts first.
    restaurants.sort_by_key(|r| !matches_mood(&r.category, mood));
    restaurants
}

pub fn rank(
    restaurants: &[Restaurant],
    profile: Option<&UserProfile>,
    mood: Option<Mood>,
) -> Vec<Restaurant> {
    let Some(profile) = profile else {
        return restaurants.to_vec();
    };

    let filtered = filter_by_cuisine(restaurants.to_vec(), profile);
    match mood {
        Some(mood) => order_by_mood(filtered, mood),
        None => filtered,
    }
}
