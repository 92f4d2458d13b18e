//! Client session state as an explicit value driven by a pure `update` function.
//!
//! Nothing here performs I/O. Callers run the search controller and the review client, then
//! feed the results back in as actions.

use crate::app::search_poller::SearchOutcome;
use crate::domain::model::{Mood, Restaurant, Review, UserProfile};
use crate::domain::ranking::rank;
use std::collections::HashSet;

/// Reviews of the open restaurant plus which of them the current user liked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewBoard {
    pub reviews: Vec<Review>,
    pub liked: HashSet<String>,
}

impl ReviewBoard {
    pub fn is_liked(&self, review_id: &str) -> bool {
        self.liked.contains(review_id)
    }

    /// Users cannot mark their own reviews as helpful.
    pub fn can_like(&self, review: &Review, user_name: &str) -> bool {
        review.user_name.trim() != user_name.trim()
    }

    fn apply_like(&mut self, review_id: &str, liked: bool, likes: u64) {
        if liked {
            self.liked.insert(review_id.to_string());
        } else {
            self.liked.remove(review_id);
        }
        if let Some(review) = self.reviews.iter_mut().find(|r| r.id == review_id) {
            review.likes = likes;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub profile: Option<UserProfile>,
    pub mood: Option<Mood>,
    pub region: String,
    /// Unranked results of the last finished search.
    pub restaurants: Vec<Restaurant>,
    pub is_loading: bool,
    pub has_searched: bool,
    pub selected: Option<Restaurant>,
    pub board: ReviewBoard,
}

#[derive(Debug)]
pub enum SessionAction {
    ProfileCompleted(UserProfile),
    ProfileReset,
    MoodSelected(Mood),
    MoodCleared,
    SearchStarted { region: String },
    /// Outcome of the search started for `region`.
    SearchFinished { region: String, outcome: SearchOutcome },
    RestaurantOpened(Restaurant),
    RestaurantClosed,
    ReviewsRefreshed(ReviewBoard),
    LikeToggled { review_id: String, liked: bool, likes: u64 },
}

/// Why the visible list is empty, when it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    NoResults,
    NoPreferenceMatch,
}

pub fn update(mut state: SessionState, action: SessionAction) -> SessionState {
    match action {
        SessionAction::ProfileCompleted(profile) => state.profile = Some(profile),
        SessionAction::ProfileReset => state.profile = None,
        SessionAction::MoodSelected(mood) => state.mood = Some(mood),
        SessionAction::MoodCleared => state.mood = None,
        SessionAction::SearchStarted { region } => {
            let region = region.trim();
            // Blank input does nothing, same as the controller.
            if region.is_empty() {
                return state;
            }
            state.region = region.to_string();
            state.mood = None;
            state.restaurants.clear();
            state.is_loading = true;
            state.has_searched = true;
        }
        SessionAction::SearchFinished { region, outcome } => {
            // Late answers from an older search never replace newer state.
            if outcome.is_superseded() || !state.is_loading || region.trim() != state.region {
                return state;
            }
            state.restaurants = outcome.into_restaurants();
            state.is_loading = false;
        }
        SessionAction::RestaurantOpened(restaurant) => {
            state.selected = Some(restaurant);
            state.board = ReviewBoard::default();
        }
        SessionAction::RestaurantClosed => {
            state.selected = None;
            state.board = ReviewBoard::default();
        }
        SessionAction::ReviewsRefreshed(board) => state.board = board,
        SessionAction::LikeToggled {
            review_id,
            liked,
            likes,
        } => state.board.apply_like(&review_id, liked, likes),
    }
    state
}

impl SessionState {
    /// Results after the preference filter and the mood ordering.
    pub fn visible_restaurants(&self) -> Vec<Restaurant> {
        rank(&self.restaurants, self.profile.as_ref(), self.mood)
    }

    /// `None` while loading, before any search, or when something is visible.
    pub fn empty_reason(&self) -> Option<EmptyReason> {
        if self.is_loading || !self.has_searched {
            return None;
        }
        if self.restaurants.is_empty() {
            return Some(EmptyReason::NoResults);
        }
        if self.visible_restaurants().is_empty() {
            return Some(EmptyReason::NoPreferenceMatch);
        }
        None
    }

    /// Whether the mood selector should be offered.
    pub fn can_select_mood(&self) -> bool {
        self.has_searched && !self.restaurants.is_empty()
    }
}
