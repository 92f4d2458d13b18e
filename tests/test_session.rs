mod common;

use chrono::Utc;
use common::{restaurant, ScriptedSource};
use moodfood::app::{
    update, EmptyReason, PollPolicy, ReviewBoard, SearchOutcome, SearchPollController,
    SessionAction, SessionState,
};
use moodfood::{Mood, PriceRange, Review, ServiceError, UserProfile};
use std::sync::Arc;

fn korean_fan() -> UserProfile {
    UserProfile::new("minji", ["korean"], PriceRange::Low, Vec::<String>::new()).unwrap()
}

fn review(id: &str, user: &str, likes: u64) -> Review {
    Review {
        id: id.to_string(),
        restaurant_id: "1".to_string(),
        user_name: user.to_string(),
        rating: 4,
        comment: "good".to_string(),
        created_at: Utc::now(),
        likes,
    }
}

fn searched(state: SessionState, region: &str) -> SessionState {
    update(
        state,
        SessionAction::SearchStarted {
            region: region.to_string(),
        },
    )
}

fn finished(region: &str, outcome: SearchOutcome) -> SessionAction {
    SessionAction::SearchFinished {
        region: region.to_string(),
        outcome,
    }
}

#[test]
fn profile_needs_name_and_cuisine() {
    let err = UserProfile::new(" ", ["korean"], PriceRange::Medium, Vec::<String>::new()).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let err = UserProfile::new("minji", Vec::<String>::new(), PriceRange::Medium, ["vegan"]).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let profile = korean_fan();
    assert_eq!(profile.name, "minji");
    assert!(profile.cuisine_preferences.contains("korean"));
}

#[test]
fn moods_parse_from_tags() {
    assert_eq!("romantic".parse::<Mood>().unwrap(), Mood::Romantic);
    assert_eq!(" Tired ".parse::<Mood>().unwrap(), Mood::Tired);
    assert!("hangry".parse::<Mood>().is_err());
    for mood in Mood::ALL {
        assert_eq!(mood.to_string().parse::<Mood>().unwrap(), mood);
    }
}

#[test]
fn blank_search_changes_nothing() {
    let state = update(SessionState::default(), SessionAction::MoodSelected(Mood::Happy));
    let after = searched(state.clone(), "   ");
    assert_eq!(after, state);
    assert!(!after.is_loading);
}

#[test]
fn new_search_clears_mood_and_results() {
    let mut state = searched(SessionState::default(), "gangnam");
    state = update(
        state,
        finished("gangnam", SearchOutcome::Found(vec![restaurant(1, "A", "한식")])),
    );
    state = update(state, SessionAction::MoodSelected(Mood::Sad));

    let state = searched(state, " hongdae ");
    assert_eq!(state.region, "hongdae");
    assert_eq!(state.mood, None);
    assert!(state.restaurants.is_empty());
    assert!(state.is_loading);
    assert_eq!(state.empty_reason(), None);
}

#[test]
fn late_answer_from_older_search_is_ignored() {
    let mut state = searched(SessionState::default(), "gangnam");
    state = searched(state, "hongdae");
    state = update(
        state,
        finished("hongdae", SearchOutcome::Found(vec![restaurant(2, "Fresh", "한식")])),
    );

    // the gangnam search resolves afterwards, superseded or not
    let after = update(state.clone(), finished("gangnam", SearchOutcome::Superseded));
    assert_eq!(after, state);
    let after = update(state.clone(), finished("gangnam", SearchOutcome::Exhausted));
    assert_eq!(after, state);
    let after = update(
        state.clone(),
        finished("gangnam", SearchOutcome::Found(vec![restaurant(1, "Stale", "한식")])),
    );
    assert_eq!(after, state);

    assert_eq!(state.region, "hongdae");
    assert_eq!(state.restaurants.len(), 1);
    assert!(!state.is_loading);
}

#[test]
fn superseded_outcome_keeps_the_search_loading() {
    let state = searched(SessionState::default(), "gangnam");
    let state = update(state, finished("gangnam", SearchOutcome::Superseded));
    assert!(state.is_loading);
    assert_eq!(state.empty_reason(), None);
}

#[test]
fn finished_without_a_pending_search_is_ignored() {
    let state = update(
        SessionState::default(),
        finished("gangnam", SearchOutcome::Found(vec![restaurant(1, "A", "한식")])),
    );
    assert!(state.restaurants.is_empty());
    assert!(!state.has_searched);
}

#[tokio::test(start_paused = true)]
async fn controller_outcomes_drive_the_session_in_any_order() {
    let source = Arc::new(ScriptedSource::new());
    source.push("hongdae", Ok(vec![restaurant(2, "Fresh", "한식")]));
    let controller = Arc::new(SearchPollController::new(source.clone(), PollPolicy::default()));
    assert_eq!(controller.policy(), PollPolicy::default());

    // gangnam is never indexed, so it keeps polling until hongdae takes over
    let mut state = searched(SessionState::default(), "gangnam");
    let stale = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.search("gangnam").await })
    };
    while source.calls() == 0 {
        tokio::task::yield_now().await;
    }

    state = searched(state, "hongdae");
    let fresh = controller.search("hongdae").await;
    state = update(state, finished("hongdae", fresh));

    // the older search reports last
    let stale = stale.await.unwrap();
    assert!(stale.is_superseded());
    state = update(state, finished("gangnam", stale));

    assert_eq!(state.region, "hongdae");
    assert_eq!(common::names(&state.visible_restaurants()), vec!["Fresh"]);
    assert!(!state.is_loading);
    assert_eq!(state.empty_reason(), None);
}

#[test]
fn mood_selector_needs_results() {
    let state = SessionState::default();
    assert!(!state.can_select_mood());

    let state = update(searched(state, "gangnam"), finished("gangnam", SearchOutcome::Exhausted));
    assert!(!state.can_select_mood());
    assert_eq!(state.empty_reason(), Some(EmptyReason::NoResults));

    let state = update(
        searched(state, "gangnam"),
        finished("gangnam", SearchOutcome::Found(vec![restaurant(1, "A", "한식")])),
    );
    assert!(state.can_select_mood());
    assert_eq!(state.empty_reason(), None);
}

#[test]
fn preference_filter_can_empty_the_list() {
    let mut state = update(SessionState::default(), SessionAction::ProfileCompleted(korean_fan()));
    state = searched(state, "gangnam");
    state = update(
        state,
        finished("gangnam", SearchOutcome::Found(vec![restaurant(1, "Sushi", "일식"), restaurant(2, "Pasta", "이탈리안")])),
    );

    assert!(state.visible_restaurants().is_empty());
    assert_eq!(state.empty_reason(), Some(EmptyReason::NoPreferenceMatch));

    // without a profile everything shows again
    let state = update(state, SessionAction::ProfileReset);
    assert_eq!(state.visible_restaurants().len(), 2);
}

#[test]
fn visible_list_is_filtered_then_mood_ordered() {
    let profile =
        UserProfile::new("minji", ["korean", "japanese"], PriceRange::Medium, Vec::<String>::new()).unwrap();
    let mut state = update(SessionState::default(), SessionAction::ProfileCompleted(profile));
    state = searched(state, "gangnam");
    state = update(
        state,
        finished("gangnam", SearchOutcome::Found(vec![
            restaurant(1, "Gukbap", "한식"),
            restaurant(2, "Pizza", "이탈리안"),
            restaurant(3, "Sushi", "일식"),
        ])),
    );
    state = update(state, SessionAction::MoodSelected(Mood::Romantic));

    let visible = state.visible_restaurants();
    let names: Vec<&str> = visible.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Sushi", "Gukbap"]);

    let state = update(state, SessionAction::MoodCleared);
    let visible = state.visible_restaurants();
    let names: Vec<&str> = visible.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Gukbap", "Sushi"]);
}

#[test]
fn opening_a_restaurant_resets_the_board() {
    let mut state = update(
        SessionState::default(),
        SessionAction::ReviewsRefreshed(ReviewBoard {
            reviews: vec![review("r1", "bob", 0)],
            liked: ["r1".to_string()].into_iter().collect(),
        }),
    );
    state = update(state, SessionAction::RestaurantOpened(restaurant(9, "Nine", "한식")));

    assert_eq!(state.selected.as_ref().map(|r| r.name.as_str()), Some("Nine"));
    assert_eq!(state.board, ReviewBoard::default());

    let state = update(state, SessionAction::RestaurantClosed);
    assert!(state.selected.is_none());
}

#[test]
fn like_toggles_update_board() {
    let board = ReviewBoard {
        reviews: vec![review("r1", "bob", 2), review("r2", "minji", 0)],
        liked: Default::default(),
    };
    assert!(board.can_like(&board.reviews[0], "minji"));
    assert!(!board.can_like(&board.reviews[1], "minji"));
    assert!(!board.can_like(&board.reviews[1], " minji "));

    let mut state = update(SessionState::default(), SessionAction::ReviewsRefreshed(board));
    state = update(
        state,
        SessionAction::LikeToggled {
            review_id: "r1".to_string(),
            liked: true,
            likes: 3,
        },
    );
    assert!(state.board.is_liked("r1"));
    assert_eq!(state.board.reviews[0].likes, 3);

    state = update(
        state,
        SessionAction::LikeToggled {
            review_id: "r1".to_string(),
            liked: false,
            likes: 2,
        },
    );
    assert!(!state.board.is_liked("r1"));
    assert_eq!(state.board.reviews[0].likes, 2);
}
