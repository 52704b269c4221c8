use std::sync::Once;

use dashboard_core::{
    update, AppState, ChannelId, ChannelStatus, Effect, FetchOutcome, HttpMethod, Msg, RequestId,
    CONNECT_FAILURE, UNKNOWN_ERROR,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn fetch_request_id(effects: &[Effect]) -> RequestId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchRecommendations { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("fetch effect")
}

fn loaded(channel: ChannelId, request_id: RequestId, outcome: FetchOutcome) -> Msg {
    Msg::RecommendationsLoaded {
        channel,
        request_id,
        outcome,
    }
}

#[test]
fn activation_fetches_popular_exactly_once() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::Activated);

    assert_eq!(
        effects,
        vec![Effect::FetchRecommendations {
            channel: ChannelId::Popular,
            request_id: 1,
            method: HttpMethod::Get,
            endpoint: "/recommend/popular",
            payload: None,
        }]
    );
    assert!(state.is_activated());
    assert!(state.channel(ChannelId::Popular).status().is_loading());
    for id in [ChannelId::Content, ChannelId::Collaborative, ChannelId::Basket] {
        assert_eq!(state.channel(id).status(), &ChannelStatus::Idle);
    }

    let (state, effects) = update(state, Msg::Activated);
    assert!(effects.is_empty());

    // Still idempotent once the first fetch has settled.
    let (state, _) = update(
        state,
        loaded(ChannelId::Popular, 1, FetchOutcome::Recommendations(vec!["A".into()])),
    );
    let (_state, effects) = update(state, Msg::Activated);
    assert!(effects.is_empty());
}

#[test]
fn each_channel_builds_its_own_request() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = update(state, Msg::request_content("Xerox 1918"));
    assert_eq!(
        effects,
        vec![Effect::FetchRecommendations {
            channel: ChannelId::Content,
            request_id: 1,
            method: HttpMethod::Post,
            endpoint: "/recommend/content",
            payload: Some(json!({ "product_name": "Xerox 1918" })),
        }]
    );

    let (state, effects) = update(state, Msg::request_collaborative(" AA-10315 "));
    assert_eq!(
        effects,
        vec![Effect::FetchRecommendations {
            channel: ChannelId::Collaborative,
            request_id: 2,
            method: HttpMethod::Post,
            endpoint: "/recommend/collaborative",
            payload: Some(json!({ "customer_id": " AA-10315 " })),
        }]
    );

    let (_state, effects) = update(state, Msg::request_basket(" Staples,, Paper ,"));
    assert_eq!(
        effects,
        vec![Effect::FetchRecommendations {
            channel: ChannelId::Basket,
            request_id: 3,
            method: HttpMethod::Post,
            endpoint: "/recommend/basket",
            payload: Some(json!({ "items": ["Staples", "Paper"] })),
        }]
    );
}

#[test]
fn request_sets_loading_and_clears_previous_error() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::request_content("Widget"));
    let first = fetch_request_id(&effects);
    let (state, _) = update(state, loaded(ChannelId::Content, first, FetchOutcome::Unreachable));
    assert_eq!(
        state.channel(ChannelId::Content).status().error(),
        Some(CONNECT_FAILURE)
    );

    let (mut state, _) = update(state, Msg::request_content("Widget"));
    let status = state.channel(ChannelId::Content).status();
    assert!(status.is_loading());
    assert_eq!(status.error(), None);
    assert!(status.results().is_empty());
    assert!(state.consume_dirty());
}

#[test]
fn successful_response_populates_results() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::request_content("Widget"));
    let request_id = fetch_request_id(&effects);

    let (mut state, effects) = update(
        state,
        loaded(
            ChannelId::Content,
            request_id,
            FetchOutcome::Recommendations(vec!["A".into(), "B".into()]),
        ),
    );

    assert!(effects.is_empty());
    assert_eq!(
        state.channel(ChannelId::Content).status(),
        &ChannelStatus::Success(vec!["A".to_string(), "B".to_string()])
    );
    assert!(state.consume_dirty());
}

#[test]
fn rejected_response_surfaces_server_error_or_fallback() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::request_collaborative("C1"));
    let request_id = fetch_request_id(&effects);
    let (state, _) = update(
        state,
        loaded(
            ChannelId::Collaborative,
            request_id,
            FetchOutcome::Rejected {
                error: Some("not found".into()),
            },
        ),
    );
    let status = state.channel(ChannelId::Collaborative).status();
    assert_eq!(status, &ChannelStatus::Error("not found".into()));
    assert!(status.results().is_empty());

    let (state, effects) = update(state, Msg::request_collaborative("C1"));
    let request_id = fetch_request_id(&effects);
    let (state, _) = update(
        state,
        loaded(
            ChannelId::Collaborative,
            request_id,
            FetchOutcome::Rejected { error: None },
        ),
    );
    assert_eq!(
        state.channel(ChannelId::Collaborative).status().error(),
        Some(UNKNOWN_ERROR)
    );
}

#[test]
fn unreachable_backend_only_affects_its_channel() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Activated);
    let (state, _) = update(
        state,
        loaded(ChannelId::Popular, 1, FetchOutcome::Recommendations(vec!["P".into()])),
    );
    let (state, effects) = update(state, Msg::request_collaborative("C1"));
    let collab_id = fetch_request_id(&effects);
    let (state, effects) = update(state, Msg::request_basket("Paper"));
    let basket_id = fetch_request_id(&effects);

    let (state, _) = update(
        state,
        loaded(ChannelId::Basket, basket_id, FetchOutcome::Unreachable),
    );

    assert_eq!(
        state.channel(ChannelId::Basket).status(),
        &ChannelStatus::Error(CONNECT_FAILURE.into())
    );
    assert_eq!(
        state.channel(ChannelId::Popular).status(),
        &ChannelStatus::Success(vec!["P".into()])
    );
    assert_eq!(state.channel(ChannelId::Content).status(), &ChannelStatus::Idle);
    assert!(state.channel(ChannelId::Collaborative).status().is_loading());
    assert!(state.channel(ChannelId::Collaborative).is_awaiting(collab_id));
}

#[test]
fn stale_completion_does_not_overwrite_newer_request() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::request_content("Old"));
    let older = fetch_request_id(&effects);
    let (state, effects) = update(state, Msg::request_content("New"));
    let newer = fetch_request_id(&effects);
    assert!(newer > older);

    // Newer request settles first.
    let (state, _) = update(
        state,
        loaded(
            ChannelId::Content,
            newer,
            FetchOutcome::Recommendations(vec!["fresh".into()]),
        ),
    );
    let before = state.clone();
    let (mut state, effects) = update(
        state,
        loaded(
            ChannelId::Content,
            older,
            FetchOutcome::Recommendations(vec!["stale".into()]),
        ),
    );

    assert_eq!(state, before);
    assert!(effects.is_empty());
    assert_eq!(
        state.channel(ChannelId::Content).status(),
        &ChannelStatus::Success(vec!["fresh".into()])
    );
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn older_completion_while_newer_in_flight_keeps_loading() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::request_basket("A"));
    let older = fetch_request_id(&effects);
    let (state, effects) = update(state, Msg::request_basket("B"));
    let newer = fetch_request_id(&effects);

    let (state, _) = update(state, loaded(ChannelId::Basket, older, FetchOutcome::Unreachable));
    assert!(state.channel(ChannelId::Basket).status().is_loading());

    let (state, _) = update(
        state,
        loaded(ChannelId::Basket, newer, FetchOutcome::Recommendations(Vec::new())),
    );
    assert_eq!(
        state.channel(ChannelId::Basket).status(),
        &ChannelStatus::Success(Vec::new())
    );
}

#[test]
fn completion_for_wrong_channel_is_ignored() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::request_content("Widget"));
    let request_id = fetch_request_id(&effects);

    let (state, _) = update(
        state,
        loaded(
            ChannelId::Basket,
            request_id,
            FetchOutcome::Recommendations(vec!["X".into()]),
        ),
    );

    assert_eq!(state.channel(ChannelId::Basket).status(), &ChannelStatus::Idle);
    assert!(state.channel(ChannelId::Content).status().is_loading());
}

#[test]
fn view_lists_cards_in_display_order() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Activated);
    let view = state.view();

    let ids: Vec<_> = view.cards.iter().map(|card| card.channel).collect();
    assert_eq!(ids, ChannelId::ALL.to_vec());
    assert_eq!(view.cards[0].title, "Most Popular Products");
    assert!(view.card(ChannelId::Popular).unwrap().status.is_loading());
    assert!(view.activated);
    assert!(view.dirty);
}
