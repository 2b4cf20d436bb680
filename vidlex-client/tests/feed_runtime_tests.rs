//! Feed runtime tests
//!
//! Drive the video screen and the snippet carousel through the runtime
//! against the stub feed service: first load, paging, stale pages after a
//! filter change, likes, detail attachment and phrase search.

use std::sync::Arc;

use vidlex_client::app::{AppConfig, AppContext, Runtime};
use vidlex_client::common::events::CoreEvent;
use vidlex_client::domains::feed::{self, LoadStatus};
use vidlex_client::domains::player::PlaybackState;
use vidlex_client::domains::{snippets, video};
use vidlex_client::infra::errors::ApiError;
use vidlex_client::infra::media::HeadlessBackend;
use vidlex_client::infra::services::{Session, SessionStore};
use vidlex_client::infra::testing::{StubCall, StubFeedApi};
use vidlex_model::{
    AuthTokens, ContentAnalysis, ContentDetail, ContentId, FeedFilters,
    FeedItem, FeedPage, PhraseSearchResult, PhraseSnippet, ProficiencyLevel,
    TextChunk, Transcript, UserId, UserProfile, UserRole,
};

fn session() -> Session {
    Session::new(
        AuthTokens {
            access_token: "token".into(),
            refresh_token: "refresh".into(),
        },
        UserProfile {
            id: UserId("user-1".into()),
            email: "learner@example.com".into(),
            full_name: "Test Learner".into(),
            role: UserRole::Student,
            avatar_url: None,
        },
    )
}

fn item(id: &str, likes: u64) -> FeedItem {
    FeedItem {
        id: ContentId::from(id),
        video_name: format!("Video {id}"),
        author: Some("Ana".into()),
        analysis: ContentAnalysis {
            cefr_level: "B1".into(),
            speech_speed: "normal".into(),
        },
        likes_count: likes,
        is_liked: false,
        video_url: format!("https://cdn.example.com/{id}/index.m3u8"),
    }
}

fn page(ids: &[&str], cursor: Option<&str>) -> FeedPage {
    FeedPage {
        items: ids.iter().map(|id| item(id, 3)).collect(),
        next_cursor: cursor.map(str::to_string),
        has_more: cursor.is_some(),
    }
}

fn two_page_api() -> StubFeedApi {
    StubFeedApi::new()
        .with_page(None, page(&["a", "b", "c"], Some("c1")))
        .with_page(Some("c1"), page(&["c", "d"], None))
        .with_detail(
            "a",
            ContentDetail {
                transcription: Some(Transcript::from_chunks(vec![
                    TextChunk::new(0.0, 2.0, "Hello there"),
                    TextChunk::new(2.0, 5.0, "General"),
                ])),
                translation: Some(Transcript::from_chunks(vec![
                    TextChunk::new(0.0, 5.0, "Hola"),
                ])),
            },
        )
}

fn context(api: &StubFeedApi, sessions: SessionStore) -> AppContext {
    AppContext::with_api(
        AppConfig::new("http://localhost:3000/api"),
        Arc::new(api.clone()),
        sessions,
    )
}

fn runtime(
    context: &AppContext,
) -> (Runtime<HeadlessBackend>, HeadlessBackend) {
    let backend = HeadlessBackend::new();
    let runtime =
        Runtime::from_context(context, backend.clone(), HeadlessBackend::new());
    (runtime, backend)
}

fn ids(runtime: &Runtime<HeadlessBackend>) -> Vec<String> {
    runtime
        .video
        .feed
        .items()
        .iter()
        .map(|item| item.id.as_str().to_string())
        .collect()
}

async fn mounted(
    api: &StubFeedApi,
) -> (Runtime<HeadlessBackend>, HeadlessBackend, AppContext) {
    let context = context(api, SessionStore::with_session(session()));
    let (mut rt, backend) = runtime(&context);
    rt.dispatch(video::Message::Layout { height: 800.0 });
    rt.dispatch(video::Message::FocusChanged(true));
    rt.dispatch(video::Message::Mounted);
    rt.settle().await;
    (rt, backend, context)
}

#[tokio::test]
async fn mount_loads_first_page_and_binds_first_item() {
    let api = two_page_api();
    let (rt, backend, _context) = mounted(&api).await;

    assert_eq!(ids(&rt), vec!["a", "b", "c"]);
    assert_eq!(rt.video.feed.status(), LoadStatus::Idle);
    assert_eq!(rt.video.active_index(), Some(0));
    assert_eq!(rt.video.player.bound_id(), Some(&ContentId::from("a")));
    assert!(rt.video.feed.has_detail(&ContentId::from("a")));
    assert_eq!(backend.live_sessions(), 1);

    let calls = api.calls();
    assert_eq!(
        calls[0],
        StubCall::FetchPage {
            cursor: None,
            filters: FeedFilters::default(),
            page_size: 5,
        }
    );
    assert!(calls.contains(&StubCall::FetchContent(ContentId::from("a"))));
}

#[tokio::test]
async fn mount_without_session_never_calls_the_service() {
    let api = two_page_api();
    let context = context(&api, SessionStore::new());
    let (mut rt, _backend) = runtime(&context);
    rt.dispatch(video::Message::Mounted);
    rt.settle().await;

    assert!(api.calls().is_empty());
    assert_eq!(rt.video.feed.error(), Some("Please sign in first."));
}

#[tokio::test]
async fn scrolling_to_the_end_appends_the_next_page_once() {
    let api = two_page_api();
    let (mut rt, _backend, _context) = mounted(&api).await;

    rt.dispatch(video::Message::Scrolled { offset: 1600.0 });
    rt.dispatch(video::Message::EndReached);
    rt.settle().await;

    assert_eq!(ids(&rt), vec!["a", "b", "c", "d"]);
    assert!(!rt.video.feed.has_more());
    assert_eq!(rt.video.active_index(), Some(2));

    let page_calls = api
        .calls()
        .into_iter()
        .filter(|call| matches!(call, StubCall::FetchPage { .. }))
        .count();
    assert_eq!(page_calls, 2);

    rt.dispatch(video::Message::EndReached);
    assert_eq!(rt.in_flight(), 0);
}

#[tokio::test]
async fn filter_change_discards_the_stale_first_page() {
    let api = two_page_api();
    let context = context(&api, SessionStore::with_session(session()));
    let mut events = context.events.subscribe();
    let (mut rt, _backend) = runtime(&context);

    rt.dispatch(video::Message::Layout { height: 800.0 });
    rt.dispatch(video::Message::Mounted);
    let filters =
        FeedFilters::default().with_levels(vec![ProficiencyLevel::B1]);
    rt.dispatch(video::Message::Feed(feed::Message::SetFilters(
        filters.clone(),
    )));
    assert_eq!(rt.in_flight(), 2);
    rt.settle().await;

    assert_eq!(rt.video.feed.epoch(), 2);
    assert_eq!(rt.video.feed.filters(), &filters);
    assert_eq!(ids(&rt), vec!["a", "b", "c"]);

    let mut appended = 0;
    while let Ok(event) = events.try_recv() {
        if matches!(event, CoreEvent::ItemsAppended { .. }) {
            appended += 1;
        }
    }
    assert_eq!(appended, 1);
}

#[tokio::test]
async fn like_is_applied_after_confirmation() {
    let api = two_page_api();
    let (mut rt, _backend, _context) = mounted(&api).await;

    rt.dispatch(video::Message::ToggleLike);
    let before = rt.video.feed.find(&ContentId::from("a")).cloned();
    assert_eq!(before.map(|i| (i.likes_count, i.is_liked)), Some((3, false)));

    rt.settle().await;
    let after = rt.video.feed.find(&ContentId::from("a")).cloned();
    assert_eq!(after.map(|i| (i.likes_count, i.is_liked)), Some((4, true)));
}

#[tokio::test]
async fn like_failure_only_records_the_error() {
    let api = two_page_api().failing(
        "update_like",
        ApiError::Server {
            status: 429,
            message: "Too many requests".into(),
        },
    );
    let (mut rt, _backend, _context) = mounted(&api).await;

    rt.dispatch(video::Message::ToggleLike);
    rt.settle().await;

    assert_eq!(rt.video.feed.error(), Some("Too many requests"));
    let item = rt.video.feed.find(&ContentId::from("a")).cloned();
    assert_eq!(item.map(|i| i.is_liked), Some(false));
    assert_eq!(rt.video.feed.status(), LoadStatus::Idle);
}

#[tokio::test]
async fn detail_drives_subtitles_of_the_active_item() {
    let api = two_page_api();
    let (mut rt, _backend, _context) = mounted(&api).await;

    rt.dispatch(video::Message::PlayerReady);
    assert_eq!(rt.video.player.state(), PlaybackState::Playing);

    rt.dispatch(video::Message::TimeUpdate(3.0));
    let lines = rt.video.player.subtitles();
    assert_eq!(lines.transcript, "General");
    assert_eq!(lines.translation, "Hola");
}

#[tokio::test]
async fn missing_detail_marks_feed_failed_without_touching_items() {
    let api = StubFeedApi::new().with_page(None, page(&["x"], None));
    let (rt, _backend, _context) = mounted(&api).await;

    assert_eq!(ids(&rt), vec!["x"]);
    assert_eq!(rt.video.feed.status(), LoadStatus::Failed);
    assert_eq!(rt.video.feed.error(), Some("Video not found"));
}

#[tokio::test]
async fn rejected_session_surfaces_as_sign_in_error() {
    let api = two_page_api().signed_out();
    let (rt, _backend, _context) = mounted(&api).await;

    assert!(rt.video.feed.is_empty());
    assert_eq!(rt.video.feed.status(), LoadStatus::Failed);
    assert_eq!(rt.video.feed.error(), Some("Please sign in first."));
}

fn take_off_snippet() -> PhraseSnippet {
    PhraseSnippet {
        id: "s1".into(),
        content_id: ContentId::from("v9"),
        video_name: "Airport".into(),
        video_url: "https://cdn.example.com/v9/index.m3u8".into(),
        start_seconds: 12.5,
        end_seconds: 15.0,
        matched_text: "take off".into(),
        context_text: "we take off at noon".into(),
        phrase: "take off".into(),
        duration_seconds: Some(2.5),
        translation_matched_text: None,
        translation_context_text: None,
    }
}

fn take_off_results() -> PhraseSearchResult {
    PhraseSearchResult {
        items: vec![take_off_snippet()],
        phrase: "take off".into(),
        returned: 1,
        total: 1,
        ..PhraseSearchResult::default()
    }
}

#[tokio::test]
async fn phrase_search_binds_first_snippet_window() {
    let api = StubFeedApi::new().with_search("take off", take_off_results());
    let context = context(&api, SessionStore::with_session(session()));
    let (mut rt, _backend) = runtime(&context);

    rt.dispatch(snippets::Message::Search("take off".into()));
    rt.settle().await;

    assert_eq!(rt.snippets.counter_label(), "1/1");
    assert_eq!(
        rt.snippets.player.target().map(|t| t.start_offset()),
        Some(12.5)
    );
    assert_eq!(
        api.calls(),
        vec![StubCall::Search {
            phrase: "take off".into(),
            limit: 12,
        }]
    );
}

#[tokio::test]
async fn feed_and_carousel_never_hold_two_sessions() {
    let api = two_page_api().with_search("take off", take_off_results());
    let context = context(&api, SessionStore::with_session(session()));
    let backend = HeadlessBackend::new();
    let mut rt =
        Runtime::from_context(&context, backend.clone(), backend.clone());
    rt.dispatch(video::Message::Layout { height: 800.0 });
    rt.dispatch(video::Message::FocusChanged(true));
    rt.dispatch(video::Message::Mounted);
    rt.settle().await;
    assert_eq!(rt.video.player.bound_id(), Some(&ContentId::from("a")));

    rt.dispatch(snippets::Message::FocusChanged(true));
    rt.dispatch(snippets::Message::Search("take off".into()));
    assert_eq!(rt.video.player.state(), PlaybackState::Unbound);
    assert_eq!(backend.live_sessions(), 0);
    rt.settle().await;

    assert_eq!(rt.snippets.player.bound_id(), Some(&ContentId::from("v9")));
    assert_eq!(rt.video.player.state(), PlaybackState::Unbound);
    assert_eq!(backend.live_sessions(), 1);

    rt.dispatch(video::Message::Scrolled { offset: 800.0 });
    assert_eq!(rt.video.active_index(), Some(1));
    assert_eq!(rt.video.player.state(), PlaybackState::Unbound);
    rt.settle().await;

    rt.dispatch(snippets::Message::Closed);
    assert_eq!(rt.snippets.player.state(), PlaybackState::Unbound);
    assert_eq!(rt.video.player.bound_id(), Some(&ContentId::from("b")));
    assert_eq!(backend.live_sessions(), 1);
    assert_eq!(backend.peak_sessions(), 1);
}
