use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use crate::common::events::EventBus;
use crate::domains::activation::ActivationResolver;
use crate::domains::feed::FeedState;
use crate::domains::player::{MediaBackend, PlaybackController};
use crate::domains::snippets::SnippetCarousel;
use crate::domains::video::VideoScreen;
use crate::infra::api_client::{ApiClient, normalize_base_url};
use crate::infra::config::Config;
use crate::infra::services::{AuthApi, FeedApi, HttpFeedApi, SessionStore};
use crate::infra::testing::StubFeedApi;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_url: Arc<str>,
    pub use_test_stubs: bool,
    pub page_size: usize,
    pub snippet_page_size: usize,
    pub fling_threshold: f32,
    pub end_reached_threshold: f32,
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::from_config(Config {
            server_url: server_url.into(),
            ..Config::default()
        })
    }

    /// Settings file overlaid with `VIDLEX_SERVER_URL`.
    pub fn from_environment() -> Self {
        Self::from_config(Config::load())
    }

    pub fn from_config(config: Config) -> Self {
        Self {
            server_url: Arc::from(normalize_base_url(config.server_url)),
            use_test_stubs: false,
            page_size: config.page_size,
            snippet_page_size: config.snippet_page_size,
            fling_threshold: config.fling_threshold,
            end_reached_threshold: config.end_reached_threshold,
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn use_test_stubs(&self) -> bool {
        self.use_test_stubs
    }

    pub fn with_test_stubs(mut self, enabled: bool) -> Self {
        self.use_test_stubs = enabled;
        self
    }
}

/// Composition root: owns the shared services every screen is built from.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub sessions: SessionStore,
    pub events: EventBus,
    pub api: Arc<dyn FeedApi>,
    /// `None` when running against stubs.
    pub auth: Option<Arc<dyn AuthApi>>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let sessions = SessionStore::new();

        let (api, auth): (Arc<dyn FeedApi>, Option<Arc<dyn AuthApi>>) =
            if config.use_test_stubs() {
                log::info!("[Bootstrap] Using stub feed service");
                let stub: Arc<dyn FeedApi> = Arc::new(StubFeedApi::new());
                (stub, None)
            } else {
                let client =
                    ApiClient::new(config.server_url(), config.request_timeout)
                        .with_context(|| {
                            format!(
                                "failed to build HTTP client for {}",
                                config.server_url()
                            )
                        })?;
                let http = Arc::new(HttpFeedApi::new(client, sessions.clone()));
                let api: Arc<dyn FeedApi> = http.clone();
                let auth: Arc<dyn AuthApi> = http;
                (api, Some(auth))
            };

        Ok(Self {
            config,
            sessions,
            events: EventBus::default(),
            api,
            auth,
        })
    }

    /// Context around an existing service, sharing `sessions`.
    pub fn with_api(
        config: AppConfig,
        api: Arc<dyn FeedApi>,
        sessions: SessionStore,
    ) -> Self {
        Self {
            config,
            sessions,
            events: EventBus::default(),
            api,
            auth: None,
        }
    }

    pub fn video_screen<B: MediaBackend>(&self, backend: B) -> VideoScreen<B> {
        VideoScreen::new(
            FeedState::new(self.config.page_size, self.events.clone()),
            ActivationResolver::new(self.config.fling_threshold),
            PlaybackController::new(backend, self.events.clone()),
            self.sessions.clone(),
            self.events.clone(),
        )
        .with_end_reached_threshold(self.config.end_reached_threshold)
    }

    pub fn snippet_carousel<B: MediaBackend>(
        &self,
        backend: B,
    ) -> SnippetCarousel<B> {
        SnippetCarousel::new(
            PlaybackController::new(backend, self.events.clone()),
            self.config.snippet_page_size,
            self.events.clone(),
        )
    }
}
