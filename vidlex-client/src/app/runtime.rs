//! Message loop
//!
//! Routes messages to the owning screen and runs the effects they return as
//! spawned tokio tasks. Completions come back through an unbounded channel
//! and are applied one at a time, in arrival order.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::common::messages::{DomainMessage, DomainUpdateResult, Effect};
use crate::domains::feed;
use crate::domains::player::MediaBackend;
use crate::domains::snippets::{self, SnippetCarousel, update_snippets};
use crate::domains::video::{self, VideoScreen, update_video};
use crate::infra::services::FeedApi;

use super::bootstrap::AppContext;

#[derive(Debug)]
pub struct Runtime<B: MediaBackend> {
    api: Arc<dyn FeedApi>,
    pub video: VideoScreen<B>,
    pub snippets: SnippetCarousel<B>,
    sender: mpsc::UnboundedSender<DomainMessage>,
    receiver: mpsc::UnboundedReceiver<DomainMessage>,
    in_flight: usize,
}

impl<B: MediaBackend> Runtime<B> {
    pub fn new(
        api: Arc<dyn FeedApi>,
        video: VideoScreen<B>,
        snippets: SnippetCarousel<B>,
    ) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            api,
            video,
            snippets,
            sender,
            receiver,
            in_flight: 0,
        }
    }

    /// Build both screens from `context`, each with its own media backend.
    pub fn from_context(
        context: &AppContext,
        video_backend: B,
        snippet_backend: B,
    ) -> Self {
        Self::new(
            Arc::clone(&context.api),
            context.video_screen(video_backend),
            context.snippet_carousel(snippet_backend),
        )
    }

    /// Effects started and not yet applied.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Apply `message` and start the effects it asks for.
    pub fn dispatch(&mut self, message: impl Into<DomainMessage>) {
        let result = self.update(message.into());
        for effect in result.effects {
            self.spawn(effect);
        }
    }

    /// Only one screen holds a media session: a phrase search suspends the
    /// feed player before the carousel can bind, and closing the carousel
    /// hands the session back.
    fn update(&mut self, message: DomainMessage) -> DomainUpdateResult {
        match message {
            DomainMessage::Video(msg) => update_video(&mut self.video, msg),
            DomainMessage::Snippets(msg) => {
                let closing = matches!(msg, snippets::Message::Closed);
                if matches!(msg, snippets::Message::Search(_)) {
                    self.video.suspend_playback();
                }
                let result = update_snippets(&mut self.snippets, msg);
                if closing {
                    self.video.resume_playback();
                }
                result
            }
        }
    }

    fn spawn(&mut self, effect: Effect) {
        log::debug!("[Runtime] Starting {:?}", effect);
        self.in_flight += 1;
        let api = Arc::clone(&self.api);
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let message = run_effect(api.as_ref(), effect).await;
            if sender.send(message).is_err() {
                log::debug!("[Runtime] Dropped completion, runtime is gone");
            }
        });
    }

    /// Wait for the next completion and apply it. Returns `false` when
    /// nothing is in flight.
    pub async fn process_next(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.receiver.recv().await {
            Some(message) => {
                self.in_flight -= 1;
                self.dispatch(message);
                true
            }
            None => false,
        }
    }

    /// Apply completions until no effect is outstanding, including the ones
    /// started by the completions themselves.
    pub async fn settle(&mut self) {
        while self.process_next().await {}
    }
}

async fn run_effect(api: &dyn FeedApi, effect: Effect) -> DomainMessage {
    match effect {
        Effect::FetchPage(request) => {
            let result = api
                .fetch_page(
                    request.cursor.as_deref(),
                    &request.filters,
                    request.limit,
                )
                .await
                .map_err(|e| e.to_string());
            video::Message::Feed(feed::Message::PageLoaded {
                epoch: request.epoch,
                result,
            })
            .into()
        }
        Effect::FetchDetail(id) => {
            let result = api.fetch_content(&id).await.map_err(|e| e.to_string());
            video::Message::Feed(feed::Message::DetailLoaded { id, result }).into()
        }
        Effect::UpdateLike { id, like } => {
            let result =
                api.update_like(&id, like).await.map_err(|e| e.to_string());
            video::Message::Feed(feed::Message::LikeUpdated { id, result }).into()
        }
        Effect::SearchSnippets {
            query_id,
            phrase,
            limit,
        } => {
            let result = api
                .search_snippets(&phrase, limit)
                .await
                .map_err(|e| e.to_string());
            snippets::Message::Results { query_id, result }.into()
        }
    }
}
