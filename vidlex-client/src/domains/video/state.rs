use vidlex_model::{ContentId, FeedItem};

use crate::common::events::{CoreEvent, EventBus};
use crate::common::messages::{DomainUpdateResult, Effect};
use crate::domains::activation::{ActivationChange, ActivationResolver};
use crate::domains::feed::FeedState;
use crate::domains::player::{
    MediaBackend, PlaybackController, PlaybackState, PlaybackTarget,
};
use crate::infra::errors::ApiError;
use crate::infra::services::SessionStore;

/// Fraction of a viewport from the end at which the next page is requested.
pub const DEFAULT_END_REACHED_THRESHOLD: f32 = 0.6;

#[derive(Debug)]
pub struct VideoScreen<B: MediaBackend> {
    pub feed: FeedState,
    pub activation: ActivationResolver,
    pub player: PlaybackController<B>,
    sessions: SessionStore,
    events: EventBus,
    end_reached_threshold: f32,
    /// `(epoch, item count)` at which scrolling last reached the end.
    end_reached_at: Option<(u64, usize)>,
    mounted: bool,
    /// Another screen holds the media session; activation does not bind.
    playback_suspended: bool,
}

impl<B: MediaBackend> VideoScreen<B> {
    pub fn new(
        feed: FeedState,
        activation: ActivationResolver,
        player: PlaybackController<B>,
        sessions: SessionStore,
        events: EventBus,
    ) -> Self {
        Self {
            feed,
            activation,
            player,
            sessions,
            events,
            end_reached_threshold: DEFAULT_END_REACHED_THRESHOLD,
            end_reached_at: None,
            mounted: false,
            playback_suspended: false,
        }
    }

    pub fn with_end_reached_threshold(mut self, threshold: f32) -> Self {
        self.end_reached_threshold = threshold.max(0.0);
        self
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_playback_suspended(&self) -> bool {
        self.playback_suspended
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn end_reached_threshold(&self) -> f32 {
        self.end_reached_threshold
    }

    /// Whether scrolling to `offset` newly reaches the end of the list.
    ///
    /// Fires once per loaded length: a failed or empty page does not fire
    /// again until the list grows or the feed is reset.
    pub fn take_end_reached(&mut self, offset: f32) -> bool {
        if !self
            .activation
            .is_near_end(offset, self.end_reached_threshold)
        {
            return false;
        }
        let mark = (self.feed.epoch(), self.feed.len());
        if self.end_reached_at == Some(mark) {
            return false;
        }
        self.end_reached_at = Some(mark);
        true
    }

    pub fn active_index(&self) -> Option<usize> {
        self.activation.active()
    }

    pub fn active_item(&self) -> Option<&FeedItem> {
        self.activation.active().and_then(|i| self.feed.item(i))
    }

    pub fn active_id(&self) -> Option<ContentId> {
        self.active_item().map(|item| item.id.clone())
    }

    pub fn on_mount(&mut self) -> DomainUpdateResult {
        self.mounted = true;
        if !self.sessions.is_authenticated() {
            log::warn!("[VideoScreen] Mounted without a session");
            self.feed.record_error(ApiError::Unauthenticated.to_string());
            return DomainUpdateResult::none();
        }
        if !self.feed.is_empty() || self.feed.status().is_loading() {
            return DomainUpdateResult::none();
        }
        let filters = self.feed.filters().clone();
        DomainUpdateResult::effect(Effect::FetchPage(self.feed.reset(filters)))
    }

    pub fn on_unmount(&mut self) {
        self.mounted = false;
        self.player.unbind();
    }

    pub fn on_focus_change(&mut self, focused: bool) {
        log::debug!("[VideoScreen] Focus changed: {}", focused);
        self.player.set_screen_focused(focused);
    }

    /// Release the media session while another screen plays. Activation
    /// keeps tracking the feed but binds nothing until resumed.
    pub fn suspend_playback(&mut self) {
        if !self.playback_suspended {
            log::debug!("[VideoScreen] Playback suspended");
        }
        self.playback_suspended = true;
        self.player.unbind();
    }

    /// Take the media session back and rebind the active item.
    pub fn resume_playback(&mut self) {
        if !self.playback_suspended {
            return;
        }
        log::debug!("[VideoScreen] Playback resumed");
        self.playback_suspended = false;
        if !self.mounted || self.player.state() != PlaybackState::Unbound {
            return;
        }
        if let Some(item) = self.active_item().cloned() {
            self.bind_item(&item);
        }
    }

    /// Bring activation in line with the number of loaded items.
    pub fn sync_item_count(&mut self) -> DomainUpdateResult {
        let change = self.activation.set_item_count(self.feed.len());
        self.apply_activation(change)
    }

    /// Rebind playback, request detail and notify observers.
    pub fn apply_activation(
        &mut self,
        change: Option<ActivationChange>,
    ) -> DomainUpdateResult {
        let Some(change) = change else {
            return DomainUpdateResult::none();
        };
        log::debug!(
            "[VideoScreen] Active item {:?} -> {:?}",
            change.previous,
            change.current
        );

        let Some(item) = change.current.and_then(|i| self.feed.item(i)).cloned()
        else {
            self.player.unbind();
            self.events.publish(CoreEvent::ActiveItemChanged {
                index: None,
                id: None,
            });
            return DomainUpdateResult::none();
        };

        let mut result = DomainUpdateResult::none();
        if !self.playback_suspended {
            self.bind_item(&item);
        }
        if let Some(id) = self.feed.load_detail(&item.id) {
            result.push(Effect::FetchDetail(id));
        }

        self.events.publish(CoreEvent::ActiveItemChanged {
            index: change.current,
            id: Some(item.id),
        });
        result
    }

    fn bind_item(&mut self, item: &FeedItem) {
        match self.player.bind(PlaybackTarget::full(item)) {
            Ok(()) => {
                if let Some(detail) = self.feed.detail(&item.id).cloned() {
                    self.player.attach_detail(&item.id, detail);
                }
            }
            Err(e) => {
                log::warn!("[VideoScreen] Could not bind {}: {}", item.id, e);
                self.feed.record_error(e.to_string());
            }
        }
    }

    /// Hand a freshly stored detail to the player when it belongs to the
    /// active item.
    pub fn attach_active_detail(&mut self, id: &ContentId) {
        if self.active_id().as_ref() != Some(id) {
            return;
        }
        if let Some(detail) = self.feed.detail(id).cloned() {
            self.player.attach_detail(id, detail);
        }
    }
}
