//! Change notifications published by the client core.
//!
//! The host shell subscribes to the bus instead of re-reading state after
//! every message.

use tokio::sync::broadcast;
use vidlex_model::ContentId;

use crate::domains::feed::types::LoadStatus;
use crate::domains::player::state::PlaybackState;
use crate::domains::player::subtitles::SubtitleLines;

const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub enum CoreEvent {
    FeedReset {
        epoch: u64,
    },
    ItemsAppended {
        added: usize,
        total: usize,
    },
    StatusChanged(LoadStatus),
    DetailLoaded(ContentId),
    ItemUpdated(ContentId),
    ErrorRecorded(String),
    ActiveItemChanged {
        index: Option<usize>,
        id: Option<ContentId>,
    },
    /// Corrective programmatic scroll the host must perform.
    ScrollTo {
        offset: f32,
        animated: bool,
    },
    PlaybackStateChanged(PlaybackState),
    SubtitlesChanged(SubtitleLines),
    SnippetActivated {
        index: Option<usize>,
    },
}

/// Broadcast bus for [`CoreEvent`]s.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoreEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CoreEvent> {
        self.sender.subscribe()
    }

    /// Publish an event. Having no subscribers is fine.
    pub fn publish(&self, event: CoreEvent) {
        log::trace!("[EventBus] {:?}", event);
        let _ = self.sender.send(event);
    }
}
