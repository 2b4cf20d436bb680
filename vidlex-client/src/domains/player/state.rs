use vidlex_model::{ContentId, FeedItem, ModelError, PhraseSnippet, TimeWindow};

/// Lifecycle of the single bound media session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Unbound,
    /// Session opened, waiting for the backend to report ready.
    Loading,
    /// Ready and never started.
    Ready,
    Playing,
    Paused,
}

impl PlaybackState {
    pub fn is_ready(&self) -> bool {
        matches!(
            self,
            PlaybackState::Ready | PlaybackState::Playing | PlaybackState::Paused
        )
    }
}

/// What to play: a whole video (looping) or a window of it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackTarget {
    pub id: ContentId,
    pub url: String,
    pub window: Option<TimeWindow>,
}

impl PlaybackTarget {
    /// Full-length feed playback, looping from 0.
    pub fn full(item: &FeedItem) -> Self {
        Self {
            id: item.id.clone(),
            url: item.video_url.clone(),
            window: None,
        }
    }

    /// Snippet playback looping inside `[start_seconds, end_seconds]`.
    pub fn windowed(snippet: &PhraseSnippet) -> Result<Self, ModelError> {
        Ok(Self {
            id: snippet.content_id.clone(),
            url: snippet.video_url.clone(),
            window: Some(snippet.window()?),
        })
    }

    pub fn start_offset(&self) -> f64 {
        self.window.map(|w| w.start()).unwrap_or(0.0)
    }
}
