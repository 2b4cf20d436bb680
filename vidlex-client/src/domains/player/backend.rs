//! Media playback backend abstraction
//!
//! The platform player (HLS decoder, surface, audio) lives behind these
//! traits. Ready and time-update notifications flow the other way, through
//! the controller's `on_ready` / `on_time_update`.

use std::fmt::Debug;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    /// The session has not reported ready yet, or gates forbid the action.
    #[error("media session not ready")]
    NotReady,

    #[error("failed to open media {url}: {reason}")]
    Open { url: String, reason: String },
}

/// Opens media sessions for stream locators.
pub trait MediaBackend: Send + Debug {
    type Session: MediaSession;

    fn open(&mut self, url: &str) -> Result<Self::Session, PlaybackError>;
}

/// One open stream. Dropping a session after [`MediaSession::stop`] frees
/// all backend resources.
pub trait MediaSession: Send + Debug {
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, seconds: f64);
    fn set_looping(&mut self, looping: bool);
    fn stop(&mut self);
}
