//! Player domain
//!
//! Single-session playback control for the feed and the snippet carousel.

pub mod backend;
pub mod controller;
pub mod state;
pub mod subtitles;

pub use backend::{MediaBackend, MediaSession, PlaybackError};
pub use controller::PlaybackController;
pub use state::{PlaybackState, PlaybackTarget};
pub use subtitles::SubtitleLines;
