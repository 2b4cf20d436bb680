//! Video feed screen
//!
//! Ties the feed store, the activation resolver and the playback controller
//! together: the active page is the only one bound to a media session.

pub mod messages;
pub mod state;
pub mod update;

pub use messages::Message;
pub use state::VideoScreen;
pub use update::update_video;
