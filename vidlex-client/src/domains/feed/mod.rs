//! Feed domain
//!
//! Cursor-paginated list of feed items with lazily loaded detail payloads
//! and server-confirmed likes.

pub mod messages;
pub mod state;
pub mod types;
pub mod update;

pub use messages::Message;
pub use state::FeedState;
pub use types::{LoadStatus, PageRequest};
pub use update::update_feed;
