//! Snippet carousel
//!
//! Horizontally paged results of a phrase search. The visible snippet plays
//! its time window on repeat; all others stay unbound.

pub mod messages;
pub mod state;
pub mod update;

pub use messages::Message;
pub use state::SnippetCarousel;
pub use update::update_snippets;
