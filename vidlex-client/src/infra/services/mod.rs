// Service abstractions over the remote API

pub mod api;
pub mod auth;

pub use api::{FeedApi, HttpFeedApi};
pub use auth::{AuthApi, Session, SessionStore};
