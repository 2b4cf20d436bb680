//! Core data model definitions shared across vidlex crates.
#![allow(missing_docs)]

pub mod auth;
pub mod content;
pub mod error;
pub mod feed;
pub mod filters;
pub mod ids;
pub mod snippet;

// Intentionally curated re-exports for downstream consumers.
pub use auth::{AuthTokens, LoginRequest, LoginResponse, UserProfile, UserRole};
pub use content::{ContentDetail, TextChunk, TimeWindow, Transcript};
pub use error::{ModelError, Result as ModelResult};
pub use feed::{ContentAnalysis, FeedItem, FeedPage, LikeRequest, LikeUpdate};
pub use filters::{FeedFilters, ModerationFilter, ProficiencyLevel, SpeechSpeed};
pub use ids::{ContentId, UserId};
pub use snippet::{PhraseSearchResult, PhraseSnippet};
