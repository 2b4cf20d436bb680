//! Feed domain types

use vidlex_model::FeedFilters;

/// Loading status of the paged feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    /// First page after a reset; the list is empty.
    LoadingInitial,
    /// Follow-up page; existing items stay visible.
    LoadingMore,
    Failed,
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::LoadingInitial | LoadStatus::LoadingMore)
    }
}

/// A page fetch, tagged with the reset epoch it was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub epoch: u64,
    pub cursor: Option<String>,
    pub filters: FeedFilters,
    pub limit: usize,
}
