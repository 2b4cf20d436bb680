use vidlex_model::{
    ContentDetail, ContentId, FeedFilters, FeedPage, LikeUpdate,
};

#[derive(Clone)]
pub enum Message {
    // Paging
    SetFilters(FeedFilters),
    Refresh,
    LoadMore,
    PageLoaded {
        epoch: u64,
        result: Result<FeedPage, String>,
    },

    // Detail payloads
    LoadDetail(ContentId),
    DetailLoaded {
        id: ContentId,
        result: Result<ContentDetail, String>,
    },

    // Likes
    ToggleLike(ContentId),
    SetLike {
        id: ContentId,
        like: bool,
    },
    LikeUpdated {
        id: ContentId,
        result: Result<LikeUpdate, String>,
    },
}

impl Message {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetFilters(_) => "Feed::SetFilters",
            Self::Refresh => "Feed::Refresh",
            Self::LoadMore => "Feed::LoadMore",
            Self::PageLoaded { .. } => "Feed::PageLoaded",
            Self::LoadDetail(_) => "Feed::LoadDetail",
            Self::DetailLoaded { .. } => "Feed::DetailLoaded",
            Self::ToggleLike(_) => "Feed::ToggleLike",
            Self::SetLike { .. } => "Feed::SetLike",
            Self::LikeUpdated { .. } => "Feed::LikeUpdated",
        }
    }
}

impl std::fmt::Debug for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PageLoaded { epoch, result } => match result {
                Ok(page) => write!(
                    f,
                    "Feed::PageLoaded(epoch {}, {} items)",
                    epoch,
                    page.items.len()
                ),
                Err(e) => {
                    write!(f, "Feed::PageLoaded(epoch {}, Err: {})", epoch, e)
                }
            },
            Self::DetailLoaded { id, result } => match result {
                Ok(_) => write!(f, "Feed::DetailLoaded({}, Ok)", id),
                Err(e) => write!(f, "Feed::DetailLoaded({}, Err: {})", id, e),
            },
            Self::SetFilters(filters) => {
                write!(f, "Feed::SetFilters({:?})", filters)
            }
            Self::LoadDetail(id) => write!(f, "Feed::LoadDetail({})", id),
            Self::ToggleLike(id) => write!(f, "Feed::ToggleLike({})", id),
            Self::SetLike { id, like } => {
                write!(f, "Feed::SetLike({}, {})", id, like)
            }
            Self::LikeUpdated { id, result } => {
                write!(f, "Feed::LikeUpdated({}, {:?})", id, result)
            }
            other => f.write_str(other.name()),
        }
    }
}
