use crate::ids::ContentId;

/// Content analysis tags shown on a feed card.
///
/// Kept as display strings: the server may add buckets the client does not
/// know about yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct ContentAnalysis {
    pub cefr_level: String,
    pub speech_speed: String,
}

/// A single entry of the vertical video feed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FeedItem {
    pub id: ContentId,
    pub video_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub author: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub analysis: ContentAnalysis,
    #[cfg_attr(feature = "serde", serde(default))]
    pub likes_count: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_liked: bool,
    /// Streamable (HLS) locator.
    pub video_url: String,
}

impl FeedItem {
    pub fn author_or_unknown(&self) -> &str {
        self.author.as_deref().unwrap_or("Unknown")
    }

    /// `"B1 • normal • Author"` subtitle line of a feed card.
    pub fn caption(&self) -> String {
        format!(
            "{} • {} • {}",
            self.analysis.cefr_level,
            self.analysis.speech_speed,
            self.author_or_unknown()
        )
    }
}

/// One page of the cursor-paginated feed.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FeedPage {
    pub items: Vec<FeedItem>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub next_cursor: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub has_more: bool,
}

impl FeedPage {
    /// Whether another page can be requested after this one.
    ///
    /// Requires both the server flag and a cursor: a page that claims more
    /// items without a cursor ends pagination.
    pub fn continues(&self) -> bool {
        self.has_more && self.next_cursor.is_some()
    }
}

/// Authoritative like state returned by the like endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LikeUpdate {
    pub likes_count: u64,
    pub is_liked: bool,
}

/// Body of `POST video-learning/{id}/like`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LikeRequest {
    pub like: bool,
}
