use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use vidlex_model::{
    ContentDetail, ContentId, FeedFilters, FeedPage, LikeUpdate,
    PhraseSearchResult,
};

use crate::infra::errors::{ApiError, ApiResult};
use crate::infra::services::api::FeedApi;

/// A request observed by [`StubFeedApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum StubCall {
    FetchPage {
        cursor: Option<String>,
        filters: FeedFilters,
        page_size: usize,
    },
    FetchContent(ContentId),
    UpdateLike {
        id: ContentId,
        like: bool,
    },
    Search {
        phrase: String,
        limit: usize,
    },
}

/// Scripted feed service. Pages are keyed by the cursor that requests them
/// (`None` for the first page).
#[derive(Debug, Clone, Default)]
pub struct StubFeedApi {
    inner: Arc<Mutex<InnerFeedState>>,
}

#[derive(Debug, Default)]
struct InnerFeedState {
    pages: HashMap<Option<String>, FeedPage>,
    details: HashMap<ContentId, ContentDetail>,
    likes: HashMap<ContentId, LikeUpdate>,
    searches: HashMap<String, PhraseSearchResult>,
    failures: HashMap<&'static str, ApiError>,
    unauthenticated: bool,
    calls: Vec<StubCall>,
}

impl StubFeedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, cursor: Option<&str>, page: FeedPage) -> Self {
        {
            let mut inner = self.inner.lock();
            for item in &page.items {
                inner.likes.entry(item.id.clone()).or_insert(LikeUpdate {
                    likes_count: item.likes_count,
                    is_liked: item.is_liked,
                });
            }
            inner.pages.insert(cursor.map(str::to_string), page);
        }
        self
    }

    pub fn with_detail(self, id: impl Into<ContentId>, detail: ContentDetail) -> Self {
        self.inner.lock().details.insert(id.into(), detail);
        self
    }

    pub fn with_search(self, phrase: &str, result: PhraseSearchResult) -> Self {
        self.inner.lock().searches.insert(phrase.to_string(), result);
        self
    }

    /// Every call to `operation` (`"fetch_page"`, `"fetch_content"`,
    /// `"update_like"`, `"search_snippets"`) fails with `error`.
    pub fn failing(self, operation: &'static str, error: ApiError) -> Self {
        self.inner.lock().failures.insert(operation, error);
        self
    }

    pub fn signed_out(self) -> Self {
        self.inner.lock().unauthenticated = true;
        self
    }

    pub fn calls(&self) -> Vec<StubCall> {
        self.inner.lock().calls.clone()
    }

    fn record(&self, operation: &'static str, call: StubCall) -> ApiResult<()> {
        let mut inner = self.inner.lock();
        inner.calls.push(call);
        if inner.unauthenticated {
            return Err(ApiError::Unauthenticated);
        }
        match inner.failures.get(operation) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn not_found(what: &str) -> ApiError {
        ApiError::Server {
            status: 404,
            message: format!("{what} not found"),
        }
    }
}

#[async_trait]
impl FeedApi for StubFeedApi {
    async fn fetch_page(
        &self,
        cursor: Option<&str>,
        filters: &FeedFilters,
        page_size: usize,
    ) -> ApiResult<FeedPage> {
        self.record(
            "fetch_page",
            StubCall::FetchPage {
                cursor: cursor.map(str::to_string),
                filters: filters.clone(),
                page_size,
            },
        )?;
        let key = cursor.map(str::to_string);
        Ok(self.inner.lock().pages.get(&key).cloned().unwrap_or_default())
    }

    async fn fetch_content(&self, id: &ContentId) -> ApiResult<ContentDetail> {
        self.record("fetch_content", StubCall::FetchContent(id.clone()))?;
        self.inner
            .lock()
            .details
            .get(id)
            .cloned()
            .ok_or_else(|| Self::not_found("Video"))
    }

    async fn update_like(&self, id: &ContentId, like: bool) -> ApiResult<LikeUpdate> {
        self.record(
            "update_like",
            StubCall::UpdateLike {
                id: id.clone(),
                like,
            },
        )?;
        let mut inner = self.inner.lock();
        let entry = inner.likes.get_mut(id).ok_or_else(|| Self::not_found("Video"))?;
        if entry.is_liked != like {
            entry.likes_count = if like {
                entry.likes_count + 1
            } else {
                entry.likes_count.saturating_sub(1)
            };
            entry.is_liked = like;
        }
        Ok(*entry)
    }

    async fn search_snippets(
        &self,
        phrase: &str,
        limit: usize,
    ) -> ApiResult<PhraseSearchResult> {
        self.record(
            "search_snippets",
            StubCall::Search {
                phrase: phrase.to_string(),
                limit,
            },
        )?;
        let mut result = self
            .inner
            .lock()
            .searches
            .get(phrase)
            .cloned()
            .unwrap_or_else(|| PhraseSearchResult {
                phrase: phrase.to_string(),
                ..PhraseSearchResult::default()
            });
        result.items.truncate(limit);
        result.returned = result.items.len();
        Ok(result)
    }
}
