//! API service trait and its HTTP implementation
//!
//! Domains only see [`FeedApi`]; the runtime holds an `Arc<dyn FeedApi>` so
//! tests can substitute the stub from `infra::testing`.

use async_trait::async_trait;
use std::fmt::Debug;
use vidlex_model::{
    ContentDetail, ContentId, FeedFilters, FeedPage, LikeRequest, LikeUpdate,
    LoginRequest, LoginResponse, PhraseSearchResult,
};

use crate::infra::api_client::ApiClient;
use crate::infra::errors::ApiResult;
use crate::infra::services::auth::{AuthApi, Session, SessionStore};

/// Remote feed operations. Each call is a single attempt.
#[async_trait]
pub trait FeedApi: Send + Sync + Debug {
    /// Fetch one page of the feed starting at `cursor` (`None` = first page).
    async fn fetch_page(
        &self,
        cursor: Option<&str>,
        filters: &FeedFilters,
        page_size: usize,
    ) -> ApiResult<FeedPage>;

    /// Fetch the transcript/translation detail of one item.
    async fn fetch_content(&self, id: &ContentId) -> ApiResult<ContentDetail>;

    /// Set or clear the like of the current user.
    async fn update_like(
        &self,
        id: &ContentId,
        like: bool,
    ) -> ApiResult<LikeUpdate>;

    /// Search video snippets containing `phrase`.
    async fn search_snippets(
        &self,
        phrase: &str,
        limit: usize,
    ) -> ApiResult<PhraseSearchResult>;
}

/// [`FeedApi`] over HTTP, authenticated from a [`SessionStore`].
#[derive(Debug, Clone)]
pub struct HttpFeedApi {
    client: ApiClient,
    sessions: SessionStore,
}

impl HttpFeedApi {
    pub fn new(client: ApiClient, sessions: SessionStore) -> Self {
        Self { client, sessions }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Query string of a feed page request.
    pub fn feed_query(
        cursor: Option<&str>,
        filters: &FeedFilters,
        page_size: usize,
    ) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if page_size > 0 {
            query.push(("limit", page_size.to_string()));
        }
        if let Some(cursor) = cursor.filter(|c| !c.is_empty()) {
            query.push(("cursor", cursor.to_string()));
        }
        query.extend(filters.query_pairs());
        query
    }
}

#[async_trait]
impl FeedApi for HttpFeedApi {
    async fn fetch_page(
        &self,
        cursor: Option<&str>,
        filters: &FeedFilters,
        page_size: usize,
    ) -> ApiResult<FeedPage> {
        let session = self.sessions.require()?;
        let query = Self::feed_query(cursor, filters, page_size);
        self.client
            .get("video-learning/feed", &query, &session)
            .await
    }

    async fn fetch_content(&self, id: &ContentId) -> ApiResult<ContentDetail> {
        let session = self.sessions.require()?;
        self.client
            .get(&format!("video-learning/{id}"), &[], &session)
            .await
    }

    async fn update_like(
        &self,
        id: &ContentId,
        like: bool,
    ) -> ApiResult<LikeUpdate> {
        let session = self.sessions.require()?;
        self.client
            .post(
                &format!("video-learning/{id}/like"),
                &LikeRequest { like },
                Some(&session),
            )
            .await
    }

    async fn search_snippets(
        &self,
        phrase: &str,
        limit: usize,
    ) -> ApiResult<PhraseSearchResult> {
        let session = self.sessions.require()?;
        let query = [("phrase", phrase.to_string()), ("limit", limit.to_string())];
        self.client
            .get("video-learning/search", &query, &session)
            .await
    }
}

#[async_trait]
impl AuthApi for HttpFeedApi {
    async fn login(&self, request: LoginRequest) -> ApiResult<Session> {
        log::info!("[Auth] Logging in as {}", request.email);
        let response: LoginResponse =
            self.client.post("auth/login", &request, None).await?;
        let session = Session::new(response.tokens, response.profile);
        self.sessions.set(Some(session.clone()));
        Ok(session)
    }

    fn logout(&self) {
        self.sessions.set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::errors::ApiError;
    use std::time::Duration;
    use vidlex_model::ProficiencyLevel;

    #[test]
    fn feed_query_skips_missing_cursor() {
        let query =
            HttpFeedApi::feed_query(None, &FeedFilters::default(), 5);
        assert_eq!(query[0], ("limit", "5".to_string()));
        assert!(query.iter().all(|(k, _)| *k != "cursor"));
    }

    #[test]
    fn feed_query_carries_cursor_and_filters() {
        let filters = FeedFilters::default()
            .with_levels(vec![ProficiencyLevel::A2]);
        let query = HttpFeedApi::feed_query(Some("c-2"), &filters, 5);
        assert!(query.contains(&("cursor", "c-2".to_string())));
        assert!(query.contains(&("cefrLevels", "A2".to_string())));
    }

    #[tokio::test]
    async fn calls_without_session_fail_before_any_request() {
        let client =
            ApiClient::new("http://127.0.0.1:9", Duration::from_secs(1))
                .unwrap();
        let api = HttpFeedApi::new(client, SessionStore::new());

        let result = api.fetch_page(None, &FeedFilters::default(), 5).await;
        assert_eq!(result, Err(ApiError::Unauthenticated));

        let result = api.fetch_content(&ContentId::from("v1")).await;
        assert_eq!(result, Err(ApiError::Unauthenticated));
    }
}
