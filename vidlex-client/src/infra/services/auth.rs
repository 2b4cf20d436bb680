//! Signed-in session and the login call.
//!
//! Token persistence is the host's concern; the store here only holds the
//! session for the lifetime of the process.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::fmt::Debug;
use std::sync::Arc;
use vidlex_model::{AuthTokens, LoginRequest, UserId, UserProfile};

use crate::infra::errors::{ApiError, ApiResult};

/// Bearer token plus the profile it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    tokens: AuthTokens,
    profile: UserProfile,
}

impl Session {
    pub fn new(tokens: AuthTokens, profile: UserProfile) -> Self {
        Self { tokens, profile }
    }

    pub fn access_token(&self) -> &str {
        &self.tokens.access_token
    }

    pub fn user_id(&self) -> &UserId {
        &self.profile.id
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn is_admin(&self) -> bool {
        self.profile.is_admin()
    }

    /// A session is usable only with both a token and a user id.
    pub fn is_complete(&self) -> bool {
        !self.tokens.access_token.is_empty() && !self.profile.id.0.is_empty()
    }
}

/// Shared, process-local holder of the current session.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        let store = Self::new();
        store.set(Some(session));
        store
    }

    pub fn set(&self, session: Option<Session>) {
        if let Some(session) = session.as_ref() {
            log::info!(
                "[Auth] Session set for user {}",
                session.profile.id
            );
        } else {
            log::info!("[Auth] Session cleared");
        }
        *self.inner.write() = session;
    }

    pub fn current(&self) -> Option<Session> {
        self.inner.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().as_ref().is_some_and(Session::is_complete)
    }

    /// The current session, or `Unauthenticated` when absent or incomplete.
    pub fn require(&self) -> ApiResult<Session> {
        match self.current() {
            Some(session) if session.is_complete() => Ok(session),
            _ => Err(ApiError::Unauthenticated),
        }
    }
}

/// Credential login against `auth/login`.
#[async_trait]
pub trait AuthApi: Send + Sync + Debug {
    /// Log in and store the resulting session.
    async fn login(&self, request: LoginRequest) -> ApiResult<Session>;

    /// Drop the current session.
    fn logout(&self);
}
