//! Session lifecycle controller.
//!
//! Owns the `unknown -> authenticated | anonymous` state machine. All state
//! changes go through action methods; the state itself is never handed out
//! mutably.

use crate::error::{ApiError, ApiResult};
use crate::http::ApiClient;
use crate::wire::{LoginRequest, LoginResponse, LogoutRequest, VerifyResponse};
use ink_core::validate::validate_registration;
use ink_core::{Credentials, LoginId, Registration, SessionState, TokenPair, User};
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct SessionController {
    api: Arc<ApiClient>,
    state: RwLock<SessionState>,
}

impl SessionController {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            state: RwLock::new(SessionState::Unknown),
        }
    }

    pub async fn current(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Resolve the initial `Unknown` state from storage: verify a stored
    /// access token, or settle on `Anonymous`. Verification failure clears
    /// whatever was stored.
    pub async fn initialize(&self) -> ApiResult<SessionState> {
        let store = self.api.token_store();
        if store.access().is_none() {
            let mut state = self.state.write().await;
            *state = SessionState::Anonymous;
            return Ok(state.clone());
        }

        match self.verify().await {
            Ok(user) => {
                let mut state = self.state.write().await;
                *state = SessionState::Authenticated(user);
                Ok(state.clone())
            }
            Err(err) => {
                tracing::debug!(error = %err, "Stored session failed verification");
                store.clear()?;
                let mut state = self.state.write().await;
                *state = SessionState::Anonymous;
                Ok(state.clone())
            }
        }
    }

    /// Exchange credentials for a token pair, then verify to obtain the
    /// user. Failure leaves the session anonymous and surfaces the server
    /// message.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<User> {
        let result = self.login_inner(credentials).await;
        match result {
            Ok(user) => {
                let mut state = self.state.write().await;
                *state = SessionState::Authenticated(user.clone());
                tracing::info!(username = %user.username, "Logged in");
                Ok(user)
            }
            Err(err) => {
                let mut state = self.state.write().await;
                *state = SessionState::Anonymous;
                Err(err)
            }
        }
    }

    async fn login_inner(&self, credentials: &Credentials) -> ApiResult<User> {
        let response: LoginResponse = self
            .api
            .post("/auth/login/", &LoginRequest::from(credentials))
            .await?;
        self.api
            .token_store()
            .store(&TokenPair::new(response.access, response.refresh))?;
        self.verify().await
    }

    /// Create an account, then log in with the new credentials. A login
    /// failure after a successful registration is a distinct error kind:
    /// the account exists, re-submitting the form will not help.
    pub async fn register(&self, registration: &Registration) -> ApiResult<User> {
        validate_registration(registration).map_err(ApiError::Validation)?;

        let _: serde_json::Value = self.api.post("/auth/register/", registration).await?;

        let password = registration.password.clone();
        let credentials = match registration.login_id() {
            LoginId::Username(username) => Credentials::with_username(username, password),
            LoginId::Email(email) => Credentials::with_email(email, password),
        };
        self.login(&credentials).await.map_err(|err| {
            tracing::warn!(error = %err, "Auto-login after registration failed");
            ApiError::AutoLogin {
                source: Box::new(err),
            }
        })
    }

    /// Best-effort server-side invalidation of the refresh token, then an
    /// unconditional local clear. The session always ends anonymous.
    pub async fn logout(&self) -> ApiResult<()> {
        let store = self.api.token_store();
        if let Some(refresh) = store.refresh() {
            let result: ApiResult<serde_json::Value> = self
                .api
                .post("/auth/logout/", &LogoutRequest { refresh: &refresh })
                .await;
            if let Err(err) = result {
                tracing::debug!(error = %err, "Server-side logout failed; clearing locally anyway");
            }
        }

        let cleared = store.clear();
        let mut state = self.state.write().await;
        *state = SessionState::Anonymous;
        cleared?;
        tracing::info!("Logged out");
        Ok(())
    }

    async fn verify(&self) -> ApiResult<User> {
        let response: VerifyResponse = self.api.get("/auth/verify/", &[]).await?;
        Ok(response.user)
    }
}
