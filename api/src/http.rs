//! Authenticated HTTP client with transparent refresh-on-401 retry.
//!
//! Every request reads the latest stored access token immediately before it
//! is sent. A 401 response triggers a single token refresh and one retry of
//! the original request. Concurrent 401s collapse into one refresh
//! exchange: the first caller performs it while the rest subscribe to a
//! broadcast of the outcome. Serializing the exchange is a correctness
//! requirement, not an optimization — some servers rotate refresh tokens
//! and a losing concurrent exchange would invalidate the winner's token.

use crate::error::{ApiError, ApiResult};
use crate::wire::{RefreshRequest, RefreshResponse};
use config::ClientConfig;
use ink_core::{TokenPair, TokenStore};
use reqwest::{Client, Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, broadcast};

/// Marker for a failed refresh, broadcast to suspended callers. Each maps
/// it to `Unauthorized` for its own request.
#[derive(Debug, Clone)]
struct RefreshFailed;

type RefreshOutcome = Result<String, RefreshFailed>;

enum RefreshRole {
    Leader { refresh_token: String },
    Follower(broadcast::Receiver<RefreshOutcome>),
}

pub struct ApiClient {
    http: Client,
    api_base: String,
    store: Arc<dyn TokenStore>,
    /// Occupied while a refresh exchange is in flight; followers subscribe
    /// to the sender stored here.
    refresh_slot: Mutex<Option<broadcast::Sender<RefreshOutcome>>>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, store: Arc<dyn TokenStore>) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_base: config.api_base(),
            store,
            refresh_slot: Mutex::new(None),
        })
    }

    pub fn token_store(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.store)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> ApiResult<T> {
        let response = self.execute(Method::GET, path, None, params).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let body = serde_json::to_value(body)?;
        let response = self.execute(Method::POST, path, Some(body), &[]).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let body = serde_json::to_value(body)?;
        let response = self.execute(Method::PUT, path, Some(body), &[]).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.execute(Method::DELETE, path, None, &[]).await?;
        Ok(())
    }

    /// Issue the request, retrying at most once after a 401. A second 401
    /// after the retry maps to `Unauthorized` in `check`, never to another
    /// refresh.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        params: &[(String, String)],
    ) -> ApiResult<Response> {
        let first = self
            .send(method.clone(), path, body.as_ref(), params, self.store.access())
            .await?;
        if first.status() != StatusCode::UNAUTHORIZED {
            return Self::check(first, path).await;
        }

        let access = self.refresh_access().await?;
        tracing::debug!(path, "Retrying request with refreshed access token");
        let second = self
            .send(method, path, body.as_ref(), params, Some(access))
            .await?;
        Self::check(second, path).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        params: &[(String, String)],
        access: Option<String>,
    ) -> ApiResult<Response> {
        let url = format!("{}{}", self.api_base, path);
        let mut request = self.http.request(method, &url);
        if !params.is_empty() {
            request = request.query(params);
        }
        if let Some(token) = access {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    async fn check(response: Response, path: &str) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_response(status, &body, path))
    }

    /// Single-flight refresh. The caller that finds the slot empty becomes
    /// the leader and performs the exchange; everyone else subscribes to
    /// the outcome of that one exchange.
    async fn refresh_access(&self) -> ApiResult<String> {
        let role = {
            let mut slot = self.refresh_slot.lock().await;
            match slot.as_ref() {
                Some(sender) => RefreshRole::Follower(sender.subscribe()),
                None => {
                    let Some(refresh_token) = self.store.refresh() else {
                        drop(slot);
                        // Nothing to exchange: the session is over.
                        self.store.clear()?;
                        return Err(ApiError::unauthorized("No refresh token available"));
                    };
                    let (sender, _) = broadcast::channel(1);
                    *slot = Some(sender);
                    RefreshRole::Leader { refresh_token }
                }
            }
        };

        match role {
            RefreshRole::Follower(mut receiver) => match receiver.recv().await {
                Ok(Ok(access)) => Ok(access),
                _ => Err(ApiError::unauthorized("Session refresh failed")),
            },
            RefreshRole::Leader { refresh_token } => {
                let outcome = self.exchange_refresh(&refresh_token).await;

                // Release the slot, then publish; subscribers registered
                // while the slot was occupied still receive the send.
                let sender = {
                    let mut slot = self.refresh_slot.lock().await;
                    slot.take()
                };

                match outcome {
                    Ok(access) => {
                        if let Some(sender) = sender {
                            let _ = sender.send(Ok(access.clone()));
                        }
                        Ok(access)
                    }
                    Err(err) => {
                        if let Err(store_err) = self.store.clear() {
                            tracing::warn!(error = %store_err, "Failed to clear tokens after refresh failure");
                        }
                        if let Some(sender) = sender {
                            let _ = sender.send(Err(RefreshFailed));
                        }
                        Err(err)
                    }
                }
            }
        }
    }

    /// Exchange the refresh token for a new access token and store it. The
    /// exchange itself carries no bearer header and is never retried; any
    /// failure surfaces as `Unauthorized`.
    async fn exchange_refresh(&self, refresh_token: &str) -> ApiResult<String> {
        tracing::debug!("Exchanging refresh token for new access token");
        let url = format!("{}/auth/refresh/", self.api_base);
        let response = self
            .http
            .post(&url)
            .json(&RefreshRequest {
                refresh: refresh_token,
            })
            .send()
            .await
            .map_err(|err| {
                tracing::debug!(error = %err, "Refresh exchange transport failure");
                ApiError::unauthorized("Session refresh failed")
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, "Refresh exchange rejected");
            return Err(ApiError::unauthorized("Session expired, please log in again"));
        }

        let parsed: RefreshResponse = response
            .json()
            .await
            .map_err(|_| ApiError::unauthorized("Session refresh failed"))?;
        self.store
            .store(&TokenPair::access_only(parsed.access.as_str()))?;
        Ok(parsed.access)
    }
}
