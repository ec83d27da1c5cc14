use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

use contracts::system::auth::{RefreshRequest, RefreshResponse};

use super::error::ApiError;
use super::refresh_gate::RefreshGate;
use super::token_store::{LocalStorageTokens, TokenStore};
use super::transport::{ApiRequest, GlooTransport, Method, RawResponse, Transport};
use crate::shared::api_utils::api_base;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REFRESH_PATH: &str = "/api/auth/refresh";

/// Login and refresh never go through the refresh gate.
fn is_auth_endpoint(path: &str) -> bool {
    path.starts_with(LOGIN_PATH) || path.starts_with(REFRESH_PATH)
}

/// JSON client for the logistics API.
pub struct ApiClient<T: Transport, S: TokenStore> {
    transport: T,
    tokens: S,
    gate: RefreshGate,
    on_session_expired: RefCell<Option<Rc<dyn Fn()>>>,
}

pub type HttpClient = ApiClient<GlooTransport, LocalStorageTokens>;

thread_local! {
    static CLIENT: Rc<HttpClient> =
        Rc::new(ApiClient::new(GlooTransport::new(api_base()), LocalStorageTokens));
}

/// The browser-wide client. There is one refresh gate per page.
pub fn api_client() -> Rc<HttpClient> {
    CLIENT.with(Rc::clone)
}

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    pub fn new(transport: T, tokens: S) -> Self {
        Self {
            transport,
            tokens,
            gate: RefreshGate::new(),
            on_session_expired: RefCell::new(None),
        }
    }

    pub fn tokens(&self) -> &S {
        &self.tokens
    }

    /// Called after tokens are cleared because the session could not be renewed.
    pub fn set_on_session_expired(&self, callback: impl Fn() + 'static) {
        *self.on_session_expired.borrow_mut() = Some(Rc::new(callback));
    }

    /// Renew the access token up front, e.g. when a restored token has expired.
    /// Shares the in-flight refresh if one is already running.
    pub async fn renew_session(&self) -> Result<String, ApiError> {
        self.gate.run(|| self.refresh_session()).await
    }

    /// Send a request, refreshing the session once on 401.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<RawResponse, ApiError> {
        let sent_token = self.tokens.access_token();
        let request = ApiRequest {
            method,
            path: path.to_string(),
            body,
            bearer: sent_token.clone(),
        };

        log::debug!("{} {}", method, path);
        let response = self.transport.send(&request).await?;
        if response.status != 401 || is_auth_endpoint(path) {
            return Ok(response);
        }

        log::info!("{} {} returned 401, renewing session", method, path);
        let token = self.fresh_token(sent_token.as_deref()).await?;
        let retry = ApiRequest {
            bearer: Some(token),
            ..request
        };
        let response = self.transport.send(&retry).await?;
        if response.status == 401 {
            log::warn!("{} {} still unauthorized after refresh", method, path);
            self.expire_session();
            return Err(ApiError::SessionExpired);
        }
        Ok(response)
    }

    /// Token to retry with: the stored one if somebody else already renewed
    /// it since this request was sent, otherwise the outcome of the gate.
    async fn fresh_token(&self, stale: Option<&str>) -> Result<String, ApiError> {
        if !self.gate.is_refreshing() {
            if let Some(current) = self.tokens.access_token() {
                if Some(current.as_str()) != stale {
                    return Ok(current);
                }
            }
        }
        self.gate.run(|| self.refresh_session()).await
    }

    async fn refresh_session(&self) -> Result<String, ApiError> {
        match self.try_refresh().await {
            Ok(token) => {
                log::info!("Session renewed");
                Ok(token)
            }
            Err(e) => {
                log::warn!("Session refresh failed: {}", e);
                self.expire_session();
                Err(ApiError::SessionExpired)
            }
        }
    }

    async fn try_refresh(&self) -> Result<String, ApiError> {
        let refresh_token = self
            .tokens
            .refresh_token()
            .ok_or(ApiError::SessionExpired)?;
        let body = serde_json::to_string(&RefreshRequest { refresh_token })
            .map_err(|e| ApiError::Serialize(e.to_string()))?;
        let request = ApiRequest {
            method: Method::Post,
            path: REFRESH_PATH.to_string(),
            body: Some(body),
            bearer: None,
        };

        let response = ensure_success(self.transport.send(&request).await?)?;
        let refreshed: RefreshResponse = decode(&response.body)?;
        self.tokens
            .save_tokens(&refreshed.access_token, refreshed.refresh_token.as_deref());
        Ok(refreshed.access_token)
    }

    /// Clears the stored tokens and notifies the listener, once per session.
    fn expire_session(&self) {
        let had_session =
            self.tokens.access_token().is_some() || self.tokens.refresh_token().is_some();
        self.tokens.clear();
        if !had_session {
            return;
        }
        let callback = self.on_session_expired.borrow().clone();
        if let Some(callback) = callback {
            callback();
        }
    }

    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let response = ensure_success(self.execute(Method::Get, path, None).await?)?;
        decode(&response.body)
    }

    pub async fn send_json<B: Serialize, R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let body = encode(body)?;
        let response = ensure_success(self.execute(method, path, Some(body)).await?)?;
        decode(&response.body)
    }

    /// For endpoints whose response body is ignored.
    pub async fn send_unit<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let body = encode(body)?;
        ensure_success(self.execute(method, path, Some(body)).await?)?;
        Ok(())
    }

    pub async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        self.send_json(Method::Post, path, body).await
    }

    pub async fn put_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        self.send_json(Method::Put, path, body).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        ensure_success(self.execute(Method::Delete, path, None).await?)?;
        Ok(())
    }
}

fn ensure_success(response: RawResponse) -> Result<RawResponse, ApiError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::from_status(response.status, &response.body))
    }
}

fn encode<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Serialize(e.to_string()))
}

/// An empty body decodes as JSON `null`, so `()` and `Option<T>` work for 204.
fn decode<R: DeserializeOwned>(body: &str) -> Result<R, ApiError> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::http::testing::{MemoryTokens, MockTransport, RefreshBehaviour};
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;
    use std::cell::Cell;

    fn client(refresh: RefreshBehaviour) -> Rc<ApiClient<MockTransport, MemoryTokens>> {
        Rc::new(ApiClient::new(
            MockTransport::new("token-1", "token-2", refresh),
            MemoryTokens::new(Some("token-1"), Some("refresh-1")),
        ))
    }

    #[test]
    fn valid_token_passes_straight_through() {
        let c = client(RefreshBehaviour::Succeed);
        let value: serde_json::Value = block_on(c.get_json("/api/products")).unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(c.transport.refresh_calls(), 0);
    }

    #[test]
    fn expired_token_is_refreshed_and_request_retried() {
        let c = client(RefreshBehaviour::Succeed);
        c.tokens.set_access(Some("stale"));
        let value: serde_json::Value = block_on(c.get_json("/api/products")).unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(c.transport.refresh_calls(), 1);
        assert_eq!(c.tokens.access_token().as_deref(), Some("token-2"));
        assert_eq!(c.tokens.refresh_token().as_deref(), Some("refresh-2"));
    }

    #[test]
    fn concurrent_401s_share_one_refresh() {
        let c = client(RefreshBehaviour::SucceedAfterRelease);
        c.tokens.set_access(Some("stale"));
        let results = Rc::new(RefCell::new(Vec::new()));

        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        for i in 0..4 {
            let c = c.clone();
            let results = results.clone();
            spawner
                .spawn_local(async move {
                    let path = format!("/api/sales-orders/{}", i);
                    let r: Result<serde_json::Value, _> = c.get_json(&path).await;
                    results.borrow_mut().push(r.is_ok());
                })
                .unwrap();
        }

        pool.run_until_stalled();
        assert_eq!(c.transport.refresh_calls(), 1);
        assert_eq!(c.gate.waiting(), 3);

        c.transport.release_refresh();
        pool.run();

        assert_eq!(c.transport.refresh_calls(), 1);
        assert_eq!(*results.borrow(), vec![true; 4]);
        let retried = c.transport.authorized_paths("token-2");
        assert_eq!(retried.len(), 4);
    }

    #[test]
    fn failed_refresh_fails_everyone_and_clears_session() {
        let c = client(RefreshBehaviour::FailAfterRelease);
        c.tokens.set_access(Some("stale"));
        let expired = Rc::new(Cell::new(0));
        {
            let expired = expired.clone();
            c.set_on_session_expired(move || expired.set(expired.get() + 1));
        }
        let results = Rc::new(RefCell::new(Vec::new()));

        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        for _ in 0..3 {
            let c = c.clone();
            let results = results.clone();
            spawner
                .spawn_local(async move {
                    let r: Result<serde_json::Value, _> = c.get_json("/api/inventory").await;
                    results.borrow_mut().push(r);
                })
                .unwrap();
        }

        pool.run_until_stalled();
        c.transport.release_refresh();
        pool.run();

        assert_eq!(c.transport.refresh_calls(), 1);
        assert!(results
            .borrow()
            .iter()
            .all(|r| r == &Err(ApiError::SessionExpired)));
        assert_eq!(c.tokens.access_token(), None);
        assert_eq!(c.tokens.refresh_token(), None);
        assert_eq!(expired.get(), 1);
    }

    #[test]
    fn retry_rejected_after_refresh_expires_session_once() {
        let c = client(RefreshBehaviour::IssueRevokedToken);
        c.tokens.set_access(Some("stale"));
        let expired = Rc::new(Cell::new(0));
        {
            let expired = expired.clone();
            c.set_on_session_expired(move || expired.set(expired.get() + 1));
        }

        let r: Result<serde_json::Value, _> = block_on(c.get_json("/api/shipments"));

        assert_eq!(r, Err(ApiError::SessionExpired));
        assert_eq!(c.transport.refresh_calls(), 1);
        assert_eq!(c.transport.authorized_paths("token-2"), vec!["/api/shipments"]);
        assert_eq!(c.tokens.access_token(), None);
        assert_eq!(c.tokens.refresh_token(), None);
        assert_eq!(expired.get(), 1);
    }

    #[test]
    fn rejected_retries_in_parallel_notify_once() {
        let c = client(RefreshBehaviour::IssueRevokedToken);
        c.tokens.set_access(Some("stale"));
        let expired = Rc::new(Cell::new(0));
        {
            let expired = expired.clone();
            c.set_on_session_expired(move || expired.set(expired.get() + 1));
        }
        let results = Rc::new(RefCell::new(Vec::new()));

        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        for path in ["/api/inventory", "/api/carriers"] {
            let c = c.clone();
            let results = results.clone();
            spawner
                .spawn_local(async move {
                    let r: Result<serde_json::Value, _> = c.get_json(path).await;
                    results.borrow_mut().push(r);
                })
                .unwrap();
        }
        pool.run();

        assert!(results
            .borrow()
            .iter()
            .all(|r| r == &Err(ApiError::SessionExpired)));
        assert_eq!(c.transport.refresh_calls(), 1);
        assert_eq!(expired.get(), 1);
    }

    #[test]
    fn login_401_is_not_intercepted() {
        let c = client(RefreshBehaviour::Succeed);
        let r = block_on(c.execute(Method::Post, LOGIN_PATH, Some("{}".into()))).unwrap();
        assert_eq!(r.status, 401);
        assert_eq!(c.transport.refresh_calls(), 0);
    }

    #[test]
    fn missing_refresh_token_expires_session() {
        let c = client(RefreshBehaviour::Succeed);
        c.tokens.set_access(Some("stale"));
        c.tokens.set_refresh(None);
        let r: Result<serde_json::Value, _> = block_on(c.get_json("/api/products"));
        assert_eq!(r, Err(ApiError::SessionExpired));
        assert_eq!(c.transport.refresh_calls(), 0);
    }

    #[test]
    fn token_renewed_elsewhere_is_reused_without_refresh() {
        let c = client(RefreshBehaviour::Succeed);
        // Request was sent with "stale", but another tab already stored token-2.
        let token = block_on(async {
            c.tokens.set_access(Some("token-2"));
            c.fresh_token(Some("stale")).await
        });
        assert_eq!(token, Ok("token-2".to_string()));
        assert_eq!(c.transport.refresh_calls(), 0);
    }

    #[test]
    fn renew_session_stores_new_tokens() {
        let c = client(RefreshBehaviour::Succeed);
        let token = block_on(c.renew_session());
        assert_eq!(token, Ok("token-2".to_string()));
        assert_eq!(c.tokens.access_token().as_deref(), Some("token-2"));
        assert_eq!(c.transport.refresh_calls(), 1);
    }

    #[test]
    fn conflict_is_classified() {
        let c = client(RefreshBehaviour::Succeed);
        let r: Result<serde_json::Value, _> = block_on(c.post_json(
            "/api/sales-orders",
            &serde_json::json!({"conflict": true}),
        ));
        assert!(matches!(r, Err(ApiError::Conflict(Some(_)))));
    }

    #[test]
    fn empty_body_decodes_to_unit() {
        let unit: Result<(), ApiError> = decode("");
        assert!(unit.is_ok());
    }
}
