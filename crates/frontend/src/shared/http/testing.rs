//! In-memory doubles for the HTTP layer.

use async_trait::async_trait;
use futures::channel::oneshot;
use std::cell::{Cell, RefCell};

use super::error::ApiError;
use super::token_store::TokenStore;
use super::transport::{ApiRequest, RawResponse, Transport};

pub struct MemoryTokens {
    access: RefCell<Option<String>>,
    refresh: RefCell<Option<String>>,
}

impl MemoryTokens {
    pub fn new(access: Option<&str>, refresh: Option<&str>) -> Self {
        Self {
            access: RefCell::new(access.map(str::to_string)),
            refresh: RefCell::new(refresh.map(str::to_string)),
        }
    }

    pub fn set_access(&self, token: Option<&str>) {
        *self.access.borrow_mut() = token.map(str::to_string);
    }

    pub fn set_refresh(&self, token: Option<&str>) {
        *self.refresh.borrow_mut() = token.map(str::to_string);
    }
}

impl TokenStore for MemoryTokens {
    fn access_token(&self) -> Option<String> {
        self.access.borrow().clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.refresh.borrow().clone()
    }

    fn save_tokens(&self, access_token: &str, refresh_token: Option<&str>) {
        *self.access.borrow_mut() = Some(access_token.to_string());
        if let Some(refresh_token) = refresh_token {
            *self.refresh.borrow_mut() = Some(refresh_token.to_string());
        }
    }

    fn clear(&self) {
        *self.access.borrow_mut() = None;
        *self.refresh.borrow_mut() = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshBehaviour {
    Succeed,
    SucceedAfterRelease,
    FailAfterRelease,
    /// Refresh answers with a new token that the API still rejects.
    IssueRevokedToken,
}

/// Fake backend: accepts `valid` (and the refreshed token unless it was
/// issued revoked), answers the refresh endpoint according to `behaviour`,
/// records every call.
pub struct MockTransport {
    valid: String,
    refreshed: String,
    behaviour: RefreshBehaviour,
    refresh_calls: Cell<usize>,
    release: RefCell<Option<oneshot::Receiver<()>>>,
    release_tx: RefCell<Option<oneshot::Sender<()>>>,
    log: RefCell<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new(valid: &str, refreshed: &str, behaviour: RefreshBehaviour) -> Self {
        let (tx, rx) = oneshot::channel();
        Self {
            valid: valid.to_string(),
            refreshed: refreshed.to_string(),
            behaviour,
            refresh_calls: Cell::new(0),
            release: RefCell::new(Some(rx)),
            release_tx: RefCell::new(Some(tx)),
            log: RefCell::new(Vec::new()),
        }
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.get()
    }

    pub fn release_refresh(&self) {
        if let Some(tx) = self.release_tx.borrow_mut().take() {
            let _ = tx.send(());
        }
    }

    /// Paths of non-auth requests sent with `token`.
    pub fn authorized_paths(&self, token: &str) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .filter(|r| r.bearer.as_deref() == Some(token) && !r.path.starts_with("/api/auth"))
            .map(|r| r.path.clone())
            .collect()
    }

    fn ok(body: &str) -> RawResponse {
        RawResponse {
            status: 200,
            body: body.to_string(),
        }
    }

    fn status(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            body: body.to_string(),
        }
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        self.log.borrow_mut().push(request.clone());

        if request.path == "/api/auth/login" {
            return Ok(Self::status(401, r#"{"message": "bad credentials"}"#));
        }

        if request.path == "/api/auth/refresh" {
            self.refresh_calls.set(self.refresh_calls.get() + 1);
            if matches!(
                self.behaviour,
                RefreshBehaviour::SucceedAfterRelease | RefreshBehaviour::FailAfterRelease
            ) {
                let rx = self.release.borrow_mut().take();
                if let Some(rx) = rx {
                    let _ = rx.await;
                }
            }
            return Ok(match self.behaviour {
                RefreshBehaviour::FailAfterRelease => Self::status(401, ""),
                _ => Self::ok(&format!(
                    r#"{{"accessToken": "{}", "refreshToken": "refresh-2"}}"#,
                    self.refreshed
                )),
            });
        }

        let bearer = request.bearer.as_deref();
        let refreshed_ok = self.behaviour != RefreshBehaviour::IssueRevokedToken
            && bearer == Some(self.refreshed.as_str());
        if bearer != Some(self.valid.as_str()) && !refreshed_ok {
            return Ok(Self::status(401, ""));
        }
        if request
            .body
            .as_deref()
            .is_some_and(|b| b.contains("conflict"))
        {
            return Ok(Self::status(409, r#"{"message": "insufficient stock"}"#));
        }
        Ok(Self::ok(r#"{"ok": true}"#))
    }
}
