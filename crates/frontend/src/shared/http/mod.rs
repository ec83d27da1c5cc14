//! HTTP layer shared by every view.
//!
//! `ApiClient` attaches the bearer token, classifies failures and runs the
//! single-flight refresh on 401. The transport and token store sit behind
//! traits so the refresh behaviour can be driven without a browser.

mod client;
mod error;
mod refresh_gate;
mod token_store;
mod transport;

pub use client::{api_client, ApiClient, HttpClient};
pub use error::ApiError;
pub use refresh_gate::RefreshGate;
pub use token_store::{LocalStorageTokens, TokenStore};
pub use transport::{ApiRequest, GlooTransport, Method, RawResponse, Transport};

#[cfg(test)]
pub(crate) mod testing;
