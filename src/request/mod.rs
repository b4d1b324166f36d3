//! # Request Boundary
//!
//! The library does not ship an HTTP client. This module fixes the contract between
//! callers and whatever client they plug in:
//!
//! - [`RequestOptions`]: what to send. Deserializes from the familiar
//!   `{url, method, headers, timeout, body, isJSON}` option objects.
//! - [`Transport`]: one blocking exchange, implemented by the caller.
//! - [`request`]: applies the response rules (status ≥ 400 is an error, `is_json`
//!   parses the body) on top of any transport.
//! - [`JsonpRegistry`]: per-owner storage for JSONP callbacks.
//! - [`mock`]: an expectation-based [`Transport`] for tests.
//!
//! The `(error, response)` callback convention maps onto the returned `Result`.

mod error;
mod jsonp;
pub mod mock;

pub use error::*;
pub use jsonp::*;

use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Options for a single request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOptions {
    pub url: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub headers: IndexMap<String, String>,
    #[serde(default, alias = "timeout", skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Parse the response body as JSON.
    #[serde(default, rename = "isJSON")]
    pub is_json: bool,
}

fn default_method() -> String {
    "GET".to_owned()
}

impl RequestOptions {
    /// A `GET` request for `url` with no headers, body or timeout.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: default_method(),
            headers: IndexMap::new(),
            timeout_ms: None,
            body: None,
            is_json: false,
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.timeout_ms = Some(ms);
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn json(mut self) -> Self {
        self.is_json = true;
        self
    }
}

/// Status and body as received by a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Successful response, shaped by [`RequestOptions::is_json`].
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Text(String),
    Json(Value),
}

/// Performs one request/response exchange.
///
/// Implementations are expected to honour `timeout_ms` by returning
/// [`TransportError::TimedOut`].
pub trait Transport {
    fn send(&self, request: &RequestOptions) -> Result<RawResponse, TransportError>;
}

/// Sends `options` through `transport` and interprets the response.
pub fn request<T: Transport + ?Sized>(
    transport: &T,
    options: &RequestOptions,
) -> Result<Response, RequestError> {
    debug!(method = %options.method, url = %options.url, "Sending request");

    let raw = transport
        .send(options)
        .map_err(|e| match e {
            TransportError::TimedOut => RequestError::Timeout {
                ms: options.timeout_ms.unwrap_or_default(),
            },
            TransportError::Failed(reason) => RequestError::Transport(reason),
        })
        .inspect_err(|e| warn!(url = %options.url, error = %e, "Request failed"))?;

    if raw.status >= 400 {
        warn!(url = %options.url, status = raw.status, "Request failed");
        return Err(RequestError::Status {
            url: options.url.clone(),
            status: raw.status,
        });
    }

    debug!(url = %options.url, status = raw.status, "Response received");
    if options.is_json {
        Ok(Response::Json(serde_json::from_str(&raw.body)?))
    } else {
        Ok(Response::Text(raw.body))
    }
}
