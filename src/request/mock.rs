//! # Mock Transport
//!
//! An expectation-queue [`Transport`] for testing code that issues requests.
//!
//! ```rust
//! use tul::request::{mock::MockTransport, request, RequestOptions, Response};
//!
//! let transport = MockTransport::new();
//! transport.expect("GET", "/people").return_ok(200, "[]");
//!
//! let response = request(&transport, &RequestOptions::get("/people")).unwrap();
//! assert_eq!(response, Response::Text("[]".into()));
//! transport.verify(); // every expectation was consumed
//! ```

use super::{RawResponse, RequestOptions, Transport, TransportError};
use std::cell::RefCell;
use std::collections::VecDeque;

struct Expectation {
    method: String,
    url: String,
    response: Result<RawResponse, TransportError>,
}

/// Answers requests from a queue of expectations, in order.
///
/// A request that does not match the next expectation panics, as does a request
/// arriving after the queue is empty.
#[derive(Default)]
pub struct MockTransport {
    expectations: RefCell<VecDeque<Expectation>>,
    requests: RefCell<Vec<RequestOptions>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a request with this method and URL next.
    pub fn expect(&self, method: impl Into<String>, url: impl Into<String>) -> ExpectationBuilder<'_> {
        ExpectationBuilder {
            method: method.into(),
            url: url.into(),
            transport: self,
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<RequestOptions> {
        self.requests.borrow().clone()
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.borrow().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &RequestOptions) -> Result<RawResponse, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        let expectation = self.expectations.borrow_mut().pop_front();

        match expectation {
            Some(exp) if exp.method == request.method && exp.url == request.url => exp.response,
            Some(exp) => panic!(
                "Unexpected request {} {} (expected {} {})",
                request.method, request.url, exp.method, exp.url
            ),
            None => panic!("Unexpected request {} {}", request.method, request.url),
        }
    }
}

/// Builder returned by [`MockTransport::expect`].
pub struct ExpectationBuilder<'a> {
    method: String,
    url: String,
    transport: &'a MockTransport,
}

impl ExpectationBuilder<'_> {
    pub fn return_ok(self, status: u16, body: impl Into<String>) {
        self.push(Ok(RawResponse {
            status,
            body: body.into(),
        }));
    }

    pub fn return_err(self, error: TransportError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<RawResponse, TransportError>) {
        self.transport.expectations.borrow_mut().push_back(Expectation {
            method: self.method,
            url: self.url,
            response,
        });
    }
}
