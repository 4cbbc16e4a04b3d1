//! Transport abstraction and the blocking HTTP implementation.
//!
//! The access layer only ever consumes the [`Transport`] trait; the `mock`
//! module provides a scripted implementation for tests.

use crate::auth::Credentials;
use crate::config::ApiConfig;
use crate::error::{HttpError, HttpResult};
use crate::request::{Method, Request};
use crate::response::{Response, Status};
use std::collections::HashMap;
use tracing::debug;

/// Executes an API request and decodes the response.
///
/// Implementations block the calling thread until a response or a
/// transport-level failure; cancellation and timeouts are their concern.
pub trait Transport: Send + Sync {
    /// Sends the request and returns the decoded response.
    ///
    /// Statuses outside the declared protocol set are reported as
    /// [`HttpError::Api`]; everything else comes back as a [`Response`]
    /// for the caller to interpret.
    fn execute(&self, request: &Request) -> HttpResult<Response>;
}

/// Blocking transport over a reqwest client.
pub struct HttpTransport {
    http: reqwest::blocking::Client,
    config: ApiConfig,
    credentials: Credentials,
}

impl HttpTransport {
    /// Builds a transport for the given endpoint and credentials.
    pub fn new(config: ApiConfig, credentials: Credentials) -> HttpResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| HttpError::Network(e.to_string()))?;

        Ok(Self {
            http,
            config,
            credentials,
        })
    }

    /// The transport configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn url_for(&self, uri: &str) -> String {
        format!("{}{}", self.config.endpoint, uri.trim_start_matches('/'))
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &Request) -> HttpResult<Response> {
        // PATCH rides on POST with an override header.
        let (wire_method, method_override) = match request.method() {
            Method::Head => (reqwest::Method::HEAD, None),
            Method::Get => (reqwest::Method::GET, None),
            Method::Post => (reqwest::Method::POST, None),
            Method::Put => (reqwest::Method::PUT, None),
            Method::Patch => (reqwest::Method::POST, Some("PATCH")),
            Method::Delete => (reqwest::Method::DELETE, None),
        };

        let url = self.url_for(request.uri());
        let mut builder = self
            .http
            .request(wire_method, &url)
            .header("Accept", "application/json")
            .header("User-Agent", &self.config.user_agent)
            .header("Authorization", self.credentials.authorization_header());

        if let Some(name) = method_override {
            builder = builder.header("X-Http-Method-Override", name);
        }

        for (name, value) in request.headers() {
            builder = builder.header(name, value.to_string());
        }

        if request.method().has_body() {
            if let Some(payload) = request.payload() {
                builder = builder
                    .header("Content-Type", payload.content_type())
                    .body(payload.encode());
            }
        }

        debug!(method = %request.method(), %url, "executing api request");

        let wire_response = builder
            .send()
            .map_err(|e| HttpError::Network(e.to_string()))?;

        let code = wire_response.status().as_u16();
        let headers: HashMap<String, String> = wire_response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let text = wire_response
            .text()
            .map_err(|e| HttpError::Network(e.to_string()))?;
        let body = serde_json::from_str(&text).ok();

        let status = Status::from_code(code);
        let response = Response::new(status, headers, body);

        if !status.is_declared() {
            let description = response
                .description()
                .unwrap_or("unknown error")
                .to_string();
            debug!(code, %description, "api request rejected");
            return Err(HttpError::Api {
                status: code,
                description,
            });
        }

        debug!(code, "api request completed");
        Ok(response)
    }
}

/// A scripted transport for tests.
pub mod mock {
    use super::*;
    use crate::request::Payload;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// A request as the mock transport saw it, headers already serialized.
    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        pub method: Method,
        pub uri: String,
        pub headers: Vec<(String, String)>,
        pub payload: Option<Payload>,
    }

    impl RecordedRequest {
        /// A serialized header value, looked up case-insensitively.
        #[must_use]
        pub fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(n, _)| n.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        }
    }

    /// Transport that replays a scripted queue of responses and records
    /// the traffic it carried.
    #[derive(Default)]
    pub struct MockTransport {
        script: Mutex<VecDeque<HttpResult<Response>>>,
        seen: Mutex<Vec<RecordedRequest>>,
    }

    impl MockTransport {
        /// Creates an empty mock.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Queues the next response.
        pub fn enqueue(&self, response: Response) {
            self.script.lock().unwrap().push_back(Ok(response));
        }

        /// Queues the next failure.
        pub fn enqueue_error(&self, error: HttpError) {
            self.script.lock().unwrap().push_back(Err(error));
        }

        /// Requests executed so far, in order.
        #[must_use]
        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.seen.lock().unwrap().clone()
        }

        /// Number of requests executed so far.
        #[must_use]
        pub fn request_count(&self) -> usize {
            self.seen.lock().unwrap().len()
        }

        /// The most recent request, if any.
        #[must_use]
        pub fn last_request(&self) -> Option<RecordedRequest> {
            self.seen.lock().unwrap().last().cloned()
        }
    }

    impl Transport for MockTransport {
        fn execute(&self, request: &Request) -> HttpResult<Response> {
            self.seen.lock().unwrap().push(RecordedRequest {
                method: request.method(),
                uri: request.uri().to_string(),
                headers: request
                    .headers()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect(),
                payload: request.payload().cloned(),
            });

            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(HttpError::Network("mock script exhausted".to_string())))
        }
    }
}
