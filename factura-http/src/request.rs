//! Request model: methods, typed header values, payloads.

use crate::etag::Etag;
use crate::range::RangeSpec;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// HTTP methods the API speaks.
///
/// PATCH is carried over POST with an override header by the transport;
/// the access layer never deals with that convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Head,
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Wire name of the method.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Head => "HEAD",
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// Whether a request with this method carries a body.
    #[must_use]
    pub fn has_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A header value that serializes to its wire string at send time.
///
/// Conditional and pagination headers carry structured values (instants,
/// tokens, ranges); keeping them typed until transmission avoids formatting
/// them in more than one place.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    Text(String),
    Date(DateTime<Utc>),
    Token(Etag),
    Range(RangeSpec),
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderValue::Text(text) => f.write_str(text),
            HeaderValue::Date(date) => {
                f.write_str(&date.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            HeaderValue::Token(token) => write!(f, "{token}"),
            HeaderValue::Range(range) => write!(f, "{range}"),
        }
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        HeaderValue::Text(value.to_string())
    }
}

impl From<String> for HeaderValue {
    fn from(value: String) -> Self {
        HeaderValue::Text(value)
    }
}

impl From<DateTime<Utc>> for HeaderValue {
    fn from(value: DateTime<Utc>) -> Self {
        HeaderValue::Date(value)
    }
}

impl From<Etag> for HeaderValue {
    fn from(value: Etag) -> Self {
        HeaderValue::Token(value)
    }
}

impl From<RangeSpec> for HeaderValue {
    fn from(value: RangeSpec) -> Self {
        HeaderValue::Range(value)
    }
}

/// Request body plus its content type.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// `application/x-www-form-urlencoded` fields, encoded in key order.
    Form(BTreeMap<String, String>),
    /// A prebuilt body with an explicit content type.
    Raw { content_type: String, body: String },
}

impl Payload {
    /// Form payload from string pairs.
    pub fn form<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Payload::Form(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Form payload from a JSON object, stringifying scalar values the way
    /// the API expects them (`true`/`false`, bare numbers, raw strings).
    #[must_use]
    pub fn form_from_json(fields: &serde_json::Map<String, Value>) -> Self {
        Payload::Form(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), stringify(value)))
                .collect(),
        )
    }

    /// An `application/xml` payload.
    pub fn xml(body: impl Into<String>) -> Self {
        Payload::Raw {
            content_type: "application/xml".to_string(),
            body: body.into(),
        }
    }

    /// MIME type of the body.
    #[must_use]
    pub fn content_type(&self) -> &str {
        match self {
            Payload::Form(_) => "application/x-www-form-urlencoded",
            Payload::Raw { content_type, .. } => content_type,
        }
    }

    /// Serializes the body to its wire form.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Payload::Form(fields) => fields
                .iter()
                .map(|(name, value)| {
                    format!("{}={}", urlencoding::encode(name), urlencoding::encode(value))
                })
                .collect::<Vec<_>>()
                .join("&"),
            Payload::Raw { body, .. } => body.clone(),
        }
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// An API request before transport execution.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    uri: String,
    headers: BTreeMap<String, HeaderValue>,
    payload: Option<Payload>,
}

impl Request {
    /// Creates a request for a URI relative to the API endpoint.
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            headers: BTreeMap::new(),
            payload: None,
        }
    }

    /// Adds a header, replacing any previous value.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<HeaderValue>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Attaches a body.
    #[must_use]
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Sets a header in place.
    pub fn set_header(&mut self, name: &str, value: impl Into<HeaderValue>) {
        self.headers.insert(name.to_string(), value.into());
    }

    /// The request method.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// The endpoint-relative URI.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The body, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// A single header value.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&HeaderValue> {
        self.headers.get(name)
    }

    /// All headers in name order.
    pub fn headers(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.headers.iter().map(|(name, value)| (name.as_str(), value))
    }
}
