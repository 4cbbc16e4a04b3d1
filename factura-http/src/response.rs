//! Response model: named statuses and typed header access.

use crate::error::HttpResult;
use crate::etag::Etag;
use crate::range::ContentRange;
use serde_json::Value;
use std::collections::HashMap;

/// Response statuses the access layer reasons about, by name.
///
/// Wire codes are mapped in exactly one place ([`Status::from_code`]). The
/// conflict rejection in particular is an API convention rather than a
/// fixed HTTP number, so nothing outside that function compares numeric
/// codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Successful read; the body is authoritative state.
    Ok,
    /// Creation acknowledged; `Location` points at the new resource.
    Created,
    /// Request accepted for asynchronous processing.
    Accepted,
    /// Write succeeded with no body.
    NoContent,
    /// Paginated read succeeded.
    PartialContent,
    /// Conditional read matched; nothing to apply.
    NotModified,
    /// Optimistic-concurrency rejection.
    Conflict,
    /// Requested range is outside the collection.
    RangeNotSatisfiable,
    /// Anything the protocol does not declare.
    Other(u16),
}

impl Status {
    /// Maps a wire status code to its protocol name.
    #[must_use]
    pub fn from_code(code: u16) -> Self {
        match code {
            200 => Status::Ok,
            201 => Status::Created,
            202 => Status::Accepted,
            204 => Status::NoContent,
            206 => Status::PartialContent,
            304 => Status::NotModified,
            // The API historically signalled optimistic-lock rejections
            // with 408; newer deployments use 409. Both are conflicts.
            408 | 409 => Status::Conflict,
            416 => Status::RangeNotSatisfiable,
            other => Status::Other(other),
        }
    }

    /// Representative wire code for the status.
    #[must_use]
    pub fn code(&self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::Created => 201,
            Status::Accepted => 202,
            Status::NoContent => 204,
            Status::PartialContent => 206,
            Status::NotModified => 304,
            Status::Conflict => 409,
            Status::RangeNotSatisfiable => 416,
            Status::Other(code) => *code,
        }
    }

    /// Whether the transport hands this status back to the caller instead
    /// of failing the request.
    #[must_use]
    pub fn is_declared(&self) -> bool {
        !matches!(self, Status::Other(_))
    }
}

/// A decoded API response.
#[derive(Debug, Clone)]
pub struct Response {
    status: Status,
    headers: HashMap<String, String>,
    body: Option<Value>,
}

impl Response {
    /// Creates a response; header names are normalized to lowercase.
    pub fn new(status: Status, headers: HashMap<String, String>, body: Option<Value>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();
        Self {
            status,
            headers,
            body,
        }
    }

    /// The named status.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// A header value, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Concurrency token from the `Etag` header, when present.
    pub fn etag(&self) -> HttpResult<Option<Etag>> {
        self.header("etag").map(str::parse).transpose()
    }

    /// Pagination result from the `Content-Range` header, when present.
    pub fn content_range(&self) -> HttpResult<Option<ContentRange>> {
        self.header("content-range").map(str::parse).transpose()
    }

    /// The `Location` header, when present.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.header("location")
    }

    /// The decoded body, if the response carried one.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Body as a sequence of records (collection reads).
    #[must_use]
    pub fn records(&self) -> Option<&[Value]> {
        self.body.as_ref()?.as_array().map(Vec::as_slice)
    }

    /// Body as a single object (resource reads).
    #[must_use]
    pub fn fields(&self) -> Option<&serde_json::Map<String, Value>> {
        self.body.as_ref()?.as_object()
    }

    /// Error description the API places in failure bodies.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.fields()?.get("description")?.as_str()
    }
}
