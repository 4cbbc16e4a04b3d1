//! Ordered, paginated, filterable views over many resources.

use crate::error::{ResourceError, ResourceResult};
use crate::resource::Resource;
use chrono::{DateTime, Utc};
use factura_http::{ContentRange, Etag, HttpError, Method, RangeSpec, Request, Response, Status, Transport};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// An ordered, paginated view over the resources matching one filter query.
///
/// Members and the identifier index are populated in the same pass and
/// replaced wholesale; the collection carries its own concurrency token,
/// distinct from any member's.
pub struct Collection {
    transport: Arc<dyn Transport>,
    base_uri: String,
    query: String,
    content_range: Option<ContentRange>,
    etag: Etag,
    items: Vec<Resource>,
    index: HashMap<String, usize>,
}

impl Collection {
    pub(crate) fn new(transport: Arc<dyn Transport>, base_uri: &str, query: &str) -> Self {
        Self {
            transport,
            base_uri: base_uri.to_string(),
            query: query.to_string(),
            content_range: None,
            etag: Etag::initial(),
            items: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The filter query this collection is bound to.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The endpoint-relative address, query included.
    #[must_use]
    pub fn uri(&self) -> String {
        if self.query.is_empty() {
            self.base_uri.clone()
        } else {
            format!("{}?q={}", self.base_uri, urlencoding::encode(&self.query))
        }
    }

    /// The collection's own concurrency token.
    #[must_use]
    pub fn etag(&self) -> &Etag {
        &self.etag
    }

    /// Instant of the last recorded collection change.
    #[must_use]
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.etag.last_modified()
    }

    /// The last pagination result seen, if any window was fetched yet.
    #[must_use]
    pub fn content_range(&self) -> Option<&ContentRange> {
        self.content_range.as_ref()
    }

    /// Number of members currently loaded locally.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no members are loaded locally.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Loaded members in server order.
    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.items.iter()
    }

    /// Loaded members in server order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Resource> {
        self.items.iter_mut()
    }

    /// A loaded member by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Resource> {
        self.index.get(id).map(|&position| &self.items[position])
    }

    /// A loaded member by identifier, mutably.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Resource> {
        self.index
            .get(id)
            .map(|&position| &mut self.items[position])
    }

    /// Detaches the loaded members, leaving the collection empty.
    pub fn take_items(&mut self) -> Vec<Resource> {
        self.index.clear();
        std::mem::take(&mut self.items)
    }

    /// Total number of resources available server-side.
    ///
    /// Probes the collection headers once if no pagination result is
    /// cached yet, then serves from the cache.
    pub fn count(&mut self) -> ResourceResult<u64> {
        if self.content_range.is_none() {
            self.load_info()?;
        }

        self.content_range
            .as_ref()
            .map(ContentRange::total)
            .ok_or_else(|| HttpError::MissingHeader("Content-Range").into())
    }

    /// Fetches the collection headers without transferring members.
    pub fn load_info(&mut self) -> ResourceResult<()> {
        self.populate(Some(0), Some(1), true, None)
    }

    /// Fetches a window of the collection.
    ///
    /// With both `offset` and `limit` this is a ranged request (the limit
    /// clamps to the server's page cap); otherwise it is conditional on
    /// the collection's own token so the server can answer "nothing
    /// changed" cheaply. `head` probes headers only. `fields` narrows the
    /// attributes returned per record.
    pub fn populate(
        &mut self,
        offset: Option<u32>,
        limit: Option<u32>,
        head: bool,
        fields: Option<&str>,
    ) -> ResourceResult<()> {
        let mut uri = self.uri();
        if let Some(fields) = fields {
            let separator = if uri.contains('?') { '&' } else { '?' };
            uri.push(separator);
            uri.push_str("fields=");
            uri.push_str(&urlencoding::encode(fields));
        }

        let method = if head { Method::Head } else { Method::Get };
        let mut request = Request::new(method, uri);
        match (offset, limit) {
            (Some(offset), Some(limit)) => {
                request.set_header("Range", RangeSpec::new(offset, limit));
            }
            _ => {
                request.set_header("If-None-Match", self.etag.clone());
                request.set_header("If-Modified-Since", self.etag.last_modified());
            }
        }

        let response = self.transport.execute(&request)?;
        match response.status() {
            Status::NoContent | Status::RangeNotSatisfiable => {
                if let Some(token) = response.etag()? {
                    self.etag = token;
                }
                // Cache a zeroed range when the header is absent so a
                // subsequent count() needs no extra request.
                self.content_range =
                    Some(response.content_range()?.unwrap_or_else(ContentRange::empty));
                self.items.clear();
                self.index.clear();
                debug!(uri = %self.base_uri, query = %self.query, "collection emptied");
                Ok(())
            }
            Status::Ok | Status::PartialContent => {
                if let Some(token) = response.etag()? {
                    self.etag = token;
                }
                if let Some(range) = response.content_range()? {
                    self.content_range = Some(range);
                }
                if !head {
                    self.rebuild(&response)?;
                }
                Ok(())
            }
            Status::NotModified => Ok(()),
            other => Err(ResourceError::UnexpectedStatus(other.code())),
        }
    }

    /// Replaces members and index from a response body, one resource per
    /// record, keyed by each record's own token identifier.
    fn rebuild(&mut self, response: &Response) -> ResourceResult<()> {
        let records = response.records().unwrap_or(&[]);

        self.items.clear();
        self.index.clear();

        for record in records {
            let fields = record.as_object().ok_or_else(|| {
                ResourceError::Validation("collection record is not an object".to_string())
            })?;
            let token: Etag = fields
                .get("etag")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    ResourceError::Validation("collection record without etag".to_string())
                })?
                .parse()?;

            let uri = format!("{}{}/", self.base_uri, token.id());
            let mut resource = Resource::new(self.transport.clone(), uri, Some(token.id()));
            resource.sync(fields, &token)?;

            self.index
                .insert(resource.id().to_string(), self.items.len());
            self.items.push(resource);
        }

        debug!(
            uri = %self.base_uri,
            query = %self.query,
            count = self.items.len(),
            "collection repopulated"
        );
        Ok(())
    }
}

impl std::fmt::Debug for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("uri", &self.base_uri)
            .field("query", &self.query)
            .field("items", &self.items.len())
            .field("content_range", &self.content_range)
            .finish()
    }
}
