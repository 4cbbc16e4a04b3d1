//! Resource location, search memoization and creation.

use crate::collection::Collection;
use crate::error::ResourceResult;
use crate::resource::Resource;
use factura_http::{Method, Payload, Request, Response, Transport};
use std::collections::HashMap;
use std::sync::Arc;

/// Factory and locator for one resource type under a base address.
///
/// Collections are memoized per filter query, so repeated searches share
/// their pagination state. Located resources are independent handles; the
/// registry keeps no ownership over them.
pub struct Registry {
    transport: Arc<dyn Transport>,
    uri: String,
    collections: HashMap<String, Collection>,
}

impl Registry {
    /// Creates a registry rooted at the given address.
    pub fn new(transport: Arc<dyn Transport>, uri: impl Into<String>) -> Self {
        Self {
            transport,
            uri: uri.into(),
            collections: HashMap::new(),
        }
    }

    /// The registry's base address.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The transport this registry hands to everything it builds.
    #[must_use]
    pub fn transport(&self) -> Arc<dyn Transport> {
        self.transport.clone()
    }

    /// An unloaded handle for the resource with the given identifier.
    ///
    /// No network call happens; the handle loads itself on first attribute
    /// access, which keeps deep reference graphs cheap to build.
    #[must_use]
    pub fn locate(&self, id: &str) -> Resource {
        Resource::new(
            self.transport.clone(),
            format!("{}{}/", self.uri, id),
            Some(id),
        )
    }

    /// The collection filtered by the given query.
    ///
    /// The same query always yields the same collection instance;
    /// different queries are isolated.
    pub fn search(&mut self, query: &str) -> &mut Collection {
        let transport = self.transport.clone();
        let uri = self.uri.clone();
        self.collections
            .entry(query.to_string())
            .or_insert_with(|| Collection::new(transport, &uri, query))
    }

    /// The unfiltered collection.
    pub fn all(&mut self) -> &mut Collection {
        self.search("")
    }

    /// Creates a resource under this registry's address.
    ///
    /// The raw response is returned for the caller to interpret; the
    /// identifier and `Location` format of a creation are owned by the
    /// domain layer.
    pub fn create(&self, payload: Payload) -> ResourceResult<Response> {
        let request = Request::new(Method::Post, self.uri.clone()).with_payload(payload);
        Ok(self.transport.execute(&request)?)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("uri", &self.uri)
            .field("cached_collections", &self.collections.len())
            .finish()
    }
}
