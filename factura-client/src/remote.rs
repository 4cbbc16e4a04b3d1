//! Delegation trait shared by every domain wrapper.

use chrono::{DateTime, Utc};
use factura_core::{Resource, ResourceResult, WriteOutcome};
use factura_http::Etag;

/// Access to the generic resource inside a domain wrapper, with the
/// operations every wrapper delegates unchanged.
pub trait Remote {
    /// The wrapped resource.
    fn resource(&self) -> &Resource;

    /// The wrapped resource, mutably.
    fn resource_mut(&mut self) -> &mut Resource;

    /// The resource identifier.
    fn id(&self) -> &str {
        self.resource().id()
    }

    /// The resource's concurrency token.
    fn etag(&self) -> Etag {
        self.resource().etag()
    }

    /// Whether the resource has been deleted.
    fn is_deleted(&self) -> bool {
        self.resource().is_deleted()
    }

    /// Instant the resource was created server-side.
    fn created(&mut self) -> ResourceResult<Option<DateTime<Utc>>> {
        self.resource_mut().date_attribute("createdDate")
    }

    /// Fetches the latest server state.
    fn load(&mut self) -> ResourceResult<bool> {
        self.resource_mut().load()
    }

    /// Sends staged field changes.
    fn update(&mut self, prevent_conflicts: bool) -> ResourceResult<WriteOutcome> {
        self.resource_mut().update(prevent_conflicts)
    }

    /// Deletes the resource.
    fn delete(&mut self, prevent_conflicts: bool) -> ResourceResult<WriteOutcome> {
        self.resource_mut().delete(prevent_conflicts)
    }
}
