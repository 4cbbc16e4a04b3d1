//! A single addressable API resource.
//!
//! Attributes load lazily on first read, field changes are staged locally
//! until an `update`, and every conditional operation carries the
//! resource's own concurrency token.

use crate::error::{ResourceError, ResourceResult};
use crate::value::is_blank;
use chrono::{DateTime, Utc};
use factura_http::{Etag, HttpError, Method, Payload, Request, Status, Transport};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

/// Which write operation hit a concurrency conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    /// A partial update (`update`).
    Patch,
    /// A deletion (`delete`).
    Delete,
}

/// Outcome of a write against the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The server applied the write and local state was folded in.
    Applied,
    /// The server rejected the write as conflicting; resolve explicitly.
    Conflict(Conflict),
}

impl WriteOutcome {
    /// Whether the write was applied.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, WriteOutcome::Applied)
    }

    /// The conflict, if the write was rejected.
    #[must_use]
    pub fn conflict(self) -> Option<Conflict> {
        match self {
            WriteOutcome::Applied => None,
            WriteOutcome::Conflict(conflict) => Some(conflict),
        }
    }
}

/// A rejected conditional write, with its two resolution paths.
///
/// The access layer never auto-resolves. The caller either refreshes the
/// local copy (staged updates stay queued) or forces the original
/// operation through unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict {
    operation: WriteOp,
}

impl Conflict {
    /// The operation the server rejected.
    #[must_use]
    pub fn operation(&self) -> WriteOp {
        self.operation
    }

    /// Pulls the latest server state into the resource, discarding the
    /// caller's assumption of freshness. Staged updates stay queued.
    pub fn refresh(&self, resource: &mut Resource) -> ResourceResult<bool> {
        resource.load()
    }

    /// Re-issues the rejected operation without conditional headers,
    /// overwriting or removing the remote state.
    pub fn force(&self, resource: &mut Resource) -> ResourceResult<WriteOutcome> {
        match self.operation {
            WriteOp::Patch => resource.update(false),
            WriteOp::Delete => resource.delete(false),
        }
    }
}

/// A single addressable item behind the API.
///
/// The attribute map mirrors the last-known server state and is only ever
/// replaced wholesale by [`Resource::sync`]; staged updates live apart
/// until a confirmed write merges them in. Once deleted, every operation
/// fails with [`ResourceError::Deleted`] and no further network activity
/// happens.
pub struct Resource {
    transport: Arc<dyn Transport>,
    uri: String,
    id: String,
    last_modified: DateTime<Utc>,
    attributes: Map<String, Value>,
    pending_updates: Map<String, Value>,
    deleted: bool,
}

impl Resource {
    /// Creates an unloaded handle at the given address.
    ///
    /// Without an identifier the resource carries the `"0"` sentinel until
    /// its first sync.
    pub fn new(transport: Arc<dyn Transport>, uri: impl Into<String>, id: Option<&str>) -> Self {
        Self {
            transport,
            uri: uri.into(),
            id: id.filter(|id| !id.is_empty()).unwrap_or("0").to_string(),
            last_modified: DateTime::UNIX_EPOCH,
            attributes: Map::new(),
            pending_updates: Map::new(),
            deleted: false,
        }
    }

    /// The resource identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The transport this resource talks through.
    #[must_use]
    pub fn transport(&self) -> Arc<dyn Transport> {
        self.transport.clone()
    }

    /// The endpoint-relative address. Fixed at construction; a sync
    /// updates identity, never the address.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Last modification instant known locally.
    #[must_use]
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    /// The resource's current concurrency token.
    #[must_use]
    pub fn etag(&self) -> Etag {
        Etag::new(self.last_modified, self.id.clone())
    }

    /// Whether the resource has been deleted.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Whether attributes have been loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Whether field changes are staged and unsent.
    #[must_use]
    pub fn has_pending_updates(&self) -> bool {
        !self.pending_updates.is_empty()
    }

    fn ensure_alive(&self) -> ResourceResult<()> {
        if self.deleted {
            Err(ResourceError::Deleted)
        } else {
            Ok(())
        }
    }

    /// Last-known server value of an attribute, fetching the resource on
    /// first access.
    pub fn attribute(&mut self, name: &str) -> ResourceResult<Option<Value>> {
        self.ensure_alive()?;

        if self.attributes.is_empty() {
            self.load()?;
        }

        Ok(self.attributes.get(name).cloned())
    }

    /// String attribute.
    pub fn string_attribute(&mut self, name: &str) -> ResourceResult<Option<String>> {
        Ok(self
            .attribute(name)?
            .and_then(|value| value.as_str().map(str::to_string)))
    }

    /// Integer attribute.
    pub fn i64_attribute(&mut self, name: &str) -> ResourceResult<Option<i64>> {
        Ok(self.attribute(name)?.and_then(|value| value.as_i64()))
    }

    /// Floating-point attribute.
    pub fn f64_attribute(&mut self, name: &str) -> ResourceResult<Option<f64>> {
        Ok(self.attribute(name)?.and_then(|value| value.as_f64()))
    }

    /// Boolean attribute. The API encodes flags as `true`/`false` or as
    /// `0`/`1` depending on the resource age.
    pub fn bool_attribute(&mut self, name: &str) -> ResourceResult<Option<bool>> {
        Ok(self.attribute(name)?.and_then(|value| match value {
            Value::Bool(flag) => Some(flag),
            Value::Number(number) => number.as_i64().map(|n| n != 0),
            _ => None,
        }))
    }

    /// Attribute stored as epoch milliseconds, as an instant.
    pub fn date_attribute(&mut self, name: &str) -> ResourceResult<Option<DateTime<Utc>>> {
        Ok(self
            .attribute(name)?
            .and_then(|value| value.as_i64())
            .and_then(DateTime::from_timestamp_millis))
    }

    /// Writes a server-provided value straight into the attribute map.
    /// Returns whether the stored value changed.
    pub fn set_attribute(&mut self, name: &str, value: Value) -> ResourceResult<bool> {
        self.ensure_alive()?;

        if self.attributes.get(name) == Some(&value) {
            return Ok(false);
        }

        self.attributes.insert(name.to_string(), value);
        Ok(true)
    }

    /// Stages a field change for the next [`Resource::update`].
    ///
    /// Blank values and values equal to the last-known server state are
    /// ignored.
    pub fn stage_update(&mut self, name: &str, value: impl Into<Value>) -> ResourceResult<()> {
        self.ensure_alive()?;

        let value = value.into();
        if is_blank(&value) || self.attributes.get(name) == Some(&value) {
            return Ok(());
        }

        self.pending_updates.insert(name.to_string(), value);
        Ok(())
    }

    /// Replaces local identity and attributes with a server representation.
    /// Returns whether anything changed.
    ///
    /// An empty `data` map is a no-op so a malformed response can never
    /// wipe loaded attributes.
    pub fn sync(&mut self, data: &Map<String, Value>, token: &Etag) -> ResourceResult<bool> {
        self.ensure_alive()?;

        if data.is_empty() {
            return Ok(false);
        }

        self.last_modified = token.last_modified();
        self.id = token.id().to_string();

        let mut changed = false;
        for (name, value) in data {
            // The token field is identity, not an attribute.
            if name == "etag" {
                continue;
            }
            changed |= self.set_attribute(name, value.clone())?;
        }

        Ok(changed)
    }

    /// Fetches the resource with a conditional read and folds the response
    /// into local state. Returns whether anything changed.
    pub fn load(&mut self) -> ResourceResult<bool> {
        self.ensure_alive()?;

        let token = self.etag();
        let request = Request::new(Method::Get, self.uri.clone())
            .with_header("If-Match", token.clone())
            .with_header("If-Unmodified-Since", token.last_modified());

        let response = self.transport.execute(&request)?;
        match response.status() {
            Status::Ok => {
                let token = response.etag()?.ok_or(HttpError::MissingHeader("Etag"))?;
                let data = response.fields().cloned().unwrap_or_default();
                let changed = self.sync(&data, &token)?;
                debug!(uri = %self.uri, changed, "resource loaded");
                Ok(changed)
            }
            Status::NotModified => Ok(false),
            other => Err(ResourceError::UnexpectedStatus(other.code())),
        }
    }

    /// Sends staged updates as a partial write.
    ///
    /// With `prevent_conflicts`, the write is conditional on the local
    /// token still being current; a stale copy yields
    /// [`WriteOutcome::Conflict`] and leaves local state untouched. A
    /// confirmed write merges the staged fields into the attribute map
    /// under the server's new token and clears the staging area. With
    /// nothing staged this is a no-op performing no network activity.
    pub fn update(&mut self, prevent_conflicts: bool) -> ResourceResult<WriteOutcome> {
        self.ensure_alive()?;

        if self.pending_updates.is_empty() {
            return Ok(WriteOutcome::Applied);
        }

        let mut request = Request::new(Method::Patch, self.uri.clone())
            .with_payload(Payload::form_from_json(&self.pending_updates));
        if prevent_conflicts {
            let token = self.etag();
            request.set_header("If-Match", token.clone());
            request.set_header("If-Unmodified-Since", token.last_modified());
        }

        let response = self.transport.execute(&request)?;
        match response.status() {
            Status::Conflict => {
                debug!(uri = %self.uri, "update rejected as conflicting");
                Ok(WriteOutcome::Conflict(Conflict {
                    operation: WriteOp::Patch,
                }))
            }
            Status::NoContent => {
                let token = response.etag()?.ok_or(HttpError::MissingHeader("Etag"))?;
                let staged = std::mem::take(&mut self.pending_updates);
                self.sync(&staged, &token)?;
                debug!(uri = %self.uri, fields = staged.len(), "update applied");
                Ok(WriteOutcome::Applied)
            }
            other => Err(ResourceError::UnexpectedStatus(other.code())),
        }
    }

    /// Deletes the resource.
    ///
    /// A confirmed deletion clears both attribute maps and marks the
    /// resource terminally deleted.
    pub fn delete(&mut self, prevent_conflicts: bool) -> ResourceResult<WriteOutcome> {
        self.ensure_alive()?;

        let mut request = Request::new(Method::Delete, self.uri.clone());
        if prevent_conflicts {
            let token = self.etag();
            request.set_header("If-Match", token.clone());
            request.set_header("If-Unmodified-Since", token.last_modified());
        }

        let response = self.transport.execute(&request)?;
        match response.status() {
            Status::Conflict => {
                debug!(uri = %self.uri, "delete rejected as conflicting");
                Ok(WriteOutcome::Conflict(Conflict {
                    operation: WriteOp::Delete,
                }))
            }
            Status::NoContent => {
                self.deleted = true;
                self.attributes.clear();
                self.pending_updates.clear();
                debug!(uri = %self.uri, "resource deleted");
                Ok(WriteOutcome::Applied)
            }
            other => Err(ResourceError::UnexpectedStatus(other.code())),
        }
    }
}

impl std::fmt::Debug for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("uri", &self.uri)
            .field("id", &self.id)
            .field("last_modified", &self.last_modified)
            .field("loaded", &self.is_loaded())
            .field("pending_updates", &self.pending_updates.len())
            .field("deleted", &self.deleted)
            .finish()
    }
}
