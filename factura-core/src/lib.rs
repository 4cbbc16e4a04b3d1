//! Remote-resource access layer for the factura API.
//!
//! Resources living behind the REST API are handled as local objects with
//! lazy attribute loading, staged partial updates, optimistic concurrency
//! and paginated collections.
//!
//! # Components
//!
//! - [`Resource`]: a single addressable item — loads lazily, stages field
//!   changes, writes conditionally under its own [`factura_http::Etag`].
//! - [`Collection`]: an ordered, filterable, paginated view over one
//!   resource type, with its own concurrency token.
//! - [`Registry`]: locator for resources under a base address and a
//!   memoizing cache of collections per filter query.
//! - [`Conflict`] / [`WriteOutcome`]: a rejected conditional write as a
//!   value, resolved explicitly by refreshing or forcing.
//!
//! The layer is synchronous: every operation blocks on its transport call,
//! nothing retries, and local state only changes on a confirmed success
//! status. Instances assume a single writer; share across threads behind
//! your own synchronization.

mod collection;
mod error;
mod registry;
mod resource;
pub mod value;

pub use collection::Collection;
pub use error::{ResourceError, ResourceResult};
pub use registry::Registry;
pub use resource::{Conflict, Resource, WriteOp, WriteOutcome};
