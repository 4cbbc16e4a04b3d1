//! Wire layer for the factura API.
//!
//! Everything the access layer needs to talk HTTP without owning a socket:
//! concurrency tokens, pagination ranges, a typed request/response model,
//! and the [`Transport`] trait with its blocking reqwest implementation.
//!
//! # Example
//!
//! ```no_run
//! use factura_http::{ApiConfig, Credentials, HttpTransport, Method, Request, Transport};
//!
//! let transport = HttpTransport::new(
//!     ApiConfig::default(),
//!     Credentials::basic("ada@example.com", "secret"),
//! )?;
//!
//! let response = transport.execute(&Request::new(Method::Get, "sellers/me/"))?;
//! println!("{:?}", response.status());
//! # Ok::<(), factura_http::HttpError>(())
//! ```

mod auth;
mod config;
mod error;
mod etag;
mod range;
mod request;
mod response;
pub mod transport;

pub use auth::Credentials;
pub use config::ApiConfig;
pub use error::{HttpError, HttpResult};
pub use etag::Etag;
pub use range::{ContentRange, MAX_PAGE_SIZE, RangeSpec};
pub use request::{HeaderValue, Method, Payload, Request};
pub use response::{Response, Status};
pub use transport::{HttpTransport, Transport};
