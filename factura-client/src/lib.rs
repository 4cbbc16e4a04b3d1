//! Typed buyer- and seller-side clients for the factura e-invoicing API.
//!
//! Every domain type is a thin wrapper holding a generic
//! [`factura_core::Resource`] or [`factura_core::Registry`]; shared
//! behavior (profiles, mailbox flags, exchange history) lives in traits
//! with default methods delegating through [`Remote`]. Nothing here talks
//! to the network directly — it all flows through the access layer and
//! whatever [`factura_http::Transport`] the client was built with.
//!
//! # Example
//!
//! ```no_run
//! use factura_client::{BuyerClient, MailboxItem, Remote};
//! use factura_http::{ApiConfig, Credentials};
//!
//! let mut client = BuyerClient::new(
//!     ApiConfig::default(),
//!     Credentials::basic("ada@example.com", "secret"),
//! )?;
//!
//! let mut email = client.buyer().emails().by_id("primary");
//! let mut invoice = email.invoices().by_id("42");
//! invoice.set_read(true)?;
//! invoice.update(true)?;
//! # Ok::<(), factura_core::ResourceError>(())
//! ```

pub mod buyers;
mod history;
mod invoices;
mod mailbox;
mod profile;
mod remote;
pub mod sellers;
mod threads;

pub use buyers::{Buyer, BuyerClient, Supplier, Suppliers};
pub use history::ExchangeHistory;
pub use invoices::{Invoice, InvoiceReport, Invoices};
pub use mailbox::{Location, MailboxItem};
pub use profile::{Company, Settings, UserProfile};
pub use remote::Remote;
pub use sellers::{Customer, Customers, Seller, SellerClient};
pub use threads::{Message, Messages, Thread, Threads};
