//! The seller-side view of the API.

use crate::history::ExchangeHistory;
use crate::invoices::Invoices;
use crate::profile::{Company, Settings, UserProfile};
use crate::remote::Remote;
use crate::threads::Threads;
use factura_core::{Collection, Registry, Resource, ResourceResult};
use factura_http::{ApiConfig, Credentials, HttpTransport, Transport};
use std::sync::Arc;

/// Entry point for a seller account.
pub struct SellerClient {
    seller: Seller,
}

impl SellerClient {
    /// Connects over HTTPS with the given configuration and credentials.
    pub fn new(config: ApiConfig, credentials: Credentials) -> ResourceResult<Self> {
        let transport = HttpTransport::new(config, credentials)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Builds a client over any transport, e.g. a scripted mock in tests.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            seller: Seller::new(transport),
        }
    }

    /// The authenticated seller.
    pub fn seller(&mut self) -> &mut Seller {
        &mut self.seller
    }
}

/// The authenticated seller's profile, mailboxes and customer directory.
pub struct Seller {
    resource: Resource,
    settings: Settings,
    company: Company,
    emails: Emails,
    threads: Threads,
    customers: Customers,
}

impl Seller {
    fn new(transport: Arc<dyn Transport>) -> Self {
        let uri = "sellers/me/";
        Self {
            resource: Resource::new(transport.clone(), uri, Some("me")),
            settings: Settings::new(transport.clone(), uri),
            company: Company::employer_of(transport.clone(), uri),
            emails: Emails::new(transport.clone(), uri),
            threads: Threads::new(transport.clone(), uri),
            customers: Customers::new(transport, uri),
        }
    }

    /// The seller's account settings.
    pub fn settings(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// The company employing the seller.
    pub fn company(&mut self) -> &mut Company {
        &mut self.company
    }

    /// The email addresses invoices are sent from.
    pub fn emails(&mut self) -> &mut Emails {
        &mut self.emails
    }

    /// Conversation threads with customers.
    pub fn threads(&mut self) -> &mut Threads {
        &mut self.threads
    }

    /// The customer directory.
    pub fn customers(&mut self) -> &mut Customers {
        &mut self.customers
    }
}

impl Remote for Seller {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl UserProfile for Seller {}

/// The email addresses registered on a seller account.
pub struct Emails {
    registry: Registry,
}

impl Emails {
    fn new(transport: Arc<dyn Transport>, owner_uri: &str) -> Self {
        Self {
            registry: Registry::new(transport, format!("{owner_uri}emails/")),
        }
    }

    /// An unloaded handle for one email address.
    #[must_use]
    pub fn by_id(&self, id: &str) -> Email {
        Email::from_resource(self.registry.locate(id))
    }

    /// Every registered email address.
    pub fn all(&mut self) -> &mut Collection {
        self.registry.all()
    }
}

/// One sending address, with the invoices issued through it.
pub struct Email {
    resource: Resource,
    invoices: Invoices,
}

impl Email {
    /// Wraps a generic resource.
    #[must_use]
    pub fn from_resource(resource: Resource) -> Self {
        let transport = resource.transport();
        let uri = resource.uri().to_string();
        Self {
            resource,
            invoices: Invoices::new(transport, &uri),
        }
    }

    /// Display label of the address.
    pub fn label(&mut self) -> ResourceResult<Option<String>> {
        self.resource.string_attribute("label")
    }

    /// Invoices issued from this address, including submission of new
    /// documents and delivery reports.
    pub fn invoices(&mut self) -> &mut Invoices {
        &mut self.invoices
    }
}

impl Remote for Email {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

/// Directory of the seller's customers.
pub struct Customers {
    registry: Registry,
}

impl Customers {
    fn new(transport: Arc<dyn Transport>, owner_uri: &str) -> Self {
        Self {
            registry: Registry::new(transport, format!("{owner_uri}buyers/")),
        }
    }

    /// An unloaded handle for one customer profile.
    #[must_use]
    pub fn by_id(&self, id: &str) -> Customer {
        Customer::from_resource(self.registry.locate(id))
    }

    /// Every known customer.
    pub fn all(&mut self) -> &mut Collection {
        self.registry.all()
    }
}

/// A buyer as seen from the seller's directory, with exchange history.
pub struct Customer {
    resource: Resource,
}

impl Customer {
    /// Wraps a generic resource.
    #[must_use]
    pub fn from_resource(resource: Resource) -> Self {
        Self { resource }
    }
}

impl Remote for Customer {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl ExchangeHistory for Customer {}
