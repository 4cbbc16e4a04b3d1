//! The buyer-side view of the API.

use crate::history::ExchangeHistory;
use crate::invoices::Invoices;
use crate::profile::{Company, Settings, UserProfile};
use crate::remote::Remote;
use crate::threads::Threads;
use factura_core::value::id_from_uri;
use factura_core::{Collection, Registry, Resource, ResourceResult};
use factura_http::{ApiConfig, Credentials, HttpTransport, Transport};
use std::sync::Arc;

/// Entry point for a buyer account.
pub struct BuyerClient {
    buyer: Buyer,
}

impl BuyerClient {
    /// Connects over HTTPS with the given configuration and credentials.
    pub fn new(config: ApiConfig, credentials: Credentials) -> ResourceResult<Self> {
        let transport = HttpTransport::new(config, credentials)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Builds a client over any transport, e.g. a scripted mock in tests.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            buyer: Buyer::new(transport),
        }
    }

    /// The authenticated buyer.
    pub fn buyer(&mut self) -> &mut Buyer {
        &mut self.buyer
    }
}

/// The authenticated buyer's profile and mailboxes.
pub struct Buyer {
    resource: Resource,
    settings: Settings,
    company: Company,
    emails: Emails,
}

impl Buyer {
    fn new(transport: Arc<dyn Transport>) -> Self {
        let uri = "buyers/me/";
        Self {
            resource: Resource::new(transport.clone(), uri, Some("me")),
            settings: Settings::new(transport.clone(), uri),
            company: Company::employer_of(transport.clone(), uri),
            emails: Emails::new(transport, uri),
        }
    }

    /// The buyer's account settings.
    pub fn settings(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// The company employing the buyer.
    pub fn company(&mut self) -> &mut Company {
        &mut self.company
    }

    /// The email addresses attached to the account.
    pub fn emails(&mut self) -> &mut Emails {
        &mut self.emails
    }
}

impl Remote for Buyer {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl UserProfile for Buyer {}

/// The email addresses registered on a buyer account.
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

/// One email address, with the mailboxes received through it.
pub struct Email {
    resource: Resource,
    invoices: Invoices,
    threads: Threads,
    suppliers: Suppliers,
}

impl Email {
    /// Wraps a generic resource.
    #[must_use]
    pub fn from_resource(resource: Resource) -> Self {
        let transport = resource.transport();
        let uri = resource.uri().to_string();
        Self {
            resource,
            invoices: Invoices::new(transport.clone(), &uri),
            threads: Threads::new(transport.clone(), &uri),
            suppliers: Suppliers::new(transport, &uri),
        }
    }

    /// Display label of the address.
    pub fn label(&mut self) -> ResourceResult<Option<String>> {
        self.resource.string_attribute("label")
    }

    /// Invoices received at this address.
    pub fn invoices(&mut self) -> &mut Invoices {
        &mut self.invoices
    }

    /// Conversation threads attached to this address.
    pub fn threads(&mut self) -> &mut Threads {
        &mut self.threads
    }

    /// Sellers this address has exchanged with.
    pub fn suppliers(&mut self) -> &mut Suppliers {
        &mut self.suppliers
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

/// Directory of the sellers an email address has exchanged with.
pub struct Suppliers {
    registry: Registry,
}

impl Suppliers {
    fn new(transport: Arc<dyn Transport>, email_uri: &str) -> Self {
        Self {
            registry: Registry::new(transport, format!("{email_uri}sellers/")),
        }
    }

    /// An unloaded handle for one seller profile.
    #[must_use]
    pub fn by_id(&self, id: &str) -> Supplier {
        Supplier::from_resource(self.registry.locate(id))
    }

    /// Every known seller.
    pub fn all(&mut self) -> &mut Collection {
        self.registry.all()
    }
}

/// A seller as seen from a buyer's mailbox, with exchange history.
pub struct Supplier {
    resource: Resource,
}

impl Supplier {
    /// Wraps a generic resource.
    #[must_use]
    pub fn from_resource(resource: Resource) -> Self {
        Self { resource }
    }

    /// The seller's public company profile, when the record references
    /// one.
    pub fn company(&mut self) -> ResourceResult<Option<Company>> {
        let Some(uri) = self.resource.string_attribute("companyURI")? else {
            return Ok(None);
        };

        Ok(id_from_uri(&uri).map(|id| Company::at(self.resource.transport(), id)))
    }
}

impl Remote for Supplier {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl ExchangeHistory for Supplier {}
