//! Invoices, their delivery reports, and the invoice registry.

use crate::mailbox::MailboxItem;
use crate::remote::Remote;
use chrono::{DateTime, Utc};
use factura_core::value::id_from_uri;
use factura_core::{Collection, Registry, Resource, ResourceError, ResourceResult, WriteOutcome};
use factura_http::{HttpError, Payload, Status, Transport};
use std::sync::Arc;

/// An invoice exchanged between a seller and a buyer.
pub struct Invoice {
    resource: Resource,
}

impl Invoice {
    /// Wraps a generic resource, e.g. a populated collection member.
    #[must_use]
    pub fn from_resource(resource: Resource) -> Self {
        Self { resource }
    }

    /// Invoice name.
    pub fn name(&mut self) -> ResourceResult<Option<String>> {
        self.resource.string_attribute("name")
    }

    /// Invoice description.
    pub fn description(&mut self) -> ResourceResult<Option<String>> {
        self.resource.string_attribute("description")
    }

    /// Invoice total.
    pub fn total(&mut self) -> ResourceResult<Option<f64>> {
        self.resource.f64_attribute("total")
    }

    /// Rendered invoice body.
    pub fn body(&mut self) -> ResourceResult<Option<String>> {
        self.resource.string_attribute("body")
    }

    /// Three-letter ISO currency code.
    pub fn currency(&mut self) -> ResourceResult<Option<String>> {
        self.resource.string_attribute("currency")
    }

    /// Invoice date.
    pub fn date(&mut self) -> ResourceResult<Option<DateTime<Utc>>> {
        self.resource.date_attribute("date")
    }

    /// Payment due date.
    pub fn due_date(&mut self) -> ResourceResult<Option<DateTime<Utc>>> {
        self.resource.date_attribute("dueDate")
    }

    /// Secret key granting read access to the invoice.
    pub fn secret_key(&mut self) -> ResourceResult<Option<String>> {
        self.resource.string_attribute("secretKey")
    }

    /// Custom identifier set in the submitted document.
    pub fn custom_id(&mut self) -> ResourceResult<Option<String>> {
        self.resource.string_attribute("customId")
    }

    /// Whether the invoice has been paid.
    pub fn is_paid(&mut self) -> ResourceResult<Option<bool>> {
        self.resource.bool_attribute("paid")
    }

    /// Stages the paid flag.
    pub fn set_paid(&mut self, paid: bool) -> ResourceResult<()> {
        self.resource.stage_update("paid", paid)
    }

    /// Identifier of the seller who issued the invoice, when the record
    /// carries one. Resolve it through the owning email's supplier
    /// directory.
    pub fn supplier_id(&mut self) -> ResourceResult<Option<String>> {
        Ok(self
            .resource
            .string_attribute("sellerURI")?
            .as_deref()
            .and_then(id_from_uri)
            .map(str::to_string))
    }

    /// Marks the invoice as canceled and sends the change immediately.
    pub fn cancel(&mut self) -> ResourceResult<WriteOutcome> {
        self.resource.stage_update("canceled", true)?;
        self.resource.update(false)
    }
}

impl Remote for Invoice {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl MailboxItem for Invoice {}

/// An invoice delivery report, produced asynchronously after submission.
#[derive(Debug)]
pub struct InvoiceReport {
    resource: Resource,
}

impl InvoiceReport {
    /// Wraps a generic resource.
    #[must_use]
    pub fn from_resource(resource: Resource) -> Self {
        Self { resource }
    }

    /// Processing state of the submission.
    pub fn state(&mut self) -> ResourceResult<Option<String>> {
        self.resource.string_attribute("state")
    }
}

impl Remote for InvoiceReport {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

/// The invoices attached to one email address.
pub struct Invoices {
    registry: Registry,
}

impl Invoices {
    pub(crate) fn new(transport: Arc<dyn Transport>, email_uri: &str) -> Self {
        Self {
            registry: Registry::new(transport, format!("{email_uri}invoices/")),
        }
    }

    /// An unloaded handle for one invoice.
    #[must_use]
    pub fn by_id(&self, id: &str) -> Invoice {
        Invoice::from_resource(self.registry.locate(id))
    }

    /// An unloaded handle for one delivery report.
    #[must_use]
    pub fn report(&self, id: &str) -> InvoiceReport {
        InvoiceReport::from_resource(Resource::new(
            self.registry.transport(),
            format!("{}reports/{}/", self.registry.uri(), id),
            Some(id),
        ))
    }

    /// Every invoice.
    pub fn all(&mut self) -> &mut Collection {
        self.registry.all()
    }

    /// Invoices matching a filter query.
    pub fn search(&mut self, query: &str) -> &mut Collection {
        self.registry.search(query)
    }

    /// Archived invoices.
    pub fn archived(&mut self) -> &mut Collection {
        self.registry.search("location==1")
    }

    /// Trashed invoices.
    pub fn trashed(&mut self) -> &mut Collection {
        self.registry.search("location==2")
    }

    /// Unread invoices outside the trash.
    pub fn unread(&mut self) -> &mut Collection {
        self.registry.search("read==0|location<<2")
    }

    /// Flagged invoices outside the trash.
    pub fn flagged(&mut self) -> &mut Collection {
        self.registry.search("flagged==1|location<<2")
    }

    /// Invoices still awaiting payment.
    pub fn due(&mut self) -> &mut Collection {
        self.registry.search("paid==0|location<<2|canceled==0")
    }

    /// Due invoices whose payment date has passed.
    pub fn overdue(&mut self) -> &mut Collection {
        let today = Utc::now().date_naive().format("%Y-%m-%d");
        let query = format!("paid==0|location<<2|canceled==0|dueDate>>{today}");
        self.registry.search(&query)
    }

    /// Submits a prebuilt XML invoice document and returns a handle to its
    /// delivery report.
    ///
    /// Document construction and signing happen upstream; this only
    /// carries the finished document.
    pub fn send(&self, document: &str) -> ResourceResult<InvoiceReport> {
        if document.trim().is_empty() {
            return Err(ResourceError::Validation(
                "empty invoice document".to_string(),
            ));
        }

        let response = self.registry.create(Payload::xml(document))?;
        if response.status() != Status::Accepted {
            return Err(ResourceError::UnexpectedStatus(response.status().code()));
        }

        let location = response
            .location()
            .ok_or(HttpError::MissingHeader("Location"))?;
        let id = id_from_uri(location).ok_or_else(|| {
            ResourceError::Validation(format!("no report id in location {location:?}"))
        })?;

        Ok(self.report(id))
    }
}
