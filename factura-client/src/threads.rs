//! Conversation threads and their messages.

use crate::mailbox::MailboxItem;
use crate::remote::Remote;
use chrono::{DateTime, Utc};
use factura_core::value::id_from_uri;
use factura_core::{Collection, Registry, Resource, ResourceError, ResourceResult};
use factura_http::{HttpError, Payload, Status, Transport};
use std::sync::Arc;

/// A conversation thread.
#[derive(Debug)]
pub struct Thread {
    resource: Resource,
    messages: Messages,
}

impl Thread {
    /// Wraps a generic resource, e.g. a populated collection member.
    #[must_use]
    pub fn from_resource(resource: Resource) -> Self {
        let messages = Messages::new(resource.transport(), resource.uri());
        Self { resource, messages }
    }

    /// Thread subject.
    pub fn subject(&mut self) -> ResourceResult<Option<String>> {
        self.resource.string_attribute("subject")
    }

    /// Snippet of the latest message.
    pub fn snippet(&mut self) -> ResourceResult<Option<String>> {
        self.resource.string_attribute("snippet")
    }

    /// Number of messages in the thread.
    pub fn message_count(&mut self) -> ResourceResult<Option<i64>> {
        self.resource.i64_attribute("count")
    }

    /// Instant the latest message was sent.
    pub fn last_message_date(&mut self) -> ResourceResult<Option<DateTime<Utc>>> {
        self.resource.date_attribute("lastMessage")
    }

    /// Identifier of the seller on the other side, when the record
    /// carries one.
    pub fn supplier_id(&mut self) -> ResourceResult<Option<String>> {
        Ok(self
            .resource
            .string_attribute("sellerURI")?
            .as_deref()
            .and_then(id_from_uri)
            .map(str::to_string))
    }

    /// The messages inside this thread.
    pub fn messages(&mut self) -> &mut Messages {
        &mut self.messages
    }
}

impl Remote for Thread {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl MailboxItem for Thread {}

/// A message inside a conversation thread.
pub struct Message {
    resource: Resource,
}

impl Message {
    /// Wraps a generic resource.
    #[must_use]
    pub fn from_resource(resource: Resource) -> Self {
        Self { resource }
    }

    /// Message text.
    pub fn text(&mut self) -> ResourceResult<Option<String>> {
        self.resource.string_attribute("text")
    }

    /// Whether the authenticated user sent this message.
    pub fn sent_by_current_user(&mut self) -> ResourceResult<bool> {
        Ok(self
            .resource
            .attribute("sender")?
            .is_some_and(|value| !value.is_null()))
    }
}

impl Remote for Message {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

/// The messages of one thread.
#[derive(Debug)]
pub struct Messages {
    registry: Registry,
}

impl Messages {
    pub(crate) fn new(transport: Arc<dyn Transport>, thread_uri: &str) -> Self {
        Self {
            registry: Registry::new(transport, format!("{thread_uri}messages/")),
        }
    }

    /// An unloaded handle for one message.
    #[must_use]
    pub fn by_id(&self, id: &str) -> Message {
        Message::from_resource(self.registry.locate(id))
    }

    /// Every message.
    pub fn all(&mut self) -> &mut Collection {
        self.registry.all()
    }
}

/// The conversation threads of one mailbox.
pub struct Threads {
    registry: Registry,
}

impl Threads {
    pub(crate) fn new(transport: Arc<dyn Transport>, owner_uri: &str) -> Self {
        Self {
            registry: Registry::new(transport, format!("{owner_uri}threads/")),
        }
    }

    /// An unloaded handle for one thread.
    #[must_use]
    pub fn by_id(&self, id: &str) -> Thread {
        Thread::from_resource(self.registry.locate(id))
    }

    /// Every thread.
    pub fn all(&mut self) -> &mut Collection {
        self.registry.all()
    }

    /// Threads matching a filter query.
    pub fn search(&mut self, query: &str) -> &mut Collection {
        self.registry.search(query)
    }

    /// Threads in the inbox.
    pub fn inbox(&mut self) -> &mut Collection {
        self.registry.search("location==0")
    }

    /// Archived threads.
    pub fn archived(&mut self) -> &mut Collection {
        self.registry.search("location==1")
    }

    /// Trashed threads.
    pub fn trashed(&mut self) -> &mut Collection {
        self.registry.search("location==2")
    }

    /// Unread threads outside the trash.
    pub fn unread(&mut self) -> &mut Collection {
        self.registry.search("read==0|location<<2")
    }

    /// Flagged threads outside the trash.
    pub fn flagged(&mut self) -> &mut Collection {
        self.registry.search("flagged==1|location<<2")
    }

    /// Opens a new conversation thread and returns it, synced with the
    /// server's response when one is included.
    pub fn open(&self, recipient: &str, subject: &str, message: &str) -> ResourceResult<Thread> {
        for (name, value) in [
            ("recipient", recipient),
            ("subject", subject),
            ("message", message),
        ] {
            if value.is_empty() {
                return Err(ResourceError::Validation(format!("blank {name}")));
            }
        }

        let response = self.registry.create(Payload::form([
            ("recipient", recipient),
            ("subject", subject),
            ("message", message),
        ]))?;
        if response.status() != Status::Created {
            return Err(ResourceError::UnexpectedStatus(response.status().code()));
        }

        let location = response
            .location()
            .ok_or(HttpError::MissingHeader("Location"))?;
        let id = id_from_uri(location).ok_or_else(|| {
            ResourceError::Validation(format!("no thread id in location {location:?}"))
        })?;

        let mut thread = self.by_id(id);
        if let (Some(fields), Some(token)) = (response.fields(), response.etag()?) {
            thread.resource_mut().sync(fields, &token)?;
        }

        Ok(thread)
    }
}
