//! User profiles, account settings and company profiles.

use crate::remote::Remote;
use chrono::{DateTime, Utc};
use factura_core::{Resource, ResourceResult};
use factura_http::Transport;
use std::sync::Arc;

/// Read surface shared by buyer and seller profiles.
pub trait UserProfile: Remote {
    /// First name.
    fn first_name(&mut self) -> ResourceResult<Option<String>> {
        self.resource_mut().string_attribute("firstname")
    }

    /// Last name.
    fn last_name(&mut self) -> ResourceResult<Option<String>> {
        self.resource_mut().string_attribute("lastname")
    }

    /// First and last name joined, when both are set.
    fn full_name(&mut self) -> ResourceResult<Option<String>> {
        Ok(match (self.first_name()?, self.last_name()?) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (first, last) => first.or(last),
        })
    }

    /// URL of the profile picture.
    fn avatar_url(&mut self) -> ResourceResult<Option<String>> {
        self.resource_mut().string_attribute("avatar")
    }

    /// Birthday.
    fn birthday(&mut self) -> ResourceResult<Option<DateTime<Utc>>> {
        self.resource_mut().date_attribute("birthday")
    }
}

/// Account settings, at a fixed address under their owner.
pub struct Settings {
    resource: Resource,
}

impl Settings {
    pub(crate) fn new(transport: Arc<dyn Transport>, owner_uri: &str) -> Self {
        Self {
            resource: Resource::new(transport, format!("{owner_uri}settings/"), None),
        }
    }

    /// Interface language.
    pub fn language(&mut self) -> ResourceResult<Option<String>> {
        self.resource.string_attribute("language")
    }

    /// Regional locale.
    pub fn region(&mut self) -> ResourceResult<Option<String>> {
        self.resource.string_attribute("region")
    }

    /// Preferred currency code.
    pub fn currency(&mut self) -> ResourceResult<Option<String>> {
        self.resource.string_attribute("currency")
    }
}

impl Remote for Settings {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

/// A company profile.
pub struct Company {
    resource: Resource,
}

impl Company {
    /// The company employing the user at `owner_uri`.
    pub(crate) fn employer_of(transport: Arc<dyn Transport>, owner_uri: &str) -> Self {
        Self {
            resource: Resource::new(transport, format!("{owner_uri}company/"), None),
        }
    }

    /// A company in the public directory.
    #[must_use]
    pub fn at(transport: Arc<dyn Transport>, id: &str) -> Self {
        Self {
            resource: Resource::new(transport, format!("companies/{id}/"), Some(id)),
        }
    }

    /// Company name.
    pub fn name(&mut self) -> ResourceResult<Option<String>> {
        self.resource.string_attribute("name")
    }

    /// Company description.
    pub fn description(&mut self) -> ResourceResult<Option<String>> {
        self.resource.string_attribute("description")
    }

    /// URL of the small logo rendition.
    pub fn small_logo_url(&mut self) -> ResourceResult<Option<String>> {
        self.resource.string_attribute("smallLogo")
    }

    /// URL of the large logo rendition.
    pub fn large_logo_url(&mut self) -> ResourceResult<Option<String>> {
        self.resource.string_attribute("largeLogo")
    }
}

impl Remote for Company {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}
