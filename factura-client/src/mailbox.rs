//! Shared mailbox behavior for invoices and conversation threads.

use crate::remote::Remote;
use factura_core::ResourceResult;

/// Folder a mailbox item lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Inbox,
    Archive,
    Trash,
}

impl Location {
    /// Wire code of the folder.
    #[must_use]
    pub fn code(&self) -> i64 {
        match self {
            Location::Inbox => 0,
            Location::Archive => 1,
            Location::Trash => 2,
        }
    }

    /// Folder for a wire code, if it names one.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Location::Inbox),
            1 => Some(Location::Archive),
            2 => Some(Location::Trash),
            _ => None,
        }
    }
}

/// Location, read and flagged state shared by invoices and threads.
///
/// Setters stage updates; nothing is sent until `update` on the item.
pub trait MailboxItem: Remote {
    /// Folder the item is filed under.
    fn location(&mut self) -> ResourceResult<Option<Location>> {
        Ok(self
            .resource_mut()
            .i64_attribute("location")?
            .and_then(Location::from_code))
    }

    /// Stages a move to another folder.
    fn set_location(&mut self, location: Location) -> ResourceResult<()> {
        self.resource_mut().stage_update("location", location.code())
    }

    /// Whether the item has been read.
    fn is_read(&mut self) -> ResourceResult<Option<bool>> {
        self.resource_mut().bool_attribute("read")
    }

    /// Stages the read flag.
    fn set_read(&mut self, read: bool) -> ResourceResult<()> {
        self.resource_mut().stage_update("read", read)
    }

    /// Whether the item has been flagged.
    fn is_flagged(&mut self) -> ResourceResult<Option<bool>> {
        self.resource_mut().bool_attribute("flagged")
    }

    /// Stages the flagged flag.
    fn set_flagged(&mut self, flagged: bool) -> ResourceResult<()> {
        self.resource_mut().stage_update("flagged", flagged)
    }
}
