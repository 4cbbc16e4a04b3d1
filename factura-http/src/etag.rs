//! Concurrency tokens.

use crate::error::HttpError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Optimistic-concurrency token stamped on every resource and collection.
///
/// Pairs the last modification instant with the identifier of the thing it
/// stamps. Wire form: `"<millis-since-epoch>-<id>"`; parsing a rendered
/// token reconstructs an equal one at millisecond precision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Etag {
    last_modified: DateTime<Utc>,
    id: String,
}

impl Etag {
    /// Creates a token from its components.
    #[must_use]
    pub fn new(last_modified: DateTime<Utc>, id: impl Into<String>) -> Self {
        Self {
            last_modified,
            id: id.into(),
        }
    }

    /// Token of a never-fetched resource: epoch instant, sentinel id.
    #[must_use]
    pub fn initial() -> Self {
        Self::new(DateTime::UNIX_EPOCH, "0")
    }

    /// The last modification instant.
    #[must_use]
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    /// The resource or collection identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The instant as milliseconds since the Unix epoch.
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.last_modified.timestamp_millis()
    }
}

impl Default for Etag {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Etag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.last_modified.timestamp_millis(), self.id)
    }
}

impl FromStr for Etag {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || HttpError::Parse {
            what: "etag",
            value: s.to_string(),
        };

        let (millis, id) = s.split_once('-').ok_or_else(malformed)?;
        if id.is_empty() {
            return Err(malformed());
        }

        let millis: i64 = millis.parse().map_err(|_| malformed())?;
        let last_modified = DateTime::from_timestamp_millis(millis).ok_or_else(malformed)?;

        Ok(Self::new(last_modified, id))
    }
}
