//! Pagination window and server range types.

use crate::error::HttpError;
use std::fmt;
use std::str::FromStr;

/// Largest page the server will serve in a single request.
pub const MAX_PAGE_SIZE: u32 = 200;

/// Request-side pagination window, rendered as a `Range` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSpec {
    unit: String,
    offset: u32,
    limit: u32,
}

impl RangeSpec {
    /// Window over the default `"resources"` unit. The limit is clamped to
    /// [`MAX_PAGE_SIZE`].
    #[must_use]
    pub fn new(offset: u32, limit: u32) -> Self {
        Self::with_unit("resources", offset, limit)
    }

    /// Window over a custom unit.
    #[must_use]
    pub fn with_unit(unit: impl Into<String>, offset: u32, limit: u32) -> Self {
        Self {
            unit: unit.into(),
            offset,
            limit: limit.min(MAX_PAGE_SIZE),
        }
    }

    /// The range unit.
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Index of the first element requested.
    #[must_use]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Number of elements requested, after clamping.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}-{}", self.unit, self.offset, self.offset + self.limit)
    }
}

/// Server-side pagination result, parsed from a `Content-Range` header.
///
/// Wire form: `"<unit> <offset>-<last>/<total>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRange {
    unit: String,
    offset: u64,
    last: u64,
    total: u64,
}

impl ContentRange {
    /// Creates a range from its components.
    #[must_use]
    pub fn new(unit: impl Into<String>, offset: u64, last: u64, total: u64) -> Self {
        Self {
            unit: unit.into(),
            offset,
            last,
            total,
        }
    }

    /// Range of an empty collection.
    #[must_use]
    pub fn empty() -> Self {
        Self::new("resources", 0, 0, 0)
    }

    /// The range unit.
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Index of the first element in the returned window.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Zero-based index of the last element in the returned window.
    #[must_use]
    pub fn last(&self) -> u64 {
        self.last
    }

    /// Total number of elements available server-side.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }
}

impl fmt::Display for ContentRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}/{}",
            self.unit, self.offset, self.last, self.total
        )
    }
}

impl FromStr for ContentRange {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || HttpError::Parse {
            what: "content-range",
            value: s.to_string(),
        };

        let (unit, rest) = s.split_once(' ').ok_or_else(malformed)?;
        let (span, total) = rest.split_once('/').ok_or_else(malformed)?;
        let (offset, last) = span.split_once('-').ok_or_else(malformed)?;

        if unit.is_empty() {
            return Err(malformed());
        }

        Ok(Self::new(
            unit,
            offset.parse().map_err(|_| malformed())?,
            last.parse().map_err(|_| malformed())?,
            total.parse().map_err(|_| malformed())?,
        ))
    }
}
