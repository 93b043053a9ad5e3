//! core::types
//!
//! Strong types shared by the record framework.
//!
//! # Types
//!
//! - [`SchemaVersion`] - Semantic version stamped on every record schema
//! - [`UtcTimestamp`] - RFC3339 timestamp
//! - [`Clock`] - Source of "now" for timestamp defaults
//! - [`FieldPath`] - Location of a field inside a nested record
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented.
//!
//! # Examples
//!
//! ```
//! use neurometa::core::types::{FieldPath, SchemaVersion};
//!
//! let version: SchemaVersion = "0.5.4".parse().unwrap();
//! assert_eq!(version, SchemaVersion::new(0, 5, 4));
//! assert!("0.5".parse::<SchemaVersion>().is_err());
//!
//! let path = FieldPath::root().field("objectives").index(1).field("magnification");
//! assert_eq!(path.to_string(), "objectives[1].magnification");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid schema version: {0}")]
    InvalidSchemaVersion(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// A semantic schema version (`major.minor.patch`).
///
/// Versions are compared exactly when reading interchange text; there is
/// no implicit upgrade between versions.
///
/// # Example
///
/// ```
/// use neurometa::core::types::SchemaVersion;
///
/// const V: SchemaVersion = SchemaVersion::new(1, 2, 3);
/// assert_eq!(V.to_string(), "1.2.3");
/// assert_eq!("1.2.3".parse::<SchemaVersion>().unwrap(), V);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SchemaVersion {
    major: u32,
    minor: u32,
    patch: u32,
}

impl SchemaVersion {
    /// Create a version from its components.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Major component.
    pub fn major(&self) -> u32 {
        self.major
    }

    /// Minor component.
    pub fn minor(&self) -> u32 {
        self.minor
    }

    /// Patch component.
    pub fn patch(&self) -> u32 {
        self.patch
    }
}

impl FromStr for SchemaVersion {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 3 {
            return Err(TypeError::InvalidSchemaVersion(format!(
                "expected major.minor.patch, got '{s}'"
            )));
        }

        let mut numbers = [0u32; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            // Reject signs, whitespace and leading zeros ("01")
            if part.is_empty()
                || !part.chars().all(|c| c.is_ascii_digit())
                || (part.len() > 1 && part.starts_with('0'))
            {
                return Err(TypeError::InvalidSchemaVersion(format!(
                    "invalid component '{part}' in '{s}'"
                )));
            }
            *slot = part.parse().map_err(|_| {
                TypeError::InvalidSchemaVersion(format!("component '{part}' is too large"))
            })?;
        }

        Ok(Self::new(numbers[0], numbers[1], numbers[2]))
    }
}

impl TryFrom<String> for SchemaVersion {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SchemaVersion> for String {
    fn from(version: SchemaVersion) -> Self {
        version.to_string()
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// A UTC timestamp in RFC3339 format.
///
/// # Example
///
/// ```
/// use neurometa::core::types::UtcTimestamp;
///
/// let ts = UtcTimestamp::parse("2023-04-05T10:00:00Z").unwrap();
/// assert_eq!(ts.to_string(), "2023-04-05T10:00:00+00:00");
/// assert!(UtcTimestamp::parse("yesterday").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UtcTimestamp(chrono::DateTime<chrono::Utc>);

impl UtcTimestamp {
    /// Create a timestamp for the current moment.
    pub fn now() -> Self {
        Self(chrono::Utc::now())
    }

    /// Create a timestamp from a chrono DateTime.
    pub fn from_datetime(dt: chrono::DateTime<chrono::Utc>) -> Self {
        Self(dt)
    }

    /// Parse an RFC3339 timestamp, normalizing any offset to UTC.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidTimestamp` if the string is not RFC3339.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        chrono::DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.with_timezone(&chrono::Utc)))
            .map_err(|e| TypeError::InvalidTimestamp(format!("'{s}': {e}")))
    }

    /// Get the underlying datetime.
    pub fn as_datetime(&self) -> &chrono::DateTime<chrono::Utc> {
        &self.0
    }
}

impl fmt::Display for UtcTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

/// Source of the current time for `modification_date`-style defaults.
///
/// Construction takes a clock so that defaults are reproducible in tests
/// and in batch exports that must share one timestamp.
pub trait Clock {
    /// The current moment.
    fn now(&self) -> UtcTimestamp;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> UtcTimestamp {
        UtcTimestamp::now()
    }
}

/// A clock frozen at one instant.
///
/// # Example
///
/// ```
/// use neurometa::core::types::{Clock, FixedClock, UtcTimestamp};
///
/// let instant = UtcTimestamp::parse("2024-01-01T00:00:00Z").unwrap();
/// let clock = FixedClock::new(instant.clone());
/// assert_eq!(clock.now(), instant);
/// ```
#[derive(Debug, Clone)]
pub struct FixedClock(UtcTimestamp);

impl FixedClock {
    /// Freeze the clock at `instant`.
    pub fn new(instant: UtcTimestamp) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> UtcTimestamp {
        self.0.clone()
    }
}

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named record field
    Field(String),
    /// A list position
    Index(usize),
}

/// Location of a value inside a (possibly nested) record.
///
/// Rendered as `field.sub_field[2].leaf`. The root path renders as `$`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The path of the record itself.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Extend with a field name.
    pub fn field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Field(name.into()));
        Self(segments)
    }

    /// Extend with a list index.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    /// Check if this is the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The path segments, outermost first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// The top-level field this path starts at, if any.
    pub fn top_field(&self) -> Option<&str> {
        match self.0.first() {
            Some(PathSegment::Field(name)) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "$");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{name}")?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}
