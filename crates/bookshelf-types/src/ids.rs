//! Type-safe identifier wrapper for book records.
//!
//! Book identifiers are integers assigned by the store on insert
//! (`INTEGER PRIMARY KEY AUTOINCREMENT`). The application never
//! generates them; [`BookId`] only carries a value the store handed out
//! or one parsed from a request path.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Unique identifier for a book, assigned by the store.
///
/// Serializes transparently as a JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct BookId(#[ts(type = "number")] pub i64);

impl BookId {
    /// Return the inner integer value.
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for BookId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl core::str::FromStr for BookId {
    type Err = core::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}

impl From<i64> for BookId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<BookId> for i64 {
    fn from(id: BookId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&BookId(7)).ok();
        assert_eq!(json.as_deref(), Some("7"));
    }

    #[test]
    fn parses_from_path_segment() {
        assert_eq!("42".parse::<BookId>().ok(), Some(BookId(42)));
        assert!("abc".parse::<BookId>().is_err());
        assert!("".parse::<BookId>().is_err());
    }

    #[test]
    fn display_matches_inner() {
        assert_eq!(BookId(13).to_string(), "13");
    }
}
