//! List query parameters: filters and pagination.
//!
//! [`ListBooksParams`] is the raw query string as received. Parsing is
//! strict: a numeric parameter that is present but does not parse is an
//! error, never silently defaulted. Out-of-range values are normalized
//! the way a lenient paginator does (see [`PageRequest::new`]).

use serde::Deserialize;

/// Page used when `page` is absent.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when `limit` is absent.
pub const DEFAULT_LIMIT: i64 = 10;

/// Page size substituted when `limit` is zero or negative.
pub const FALLBACK_LIMIT: i64 = 20;

/// Errors raised while parsing list query parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// An integer parameter did not parse.
    #[error("invalid {param}: expected an integer, got {value:?}")]
    InvalidInteger {
        /// Parameter name.
        param: &'static str,
        /// Raw value supplied.
        value: String,
    },

    /// A numeric parameter did not parse to a finite number.
    #[error("invalid {param}: expected a number, got {value:?}")]
    InvalidNumber {
        /// Parameter name.
        param: &'static str,
        /// Raw value supplied.
        value: String,
    },
}

/// Raw `GET /books` query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListBooksParams {
    /// One-based page number.
    pub page: Option<String>,
    /// Page size.
    pub limit: Option<String>,
    /// Exact genre to match.
    pub genre: Option<String>,
    /// Inclusive minimum rating.
    pub rating: Option<String>,
}

impl ListBooksParams {
    /// Parse into a filter and a page request.
    pub fn parse(self) -> Result<BookQuery, QueryError> {
        let page = parse_integer("page", self.page.as_deref())?.unwrap_or(DEFAULT_PAGE);
        let limit = parse_integer("limit", self.limit.as_deref())?.unwrap_or(DEFAULT_LIMIT);

        let genre = self.genre.filter(|g| !g.is_empty());

        let min_rating = match self.rating.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(
                raw.trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|r| r.is_finite())
                    .ok_or_else(|| QueryError::InvalidNumber {
                        param: "rating",
                        value: raw.to_owned(),
                    })?,
            ),
        };

        Ok(BookQuery {
            filter: BookFilter { genre, min_rating },
            page: PageRequest::new(page, limit),
        })
    }
}

/// Parse an optional integer parameter. An empty value is an error.
fn parse_integer(param: &'static str, raw: Option<&str>) -> Result<Option<i64>, QueryError> {
    raw.map(|value| {
        value
            .trim()
            .parse::<i64>()
            .map_err(|_e| QueryError::InvalidInteger {
                param,
                value: value.to_owned(),
            })
    })
    .transpose()
}

/// A parsed list request.
#[derive(Debug, Clone, PartialEq)]
pub struct BookQuery {
    /// Predicates to apply.
    pub filter: BookFilter,
    /// Slice of the filtered result to return.
    pub page: PageRequest,
}

/// Predicates for listing books. Absent fields apply no constraint;
/// present fields are combined conjunctively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFilter {
    /// Case-sensitive exact genre match.
    pub genre: Option<String>,
    /// Inclusive minimum rating. Books without a rating never match.
    pub min_rating: Option<f64>,
}

impl BookFilter {
    /// True when no predicate is set.
    pub const fn is_empty(&self) -> bool {
        self.genre.is_none() && self.min_rating.is_none()
    }
}

/// One-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl PageRequest {
    /// Build a page request, normalizing out-of-range values.
    ///
    /// A page below 1 becomes page 1. A limit below 1 becomes
    /// [`FALLBACK_LIMIT`].
    pub const fn new(page: i64, limit: i64) -> Self {
        Self {
            page: if page < 1 { 1 } else { page },
            limit: if limit < 1 { FALLBACK_LIMIT } else { limit },
        }
    }

    /// One-based page number.
    pub const fn page(&self) -> i64 {
        self.page
    }

    /// Page size.
    pub const fn limit(&self) -> i64 {
        self.limit
    }

    /// Number of rows to skip. Saturates instead of overflowing, which
    /// pushes absurd pages past the end of any table.
    pub const fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}
