//! The book entity and its creation payload.
//!
//! [`Book`] is the persisted record as served to clients. [`NewBookRequest`]
//! is the loosely-typed JSON body a client posts; [`NewBookRequest::validate`]
//! turns it into a [`NewBook`], which can only exist with non-empty title,
//! author, and genre.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::BookId;

/// A persisted book record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Book {
    /// Store-assigned identifier.
    pub id: BookId,
    /// Book title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Genre label, matched exactly when filtering.
    pub genre: String,
    /// Optional rating. No range is enforced.
    pub rating: Option<f64>,
}

/// Errors raised while validating a create request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// `title`, `author`, or `genre` was missing, null, or empty.
    #[error("Title, author, and genre are required")]
    MissingRequired,

    /// `rating` did not parse as a number, or was not finite.
    #[error("Rating must be a number: {0}")]
    InvalidRating(String),
}

/// A rating as it may arrive in a JSON body.
///
/// Browser forms post numeric inputs as strings, so both shapes are
/// accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RatingInput {
    /// A JSON number.
    Number(f64),
    /// A JSON string holding a number.
    Text(String),
}

impl RatingInput {
    /// Resolve to a numeric rating. An empty or blank string means no rating.
    ///
    /// Infinities and `NaN` are rejected: JSON cannot carry them back to
    /// the client.
    pub fn resolve(self) -> Result<Option<f64>, ValidationError> {
        let value = match self {
            Self::Number(n) => n,
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed.parse::<f64>().map_err(|e| {
                    ValidationError::InvalidRating(format!("{trimmed:?} ({e})"))
                })?
            }
        };

        if value.is_finite() {
            Ok(Some(value))
        } else {
            Err(ValidationError::InvalidRating(format!("{value} is not finite")))
        }
    }
}

/// Raw `POST /books` body. Every field is optional at this stage so
/// that missing fields surface as a [`ValidationError`] rather than a
/// deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewBookRequest {
    /// Requested title.
    #[serde(default)]
    pub title: Option<String>,
    /// Requested author.
    #[serde(default)]
    pub author: Option<String>,
    /// Requested genre.
    #[serde(default)]
    pub genre: Option<String>,
    /// Requested rating, if any.
    #[serde(default)]
    pub rating: Option<RatingInput>,
}

impl NewBookRequest {
    /// Check presence of the required fields, then normalize the rating.
    pub fn validate(self) -> Result<NewBook, ValidationError> {
        let book = NewBook::new(
            self.title.unwrap_or_default(),
            self.author.unwrap_or_default(),
            self.genre.unwrap_or_default(),
            None,
        )?;
        let rating = self.rating.map(RatingInput::resolve).transpose()?.flatten();
        Ok(NewBook { rating, ..book })
    }
}

/// A validated book ready to be inserted.
///
/// Fields are private: the constructor is the only way in, so a
/// `NewBook` always carries non-empty title, author, and genre.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    title: String,
    author: String,
    genre: String,
    rating: Option<f64>,
}

impl NewBook {
    /// Build a new book, rejecting empty required fields.
    ///
    /// Only emptiness is checked; whitespace-only values are accepted.
    pub fn new(
        title: String,
        author: String,
        genre: String,
        rating: Option<f64>,
    ) -> Result<Self, ValidationError> {
        if title.is_empty() || author.is_empty() || genre.is_empty() {
            return Err(ValidationError::MissingRequired);
        }
        Ok(Self {
            title,
            author,
            genre,
            rating,
        })
    }

    /// Book title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Author name.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Genre label.
    pub fn genre(&self) -> &str {
        &self.genre
    }

    /// Optional rating.
    pub const fn rating(&self) -> Option<f64> {
        self.rating
    }
}
