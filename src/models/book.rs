//! Book model and related types

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Catalog entry. Identity is the ISBN: two books are equal iff their ISBNs
/// are equal, regardless of any other field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub genre: Option<String>,
    pub available: bool,
    /// Opaque locator for the cover image; never interpreted by the server
    pub cover_path: Option<String>,
    /// Opaque locator for the PDF file; required at construction
    pub pdf_path: String,
}

impl Book {
    /// Build a validated book. Structural validation happens here, before the
    /// book can reach any collection.
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        genre: Option<String>,
        available: bool,
        cover_path: Option<String>,
        pdf_path: impl Into<String>,
    ) -> AppResult<Self> {
        let isbn = isbn.into();
        let title = title.into();
        let author = author.into();
        let pdf_path = pdf_path.into();

        if isbn.trim().is_empty() {
            return Err(AppError::Validation("ISBN is required".to_string()));
        }
        if title.trim().is_empty() {
            return Err(AppError::Validation("Title is required".to_string()));
        }
        if author.trim().is_empty() {
            return Err(AppError::Validation("Author is required".to_string()));
        }
        if year <= 0 {
            return Err(AppError::Validation("Year must be positive".to_string()));
        }
        if pdf_path.trim().is_empty() {
            return Err(AppError::Validation("PDF file is required".to_string()));
        }

        Ok(Self {
            isbn,
            title,
            author,
            year,
            genre,
            available,
            cover_path,
            pdf_path,
        })
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn mark_available(&mut self) {
        self.available = true;
    }

    pub fn mark_unavailable(&mut self) {
        self.available = false;
    }

    /// Apply a partial update. Each field overwrites the current value only
    /// when it is present and usable: strings must be non-blank, the year
    /// must be positive, availability is applied when it differs. Absent or
    /// blank fields are a no-op, never an erasure.
    pub fn apply_update(&mut self, patch: &UpdateBook) {
        if let Some(title) = non_blank(&patch.title) {
            self.title = title;
        }
        if let Some(author) = non_blank(&patch.author) {
            self.author = author;
        }
        if let Some(genre) = non_blank(&patch.genre) {
            self.genre = Some(genre);
        }
        if let Some(year) = patch.year {
            if year > 0 {
                self.year = year;
            }
        }
        if let Some(cover_path) = non_blank(&patch.cover_path) {
            self.cover_path = Some(cover_path);
        }
        if let Some(pdf_path) = non_blank(&patch.pdf_path) {
            self.pdf_path = pdf_path;
        }
        if let Some(available) = patch.available {
            if available != self.available {
                self.available = available;
            }
        }
    }
}

fn non_blank(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.isbn == other.isbn
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.isbn.hash(state);
    }
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "ISBN is required"))]
    pub isbn: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(range(min = 1, message = "Year must be positive"))]
    pub year: i32,
    pub genre: Option<String>,
    /// Defaults to available when omitted
    pub available: Option<bool>,
    pub cover_path: Option<String>,
    #[validate(length(min = 1, message = "PDF file is required"))]
    pub pdf_path: String,
}

/// Partial update request: only the fields present are applied
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub cover_path: Option<String>,
    pub pdf_path: Option<String>,
    pub available: Option<bool>,
}

/// Catalog search parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// Case-insensitive substring match on the title
    pub title: Option<String>,
    /// Case-insensitive exact match on the genre
    pub genre: Option<String>,
    /// Case-insensitive exact match on the author
    pub author: Option<String>,
}

/// Administrative availability override request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetAvailability {
    pub available: bool,
}
