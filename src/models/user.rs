//! User model, role tags and capability methods

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    library::Library,
    models::book::{Book, UpdateBook},
};

/// Account role. A closed set of tags: the role is fixed at construction and
/// every capability check pattern-matches on it, so there is no way for a
/// caller to impersonate an administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Member => "MEMBER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "MEMBER" => Ok(Role::Member),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Library account. The role tag decides which capability methods succeed;
/// the downloaded collection holds snapshot copies of catalog books, keyed by
/// ISBN (no duplicates).
#[derive(Debug, Clone)]
pub struct User {
    user_id: String,
    name: String,
    email: String,
    password: String,
    role: Role,
    downloaded_books: Vec<Book>,
}

impl User {
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> AppResult<Self> {
        let user_id = user_id.into();
        if user_id.trim().is_empty() {
            return Err(AppError::Validation("User ID is required".to_string()));
        }

        Ok(Self {
            user_id,
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role,
            downloaded_books: Vec::new(),
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            user_id: self.user_id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }

    // ----- member capability (available to any role) -----

    /// Check the given credential against the stored one. This is an
    /// authentication check only; sessions and tokens are not this layer's
    /// concern.
    pub fn login(&self, password: &str) -> AppResult<()> {
        if password.trim().is_empty() {
            return Err(AppError::Authentication(
                "Password must not be empty".to_string(),
            ));
        }
        if password != self.password {
            return Err(AppError::Authentication("Incorrect password".to_string()));
        }
        Ok(())
    }

    /// Unconditional overwrite. Current-password verification, when wanted,
    /// belongs to the service layer.
    pub fn change_password(&mut self, new_password: impl Into<String>) {
        self.password = new_password.into();
    }

    /// Add a book to this user's personal collection. The catalog
    /// availability flag is not touched: downloads are personal bookmarks in
    /// an unlimited-copies model.
    pub fn download_book(&mut self, book: Book) -> AppResult<()> {
        if self.has_downloaded(&book.isbn) {
            return Err(AppError::BookAlreadyExists(format!(
                "Book {} is already in your collection",
                book.isbn
            )));
        }
        self.downloaded_books.push(book);
        Ok(())
    }

    pub fn remove_download(&mut self, isbn: &str) -> AppResult<()> {
        if !self.has_downloaded(isbn) {
            return Err(AppError::BookNotFound(format!(
                "Book {} is not in your collection",
                isbn
            )));
        }
        self.downloaded_books.retain(|b| b.isbn != isbn);
        Ok(())
    }

    pub fn has_downloaded(&self, isbn: &str) -> bool {
        self.downloaded_books.iter().any(|b| b.isbn == isbn)
    }

    /// Defensive copy: mutating the returned list never affects this user.
    pub fn list_downloaded_books(&self) -> Vec<Book> {
        self.downloaded_books.clone()
    }

    /// Detach a download without treating absence as an error. Used by the
    /// catalog-removal cascade.
    pub(crate) fn detach_download(&mut self, isbn: &str) {
        self.downloaded_books.retain(|b| b.isbn != isbn);
    }

    // ----- admin capability (role-gated) -----

    fn require_admin(&self) -> AppResult<()> {
        match self.role {
            Role::Admin => Ok(()),
            Role::Member => Err(AppError::AccessDenied(
                "Administrator privileges required".to_string(),
            )),
        }
    }

    pub fn add_book_to_library(&self, library: &mut Library, book: Book) -> AppResult<()> {
        self.require_admin()?;
        if library.contains_book(&book.isbn) {
            return Err(AppError::BookAlreadyExists(format!(
                "Book {} already exists in the catalog",
                book.isbn
            )));
        }
        library.add_book(book)
    }

    pub fn remove_book_from_library(&self, library: &mut Library, isbn: &str) -> AppResult<()> {
        self.require_admin()?;
        if isbn.trim().is_empty() {
            return Err(AppError::Validation("ISBN is required".to_string()));
        }
        if !library.contains_book(isbn) {
            return Err(AppError::BookNotFound(format!("Book {} not found", isbn)));
        }
        library.remove_book(isbn)
    }

    /// Apply a partial update to a catalog book. Absent fields stay as they
    /// were; nothing is mutated when the book cannot be resolved.
    pub fn update_book_in_library(
        &self,
        library: &mut Library,
        isbn: &str,
        patch: &UpdateBook,
    ) -> AppResult<Book> {
        self.require_admin()?;
        let book = library.get_book_mut(isbn)?;
        book.apply_update(patch);
        Ok(book.clone())
    }

    /// Administrative override of the availability flag, regardless of any
    /// prior state.
    pub fn set_book_availability(
        &self,
        library: &mut Library,
        isbn: &str,
        available: bool,
    ) -> AppResult<()> {
        self.require_admin()?;
        let book = library.get_book_mut(isbn)?;
        if available {
            book.mark_available();
        } else {
            book.mark_unavailable();
        }
        Ok(())
    }
}

/// Public view of a user; the credential never serializes
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "User ID is required"))]
    pub user_id: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: String,
    /// Defaults to MEMBER when omitted
    pub role: Option<Role>,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Profile update request (name and/or email)
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProfile {
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// Password change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePassword {
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub new_password: String,
}

/// Search parameters for a user's downloaded collection. Filters combine
/// with AND semantics.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct DownloadQuery {
    /// Case-insensitive substring match on the title
    pub title: Option<String>,
    /// Case-insensitive exact match on the genre
    pub genre: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> User {
        User::new("MB01", "Zakaria Charouite", "zakaria@libria.com", "zack123", Role::Member)
            .unwrap()
    }

    fn admin() -> User {
        User::new("AD01", "Super Admin", "admin@libria.com", "libria123", Role::Admin).unwrap()
    }

    fn book(isbn: &str) -> Book {
        Book::new(isbn, "Dune", "Frank Herbert", 1965, Some("Science Fiction".into()), true, None, "dune.pdf")
            .unwrap()
    }

    #[test]
    fn new_rejects_blank_user_id() {
        let err = User::new("  ", "X", "x@libria.com", "pw", Role::Member).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn login_accepts_matching_password() {
        assert!(member().login("zack123").is_ok());
    }

    #[test]
    fn login_rejects_blank_password() {
        let err = member().login("  ").unwrap_err();
        assert!(matches!(err, AppError::Authentication(_)));
    }

    #[test]
    fn login_rejects_wrong_password() {
        let err = member().login("nope").unwrap_err();
        assert!(matches!(err, AppError::Authentication(_)));
    }

    #[test]
    fn change_password_takes_effect() {
        let mut user = member();
        user.change_password("fresh-secret");
        assert!(user.login("zack123").is_err());
        assert!(user.login("fresh-secret").is_ok());
    }

    #[test]
    fn download_then_remove_restores_collection() {
        let mut user = member();
        user.download_book(book("978-1")).unwrap();
        assert_eq!(user.list_downloaded_books().len(), 1);

        user.remove_download("978-1").unwrap();
        assert!(user.list_downloaded_books().is_empty());
    }

    #[test]
    fn duplicate_download_is_rejected() {
        let mut user = member();
        user.download_book(book("978-1")).unwrap();
        let err = user.download_book(book("978-1")).unwrap_err();
        assert!(matches!(err, AppError::BookAlreadyExists(_)));
        assert_eq!(user.list_downloaded_books().len(), 1);
    }

    #[test]
    fn remove_without_download_fails() {
        let mut user = member();
        let err = user.remove_download("978-1").unwrap_err();
        assert!(matches!(err, AppError::BookNotFound(_)));
    }

    #[test]
    fn downloaded_books_list_is_a_defensive_copy() {
        let mut user = member();
        user.download_book(book("978-1")).unwrap();

        let mut copy = user.list_downloaded_books();
        copy.clear();

        assert_eq!(user.list_downloaded_books().len(), 1);
    }

    #[test]
    fn member_cannot_add_books() {
        let mut library = Library::new();
        let err = member()
            .add_book_to_library(&mut library, book("978-1"))
            .unwrap_err();
        assert!(matches!(err, AppError::AccessDenied(_)));
        assert!(!library.contains_book("978-1"));
    }

    #[test]
    fn member_cannot_remove_update_or_override_books() {
        let mut library = Library::new();
        admin().add_book_to_library(&mut library, book("978-1")).unwrap();

        let user = member();
        assert!(matches!(
            user.remove_book_from_library(&mut library, "978-1").unwrap_err(),
            AppError::AccessDenied(_)
        ));
        assert!(matches!(
            user.update_book_in_library(&mut library, "978-1", &UpdateBook::default())
                .unwrap_err(),
            AppError::AccessDenied(_)
        ));
        assert!(matches!(
            user.set_book_availability(&mut library, "978-1", false).unwrap_err(),
            AppError::AccessDenied(_)
        ));
    }

    #[test]
    fn admin_adds_and_removes_books() {
        let mut library = Library::new();
        let admin = admin();

        admin.add_book_to_library(&mut library, book("978-1")).unwrap();
        assert!(library.contains_book("978-1"));

        admin.remove_book_from_library(&mut library, "978-1").unwrap();
        assert!(!library.contains_book("978-1"));
    }

    #[test]
    fn admin_add_rejects_duplicate_isbn() {
        let mut library = Library::new();
        let admin = admin();
        admin.add_book_to_library(&mut library, book("978-1")).unwrap();

        let err = admin.add_book_to_library(&mut library, book("978-1")).unwrap_err();
        assert!(matches!(err, AppError::BookAlreadyExists(_)));
        assert_eq!(library.list_books().len(), 1);
    }

    #[test]
    fn admin_remove_requires_existing_book() {
        let mut library = Library::new();
        let err = admin()
            .remove_book_from_library(&mut library, "missing")
            .unwrap_err();
        assert!(matches!(err, AppError::BookNotFound(_)));
    }

    #[test]
    fn admin_partial_update_preserves_other_fields() {
        let mut library = Library::new();
        let admin = admin();
        admin.add_book_to_library(&mut library, book("978-1")).unwrap();

        let updated = admin
            .update_book_in_library(
                &mut library,
                "978-1",
                &UpdateBook {
                    genre: Some("Classic".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.title, "Dune");
        assert_eq!(updated.author, "Frank Herbert");
        assert_eq!(updated.genre.as_deref(), Some("Classic"));
    }

    #[test]
    fn admin_availability_override() {
        let mut library = Library::new();
        let admin = admin();
        admin.add_book_to_library(&mut library, book("978-1")).unwrap();

        admin.set_book_availability(&mut library, "978-1", false).unwrap();
        assert!(!library.get_book("978-1").unwrap().is_available());

        admin.set_book_availability(&mut library, "978-1", true).unwrap();
        assert!(library.get_book("978-1").unwrap().is_available());
    }

    #[test]
    fn role_round_trips_through_strings() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("MEMBER".parse::<Role>().unwrap(), Role::Member);
        assert!("librarian".parse::<Role>().is_err());
    }
}
