//! The library aggregate: catalog and user directory.
//!
//! Single source of truth for canonical book and user state. This layer
//! guards existence and uniqueness invariants only; role checks live in the
//! capability methods on [`User`]. Catalog mutation is `pub(crate)` so the
//! only way in from outside the crate is through the admin capability.

use indexmap::IndexMap;

use crate::{
    error::{AppError, AppResult},
    models::{Book, User},
};

#[derive(Debug, Default)]
pub struct Library {
    catalog: IndexMap<String, Book>,
    users: IndexMap<String, User>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    // ----- user directory -----

    pub fn register_user(&mut self, user: User) -> AppResult<()> {
        if self.users.contains_key(user.user_id()) {
            return Err(AppError::UserAlreadyExists(format!(
                "User {} already exists",
                user.user_id()
            )));
        }
        self.users.insert(user.user_id().to_string(), user);
        Ok(())
    }

    pub fn remove_user(&mut self, user_id: &str) -> AppResult<User> {
        if user_id.trim().is_empty() {
            return Err(AppError::Validation("User ID is required".to_string()));
        }
        // Download associations are discarded with the user.
        self.users
            .shift_remove(user_id)
            .ok_or_else(|| AppError::UserNotFound(format!("User {} not found", user_id)))
    }

    pub fn get_user(&self, user_id: &str) -> AppResult<&User> {
        if user_id.trim().is_empty() {
            return Err(AppError::Validation("User ID is required".to_string()));
        }
        self.users
            .get(user_id)
            .ok_or_else(|| AppError::UserNotFound(format!("User {} not found", user_id)))
    }

    pub fn get_user_mut(&mut self, user_id: &str) -> AppResult<&mut User> {
        if user_id.trim().is_empty() {
            return Err(AppError::Validation("User ID is required".to_string()));
        }
        self.users
            .get_mut(user_id)
            .ok_or_else(|| AppError::UserNotFound(format!("User {} not found", user_id)))
    }

    /// Case-insensitive lookup by email address
    pub fn find_user_by_email(&self, email: &str) -> Option<&User> {
        self.users
            .values()
            .find(|u| u.email().eq_ignore_ascii_case(email))
    }

    /// Defensive copy of the user directory, in insertion order
    pub fn list_users(&self) -> Vec<User> {
        self.users.values().cloned().collect()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    // ----- catalog -----

    /// Insert a catalog entry. Reachable only through the admin capability.
    pub(crate) fn add_book(&mut self, book: Book) -> AppResult<()> {
        if self.catalog.contains_key(&book.isbn) {
            return Err(AppError::BookAlreadyExists(format!(
                "Book {} already exists in the catalog",
                book.isbn
            )));
        }
        self.catalog.insert(book.isbn.clone(), book);
        Ok(())
    }

    /// Remove a catalog entry and detach it from every user's downloaded
    /// collection, so no dangling references survive the delete.
    pub(crate) fn remove_book(&mut self, isbn: &str) -> AppResult<()> {
        if isbn.trim().is_empty() {
            return Err(AppError::Validation("ISBN is required".to_string()));
        }
        if self.catalog.shift_remove(isbn).is_none() {
            return Err(AppError::BookNotFound(format!("Book {} not found", isbn)));
        }
        for user in self.users.values_mut() {
            user.detach_download(isbn);
        }
        Ok(())
    }

    pub fn get_book(&self, isbn: &str) -> AppResult<&Book> {
        if isbn.trim().is_empty() {
            return Err(AppError::Validation("ISBN is required".to_string()));
        }
        self.catalog
            .get(isbn)
            .ok_or_else(|| AppError::BookNotFound(format!("Book {} not found", isbn)))
    }

    pub(crate) fn get_book_mut(&mut self, isbn: &str) -> AppResult<&mut Book> {
        if isbn.trim().is_empty() {
            return Err(AppError::Validation("ISBN is required".to_string()));
        }
        self.catalog
            .get_mut(isbn)
            .ok_or_else(|| AppError::BookNotFound(format!("Book {} not found", isbn)))
    }

    pub fn contains_book(&self, isbn: &str) -> bool {
        self.catalog.contains_key(isbn)
    }

    /// Case-insensitive substring match on the title. An empty needle
    /// matches everything.
    pub fn search_by_title(&self, title: &str) -> Vec<Book> {
        let needle = title.to_lowercase();
        self.catalog
            .values()
            .filter(|b| b.title.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Case-insensitive exact match on the genre
    pub fn search_by_genre(&self, genre: &str) -> Vec<Book> {
        self.catalog
            .values()
            .filter(|b| {
                b.genre
                    .as_deref()
                    .is_some_and(|g| g.eq_ignore_ascii_case(genre))
            })
            .cloned()
            .collect()
    }

    /// Case-insensitive exact match on the author
    pub fn search_by_author(&self, author: &str) -> Vec<Book> {
        self.catalog
            .values()
            .filter(|b| b.author.eq_ignore_ascii_case(author))
            .cloned()
            .collect()
    }

    /// Defensive copy of the catalog, in insertion order
    pub fn list_books(&self) -> Vec<Book> {
        self.catalog.values().cloned().collect()
    }

    pub fn book_count(&self) -> usize {
        self.catalog.len()
    }
}
