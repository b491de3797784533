//! Per-user download collection service
//!
//! A download stores a snapshot copy of the catalog book in the user's
//! personal collection. The catalog availability flag is never touched here:
//! the system follows an unlimited-copies model, and availability is an
//! administrative concern.

use crate::{
    error::AppResult,
    models::{Book, DownloadQuery},
    services::SharedLibrary,
};

#[derive(Clone)]
pub struct DownloadsService {
    library: SharedLibrary,
}

impl DownloadsService {
    pub fn new(library: SharedLibrary) -> Self {
        Self { library }
    }

    /// Add a catalog book to the user's collection and return the stored copy
    pub async fn add(&self, user_id: &str, isbn: &str) -> AppResult<Book> {
        let mut library = self.library.write().await;
        library.get_user(user_id)?;
        let book = library.get_book(isbn)?.clone();
        library.get_user_mut(user_id)?.download_book(book.clone())?;

        tracing::info!(user_id = %user_id, isbn = %isbn, "Book downloaded");
        Ok(book)
    }

    pub async fn remove(&self, user_id: &str, isbn: &str) -> AppResult<()> {
        let mut library = self.library.write().await;
        library.get_user_mut(user_id)?.remove_download(isbn)?;

        tracing::info!(user_id = %user_id, isbn = %isbn, "Download removed");
        Ok(())
    }

    pub async fn list(&self, user_id: &str) -> AppResult<Vec<Book>> {
        let library = self.library.read().await;
        Ok(library.get_user(user_id)?.list_downloaded_books())
    }

    /// Search within one user's collection. Title is a case-insensitive
    /// substring, genre a case-insensitive exact match; both filters combine
    /// with AND semantics.
    pub async fn search(&self, user_id: &str, query: &DownloadQuery) -> AppResult<Vec<Book>> {
        let library = self.library.read().await;
        let mut books = library.get_user(user_id)?.list_downloaded_books();

        if let Some(title) = query.title.as_deref() {
            let needle = title.to_lowercase();
            books.retain(|b| b.title.to_lowercase().contains(&needle));
        }
        if let Some(genre) = query.genre.as_deref() {
            books.retain(|b| {
                b.genre
                    .as_deref()
                    .is_some_and(|g| g.eq_ignore_ascii_case(genre))
            });
        }
        Ok(books)
    }
}
