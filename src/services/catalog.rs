//! Catalog management service
//!
//! Public reads plus the admin-gated mutations. Every mutation resolves the
//! acting user by ID, checks the dynamic role tag, and then dispatches to the
//! capability method, which re-checks the role independently.

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookQuery, CreateBook, Role, SetAvailability, UpdateBook, UserProfile},
    services::SharedLibrary,
};

#[derive(Clone)]
pub struct CatalogService {
    library: SharedLibrary,
}

impl CatalogService {
    pub fn new(library: SharedLibrary) -> Self {
        Self { library }
    }

    /// Full catalog, or the subset matching the given filters. Filters
    /// combine with AND semantics; each one keeps the per-field matching
    /// rules of the underlying search operations.
    pub async fn search_books(&self, query: &BookQuery) -> Vec<Book> {
        let library = self.library.read().await;

        let mut books = match query.title.as_deref() {
            Some(title) => library.search_by_title(title),
            None => library.list_books(),
        };
        if let Some(genre) = query.genre.as_deref() {
            books.retain(|b| {
                b.genre
                    .as_deref()
                    .is_some_and(|g| g.eq_ignore_ascii_case(genre))
            });
        }
        if let Some(author) = query.author.as_deref() {
            books.retain(|b| b.author.eq_ignore_ascii_case(author));
        }
        books
    }

    pub async fn get_book(&self, isbn: &str) -> AppResult<Book> {
        let library = self.library.read().await;
        library.get_book(isbn).cloned()
    }

    pub async fn book_count(&self) -> usize {
        self.library.read().await.book_count()
    }

    /// Create a catalog entry on behalf of the acting user
    pub async fn create_book(&self, acting_user_id: &str, req: CreateBook) -> AppResult<Book> {
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let book = Book::new(
            req.isbn,
            req.title,
            req.author,
            req.year,
            req.genre,
            req.available.unwrap_or(true),
            req.cover_path,
            req.pdf_path,
        )?;

        let mut library = self.library.write().await;
        let actor = self.resolve_admin(&library, acting_user_id)?;
        actor.add_book_to_library(&mut library, book.clone())?;

        tracing::info!(isbn = %book.isbn, actor = %acting_user_id, "Book added to catalog");
        Ok(book)
    }

    /// Partial update of an existing catalog entry
    pub async fn update_book(
        &self,
        acting_user_id: &str,
        isbn: &str,
        patch: UpdateBook,
    ) -> AppResult<Book> {
        let mut library = self.library.write().await;
        let actor = self.resolve_admin(&library, acting_user_id)?;
        let updated = actor.update_book_in_library(&mut library, isbn, &patch)?;

        tracing::info!(isbn = %isbn, actor = %acting_user_id, "Book updated");
        Ok(updated)
    }

    /// Remove a catalog entry; the aggregate detaches it from every user's
    /// downloaded collection.
    pub async fn delete_book(&self, acting_user_id: &str, isbn: &str) -> AppResult<()> {
        let mut library = self.library.write().await;
        let actor = self.resolve_admin(&library, acting_user_id)?;
        actor.remove_book_from_library(&mut library, isbn)?;

        tracing::info!(isbn = %isbn, actor = %acting_user_id, "Book removed from catalog");
        Ok(())
    }

    /// Administrative availability override
    pub async fn set_availability(
        &self,
        acting_user_id: &str,
        isbn: &str,
        req: SetAvailability,
    ) -> AppResult<Book> {
        let mut library = self.library.write().await;
        let actor = self.resolve_admin(&library, acting_user_id)?;
        actor.set_book_availability(&mut library, isbn, req.available)?;

        tracing::info!(isbn = %isbn, available = req.available, actor = %acting_user_id, "Availability overridden");
        library.get_book(isbn).cloned()
    }

    /// List all registered accounts (admin only)
    pub async fn list_users(&self, acting_user_id: &str) -> AppResult<Vec<UserProfile>> {
        let library = self.library.read().await;
        self.resolve_admin(&library, acting_user_id)?;
        Ok(library.list_users().iter().map(|u| u.profile()).collect())
    }

    /// Resolve the acting user and check the role tag before dispatch. The
    /// capability method performs its own check as well.
    fn resolve_admin(
        &self,
        library: &crate::library::Library,
        acting_user_id: &str,
    ) -> AppResult<crate::models::User> {
        let actor = library.get_user(acting_user_id)?.clone();
        if actor.role() != Role::Admin {
            return Err(AppError::AccessDenied(
                "Only an administrator may manage the catalog".to_string(),
            ));
        }
        Ok(actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{library::Library, models::User};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    fn service() -> CatalogService {
        let mut library = Library::new();
        library
            .register_user(
                User::new("AD01", "Super Admin", "admin@libria.com", "libria123", Role::Admin)
                    .unwrap(),
            )
            .unwrap();
        library
            .register_user(
                User::new("MB01", "Zakaria", "zakaria@libria.com", "zack123", Role::Member)
                    .unwrap(),
            )
            .unwrap();
        CatalogService::new(Arc::new(RwLock::new(library)))
    }

    fn create_req(isbn: &str) -> CreateBook {
        CreateBook {
            isbn: isbn.to_string(),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            year: 1965,
            genre: Some("Science Fiction".to_string()),
            available: None,
            cover_path: None,
            pdf_path: "/files/pdf/dune.pdf".to_string(),
        }
    }

    #[tokio::test]
    async fn admin_creates_book() {
        let svc = service();
        let book = svc.create_book("AD01", create_req("978-1")).await.unwrap();
        assert!(book.is_available());
        assert_eq!(svc.get_book("978-1").await.unwrap().title, "Dune");
    }

    #[tokio::test]
    async fn member_is_denied_catalog_mutations() {
        let svc = service();
        let err = svc.create_book("MB01", create_req("978-1")).await.unwrap_err();
        assert!(matches!(err, AppError::AccessDenied(_)));

        let err = svc.delete_book("MB01", "978-1").await.unwrap_err();
        assert!(matches!(err, AppError::AccessDenied(_)));

        let err = svc.list_users("MB01").await.unwrap_err();
        assert!(matches!(err, AppError::AccessDenied(_)));
    }

    #[tokio::test]
    async fn unknown_actor_is_a_user_not_found() {
        let svc = service();
        let err = svc.create_book("ghost", create_req("978-1")).await.unwrap_err();
        assert!(matches!(err, AppError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn duplicate_isbn_is_a_conflict() {
        let svc = service();
        svc.create_book("AD01", create_req("978-1")).await.unwrap();
        let err = svc.create_book("AD01", create_req("978-1")).await.unwrap_err();
        assert!(matches!(err, AppError::BookAlreadyExists(_)));
        assert_eq!(svc.book_count().await, 1);
    }

    #[tokio::test]
    async fn create_rejects_missing_pdf() {
        let svc = service();
        let mut req = create_req("978-1");
        req.pdf_path = String::new();
        let err = svc.create_book("AD01", req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn update_applies_only_present_fields() {
        let svc = service();
        svc.create_book("AD01", create_req("978-1")).await.unwrap();

        let updated = svc
            .update_book(
                "AD01",
                "978-1",
                UpdateBook {
                    year: Some(1966),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.year, 1966);
        assert_eq!(updated.title, "Dune");
        assert_eq!(updated.author, "Frank Herbert");
    }

    #[tokio::test]
    async fn availability_override_round_trips() {
        let svc = service();
        svc.create_book("AD01", create_req("978-1")).await.unwrap();

        let book = svc
            .set_availability("AD01", "978-1", SetAvailability { available: false })
            .await
            .unwrap();
        assert!(!book.is_available());
    }

    #[tokio::test]
    async fn search_filters_combine_with_and_semantics() {
        let svc = service();
        svc.create_book("AD01", create_req("978-1")).await.unwrap();
        let mut other = create_req("978-2");
        other.title = "Dune Messiah".to_string();
        other.genre = Some("Fantasy".to_string());
        svc.create_book("AD01", other).await.unwrap();

        let hits = svc
            .search_books(&BookQuery {
                title: Some("dune".to_string()),
                genre: Some("SCIENCE FICTION".to_string()),
                author: None,
            })
            .await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].isbn, "978-1");

        let all = svc.search_books(&BookQuery::default()).await;
        assert_eq!(all.len(), 2);
    }
}
