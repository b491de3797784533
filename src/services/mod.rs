//! Business logic services

pub mod catalog;
pub mod downloads;
pub mod users;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::library::Library;

/// The library aggregate behind a single lock. Every operation acquires the
/// lock exactly once, so compound check-then-act sequences are atomic and
/// reads observe a consistent snapshot. The instance is constructed at
/// startup and injected; there is no process-wide static.
pub type SharedLibrary = Arc<RwLock<Library>>;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub users: users::UsersService,
    pub downloads: downloads::DownloadsService,
}

impl Services {
    /// Create all services sharing the given library
    pub fn new(library: SharedLibrary) -> Self {
        Self {
            catalog: catalog::CatalogService::new(library.clone()),
            users: users::UsersService::new(library.clone()),
            downloads: downloads::DownloadsService::new(library),
        }
    }
}
