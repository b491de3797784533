//! Domain models

pub mod book;
pub mod user;

pub use book::{Book, BookQuery, CreateBook, SetAvailability, UpdateBook};
pub use user::{
    ChangePassword, CreateUser, DownloadQuery, LoginRequest, Role, UpdateProfile, User,
    UserProfile,
};
