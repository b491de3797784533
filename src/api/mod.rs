//! API handlers for Libria REST endpoints

pub mod admin;
pub mod books;
pub mod health;
pub mod openapi;
pub mod users;
