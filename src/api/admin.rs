//! Administrative catalog endpoints
//!
//! The acting administrator's ID travels in the path; the service layer
//! resolves it and enforces the role gate before any mutation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{Book, CreateBook, SetAvailability, UpdateBook, UserProfile},
};

/// List all registered users (admin only)
#[utoipa::path(
    get,
    path = "/admin/{user_id}/users",
    tag = "admin",
    params(
        ("user_id" = String, Path, description = "Acting administrator ID")
    ),
    responses(
        (status = 200, description = "List of users", body = Vec<UserProfile>),
        (status = 403, description = "Actor is not an administrator"),
        (status = 404, description = "Acting user not found")
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<UserProfile>>> {
    let users = state.services.catalog.list_users(&user_id).await?;
    Ok(Json(users))
}

/// Add a book to the catalog (admin only)
#[utoipa::path(
    post,
    path = "/admin/{user_id}/books",
    tag = "admin",
    params(
        ("user_id" = String, Path, description = "Acting administrator ID")
    ),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Actor is not an administrator"),
        (status = 409, description = "Book already exists")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.catalog.create_book(&user_id, req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Partially update a catalog book (admin only)
#[utoipa::path(
    put,
    path = "/admin/{user_id}/books/{isbn}",
    tag = "admin",
    params(
        ("user_id" = String, Path, description = "Acting administrator ID"),
        ("isbn" = String, Path, description = "Book ISBN")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 403, description = "Actor is not an administrator"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path((user_id, isbn)): Path<(String, String)>,
    Json(patch): Json<UpdateBook>,
) -> AppResult<Json<Book>> {
    let updated = state
        .services
        .catalog
        .update_book(&user_id, &isbn, patch)
        .await?;
    Ok(Json(updated))
}

/// Remove a book from the catalog (admin only); the book is detached from
/// every user's downloaded collection
#[utoipa::path(
    delete,
    path = "/admin/{user_id}/books/{isbn}",
    tag = "admin",
    params(
        ("user_id" = String, Path, description = "Acting administrator ID"),
        ("isbn" = String, Path, description = "Book ISBN")
    ),
    responses(
        (status = 204, description = "Book removed"),
        (status = 403, description = "Actor is not an administrator"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path((user_id, isbn)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_book(&user_id, &isbn).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Override a book's availability flag (admin only)
#[utoipa::path(
    put,
    path = "/admin/{user_id}/books/{isbn}/availability",
    tag = "admin",
    params(
        ("user_id" = String, Path, description = "Acting administrator ID"),
        ("isbn" = String, Path, description = "Book ISBN")
    ),
    request_body = SetAvailability,
    responses(
        (status = 200, description = "Availability updated", body = Book),
        (status = 403, description = "Actor is not an administrator"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn set_availability(
    State(state): State<crate::AppState>,
    Path((user_id, isbn)): Path<(String, String)>,
    Json(req): Json<SetAvailability>,
) -> AppResult<Json<Book>> {
    let book = state
        .services
        .catalog
        .set_availability(&user_id, &isbn, req)
        .await?;
    Ok(Json(book))
}
