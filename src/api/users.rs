//! User account and download endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        Book, ChangePassword, CreateUser, DownloadQuery, LoginRequest, UpdateProfile, UserProfile,
    },
};

/// Register a new account
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User registered", body = UserProfile),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "User ID or email already registered")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(req): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<UserProfile>)> {
    let profile = state.services.users.register(req).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Authenticate by email and password
#[utoipa::path(
    post,
    path = "/users/login",
    tag = "users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authentication succeeded", body = UserProfile),
        (status = 401, description = "Incorrect password"),
        (status = 404, description = "No account for this email")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<UserProfile>> {
    let profile = state.services.users.authenticate(req).await?;
    Ok(Json(profile))
}

/// Get a user's profile
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = UserProfile),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_profile(
    State(state): State<crate::AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<UserProfile>> {
    let profile = state.services.users.get_profile(&user_id).await?;
    Ok(Json(profile))
}

/// Update a user's name and/or email
#[utoipa::path(
    put,
    path = "/users/{user_id}/profile",
    tag = "users",
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    request_body = UpdateProfile,
    responses(
        (status = 200, description = "Profile updated", body = UserProfile),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn update_profile(
    State(state): State<crate::AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<UpdateProfile>,
) -> AppResult<Json<UserProfile>> {
    let profile = state.services.users.update_profile(&user_id, req).await?;
    Ok(Json(profile))
}

/// Change a user's password
#[utoipa::path(
    put,
    path = "/users/{user_id}/password",
    tag = "users",
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    request_body = ChangePassword,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Invalid password"),
        (status = 404, description = "User not found")
    )
)]
pub async fn change_password(
    State(state): State<crate::AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<ChangePassword>,
) -> AppResult<StatusCode> {
    state.services.users.change_password(&user_id, req).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a user account
#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<crate::AppState>,
    Path(user_id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.users.delete_user(&user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List a user's downloaded books
#[utoipa::path(
    get,
    path = "/users/{user_id}/downloads",
    tag = "downloads",
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Downloaded books", body = Vec<Book>),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_downloads(
    State(state): State<crate::AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.downloads.list(&user_id).await?;
    Ok(Json(books))
}

/// Search within a user's downloaded books
#[utoipa::path(
    get,
    path = "/users/{user_id}/downloads/search",
    tag = "downloads",
    params(
        ("user_id" = String, Path, description = "User ID"),
        ("title" = Option<String>, Query, description = "Case-insensitive substring match on title"),
        ("genre" = Option<String>, Query, description = "Case-insensitive exact match on genre")
    ),
    responses(
        (status = 200, description = "Matching downloaded books", body = Vec<Book>),
        (status = 404, description = "User not found")
    )
)]
pub async fn search_downloads(
    State(state): State<crate::AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<DownloadQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.downloads.search(&user_id, &query).await?;
    Ok(Json(books))
}

/// Download a catalog book into the user's collection
#[utoipa::path(
    post,
    path = "/users/{user_id}/downloads/{isbn}",
    tag = "downloads",
    params(
        ("user_id" = String, Path, description = "User ID"),
        ("isbn" = String, Path, description = "Book ISBN")
    ),
    responses(
        (status = 201, description = "Book downloaded", body = Book),
        (status = 404, description = "User or book not found"),
        (status = 409, description = "Book already downloaded")
    )
)]
pub async fn add_download(
    State(state): State<crate::AppState>,
    Path((user_id, isbn)): Path<(String, String)>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.services.downloads.add(&user_id, &isbn).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Remove a book from the user's collection
#[utoipa::path(
    delete,
    path = "/users/{user_id}/downloads/{isbn}",
    tag = "downloads",
    params(
        ("user_id" = String, Path, description = "User ID"),
        ("isbn" = String, Path, description = "Book ISBN")
    ),
    responses(
        (status = 204, description = "Download removed"),
        (status = 404, description = "User not found or book not downloaded")
    )
)]
pub async fn remove_download(
    State(state): State<crate::AppState>,
    Path((user_id, isbn)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    state.services.downloads.remove(&user_id, &isbn).await?;
    Ok(StatusCode::NO_CONTENT)
}
