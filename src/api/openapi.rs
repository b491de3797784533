//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{admin, books, health, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libria API",
        version = "1.0.0",
        description = "Library Lending Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Libria Team", email = "contact@libria.org")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::get_book,
        // Admin
        admin::list_users,
        admin::create_book,
        admin::update_book,
        admin::delete_book,
        admin::set_availability,
        // Users
        users::register,
        users::login,
        users::get_profile,
        users::update_profile,
        users::change_password,
        users::delete_user,
        users::list_downloads,
        users::search_downloads,
        users::add_download,
        users::remove_download,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::book::BookQuery,
            crate::models::book::SetAvailability,
            // Users
            crate::models::user::Role,
            crate::models::user::UserProfile,
            crate::models::user::CreateUser,
            crate::models::user::LoginRequest,
            crate::models::user::UpdateProfile,
            crate::models::user::ChangePassword,
            crate::models::user::DownloadQuery,
            // Health
            health::HealthResponse,
            health::ReadinessResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Public catalog browsing"),
        (name = "admin", description = "Administrative catalog management"),
        (name = "users", description = "User accounts and authentication"),
        (name = "downloads", description = "Per-user download collections")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
