//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, health, me, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "1.0.0",
        description = "Library Catalog REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    modifiers(&SecurityAddon),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::signup,
        auth::signin,
        // Management
        auth::management_signup,
        users::get_user,
        users::delete_user,
        books::add_book,
        books::get_book,
        books::update_book,
        books::delete_book,
        books::search_books,
        // Self-service
        me::get_me,
        me::get_my_books,
        me::get_all_books,
        me::add_my_book,
        me::update_my_book,
        me::delete_my_book,
    ),
    components(
        schemas(
            // Users
            crate::models::user::Role,
            crate::models::user::PublicUser,
            crate::models::user::SignupRequest,
            crate::models::user::SigninRequest,
            crate::models::user::TokenData,
            crate::models::user::UserQuery,
            crate::models::user::UserPage,
            // Books
            crate::models::book::Book,
            crate::models::book::BookWithOwner,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::book::BookQuery,
            crate::models::book::SearchQuery,
            crate::models::book::BookPage,
            // Envelope
            crate::models::response::Pagination,
            crate::models::response::Empty,
            // Health
            health::HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration and sign-in"),
        (name = "management", description = "Privileged user and book administration"),
        (name = "user", description = "Self-service profile and owned books")
    )
)]
pub struct ApiDoc;

/// Registers the bearer scheme referenced by the gated endpoints
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
