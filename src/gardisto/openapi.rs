//! OpenAPI document for the auth routes.

use axum::response::{IntoResponse, Json};
use utoipa::OpenApi;

use super::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "gardisto",
        description = "Session and CSRF token authentication core",
    ),
    paths(
        handlers::health::health,
        handlers::register::register,
        handlers::login::login,
        handlers::logout::logout,
        handlers::protected::protected,
    ),
    components(schemas(handlers::Credentials, handlers::UserForm))
)]
struct ApiDoc;

// axum handler serving the spec as JSON
pub async fn serve() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_all_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for route in ["/health", "/register", "/login", "/logout", "/protected"] {
            assert!(paths.contains_key(route), "missing route: {route}");
        }
    }
}
