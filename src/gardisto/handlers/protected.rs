use axum::{
    extract::{Extension, Form},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;

use super::UserForm;
use crate::auth::{AuthEngine, Error, RequestTokens, cookies};

// Example resource behind session + CSRF validation.
#[utoipa::path(
    post,
    path = "/protected",
    request_body(content = UserForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Request authorized"),
        (status = 401, description = "Request did not authorize"),
    ),
    tag = "auth"
)]
pub async fn protected(
    engine: Extension<Arc<AuthEngine>>,
    headers: HeaderMap,
    payload: Option<Form<UserForm>>,
) -> impl IntoResponse {
    let Some(Form(user)) = payload else {
        return Error::Unauthorized.into_response();
    };

    let presented = RequestTokens {
        session: cookies::extract_cookie(&headers, cookies::SESSION_COOKIE_NAME),
        csrf: cookies::extract_csrf_header(&headers),
    };

    match engine.authorize(&user.username, &presented).await {
        Ok(()) => (StatusCode::OK, format!("Welcome, {}", user.username)).into_response(),
        Err(err) => err.into_response(),
    }
}
