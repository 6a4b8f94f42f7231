use axum::{
    extract::{Extension, Form},
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::debug;

use super::UserForm;
use crate::auth::{AuthEngine, Error, RequestTokens, cookies};

#[utoipa::path(
    post,
    path = "/logout",
    request_body(content = UserForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Session ended, cookies cleared"),
        (status = 401, description = "Request did not authorize"),
    ),
    tag = "auth"
)]
pub async fn logout(
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

    if let Err(err) = engine.logout(&user.username, &presented).await {
        return err.into_response();
    }

    debug!(username = %user.username, "logout ok");

    // Overwrite both cookies with an immediate expiry so the browser
    // drops them.
    let mut response_headers = HeaderMap::new();
    response_headers.append(SET_COOKIE, cookies::clear_session_cookie());
    response_headers.append(SET_COOKIE, cookies::clear_csrf_cookie());
    (StatusCode::OK, response_headers, "Logged out").into_response()
}
