use axum::{
    extract::{Extension, Form},
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::IntoResponse,
};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::{debug, error};

use super::Credentials;
use crate::auth::{AuthEngine, Error, cookies};

#[utoipa::path(
    post,
    path = "/login",
    request_body(content = Credentials, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Session established, cookies set"),
        (status = 401, description = "Unknown user or wrong password"),
    ),
    tag = "auth"
)]
pub async fn login(
    engine: Extension<Arc<AuthEngine>>,
    payload: Option<Form<Credentials>>,
) -> impl IntoResponse {
    // Malformed bodies fail closed, same signal as bad credentials.
    let Some(Form(credentials)) = payload else {
        return Error::Unauthorized.into_response();
    };

    let password = SecretString::from(credentials.password);
    let tokens = match engine.login(&credentials.username, password).await {
        Ok(tokens) => tokens,
        Err(err) => return err.into_response(),
    };

    let session_cookie = cookies::session_cookie(&tokens.session);
    let csrf_cookie = cookies::csrf_cookie(&tokens.csrf);
    let (Ok(session_cookie), Ok(csrf_cookie)) = (session_cookie, csrf_cookie) else {
        error!("Failed to build session cookies");
        return Error::Internal.into_response();
    };

    debug!(username = %credentials.username, "login ok");

    let mut headers = HeaderMap::new();
    headers.append(SET_COOKIE, session_cookie);
    headers.append(SET_COOKIE, csrf_cookie);
    (StatusCode::OK, headers, "Login successful").into_response()
}
