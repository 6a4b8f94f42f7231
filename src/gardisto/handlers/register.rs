use axum::{
    extract::{Extension, Form},
    http::StatusCode,
    response::IntoResponse,
};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::debug;

use super::Credentials;
use crate::auth::{AuthEngine, Error};

#[utoipa::path(
    post,
    path = "/register",
    request_body(content = Credentials, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Registration successful"),
        (status = 406, description = "Username or password shorter than 8 characters"),
        (status = 409, description = "User with the specified username already exists"),
    ),
    tag = "auth"
)]
pub async fn register(
    engine: Extension<Arc<AuthEngine>>,
    payload: Option<Form<Credentials>>,
) -> impl IntoResponse {
    let Some(Form(credentials)) = payload else {
        return Error::InvalidInput.into_response();
    };

    debug!(username = %credentials.username, "register request");

    let password = SecretString::from(credentials.password);
    match engine.register(&credentials.username, password).await {
        Ok(()) => (StatusCode::OK, "Registration successful").into_response(),
        Err(err) => err.into_response(),
    }
}
