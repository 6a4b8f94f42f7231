pub mod health;
pub use self::health::health;

pub mod register;
pub use self::register::register;

pub mod login;
pub use self::login::login;

pub mod logout;
pub use self::logout::logout;

pub mod protected;
pub use self::protected::protected;

// common payload types for the form handlers
use serde::Deserialize;
use utoipa::ToSchema;

/// Registration and login payload.
#[derive(ToSchema, Deserialize, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Payload for routes that only name the user; the proof of identity
/// travels in the session cookie and CSRF header.
#[derive(ToSchema, Deserialize, Debug)]
pub struct UserForm {
    pub username: String,
}
