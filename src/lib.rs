pub mod auth;
pub mod cli;
pub mod gardisto;
pub mod store;
