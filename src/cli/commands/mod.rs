pub mod auth;
pub mod migrate;
pub mod server;
