//! Feature modules. Each has a `controller.rs` with the HTTP handlers and a
//! `router.rs` wiring them; request bodies live in `model.rs`.

pub mod auth;
pub mod users;

pub use self::auth::model::LoginRequest;
