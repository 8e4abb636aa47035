//! Middleware and extractors for request processing.
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. [`auth::require_access_token`] resolves the access token through the
//!    token service and attaches the identity to the request
//! 3. Handlers take [`auth::CurrentUser`] to read it
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::{CurrentUser, require_access_token};
//!
//! let protected = Router::new()
//!     .route("/me", get(read_me))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_access_token));
//!
//! async fn read_me(CurrentUser(identity): CurrentUser) -> Json<PublicUser> {
//!     Json(identity.user)
//! }
//! ```

pub mod auth;
