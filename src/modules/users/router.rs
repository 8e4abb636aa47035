use axum::{Router, routing::get};

use super::controller::read_me;
use crate::state::AppState;

/// Routes here expect the access-token gate applied by the caller.
pub fn init_users_router() -> Router<AppState> {
    Router::new().route("/me", get(read_me))
}
