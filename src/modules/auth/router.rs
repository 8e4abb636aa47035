use axum::{Router, middleware, routing::post};

use super::controller::{login_access_token, refresh_token, test_token};
use crate::middleware::auth::require_access_token;
use crate::state::AppState;

pub fn init_auth_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/test-token", post(test_token))
        .route("/manual-test-token", post(test_token))
        .route_layer(middleware::from_fn_with_state(state, require_access_token));

    Router::new()
        .route("/access-token", post(login_access_token))
        .route("/refresh-token", post(refresh_token))
        .merge(protected)
}
