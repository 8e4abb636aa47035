use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use tokengate_auth::{AccessToken, PublicUser, TokenPair, TokenType};
use tokengate_core::AppError;
use tracing::instrument;

use super::model::{LoginRequest, TestTokenRequest};
use crate::metrics::{track_login_failure, track_login_success, track_token_issued};
use crate::middleware::auth::{CurrentUser, bearer_token, reject};
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Exchange an identifier and password for an access/refresh token pair
#[instrument(skip_all)]
pub async fn login_access_token(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenPair>, AppError> {
    match state.auth.login(&dto.identifier, &dto.password).await {
        Ok(pair) => {
            track_login_success();
            track_token_issued(TokenType::Access.as_str());
            track_token_issued(TokenType::Refresh.as_str());
            Ok(Json(pair))
        }
        Err(err) => {
            track_login_failure(err.reason());
            Err(err.into())
        }
    }
}

/// Exchange a bearer refresh token for a new access token
#[instrument(skip_all)]
pub async fn refresh_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AccessToken>, AppError> {
    let token = bearer_token(&headers).map_err(reject)?;
    let access = state.auth.refresh(token).await.map_err(reject)?;

    track_token_issued(TokenType::Access.as_str());
    Ok(Json(access))
}

/// Echo the caller's identity for a valid access token
pub async fn test_token(
    CurrentUser(identity): CurrentUser,
    ValidatedJson(_dto): ValidatedJson<TestTokenRequest>,
) -> Json<PublicUser> {
    Json(identity.user)
}
