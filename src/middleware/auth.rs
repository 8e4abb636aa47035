use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use tokengate_auth::{AuthError, AuthenticatedIdentity, TokenType};
use tokengate_core::AppError;
use tracing::debug;

use crate::metrics::track_token_rejected;
use crate::state::AppState;

/// Returns the token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively. A missing header, another
/// scheme or an empty token are all [`AuthError::MissingToken`].
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let (scheme, token) = value.trim().split_once(' ').ok_or(AuthError::MissingToken)?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    Ok(token)
}

/// Maps a gate failure to its response. Only failures of the token itself
/// count towards `auth_token_rejected_total`.
pub(crate) fn reject(err: AuthError) -> AppError {
    if err.is_token_rejection() {
        track_token_rejected(err.reason());
        debug!(reason = err.reason(), "Rejected bearer token");
    }
    err.into()
}

/// Gate for protected routes: resolves the access token and stores the
/// caller's [`AuthenticatedIdentity`] in the request extensions. Rejected
/// requests never reach the handler.
pub async fn require_access_token(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers()).map_err(reject)?.to_owned();

    let identity = state
        .auth
        .resolve_identity(&token, TokenType::Access)
        .await
        .map_err(reject)?;

    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

/// Extractor for the identity attached by [`require_access_token`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthenticatedIdentity);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedIdentity>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AuthError::MissingToken.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_bearer_scheme_is_case_insensitive() {
        let headers = headers_with("bearer abc");
        assert_eq!(bearer_token(&headers).unwrap(), "abc");

        let headers = headers_with("BEARER abc");
        assert_eq!(bearer_token(&headers).unwrap(), "abc");
    }

    #[test]
    fn test_missing_header() {
        let headers = HeaderMap::new();
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::MissingToken)
        ));
    }

    #[test]
    fn test_other_scheme_rejected() {
        let headers = headers_with("Basic dXNlcjpwdw==");
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::MissingToken)
        ));
    }

    #[test]
    fn test_empty_token_rejected() {
        for value in ["Bearer ", "Bearer"] {
            let headers = headers_with(value);
            assert!(
                matches!(bearer_token(&headers), Err(AuthError::MissingToken)),
                "{value:?}"
            );
        }
    }

    #[test]
    fn test_only_token_failures_feed_rejection_counter() {
        let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            let _ = reject(AuthError::UserNotFound);
            let _ = reject(AuthError::InactiveUser);
            let _ = reject(AuthError::Expired);
        });

        let rendered = handle.render();
        assert!(rendered.contains(r#"auth_token_rejected_total{reason="expired"} 1"#));
        assert!(!rendered.contains("user_not_found"));
        assert!(!rendered.contains("inactive_user"));
    }

    #[tokio::test]
    async fn test_current_user_without_gate_is_missing_token() {
        let (mut parts, _) = Request::new(axum::body::Body::empty()).into_parts();

        let result = CurrentUser::from_request_parts(&mut parts, &()).await;
        let err = result.unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
    }
}
