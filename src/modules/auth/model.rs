use serde::Deserialize;
use validator::Validate;

/// Body of `POST login/access-token`. `username` and `email` are accepted
/// as aliases of `identifier`.
#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(alias = "username", alias = "email")]
    #[validate(length(min = 1, message = "Identifier is required"))]
    pub identifier: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("identifier", &self.identifier)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct TestTokenRequest {
    pub test: String,
}
