use axum::Json;
use tokengate_auth::PublicUser;

use crate::middleware::auth::CurrentUser;

/// The authenticated caller's public record
pub async fn read_me(CurrentUser(identity): CurrentUser) -> Json<PublicUser> {
    Json(identity.user)
}
