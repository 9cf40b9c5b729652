use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

use breachwatch_types::Session;

use crate::error::{ApiError, ApiResult};

/// Header carrying the signed-in user's id; absent or blank means anonymous
pub const USER_ID_HEADER: &str = "x-user-id";

/// Session of the caller, resolved from request headers
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

impl CurrentSession {
    /// Reject anonymous callers on user-scoped routes
    pub fn require(self) -> ApiResult<Session> {
        if self.0.is_active() {
            Ok(self.0)
        } else {
            Err(ApiError::Unauthorized)
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok());

        Ok(Self(Session::from_user_id(user_id)))
    }
}
