//! Actor extraction from upstream-auth headers.
//!
//! Authentication lives in an external collaborator (an API gateway or
//! auth proxy) that verifies credentials and forwards the caller's
//! identity in trusted headers:
//!
//! ```text
//! x-user-id:         opaque user identifier
//! x-user-can-author: "true" when the user holds the author role
//! ```
//!
//! The extractor rejects requests without a user id; the boundary never
//! sees unauthenticated traffic in a correctly deployed setup.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::dto::ErrorResponse;
use crate::domain::foundation::{Actor, UserId};

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header flagging the author capability.
pub const CAN_AUTHOR_HEADER: &str = "x-user-can-author";

/// Extractor requiring an authenticated actor.
#[derive(Debug, Clone)]
pub struct RequireActor(pub Actor);

#[async_trait]
impl<S> FromRequestParts<S> for RequireActor
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| UserId::new(v).ok())
            .ok_or_else(unauthorized)?;

        let can_author = parts
            .headers
            .get(CAN_AUTHOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(RequireActor(Actor {
            id: user_id,
            can_author,
        }))
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: "Authentication required".to_string(),
            code: "AUTH_ERROR".to_string(),
        }),
    )
        .into_response()
}
