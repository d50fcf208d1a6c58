//! Caller identity extracted from the `X-User-Id` header.
//!
//! Authentication happens upstream; this service trusts the header. A
//! missing or blank header means an anonymous caller.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::error::ErrorResponse;
use crate::domain::foundation::UserId;

pub const USER_ID_HEADER: &str = "X-User-Id";

fn user_from_parts(parts: &Parts) -> Option<UserId> {
    parts
        .headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| UserId::new(s.trim()).ok())
}

/// Extractor that requires a caller identity.
#[derive(Debug, Clone)]
pub struct RequireUser(pub UserId);

/// Rejection for [`RequireUser`].
pub struct IdentityRequired;

impl IntoResponse for IdentityRequired {
    fn into_response(self) -> Response {
        let error = ErrorResponse::unauthorized("X-User-Id header is required");
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = IdentityRequired;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        user_from_parts(parts).map(RequireUser).ok_or(IdentityRequired)
    }
}

/// Extractor for an optional viewer; never rejects.
#[derive(Debug, Clone)]
pub struct OptionalViewer(pub Option<UserId>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalViewer
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalViewer(user_from_parts(parts)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(USER_ID_HEADER, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn require_user_reads_header() {
        let mut parts = parts(Some("student-7"));
        let RequireUser(user) = RequireUser::from_request_parts(&mut parts, &())
            .await
            .ok()
            .unwrap();
        assert_eq!(user.as_str(), "student-7");
    }

    #[tokio::test]
    async fn require_user_rejects_missing_header() {
        let mut parts = parts(None);
        let rejection = RequireUser::from_request_parts(&mut parts, &()).await.err().unwrap();
        assert_eq!(rejection.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn blank_header_is_anonymous() {
        let mut parts = parts(Some("   "));
        let OptionalViewer(viewer) = OptionalViewer::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(viewer.is_none());
    }
}
