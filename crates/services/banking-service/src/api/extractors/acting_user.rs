//! Acting user extractor.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use common::AppError;

/// Header carrying the id of the user an account operation is performed for
pub const ACTING_USER_HEADER: &str = "x-user-id";

/// Id of the user an account operation is performed for, taken from the
/// `X-User-Id` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActingUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for ActingUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(ACTING_USER_HEADER)
            .ok_or(AppError::MissingActingUser)?;

        header
            .to_str()
            .ok()
            .and_then(|value| Uuid::parse_str(value.trim()).ok())
            .map(ActingUser)
            .ok_or_else(|| AppError::bad_request("X-User-Id must be a UUID"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(header: Option<&str>) -> Result<ActingUser, AppError> {
        let mut request = Request::builder();
        if let Some(value) = header {
            request = request.header(ACTING_USER_HEADER, value);
        }
        let (mut parts, _) = request.body(()).unwrap().into_parts();
        ActingUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn reads_uuid_from_header() {
        let id = Uuid::new_v4();
        let acting = extract(Some(&id.to_string())).await.unwrap();
        assert_eq!(acting, ActingUser(id));
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let err = extract(None).await.unwrap_err();
        assert!(matches!(err, AppError::MissingActingUser));
    }

    #[tokio::test]
    async fn malformed_header_is_bad_request() {
        let err = extract(Some("not-a-uuid")).await.unwrap_err();
        assert_eq!(err.code(), "BAD_REQUEST");
    }
}
