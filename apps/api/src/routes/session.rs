use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::criteria::store::SessionId;
use crate::errors::AppError;

pub const SESSION_HEADER: &str = "x-session-id";
const MAX_SESSION_ID_LEN: usize = 128;

/// Reads the session from `X-Session-Id`. Requests without the header share the default session.
#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for SessionId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(SESSION_HEADER) else {
            return Ok(SessionId::default());
        };

        let value = header
            .to_str()
            .map_err(|_| AppError::Validation("invalid X-Session-Id header value".to_string()))?
            .trim();

        if value.is_empty() || value.len() > MAX_SESSION_ID_LEN {
            return Err(AppError::Validation(format!(
                "X-Session-Id must be 1-{MAX_SESSION_ID_LEN} characters"
            )));
        }

        Ok(SessionId::new(value))
    }
}
