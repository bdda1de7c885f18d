use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::security::{verify_token, Claims};
use crate::AppState;

/// Authenticated identity extracted from the bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: String,
    pub role: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            role: claims.role,
        }
    }
}

/// Bearer token middleware for protected routes
///
/// Missing token: 401. Unreadable token or one that fails signature or
/// expiry checks: 400.
/// On success the caller's `AuthUser` is available as a request extension.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(request.headers())?;

    let claims = verify_token(&token, &state.config.jwt_secret).map_err(|e| {
        tracing::warn!("Rejected bearer token: {}", e);
        AppError::InvalidToken
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Token from `Authorization: Bearer <token>`
///
/// A header without the `Bearer ` prefix is taken as the raw token and left
/// for verification to reject. A header that is present but not visible
/// ASCII is a malformed token, not a missing one.
fn extract_token(headers: &HeaderMap) -> Result<String, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AppError::NoToken)?
        .to_str()
        .map_err(|_| AppError::InvalidToken)?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();

    if token.is_empty() {
        Err(AppError::NoToken)
    } else {
        Ok(token.to_string())
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
    fn test_extract_bearer_token() {
        assert_eq!(
            extract_token(&headers_with("Bearer abc.def.ghi")).unwrap(),
            "abc.def.ghi"
        );
    }

    #[test]
    fn test_extract_missing_or_empty() {
        assert!(matches!(
            extract_token(&HeaderMap::new()),
            Err(AppError::NoToken)
        ));
        assert!(matches!(
            extract_token(&headers_with("Bearer ")),
            Err(AppError::NoToken)
        ));
        assert!(matches!(
            extract_token(&headers_with("Bearer    ")),
            Err(AppError::NoToken)
        ));
    }

    #[test]
    fn test_extract_raw_token() {
        assert_eq!(extract_token(&headers_with("abc.def.ghi")).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_extract_non_ascii_header_is_invalid() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xff\xfe").unwrap(),
        );

        assert!(matches!(
            extract_token(&headers),
            Err(AppError::InvalidToken)
        ));
    }
}
