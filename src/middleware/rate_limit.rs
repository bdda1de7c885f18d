use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use crate::constants::SHARED_LIMITER_KEY;
use crate::error::AppError;
use crate::AppState;

/// Fixed-window rate limiting keyed by client IP
///
/// Requests without peer information (e.g. in-process tests) share one key.
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let key = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| SHARED_LIMITER_KEY.to_string());

    let now = Utc::now().timestamp();
    let remaining = state.limiter.check(&key, now)?;

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert("x-ratelimit-remaining", HeaderValue::from(remaining));

    Ok(response)
}
