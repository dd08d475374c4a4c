//! # Middleware Module
//!
//! Rate limiting for the Toulmin HTTP API.
//!
//! The limit is a single global quota in requests per minute, taken from
//! `[server] rate_limit` or `TOULMIN_RATE_LIMIT`.

use crate::error::ErrorResponse;
use axum::{
    Json,
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Used when a zero quota reaches the limiter.
const DEFAULT_RPM: NonZeroU32 = NonZeroU32::MIN.saturating_add(99);

// =============================================================================
// RATE LIMITER
// =============================================================================

/// Global rate limiter type alias.
pub type GlobalRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Create a global limiter allowing `requests_per_minute`.
pub fn create_rate_limiter(requests_per_minute: u32) -> GlobalRateLimiter {
    let rpm = NonZeroU32::new(requests_per_minute).unwrap_or(DEFAULT_RPM);
    Arc::new(RateLimiter::direct(Quota::per_minute(rpm)))
}

/// Reject requests over quota with 429.
pub async fn rate_limit_middleware(
    State(limiter): State<GlobalRateLimiter>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match limiter.check() {
        Ok(()) => next.run(request).await,
        Err(_) => {
            tracing::warn!("Rate limit exceeded");
            (
                StatusCode::TOO_MANY_REQUESTS,
                Json(ErrorResponse::new(
                    "rate_limit_error",
                    "Too Many Requests",
                )),
            )
                .into_response()
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
