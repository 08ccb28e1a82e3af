//! HTTP middleware stack for the public site.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers (CSP, frame and referrer policy)
//! 5. Rate limiting on `/api/events` (governor)
//!
//! The admin binary reuses these layers for its own router.

pub mod rate_limit;
pub mod request_id;
pub mod security_headers;

pub use rate_limit::{ClientIpKeyExtractor, RateLimiterLayer, api_rate_limiter, auth_rate_limiter};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
