//! HTTP middleware stack for admin.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (shared with the site)
//! 4. Session layer (tower-sessions with `PostgreSQL` store)
//! 5. Security headers (shared with the site, so the preview's video may autoplay)
//! 6. Auth guard (`RequireAdminAuth` extractor on protected routes)
//! 7. Rate limiting on `POST /auth/login`

pub mod auth;
pub mod session;

pub use auth::{
    AdminAuthRejection, OptionalAdminAuth, RequireAdminAuth, clear_current_admin,
    set_current_admin,
};
pub use linkbio_site::middleware::{
    auth_rate_limiter, request_id_middleware, security_headers_middleware,
};
pub use session::create_session_layer;
