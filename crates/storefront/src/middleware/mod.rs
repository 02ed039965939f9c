//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors)
//! 2. Request ID (add unique ID to each request)
//! 3. `TraceLayer` (request span carrying the ID)
//! 4. Session layer (tower-sessions with `MemoryStore`)
//! 5. Session expiry (drop the identity after an API 401)

pub mod auth;
pub mod context;
pub mod request_id;
pub mod session;
pub mod session_expiry;

pub use auth::{RequireAdmin, RequireSession, clear_auth_session, set_auth_session};
pub use context::PageContext;
pub use request_id::{make_request_span, request_id_middleware};
pub use session::create_session_layer;
pub use session_expiry::{SessionExpired, session_expiry_middleware};
