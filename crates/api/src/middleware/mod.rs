//! HTTP middleware components.

pub mod logging;
pub mod metrics;
pub mod trace_id;
pub mod user_auth;

pub use metrics::{metrics_handler, metrics_middleware};
pub use trace_id::trace_id;
pub use user_auth::require_user_auth;
