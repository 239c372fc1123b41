//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{
    AuthContext, SessionContext, access_gate, require_access_token, require_refresh_session,
    require_roles, role_gate, session_gate,
};
pub use router::{auth_router, auth_router_generic};
