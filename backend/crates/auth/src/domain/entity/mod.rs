//! Entity Module

pub mod identity;
pub mod refresh_session;
